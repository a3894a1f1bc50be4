//! Tests for the run module.

use super::*;
use headscale2hosts::config::{Cli, EnvConfig, var};
use std::time::Duration;

fn make_test_config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["headscale2hosts"];
    full_args.extend(args);
    let cli = Cli::parse_from_iter(full_args);
    let env = EnvConfig::from_vars([
        (var::SERVER_URL, "https://hs.example.com/"),
        (var::API_KEY, "secret"),
        (var::NAMESPACE, "home"),
    ]);
    ValidatedConfig::from_raw(&cli, &env, None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn client_error_displays_source() {
        let error = RunError::Client(HttpError::Build("no TLS backend".to_string()));

        assert!(error.to_string().contains("Failed to create HTTP client"));
        assert!(error.to_string().contains("no TLS backend"));
    }

    #[test]
    fn cycle_error_displays_source() {
        let fetch = FetchError::Http {
            url: url::Url::parse("https://hs.example.com/").unwrap(),
            source: HttpError::Timeout,
        };
        let error = RunError::Cycle(CycleError::Fetch(fetch));

        assert!(error.to_string().contains("failed to get machines"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::Client(HttpError::Timeout);
        assert!(format!("{error:?}").contains("Client"));
    }
}

mod create_poller {
    use super::*;

    #[test]
    fn builds_endpoint_from_config() {
        let poller = create_poller(&make_test_config(&[])).unwrap();

        assert_eq!(
            poller_endpoint(&poller),
            "https://hs.example.com/api/v1/machine?namespace=home"
        );
    }

    #[test]
    fn uses_configured_interval_and_suffix() {
        let config = make_test_config(&["--check-interval", "90s", "--domain-suffix", ".ts.net"]);
        let poller = create_poller(&config).unwrap();

        assert_eq!(poller.interval(), Duration::from_secs(90));
        assert_eq!(poller.domain_suffix(), ".ts.net");
    }

    #[test]
    fn writes_to_configured_hosts_file() {
        let config = make_test_config(&["--hosts-file", "/tmp/headscale-hosts"]);
        let poller = create_poller(&config).unwrap();

        assert_eq!(
            poller.sink().path(),
            std::path::Path::new("/tmp/headscale-hosts")
        );
    }
}
