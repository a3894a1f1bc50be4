//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [server]
            url = "https://hs.example.com"
            api_key = "secret"
            namespace = "home"

            [output]
            hosts_file = "/etc/hosts.d/tailnet"
            domain_suffix = ".ts.net"

            [poll]
            check_interval = "30s"
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.server.url.as_deref(), Some("https://hs.example.com"));
        assert_eq!(config.server.api_key.as_deref(), Some("secret"));
        assert_eq!(config.server.namespace.as_deref(), Some("home"));
        assert_eq!(
            config.output.hosts_file.as_deref(),
            Some("/etc/hosts.d/tailnet")
        );
        assert_eq!(config.output.domain_suffix.as_deref(), Some(".ts.net"));
        assert_eq!(config.poll.check_interval.as_deref(), Some("30s"));
    }

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.server.url.is_none());
        assert!(config.output.hosts_file.is_none());
        assert!(config.poll.check_interval.is_none());
    }

    #[test]
    fn rejects_unknown_section() {
        let result = TomlConfig::parse("[webhook]\nurl = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        let result = TomlConfig::parse("[server]\ntoken = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_wrong_type() {
        let result = TomlConfig::parse("[poll]\ncheck_interval = 60\n");
        assert!(result.is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.poll.check_interval.as_deref(), Some("1m"));
        assert!(config.server.url.is_none());
    }

    #[test]
    fn default_template_mentions_every_env_variable() {
        let template = default_config_template();

        for name in [
            "HEADSCALE2HOSTS_SERVER_URL",
            "HEADSCALE2HOSTS_API_KEY",
            "HEADSCALE2HOSTS_NAMESPACE",
            "HEADSCALE2HOSTS_HOSTS_FILE",
            "HEADSCALE2HOSTS_DOMAIN_SUFFIX",
            "HEADSCALE2HOSTS_CHECK_INTERVAL",
        ] {
            assert!(template.contains(name), "template should mention {name}");
        }
    }
}
