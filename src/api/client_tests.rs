//! Tests for `ReqwestClient`.
//!
//! These focus on construction; the request path is exercised against an
//! unresolvable host only.

use super::*;
use std::time::Duration;

mod reqwest_client {
    use super::*;

    #[test]
    fn with_timeout_creates_client() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(10)).unwrap();
        let debug = format!("{client:?}");

        assert!(debug.contains("ReqwestClient"));
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(10)).unwrap();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let req = HttpRequest::get(url);

        let result = client.request(req).await;

        // Behind a proxy the failure may surface as an error response instead.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
