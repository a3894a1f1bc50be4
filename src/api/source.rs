//! Machine source trait and the Headscale HTTP implementation.

use http::HeaderValue;
use http::header::{ACCEPT, AUTHORIZATION};
use url::Url;

use super::{FetchError, HttpClient, HttpRequest, MachineList};

/// Path of the machine listing endpoint, relative to the server URL.
pub const MACHINES_PATH: &str = "/api/v1/machine";

/// Trait for retrieving the current machine list.
///
/// Abstracts the registry so the poller can be driven by a mock in tests.
pub trait MachineSource: Send + Sync {
    /// Fetches every machine of the configured namespace.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, non-success status,
    /// or an undecodable body.
    fn fetch_machines(
        &self,
    ) -> impl std::future::Future<Output = Result<MachineList, FetchError>> + Send;
}

/// Headscale REST client for the machine listing endpoint.
///
/// Issues `GET {server}/api/v1/machine?namespace={namespace}` with a
/// bearer token.
///
/// # Example
///
/// ```
/// use headscale2hosts::api::{HeadscaleApi, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// let client = ReqwestClient::with_timeout(Duration::from_secs(10)).unwrap();
/// let api = HeadscaleApi::new(
///     client,
///     &Url::parse("https://headscale.example.com").unwrap(),
///     "default",
///     "secret",
/// )
/// .unwrap();
/// assert_eq!(
///     api.endpoint().as_str(),
///     "https://headscale.example.com/api/v1/machine?namespace=default"
/// );
/// ```
#[derive(Debug)]
pub struct HeadscaleApi<H> {
    client: H,
    endpoint: Url,
    authorization: HeaderValue,
}

impl<H> HeadscaleApi<H> {
    /// Creates a client for `namespace` on `server_url`.
    ///
    /// The endpoint is the server URL text with [`MACHINES_PATH`] appended,
    /// so a server URL with a path prefix keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the joined URL does not parse,
    /// or [`FetchError::InvalidApiKey`] if the key is not a valid header value.
    pub fn new(
        client: H,
        server_url: &Url,
        namespace: &str,
        api_key: &str,
    ) -> Result<Self, FetchError> {
        let base = server_url.as_str().trim_end_matches('/');
        let mut endpoint = Url::parse(&format!("{base}{MACHINES_PATH}"))?;
        endpoint
            .query_pairs_mut()
            .clear()
            .append_pair("namespace", namespace);

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(FetchError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        Ok(Self {
            client,
            endpoint,
            authorization,
        })
    }

    /// Returns the fully built machine listing URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    fn build_request(&self) -> HttpRequest {
        HttpRequest::get(self.endpoint.clone())
            .with_header(AUTHORIZATION, self.authorization.clone())
            .with_header(ACCEPT, HeaderValue::from_static("application/json"))
    }
}

impl<H: HttpClient> MachineSource for HeadscaleApi<H> {
    async fn fetch_machines(&self) -> Result<MachineList, FetchError> {
        let response = self
            .client
            .request(self.build_request())
            .await
            .map_err(|source| FetchError::Http {
                url: self.endpoint.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: self.endpoint.clone(),
                status: response.status,
                body: response.body_lossy(),
            });
        }

        tracing::debug!(
            "Received {} byte(s) from {}",
            response.body.len(),
            self.endpoint
        );

        Ok(MachineList::from_json(&response.body)?)
    }
}
