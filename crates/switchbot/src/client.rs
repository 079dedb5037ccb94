use reqwest::{Method, StatusCode, Url};

use tracing::debug;

use crate::auth::{Credentials, Signer};
use crate::error::{Error, ErrorKind, Result};
use crate::response::ResponseBody;

/// The default `SwitchBot` cloud API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.switch-bot.com/v1.1";

// Header names defined by the SwitchBot authentication scheme.
const HEADER_AUTHORIZATION: &str = "Authorization";
const HEADER_TIMESTAMP: &str = "t";
const HEADER_SIGN: &str = "sign";
const HEADER_NONCE: &str = "nonce";

/// A client for the `SwitchBot` cloud API.
///
/// A client owns its [`Signer`] and its `HTTP` transport. The
/// credentials are read-only for the client's whole lifetime, so a
/// single instance can be shared across concurrent tasks: every call
/// signs itself with a fresh nonce and timestamp and opens its own
/// connection.
///
/// The main functionalities include:
///
/// - Joining a route onto the configured base endpoint to form the
///   request URL.
/// - Attaching the signed credential headers to every outgoing request.
/// - Validating the `HTTP` status code and handing the open response
///   body back to the caller for decoding.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
    signer: Signer,
}

impl Client {
    /// Creates a [`Client`] from the token and secret key of a vendor
    /// account, pointed at the default endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::with_signer(Signer::new(Credentials::new(token, secret_key)))
    }

    /// Creates a [`Client`] from an already configured [`Signer`].
    ///
    /// This method is useful when a test needs to fix the nonce source
    /// of the signer.
    #[must_use]
    pub fn with_signer(signer: Signer) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            signer,
        }
    }

    /// Replaces the base endpoint while constructing a [`Client`].
    ///
    /// # Errors
    ///
    /// An error is returned if the given endpoint is not a valid
    /// absolute URL.
    pub fn endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.endpoint = Url::parse(endpoint).map_err(|e| {
            Error::new(
                ErrorKind::InvalidUrl,
                format!("Invalid endpoint `{endpoint}`: {e}"),
            )
        })?;
        Ok(self)
    }

    /// Replaces the `HTTP` transport while constructing a [`Client`].
    ///
    /// Every instance owns its transport, therefore deadlines and
    /// connection pooling are configured on the injected client without
    /// interfering with other instances.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Executes one authenticated call against the API.
    ///
    /// The request is signed with a fresh credential header set and
    /// sent exactly once, without retries. On success, the open
    /// response body is handed back untouched and its ownership
    /// transfers to the caller.
    ///
    /// Dropping the returned future aborts the in-flight request;
    /// deadlines come from the timeouts configured on the injected
    /// `HTTP` transport.
    ///
    /// # Errors
    ///
    /// - The base endpoint and the given route cannot be joined into a
    ///   valid URL.
    /// - The method and URL cannot form a valid `HTTP` request.
    /// - A network failure occurs while sending: name resolution,
    ///   connection, `TLS`, timeout, or cancellation.
    /// - The server replies with an `HTTP` status other than `200 OK`.
    ///   The body is discarded without being parsed.
    pub async fn execute(&self, method: Method, path: &str) -> Result<ResponseBody> {
        let url = self.join_endpoint(path)?;
        let headers = self.signer.sign();

        let request = self
            .http
            .request(method, url.clone())
            .header(HEADER_AUTHORIZATION, headers.authorization.as_str())
            .header(HEADER_TIMESTAMP, headers.timestamp.as_str())
            .header(HEADER_SIGN, headers.sign.as_str())
            .header(HEADER_NONCE, headers.nonce.as_str())
            .build()
            .map_err(|e| {
                Error::new(
                    ErrorKind::Request,
                    format!("Failed to create the HTTP request: {e}"),
                )
            })?;

        debug!("Sending {} request to `{url}`", request.method());

        let response = self.http.execute(request).await.map_err(|e| {
            Error::new(
                ErrorKind::Transport,
                format!("Failed to send the HTTP request: {e}"),
            )
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::unexpected_status(status.as_u16()));
        }

        Ok(ResponseBody::new(response))
    }

    // Joins a route onto the base endpoint segment by segment, so that
    // a base carrying a path of its own keeps every segment and no
    // double slash is produced.
    fn join_endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                Error::new(
                    ErrorKind::InvalidUrl,
                    format!("The endpoint `{}` cannot carry path segments.", self.endpoint),
                )
            })?;
            let _ = segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        Ok(url)
    }
}
