use serde::Deserialize;
use serde::de::DeserializeOwned;

use reqwest::Response as ReqwestResponse;

use crate::error::{Error, ErrorKind, Result};

async fn json_response<T>(response: ReqwestResponse) -> Result<T>
where
    T: DeserializeOwned,
{
    response
        .json::<T>()
        .await
        .map_err(|e| Error::new(ErrorKind::JsonResponse, format!("Json error caused by {e}")))
}

/// The wrapper shape shared by every `SwitchBot` endpoint response.
///
/// The vendor-level [`status_code`](Self::status_code) inside the
/// envelope is distinct from the `HTTP` status code. The client
/// enforces only the `HTTP`-layer status and surfaces the vendor code
/// untouched, leaving its interpretation to the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Vendor success or failure signal.
    pub status_code: i64,
    /// Human-readable vendor message.
    pub message: String,
    /// Endpoint-specific payload.
    pub body: T,
}

/// An open, exactly-once-readable response body.
///
/// The body is positioned at the start of the payload and bound to the
/// underlying connection. Consuming it, or dropping it unread, releases
/// the connection.
#[derive(Debug)]
pub struct ResponseBody(ReqwestResponse);

impl ResponseBody {
    /// Parses the response body as a JSON document of the given type.
    ///
    /// # Errors
    ///
    /// If the response body does not contain a valid JSON document for
    /// the requested type, a parsing error will be raised. This may
    /// occur due to an incorrect format or because the data contains
    /// syntactic or semantic errors.
    pub async fn parse_body<T: DeserializeOwned>(self) -> Result<T> {
        json_response::<T>(self.0).await
    }

    /// Opens a bytes stream over the response body for callers that
    /// decode incrementally.
    ///
    /// # Errors
    ///
    /// Byte stream reads may fail due to network errors or data
    /// corruption.
    #[cfg(feature = "stream")]
    pub fn bytes_stream(self) -> impl futures_util::Stream<Item = Result<bytes::Bytes>> {
        use futures_util::TryStreamExt;
        self.0.bytes_stream().map_err(|e| {
            Error::new(ErrorKind::Transport, format!("Stream error caused by {e}"))
        })
    }

    pub(crate) const fn new(response: ReqwestResponse) -> Self {
        Self(response)
    }
}
