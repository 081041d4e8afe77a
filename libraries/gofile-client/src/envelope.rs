//! Response envelope decoding.
//!
//! Every Gofile reply has the shape `{"status": "...", "data": ...}`. The
//! status decides success; `data` is only interpreted once the status is
//! `"ok"`.

use crate::error::{GofileError, Result, StatusError};
use reqwest::RequestBuilder;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A decoded `{status, data}` envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Response<T = serde_json::Value> {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: T,
}

impl<T> Response<T> {
    /// Whether the envelope reported success.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// The payload on success, the mapped status error otherwise.
    pub fn into_result(self) -> Result<T> {
        match StatusError::from_status(&self.status) {
            None => Ok(self.data),
            Some(error) => Err(error.into()),
        }
    }
}

impl Response {
    /// Check the status, then coerce the payload into `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        let data = self.into_result()?;
        serde_json::from_value(data)
            .map_err(|e| GofileError::ParseError(format!("Unexpected response data: {}", e)))
    }
}

/// Decode a raw reply body into its payload.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let envelope: Response = serde_json::from_slice(body)
        .map_err(|e| GofileError::ParseError(format!("Invalid response envelope: {}", e)))?;
    envelope.into_data()
}

/// Attach the bearer token when the client has one.
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> GofileError {
    if e.is_connect() || e.is_timeout() {
        GofileError::ServerUnreachable(e.to_string())
    } else {
        GofileError::Request(e)
    }
}

/// Send a request and decode its envelope into `T`.
///
/// A non-2xx reply is still decoded when its body is an envelope, so the
/// status taxonomy wins over the HTTP code. Only an unparsable non-2xx body
/// becomes [`GofileError::ServerError`].
pub(crate) async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;

    debug!(status = %status, bytes = body.len(), "Received response");

    match serde_json::from_slice::<Response>(&body) {
        Ok(envelope) => envelope.into_data(),
        Err(e) if status.is_success() => Err(GofileError::ParseError(format!(
            "Invalid response envelope: {}",
            e
        ))),
        Err(_) => Err(GofileError::ServerError {
            status: status.as_u16(),
            message: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}

/// Like [`execute`] for calls whose payload carries nothing of interest.
pub(crate) async fn execute_empty(request: RequestBuilder) -> Result<()> {
    execute::<IgnoredAny>(request).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: String,
        count: u32,
    }

    #[test]
    fn test_ok_returns_data_unchanged() {
        let body = json!({"status": "ok", "data": {"id": "abc", "count": 3}}).to_string();
        let payload: Payload = decode(body.as_bytes()).unwrap();
        assert_eq!(
            payload,
            Payload {
                id: "abc".into(),
                count: 3
            }
        );
    }

    #[test]
    fn test_ok_with_raw_value() {
        let data = json!({"nested": [1, 2, {"x": null}]});
        let body = json!({"status": "ok", "data": data.clone()}).to_string();
        let value: serde_json::Value = decode(body.as_bytes()).unwrap();
        assert_eq!(value, data);
    }

    #[test]
    fn test_known_status_maps_to_error() {
        let body = json!({"status": "error-notPremium", "data": {}}).to_string();
        let err = decode::<serde_json::Value>(body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            GofileError::Status(StatusError::PremiumRequired)
        ));
    }

    #[test]
    fn test_unknown_status_is_wrapped() {
        let body = json!({"status": "error-somethingNew", "data": {}}).to_string();
        let err = decode::<serde_json::Value>(body.as_bytes()).unwrap_err();
        match err {
            GofileError::Status(StatusError::UnknownStatus(raw)) => {
                assert_eq!(raw, "error-somethingNew");
            }
            e => panic!("Expected UnknownStatus, got: {:?}", e),
        }
    }

    #[test]
    fn test_empty_and_missing_status() {
        let empty = json!({"status": "", "data": {}}).to_string();
        let missing = json!({"data": {}}).to_string();

        for body in [empty, missing] {
            let err = decode::<serde_json::Value>(body.as_bytes()).unwrap_err();
            assert!(matches!(err, GofileError::Status(StatusError::EmptyStatus)));
        }
    }

    #[test]
    fn test_error_status_ignores_data_shape() {
        // Error replies often omit or null the payload.
        let body = json!({"status": "error-notFound", "data": null}).to_string();
        let err = decode::<Payload>(body.as_bytes()).unwrap_err();
        assert!(matches!(err, GofileError::Status(StatusError::NotFound)));
    }

    #[test]
    fn test_mismatched_data_is_parse_error() {
        let body = json!({"status": "ok", "data": {"id": 5}}).to_string();
        let err = decode::<Payload>(body.as_bytes()).unwrap_err();
        assert!(matches!(err, GofileError::ParseError(_)));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err = decode::<serde_json::Value>(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GofileError::ParseError(_)));
    }

    #[test]
    fn test_ignored_payload() {
        let body = json!({"status": "ok", "data": {}}).to_string();
        assert!(decode::<IgnoredAny>(body.as_bytes()).is_ok());

        let body = json!({"status": "ok"}).to_string();
        assert!(decode::<IgnoredAny>(body.as_bytes()).is_ok());
    }

    #[test]
    fn test_response_helpers() {
        let response = Response {
            status: "ok".to_string(),
            data: 7,
        };
        assert!(response.is_ok());
        assert_eq!(response.into_result().unwrap(), 7);

        let response = Response {
            status: "error-token".to_string(),
            data: 0,
        };
        assert!(!response.is_ok());
        assert!(matches!(
            response.into_result(),
            Err(GofileError::Status(StatusError::TokenMissing))
        ));
    }
}
