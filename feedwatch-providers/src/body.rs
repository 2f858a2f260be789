//! Response body decoding shared by the platform integrations.
//!
//! Every platform answers with a JSON object. Bodies are read fully, then
//! decoded; anything that is not an object counts as a parse failure.

use feedwatch_core::FailureKind;
use reqwest::Response;
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded JSON object body.
pub type JsonObject = Map<String, Value>;

/// Failure while turning a response into a JSON object.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body could not be read.
    #[error("Failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The body is not a JSON object.
    #[error("Failed to parse response JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ResponseError {
    /// Report classification for this failure.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Read(_) => FailureKind::ReadResponse,
            Self::Parse(_) => FailureKind::ParseJson,
        }
    }
}

/// Reads `response` to the end and decodes it as a JSON object.
pub(crate) async fn read_object(response: Response) -> Result<JsonObject, ResponseError> {
    let body = response.text().await.map_err(ResponseError::Read)?;
    parse_object(&body)
}

/// Decodes `body` as a JSON object.
pub(crate) fn parse_object(body: &str) -> Result<JsonObject, ResponseError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object() {
        let obj = parse_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(obj["a"], 1);
    }

    #[test]
    fn test_non_object_is_parse_error() {
        for body in ["[1, 2]", "42", "\"text\"", "", "{"] {
            let err = parse_object(body).unwrap_err();
            assert_eq!(err.failure_kind(), FailureKind::ParseJson, "body {body:?}");
        }
    }
}
