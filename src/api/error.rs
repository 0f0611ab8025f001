use async_trait::async_trait;
use reqwest::Response;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short text for a toast; the server's `{"error": ...}` message when present
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| self.to_string()),
            ApiError::Network(_) => "Сервер недоступен".to_string(),
            ApiError::Decode(_) => self.to_string(),
        }
    }
}

// Browser responses are not `Send`
#[async_trait(?Send)]
pub trait ResponseExt {
    async fn map_api_error(self) -> Result<Response, ApiError>;
}

#[async_trait(?Send)]
impl ResponseExt for Response {
    async fn map_api_error(self) -> Result<Response, ApiError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            body: self.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait(?Send)]
impl ResponseExt for Result<Response, reqwest::Error> {
    async fn map_api_error(self) -> Result<Response, ApiError> {
        match self {
            Ok(response) => response.map_api_error().await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_error() {
        let err = ApiError::Status {
            status: 400,
            body: r#"{"error":"Invalid input: item name is required"}"#.to_string(),
        };
        assert_eq!(err.user_message(), "Invalid input: item name is required");

        let err = ApiError::Status { status: 502, body: "Bad Gateway".to_string() };
        assert_eq!(err.user_message(), "request failed with status 502: Bad Gateway");
    }
}
