//! Thin JSON client over `reqwest`.
//!
//! Every call takes a [`CancellationToken`]; a cancelled token aborts the
//! in-flight request and yields [`ConsoleError::Cancelled`]. Responses are
//! unwrapped from the `{success, data, message}` envelope when present.

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ums_config::ApiConfig;
use ums_core::envelope::{decode_payload, error_message};
use ums_core::errors::ConsoleError;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ConsoleError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConsoleError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ConsoleError> {
        let body = self.send(Method::GET, path, None, cancel).await?;
        decode_payload(body)
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        payload: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ConsoleError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::POST, path, Some(encode(payload)?), cancel)
            .await?;
        decode_payload(body)
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        payload: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ConsoleError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .send(Method::PUT, path, Some(encode(payload)?), cancel)
            .await?;
        decode_payload(body)
    }

    /// Issues a DELETE and discards any payload.
    pub async fn delete(&self, path: &str, cancel: &CancellationToken) -> Result<(), ConsoleError> {
        let body = self.send(Method::DELETE, path, None, cancel).await?;
        ums_core::unwrap_envelope(body).map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        cancel: &CancellationToken,
    ) -> Result<Value, ConsoleError> {
        if cancel.is_cancelled() {
            return Err(ConsoleError::Cancelled);
        }

        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(payload) = payload {
            request = request.json(&payload);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(method = %method, url = %url, "Request cancelled");
                return Err(ConsoleError::Cancelled);
            }
            result = exchange => result.map_err(|e| {
                warn!(method = %method, url = %url, error = %e, "Request failed");
                transport_error(e)
            })?,
        };

        let body = parse_body(&text);

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| reason(status));
            warn!(
                method = %method,
                url = %url,
                status = %status.as_u16(),
                message = %message,
                "Backend returned an error"
            );
            return Err(ConsoleError::from_status(status.as_u16(), message));
        }

        debug!(method = %method, url = %url, status = %status.as_u16(), "Request completed");
        Ok(body)
    }
}

fn encode<B: Serialize + ?Sized>(payload: &B) -> Result<Value, ConsoleError> {
    serde_json::to_value(payload)
        .map_err(|e| ConsoleError::Validation(format!("Could not encode request: {}", e)))
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unexpected status")
        .to_string()
}

fn transport_error(err: reqwest::Error) -> ConsoleError {
    if err.is_timeout() {
        ConsoleError::Transport("Request timed out".to_string())
    } else if err.is_connect() {
        ConsoleError::Transport("Could not reach the server".to_string())
    } else {
        ConsoleError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), json!({"a": 1}));
        assert_eq!(parse_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ApiConfig::default().with_base_url("http://localhost:9999/api/");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/api");
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result: Result<Value, _> = client.get("/ums", &cancel).await;
        assert_eq!(result.unwrap_err(), ConsoleError::Cancelled);
    }
}
