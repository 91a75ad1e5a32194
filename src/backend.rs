use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ChatRequest {
    message: String,
}

/// HTTP client for the MediBot backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST one user message to `{base}/chat` and return the reply text.
    ///
    /// `Ok(None)` means the backend answered but the body carried no usable
    /// `reply` string (missing, empty, or the wrong type). Transport
    /// problems, error statuses and unparseable bodies come back as `Err`.
    pub async fn send_message(&self, message: &str) -> Result<Option<String>> {
        let url = format!("{}/chat", self.base_url);

        let request = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "chat request failed with status: {}",
                response.status()
            ));
        }

        let body: Value = response.json().await?;
        let reply = body
            .get("reply")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message_returns_reply() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({ "message": "aspirin" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "reply": "Take with food." })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        let reply = client.send_message("aspirin").await.unwrap();
        assert_eq!(reply.as_deref(), Some("Take with food."));
    }

    #[tokio::test]
    async fn test_send_message_missing_reply_field() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        let reply = client.send_message("aspirin").await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_send_message_empty_reply_counts_as_missing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "" })))
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        let reply = client.send_message("aspirin").await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_send_message_non_string_reply_counts_as_missing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": 42 })))
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        let reply = client.send_message("aspirin").await.unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_send_message_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        assert!(client.send_message("aspirin").await.is_err());
    }

    #[tokio::test]
    async fn test_send_message_body_not_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
            .mount(&mock_server)
            .await;

        let client = BackendClient::new(&mock_server.uri());
        assert!(client.send_message("aspirin").await.is_err());
    }

    #[tokio::test]
    async fn test_send_message_connection_refused() {
        // Grab a free port, then shut the server down so nothing listens.
        let mock_server = MockServer::start().await;
        let url = mock_server.uri();
        drop(mock_server);

        let client = BackendClient::new(&url);
        assert!(client.send_message("aspirin").await.is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
