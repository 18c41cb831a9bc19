//! HTTP client for the project configuration endpoint

use dockhand_core::ProjectConfigPayload;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Submission errors
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server rejected configuration ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Client for the "submit project configuration" endpoint.
pub struct SubmitClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SubmitClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SubmitError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Dockhand/1.0")
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Perform the single remote write of the assembled document.
    ///
    /// Exactly one POST per call, no retry, no backoff. Any non-success
    /// status or transport failure comes back as an error; the whole
    /// attempt either succeeds or fails, there is no partial application.
    pub async fn submit_project(&self, payload: &ProjectConfigPayload) -> Result<(), SubmitError> {
        let url = format!("{}/api/project", self.base_url);
        let body = serde_json::to_string(payload)?;

        debug!(%url, project = %payload.project_name, "submitting project configuration");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand_core::{GitConfig, NginxConfig, ProjectId, ProxyLocation};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_payload() -> ProjectConfigPayload {
        ProjectConfigPayload {
            build_configs: vec![],
            git_config: GitConfig {
                repository_url: "https://git.example.com/acme/shop.git".to_string(),
                branch: "main".to_string(),
                access_token: None,
            },
            nginx_config: NginxConfig {
                domains: vec!["example.com".to_string()],
                locations: vec![
                    ProxyLocation::with_route("/api/", "http://127.0.0.1:8081"),
                    ProxyLocation::with_route("/ws/", "http://127.0.0.1:8082"),
                ],
                ..NginxConfig::default()
            },
            project_name: "shop".to_string(),
            project_id: ProjectId(7),
        }
    }

    #[tokio::test]
    async fn submit_posts_document_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/project"))
            .and(header("Content-Type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "projectName": "shop",
                "projectId": 7,
                "nginxConfig": {
                    "locations": [
                        { "location": "/api/", "url": "http://127.0.0.1:8081" },
                        { "location": "/ws/", "url": "http://127.0.0.1:8082" }
                    ]
                }
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SubmitClient::new(mock_server.uri()).unwrap();
        client.submit_project(&sample_payload()).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/project"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = SubmitClient::new(mock_server.uri()).unwrap();
        let err = client.submit_project(&sample_payload()).await.unwrap_err();
        match err {
            SubmitError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Port 9 (discard) is never serving HTTP.
        let client = SubmitClient::new("http://127.0.0.1:9").unwrap();
        let err = client.submit_project(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Http(_)));
    }
}
