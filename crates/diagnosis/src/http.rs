use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use snafu::ResultExt;

use crate::chat::{
    BoxFuture, ChatReply, ChatRequest, DiagnosisBackend, DiagnosisResult, ErrorStatusSnafu,
    MalformedReplySnafu, RequestFailedSnafu,
};

/// Endpoint the original deployment serves the chat API from.
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Transport-level ceiling; the conversation core itself enforces no timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Reqwest-backed implementation of [`DiagnosisBackend`].
///
/// Cloning is cheap; all instances share one pooled client.
#[derive(Debug, Clone)]
pub struct HttpDiagnosisBackend {
    http: Client,
    endpoint: String,
}

impl HttpDiagnosisBackend {
    /// Builds a backend for `endpoint`, falling back to
    /// [`DEFAULT_CHAT_ENDPOINT`] when the value is blank.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            endpoint: normalize_endpoint(&endpoint.into()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.endpoint)
    }

    async fn post_chat(
        http: Client,
        url: String,
        request: ChatRequest,
    ) -> DiagnosisResult<ChatReply> {
        let response = http
            .post(&url)
            .json(&request)
            .send()
            .await
            .context(RequestFailedSnafu { stage: "send-chat" })?;

        let status = response.status();
        if !status.is_success() {
            return ErrorStatusSnafu {
                stage: "chat-http-status",
                status: status.as_u16(),
            }
            .fail();
        }

        response
            .json::<ChatReply>()
            .await
            .context(MalformedReplySnafu {
                stage: "parse-chat-reply",
            })
    }
}

impl DiagnosisBackend for HttpDiagnosisBackend {
    fn send_chat(&self, request: ChatRequest) -> BoxFuture<'static, DiagnosisResult<ChatReply>> {
        let http = self.http.clone();
        let url = self.chat_url();

        tracing::debug!(
            url = %url,
            language = request.language.code(),
            "dispatching chat request"
        );

        Box::pin(async move { Self::post_chat(http, url, request).await })
    }
}

/// Trims whitespace and trailing slashes so URL joining stays predictable.
fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_CHAT_ENDPOINT.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_endpoint_falls_back_to_default() {
        assert_eq!(normalize_endpoint(""), DEFAULT_CHAT_ENDPOINT);
        assert_eq!(normalize_endpoint("   "), DEFAULT_CHAT_ENDPOINT);
    }

    #[test]
    fn endpoint_is_trimmed_and_stripped_of_trailing_slashes() {
        assert_eq!(
            normalize_endpoint(" http://10.0.0.7:5000// "),
            "http://10.0.0.7:5000"
        );
    }

    #[test]
    fn chat_url_appends_the_chat_route_exactly_once() {
        let backend = HttpDiagnosisBackend::new("http://127.0.0.1:5000/");
        assert_eq!(backend.chat_url(), "http://127.0.0.1:5000/chat");
    }
}
