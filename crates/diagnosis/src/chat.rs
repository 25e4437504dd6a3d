use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Two-value language selector carried on every chat request.
///
/// The service localizes its replies with this field, and the UI keys its
/// fixed string tables on it. Serialized as `"en"` / `"hi"` on the wire and
/// in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Returns the wire code for this language.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Returns the other language of the pair.
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Hi,
            Self::Hi => Self::En,
        }
    }
}

/// Request body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: Language,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: Language) -> Self {
        Self {
            message: message.into(),
            language,
        }
    }
}

/// Success body returned by the chat endpoint.
///
/// A response that deserializes is rendered verbatim; a body without a usable
/// `reply` field is a [`DiagnosisError::MalformedReply`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type DiagnosisResult<T> = Result<T, DiagnosisError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DiagnosisError {
    #[snafu(display("chat request failed on `{stage}`: {source}"))]
    RequestFailed {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("chat endpoint returned status {status}"))]
    ErrorStatus { stage: &'static str, status: u16 },
    #[snafu(display("chat reply body could not be parsed on `{stage}`: {source}"))]
    MalformedReply {
        stage: &'static str,
        source: reqwest::Error,
    },
}

/// Seam between the conversation UI and the remote service.
///
/// One call per user turn; the future resolves exactly once with either a
/// reply or an error. No retries happen at this layer.
pub trait DiagnosisBackend: Send + Sync {
    fn send_chat(&self, request: ChatRequest) -> BoxFuture<'static, DiagnosisResult<ChatReply>>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn language_codes_match_the_wire_contract() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Hi.code(), "hi");
        assert_eq!(Language::En.toggled(), Language::Hi);
        assert_eq!(Language::Hi.toggled(), Language::En);
    }

    #[test]
    fn chat_request_serializes_message_and_language() {
        let request = ChatRequest::new("my tomato leaves have spots", Language::Hi);
        let value = serde_json::to_value(&request).expect("request must serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "message": "my tomato leaves have spots",
                "language": "hi",
            })
        );
    }

    #[test]
    fn chat_reply_parses_the_reply_field() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply":"Apply neem oil."}"#).expect("reply must parse");
        assert_eq!(reply.reply, "Apply neem oil.");
    }

    #[test]
    fn chat_reply_without_reply_field_is_rejected() {
        let parsed = serde_json::from_str::<ChatReply>(r#"{"answer":"nope"}"#);
        assert!(parsed.is_err());
    }

    struct CannedBackend {
        reply: &'static str,
    }

    impl DiagnosisBackend for CannedBackend {
        fn send_chat(
            &self,
            _request: ChatRequest,
        ) -> BoxFuture<'static, DiagnosisResult<ChatReply>> {
            let reply = self.reply.to_string();
            Box::pin(async move { Ok(ChatReply { reply }) })
        }
    }

    #[test]
    fn backend_seam_is_object_safe_and_resolves_once() {
        let backend: Arc<dyn DiagnosisBackend> = Arc::new(CannedBackend {
            reply: "Apply neem oil.",
        });

        let request = ChatRequest::new("what is wrong with my rose bush", Language::En);
        let reply = futures::executor::block_on(backend.send_chat(request))
            .expect("canned backend never fails");
        assert_eq!(reply.reply, "Apply neem oil.");
    }
}
