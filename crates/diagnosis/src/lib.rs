#![deny(unsafe_code)]

/// Client seam for the remote plant-disease diagnosis/chat service.
///
/// The service exposes one request/response endpoint (`POST {endpoint}/chat`).
/// This crate owns the wire contract, the backend trait the UI talks through,
/// and the reqwest-based implementation of that trait.
pub mod chat;
pub mod http;

pub use chat::{
    BoxFuture, ChatReply, ChatRequest, DiagnosisBackend, DiagnosisError, DiagnosisResult, Language,
};
pub use http::{DEFAULT_CHAT_ENDPOINT, HttpDiagnosisBackend};
