//! Ports - trait interfaces decoupling the application core from external
//! collaborators (model provider, session store, transcript index).

pub mod ai_provider;
pub mod session_store;
pub mod transcript_index;

pub use ai_provider::{
    AiProvider, CompletionRequest, CompletionResponse, ProviderError, ProviderInfo,
};
pub use session_store::{SessionStore, SessionStoreError};
pub use transcript_index::{
    TranscriptIndex, TranscriptIndexError, TranscriptMatch, TranscriptMetadata, TranscriptRecord,
};
