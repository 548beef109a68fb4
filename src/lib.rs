//! Core building blocks for narrated accessible reading: whitespace
//! tokenization with byte offsets, a playback controller that maps narration
//! progress events onto word highlights, voice catalog tracking, and batched
//! pictogram lookup against the ARASAAC search API.
//!
//! The narration device itself is injected through [`NarrationEngine`]; the
//! embedding host owns the platform speech capability and routes its progress
//! events back into [`PlaybackController::handle_event`].

pub mod cancellation;
pub mod config;
pub mod engine;
pub mod pictograms;
pub mod playback;
pub mod tokenizer;
pub mod voices;

pub use cancellation::CancellationToken;
pub use engine::{EngineEvent, NarrationEngine, SpeakRequest, Voice};
pub use pictograms::{ArasaacClient, LookupBatcher, LookupResult, LookupService, PictogramMatch};
pub use playback::{NarrationSession, PlaybackController, PlaybackState};
pub use tokenizer::{Token, tokenize};
pub use voices::VoiceCatalog;
