//! Narration capability contract implemented by the embedding host.
//!
//! The core never talks to a platform speech device directly; it drives this
//! trait and consumes the progress events the host routes back, tagged with
//! the session id of the originating request.

use anyhow::Result;

/// A narration voice exposed by the host engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub display_name: String,
    /// BCP-47 style tag, e.g. `fr-FR`.
    pub language_tag: String,
}

/// One speak request with fixed voice settings. `session_id` tags every
/// event the host delivers back for this utterance.
#[derive(Debug, Clone)]
pub struct SpeakRequest {
    pub session_id: u64,
    pub text: String,
    pub voice_id: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Progress events emitted by the engine for an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Start,
    /// Playback reached the given byte offset of the spoken text.
    Boundary { char_index: usize },
    End,
    Error { message: String },
}

/// Narration capability. Cancellation is best-effort: events queued before a
/// `cancel` may still be delivered afterwards.
pub trait NarrationEngine {
    fn speak(&mut self, request: SpeakRequest) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    fn cancel(&mut self) -> Result<()>;
    fn list_voices(&self) -> Vec<Voice>;
}
