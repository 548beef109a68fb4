//! Playback control for narrated text with word-level highlighting.
//!
//! The controller owns at most one live narration session and drives the
//! injected engine. Engine callbacks race with `stop()` and fresh `speak()`
//! calls, and engine-side cancellation is only best-effort, so every incoming
//! event is matched against the live session id before any state is touched;
//! events from superseded sessions are dropped.

use crate::engine::{EngineEvent, NarrationEngine, SpeakRequest};
use crate::tokenizer::{self, Token};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

pub const MIN_RATE: f32 = 0.5;
pub const MAX_RATE: f32 = 2.0;
pub const MIN_PITCH: f32 = 0.0;
pub const MAX_PITCH: f32 = 2.0;
pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No narration underway; a freshly created session stays Idle until the
    /// engine confirms start.
    Idle,
    Speaking,
    Paused,
    Ended,
    /// Superseded by a newer session or torn down before finishing.
    Cancelled,
    Error,
}

impl PlaybackState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PlaybackState::Ended | PlaybackState::Cancelled | PlaybackState::Error
        )
    }
}

/// One logical request to speak a text with fixed voice settings, identified
/// by a monotonic id.
pub struct NarrationSession {
    pub id: u64,
    pub tokens: Vec<Token>,
    pub voice_id: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub state: PlaybackState,
    pub current_token_idx: Option<usize>,
    pub error: Option<String>,
    /// Boundary offsets arrive non-decreasing within a session; remember the
    /// last matched token so the next lookup resumes there.
    scan_from: usize,
}

impl NarrationSession {
    fn apply_boundary(&mut self, char_index: usize) {
        if self.tokens.is_empty() {
            return;
        }
        let mapped = self.map_char_index(char_index);
        // The applied highlight never moves backwards within a session.
        let next = match self.current_token_idx {
            Some(current) => current.max(mapped),
            None => mapped,
        };
        self.current_token_idx = Some(next);
        self.scan_from = next;
        debug!(
            session_id = self.id,
            char_index,
            token = next,
            "Boundary mapped to token"
        );
    }

    /// Mapping rule: the token whose `[start, end)` range contains
    /// `char_index`; an offset inside inter-token whitespace maps to the next
    /// token (the one about to be spoken); an offset past the last token's
    /// end clamps to the last index.
    fn map_char_index(&self, char_index: usize) -> usize {
        let mut from = self.scan_from;
        if self
            .tokens
            .get(from)
            .map(|token| char_index < token.start)
            .unwrap_or(true)
        {
            // Offset landed before the resume point; rescan from the start
            // so the mapping rule alone decides.
            from = 0;
        }
        for token in &self.tokens[from..] {
            if char_index < token.end {
                return token.index;
            }
        }
        self.tokens.len() - 1
    }
}

/// Drives the narration engine and exposes `{state, highlight, tokens}` to
/// the rendering layer. Owns zero or one live session.
pub struct PlaybackController<E: NarrationEngine> {
    engine: E,
    session: Option<NarrationSession>,
    next_session_id: u64,
}

impl<E: NarrationEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            session: None,
            next_session_id: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Tokenize `text`, supersede any live session, and issue a speak request
    /// tagged with a fresh session id. Returns immediately; the session turns
    /// Speaking once the engine reports `Start`.
    pub fn speak(
        &mut self,
        text: &str,
        voice_id: Option<&str>,
        rate: f32,
        pitch: f32,
        volume: f32,
    ) -> Result<u64> {
        self.cancel_live_session("superseded by new speak request");

        let rate = rate.clamp(MIN_RATE, MAX_RATE);
        let pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);
        let volume = volume.clamp(MIN_VOLUME, MAX_VOLUME);

        self.next_session_id += 1;
        let session_id = self.next_session_id;
        let tokens = tokenizer::tokenize(text);
        info!(
            session_id,
            tokens = tokens.len(),
            rate,
            pitch,
            volume,
            "Starting narration session"
        );

        let mut session = NarrationSession {
            id: session_id,
            tokens,
            voice_id: voice_id.map(str::to_string),
            rate,
            pitch,
            volume,
            state: PlaybackState::Idle,
            current_token_idx: None,
            error: None,
            scan_from: 0,
        };

        let request = SpeakRequest {
            session_id,
            text: text.to_string(),
            voice_id: session.voice_id.clone(),
            rate,
            pitch,
            volume,
        };
        let issued = self.engine.speak(request);
        if let Err(err) = issued {
            warn!(session_id, "Narration engine rejected speak request: {err}");
            session.state = PlaybackState::Error;
            session.error = Some(err.to_string());
            self.session = Some(session);
            return Err(err).context("Issuing speak request");
        }

        self.session = Some(session);
        Ok(session_id)
    }

    /// Valid only while Speaking; anywhere else this is a logged no-op.
    pub fn pause(&mut self) {
        let state = self.state();
        if state != PlaybackState::Speaking {
            debug!(?state, "Ignoring pause outside active narration");
            return;
        }
        if let Err(err) = self.engine.pause() {
            warn!("Pause request failed: {err}");
            return;
        }
        if let Some(session) = self.session.as_mut() {
            info!(session_id = session.id, "Paused narration");
            session.state = PlaybackState::Paused;
        }
    }

    /// Valid only while Paused; anywhere else this is a logged no-op.
    pub fn resume(&mut self) {
        let state = self.state();
        if state != PlaybackState::Paused {
            debug!(?state, "Ignoring resume outside paused narration");
            return;
        }
        if let Err(err) = self.engine.resume() {
            warn!("Resume request failed: {err}");
            return;
        }
        if let Some(session) = self.session.as_mut() {
            info!(session_id = session.id, "Resumed narration");
            session.state = PlaybackState::Speaking;
        }
    }

    /// Cancel Speaking or Paused narration; the session ends and the
    /// highlight clears. Idempotent: calling from Idle, Ended, or Error
    /// changes nothing.
    pub fn stop(&mut self) {
        let Some(session) = self.session.as_mut() else {
            debug!("Stop requested with no live session");
            return;
        };
        match session.state {
            PlaybackState::Speaking | PlaybackState::Paused => {
                if let Err(err) = self.engine.cancel() {
                    warn!(session_id = session.id, "Cancel request failed: {err}");
                }
                session.state = PlaybackState::Ended;
                session.current_token_idx = None;
                info!(session_id = session.id, "Stopped narration");
            }
            state => debug!(?state, "Stop is a no-op outside active narration"),
        }
    }

    /// Token index of the word being spoken, or `None` when no narration is
    /// underway.
    pub fn current_highlight(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.current_token_idx)
    }

    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map(|s| s.state)
            .unwrap_or(PlaybackState::Idle)
    }

    pub fn tokens(&self) -> &[Token] {
        self.session
            .as_ref()
            .map(|s| s.tokens.as_slice())
            .unwrap_or(&[])
    }

    pub fn session_id(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.error.as_deref())
    }

    /// Process one engine event. The stale guard runs first: an id that does
    /// not match the live session means the event belongs to a superseded
    /// request still draining from the engine, and it is dropped.
    pub fn handle_event(&mut self, session_id: u64, event: EngineEvent) {
        let Some(session) = self.session.as_mut() else {
            debug!(session_id, "Dropping engine event with no live session");
            return;
        };
        if session_id != session.id {
            debug!(
                session_id,
                live = session.id,
                "Ignoring stale narration event"
            );
            return;
        }
        if session.state.is_terminal() {
            debug!(
                session_id,
                state = ?session.state,
                "Dropping event for terminated session"
            );
            return;
        }

        match event {
            EngineEvent::Start => {
                info!(session_id, "Narration started");
                session.state = PlaybackState::Speaking;
            }
            EngineEvent::Boundary { char_index } => session.apply_boundary(char_index),
            EngineEvent::End => {
                info!(session_id, "Narration finished");
                session.state = PlaybackState::Ended;
                session.current_token_idx = None;
            }
            EngineEvent::Error { message } => {
                warn!(session_id, "Narration failed: {message}");
                session.state = PlaybackState::Error;
                session.error = Some(message);
                session.current_token_idx = None;
            }
        }
    }

    fn cancel_live_session(&mut self, reason: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state.is_terminal() {
            return;
        }
        if let Err(err) = self.engine.cancel() {
            warn!(session_id = session.id, "Cancel request failed: {err}");
        }
        session.state = PlaybackState::Cancelled;
        session.current_token_idx = None;
        info!(session_id = session.id, reason, "Cancelled narration session");
    }
}
