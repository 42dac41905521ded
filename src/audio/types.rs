//! Audio trait definitions for EchoClaw
//!
//! Two seams separate the agent loop from the perception hardware: a
//! [`Listener`] that produces one user utterance as text, and a [`Speaker`]
//! that voices the agent's replies. The loop only ever talks to these
//! traits, so tests (and the `--text` console mode) can swap in
//! implementations that never touch a microphone.

use async_trait::async_trait;

use crate::error::Result;

/// Produces one user utterance as text per call.
///
/// A voice implementation records audio and transcribes it; a console
/// implementation reads a typed line. Failures use the audio error
/// taxonomy: `Unintelligible` when nothing usable was heard,
/// `ServiceUnavailable` when transcription itself broke, `Capture` when
/// the recorder failed. The agent loop recovers from all three without
/// consuming a conversation turn.
#[async_trait]
pub trait Listener: Send {
    /// Block until one utterance is available and return its text.
    async fn listen(&mut self) -> Result<String>;
}

/// Voices agent replies to the user.
///
/// Speaking is best-effort: implementations log playback failures and
/// return normally, so a broken audio sink can never take down a turn.
/// Every implementation also echoes the line to the console, which keeps
/// a readable transcript alongside the audio.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speak (and print) one line.
    async fn say(&self, text: &str);
}
