//! The `run` command: wire the perception layer to the agent loop.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use echoclaw::agent::AgentLoop;
use echoclaw::audio::{
    CommandRecorder, ConsoleListener, ConsoleSpeaker, GroqSpeaker, GroqTranscriber, Listener,
    Speaker, VoiceListener,
};
use echoclaw::config::Config;
use echoclaw::providers::{GroqProvider, LLMProvider};

/// Start a session, voice-driven by default or typed with `--text`.
pub(crate) async fn cmd_run(text: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?,
        None => Config::load().with_context(|| "Failed to load configuration")?,
    };

    let api_key = config.groq_api_key().with_context(|| {
        format!(
            "No Groq API key configured. Set GROQ_API_KEY or add it to {:?}",
            Config::path()
        )
    })?;

    let groq = match config.groq_api_base() {
        Some(base) => GroqProvider::with_base_url(&api_key, &base),
        None => GroqProvider::new(&api_key),
    };
    let api_base = groq.api_base().to_string();
    let provider: Arc<dyn LLMProvider> = Arc::new(groq);

    let (listener, speaker): (Box<dyn Listener>, Box<dyn Speaker>) = if text {
        (Box::new(ConsoleListener::new()), Box::new(ConsoleSpeaker))
    } else {
        let recorder = CommandRecorder::new(&config.audio.capture);
        let transcriber = GroqTranscriber::new(&api_key, &api_base, &config.audio.transcription);
        let speaker = GroqSpeaker::new(&api_key, &api_base, &config.audio.speech);
        (
            Box::new(VoiceListener::new(recorder, transcriber)),
            Box::new(speaker),
        )
    };

    let mut agent = AgentLoop::new(&config, provider, listener, speaker);
    agent.run().await?;
    Ok(())
}
