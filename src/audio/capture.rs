//! Utterance capture for EchoClaw
//!
//! This module provides the input side of the perception layer: the
//! [`CommandRecorder`] records a bounded utterance to a scratch WAV file
//! through a configurable recorder command, [`VoiceListener`] chains it with
//! transcription, and [`ConsoleListener`] reads typed lines for environments
//! without a microphone.

use std::io::Write as _;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::config::CaptureConfig;
use crate::error::{AudioError, Result};
use crate::log_component;

use super::stt::GroqTranscriber;
use super::types::Listener;

/// Records one utterance through an external recorder command.
///
/// The command is a template: `{output}` is replaced with the scratch WAV
/// path and `{seconds}` with the maximum utterance length. The default
/// template shells out to `arecord`, which is close to universal on the
/// Linux machines this agent targets.
pub struct CommandRecorder {
    command: String,
    max_seconds: u64,
}

impl CommandRecorder {
    /// Create a recorder from the capture configuration.
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            command: config.command.clone(),
            max_seconds: config.max_seconds,
        }
    }

    /// Fill the command template for a concrete output path.
    fn render(&self, output: &Path) -> String {
        self.command
            .replace("{output}", &output.to_string_lossy())
            .replace("{seconds}", &self.max_seconds.to_string())
    }

    /// Record one utterance and return the WAV bytes.
    ///
    /// # Errors
    /// `AudioError::Capture` when the recorder command cannot run, exits
    /// nonzero, or produces an empty file.
    pub async fn record(&self) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir().map_err(|e| AudioError::Capture(e.to_string()))?;
        let output = dir.path().join("utterance.wav");
        let command = self.render(&output);

        let status = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .map_err(|e| AudioError::Capture(format!("recorder failed to start: {}", e)))?;

        if !status.success() {
            return Err(AudioError::Capture(format!("recorder exited with {}", status)).into());
        }

        let bytes = tokio::fs::read(&output)
            .await
            .map_err(|e| AudioError::Capture(format!("recording unreadable: {}", e)))?;

        if bytes.is_empty() {
            return Err(AudioError::Capture("recorder produced no audio".into()).into());
        }

        log_component!(
            debug,
            "audio",
            "utterance captured",
            bytes = bytes.len() as u64
        );
        Ok(bytes)
    }
}

/// Microphone-driven listener: record, then transcribe.
pub struct VoiceListener {
    recorder: CommandRecorder,
    transcriber: GroqTranscriber,
}

impl VoiceListener {
    /// Compose a recorder and a transcriber into a listener.
    pub fn new(recorder: CommandRecorder, transcriber: GroqTranscriber) -> Self {
        Self {
            recorder,
            transcriber,
        }
    }
}

#[async_trait]
impl Listener for VoiceListener {
    async fn listen(&mut self) -> Result<String> {
        println!("\nListening...");
        let audio = self.recorder.record().await?;
        let text = self.transcriber.transcribe(audio).await?;
        println!("You said: {}", text);
        Ok(text)
    }
}

/// Typed-input listener for machines without a microphone.
///
/// Reads one line from stdin per call. A blank line counts as
/// unintelligible; end of input behaves like the exit keyword so piped
/// sessions terminate cleanly.
pub struct ConsoleListener {
    lines: io::Lines<BufReader<io::Stdin>>,
}

impl ConsoleListener {
    /// Create a listener over this process's stdin.
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for ConsoleListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for ConsoleListener {
    async fn listen(&mut self) -> Result<String> {
        print!("\n> ");
        let _ = std::io::stdout().flush();

        match self.lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    Err(AudioError::Unintelligible.into())
                } else {
                    Ok(line)
                }
            }
            Ok(None) => Ok("exit".to_string()),
            Err(e) => Err(AudioError::Capture(e.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EchoError;

    fn recorder_with(command: &str) -> CommandRecorder {
        CommandRecorder::new(&CaptureConfig {
            command: command.to_string(),
            max_seconds: 7,
        })
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let recorder = recorder_with("arecord -d {seconds} {output}");
        let rendered = recorder.render(Path::new("/tmp/u.wav"));
        assert_eq!(rendered, "arecord -d 7 /tmp/u.wav");
    }

    #[test]
    fn test_render_without_placeholders() {
        let recorder = recorder_with("record-fixed");
        assert_eq!(recorder.render(Path::new("/tmp/x.wav")), "record-fixed");
    }

    #[tokio::test]
    async fn test_record_reads_produced_file() {
        let recorder = recorder_with("printf 'RIFFfake-wav-data' > {output}");
        let bytes = recorder.record().await.unwrap();
        assert_eq!(bytes, b"RIFFfake-wav-data");
    }

    #[tokio::test]
    async fn test_record_failing_command() {
        let recorder = recorder_with("exit 3");
        let err = recorder.record().await.unwrap_err();
        assert!(matches!(err, EchoError::Audio(AudioError::Capture(_))));
        assert!(err.to_string().contains("exited with"));
    }

    #[tokio::test]
    async fn test_record_empty_output() {
        let recorder = recorder_with("touch {output}");
        let err = recorder.record().await.unwrap_err();
        assert!(err.to_string().contains("no audio"));
    }

    #[tokio::test]
    async fn test_record_missing_output() {
        let recorder = recorder_with("true");
        let err = recorder.record().await.unwrap_err();
        assert!(matches!(err, EchoError::Audio(AudioError::Capture(_))));
    }
}
