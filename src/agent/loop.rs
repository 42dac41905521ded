//! The voice agent loop
//!
//! This module provides the core loop that listens for an utterance, runs
//! the step protocol against the model, executes requested tools, and speaks
//! every user-facing line back through the speaker.
//!
//! One utterance drives one *turn*; one turn drives as many protocol steps
//! as the model needs to reach a `complete` step. The model's own replies
//! are never appended to the conversation history; the history grows only
//! with user utterances and tool-output records, which is what the step
//! protocol's system prompt expects.

use std::sync::Arc;

use crate::audio::{Listener, Speaker};
use crate::config::Config;
use crate::error::{AudioError, EchoError, Result};
use crate::log_component;
use crate::process::ProcessTracker;
use crate::providers::{ChatOptions, LLMProvider};
use crate::session::{Conversation, Message};
use crate::tools::{ToolExecutor, ToolRegistry};

use super::context::ContextManager;
use super::prompts::{
    acknowledgement, DIDNT_CATCH, GENERIC_TROUBLE, GOODBYE, GREETING, PARSE_TROUBLE,
    READY_FOR_NEXT, SPEECH_SERVICE_TROUBLE, SYSTEM_PROMPT, UNKNOWN_TOOL,
};
use super::protocol::{StepResponse, ToolOutputRecord};
use super::retry::RetryPolicy;

/// Whether an utterance is one of the exit keywords.
///
/// The match is exact (after trimming) and case-insensitive, so "exit" and
/// "QUIT" end the session but "quit the server" does not.
///
/// # Example
///
/// ```rust
/// use echoclaw::agent::is_exit_command;
///
/// assert!(is_exit_command("exit"));
/// assert!(is_exit_command("  Quit  "));
/// assert!(!is_exit_command("quit the server"));
/// ```
pub fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit")
}

/// The main voice agent loop.
///
/// Owns the conversation history, the perception seams, and the tool
/// executor. The loop is single-session: one conversation, one user, from
/// greeting to goodbye.
///
/// Turn lifecycle:
/// 1. Listen for one utterance (retrying capture failures in place)
/// 2. Exit keywords end the session; everything else becomes a turn
/// 3. Compress the history first if it has grown past the context threshold
/// 4. Drive protocol steps until `complete`, an unknown step tag, an unknown
///    tool, or exhausted retries ends the turn
pub struct AgentLoop {
    provider: Arc<dyn LLMProvider>,
    executor: ToolExecutor,
    tracker: Arc<ProcessTracker>,
    context: ContextManager,
    retry: RetryPolicy,
    listener: Box<dyn Listener>,
    speaker: Box<dyn Speaker>,
    conversation: Conversation,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AgentLoop {
    /// Create an agent loop wired to a provider and a pair of perception
    /// seams.
    ///
    /// # Arguments
    /// * `config` - Full agent configuration
    /// * `provider` - Chat provider for both step calls and summaries
    /// * `listener` - Utterance source (microphone or console)
    /// * `speaker` - Reply sink (synthesized speech or console)
    pub fn new(
        config: &Config,
        provider: Arc<dyn LLMProvider>,
        listener: Box<dyn Listener>,
        speaker: Box<dyn Speaker>,
    ) -> Self {
        let tracker = Arc::new(ProcessTracker::new());
        let registry = Arc::new(ToolRegistry::with_builtins(
            tracker.clone(),
            config.agent.command_timeout_secs,
        ));
        Self {
            provider,
            executor: ToolExecutor::new(registry),
            tracker,
            context: ContextManager::new(&config.agent),
            retry: RetryPolicy::new(config.agent.max_attempts),
            listener,
            speaker,
            conversation: Conversation::new(SYSTEM_PROMPT),
            model: config.agent.model.clone(),
            max_tokens: config.agent.max_tokens,
            temperature: config.agent.temperature,
        }
    }

    /// Override the retry policy, e.g. to zero backoffs in tests.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The conversation history accumulated so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run the session from greeting to goodbye.
    ///
    /// Listens, processes turns, and keeps going until an exit keyword or
    /// Ctrl-C. Both shutdown paths stop tracked background processes and
    /// speak the goodbye line. Listening failures are recovered in place
    /// with a spoken apology and never consume a turn.
    pub async fn run(&mut self) -> Result<()> {
        self.speaker.say(GREETING).await;

        loop {
            let heard = tokio::select! {
                _ = tokio::signal::ctrl_c() => None,
                heard = self.listener.listen() => Some(heard),
            };

            let Some(heard) = heard else {
                log_component!(info, "agent", "interrupt received, shutting down");
                self.shutdown().await;
                return Ok(());
            };

            match heard {
                Ok(utterance) => {
                    if is_exit_command(&utterance) {
                        self.shutdown().await;
                        return Ok(());
                    }
                    if let Err(e) = self.process_turn(&utterance).await {
                        log_component!(error, "agent", "turn failed", error = e.to_string());
                        self.speaker.say(GENERIC_TROUBLE).await;
                    }
                }
                Err(EchoError::Audio(AudioError::Unintelligible)) => {
                    self.speaker.say(DIDNT_CATCH).await;
                }
                Err(EchoError::Audio(e)) => {
                    log_component!(warn, "agent", "listening failed", error = e.to_string());
                    self.speaker.say(SPEECH_SERVICE_TROUBLE).await;
                }
                Err(e) => {
                    log_component!(error, "agent", "listener error", error = e.to_string());
                    self.speaker.say(GENERIC_TROUBLE).await;
                }
            }
        }
    }

    /// Process one user utterance as a full protocol turn.
    ///
    /// Compresses the history first when it has grown past the threshold,
    /// appends the utterance, then drives steps until the turn ends. A turn
    /// that exhausts its retries ends quietly with `Ok`; the retry path has
    /// already spoken the apology.
    pub async fn process_turn(&mut self, user_input: &str) -> Result<()> {
        // Correlation id shared by every log event the turn emits
        let turn_id = uuid::Uuid::new_v4().to_string();
        log_component!(info, "agent", "turn started", turn = turn_id.as_str());

        if self.context.should_compress(&self.conversation) {
            log_component!(
                info,
                "agent",
                "history past threshold, compressing",
                turn = turn_id.as_str(),
                threshold = self.context.threshold() as u64
            );
            self.context
                .compress(self.provider.as_ref(), &mut self.conversation)
                .await;
        }

        self.conversation.push(Message::user(user_input));

        loop {
            let Some(step) = self.next_step(&turn_id).await else {
                return Ok(());
            };
            log_component!(
                debug,
                "agent",
                "step received",
                turn = turn_id.as_str(),
                step = step.tag()
            );

            match step {
                StepResponse::Plan { content } | StepResponse::Observe { content } => {
                    self.speaker.say(&content).await;
                }
                StepResponse::Action { tool, input } => {
                    if !self.executor.registry().has(&tool) {
                        log_component!(
                            warn,
                            "agent",
                            "unknown tool requested",
                            turn = turn_id.as_str(),
                            tool = tool
                        );
                        self.speaker.say(UNKNOWN_TOOL).await;
                        return Ok(());
                    }

                    // The raw result stays in the logs; the user hears a
                    // friendly acknowledgement and the model sees a success
                    // record.
                    let _ = self.executor.safe_execute(&tool, input.clone()).await;
                    self.speaker.say(acknowledgement(&tool)).await;

                    let record = ToolOutputRecord::success(&tool, input);
                    self.conversation.push(Message::user(&record.render()?));
                }
                StepResponse::Complete { content } => {
                    self.speaker.say(&content).await;
                    return Ok(());
                }
                StepResponse::Unknown => {
                    self.speaker.say(READY_FOR_NEXT).await;
                    return Ok(());
                }
            }
        }
    }

    /// Call the model for the next step, retrying per the policy.
    ///
    /// Returns `None` when the turn must be abandoned; the matching apology
    /// has already been spoken by then.
    async fn next_step(&mut self, turn_id: &str) -> Option<StepResponse> {
        for attempt in 1..=self.retry.max_attempts() {
            let options = ChatOptions::new()
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens)
                .with_json_mode();

            let reply = self
                .provider
                .chat(self.conversation.messages.clone(), Some(&self.model), options)
                .await;

            match reply {
                Ok(response) => match StepResponse::parse(&response.content) {
                    Ok(step) => return Some(step),
                    Err(e) => {
                        log_component!(
                            warn,
                            "agent",
                            "unparseable model reply",
                            turn = turn_id,
                            attempt = attempt as u64,
                            error = e.to_string()
                        );
                        if self.retry.is_final(attempt) {
                            self.speaker.say(PARSE_TROUBLE).await;
                            return None;
                        }
                        tokio::time::sleep(self.retry.parse_backoff()).await;
                    }
                },
                Err(e) => {
                    log_component!(
                        warn,
                        "agent",
                        "model call failed",
                        turn = turn_id,
                        attempt = attempt as u64,
                        error = e.to_string()
                    );
                    if self.retry.is_final(attempt) {
                        self.speaker.say(GENERIC_TROUBLE).await;
                        return None;
                    }
                    tokio::time::sleep(self.retry.api_backoff()).await;
                }
            }
        }
        None
    }

    /// Stop background processes and say goodbye.
    async fn shutdown(&mut self) {
        let stopped = self.tracker.stop_all().await;
        if stopped > 0 {
            log_component!(
                info,
                "agent",
                "stopped background processes",
                count = stopped as u64
            );
        }
        self.speaker.say(GOODBYE).await;
    }
}
