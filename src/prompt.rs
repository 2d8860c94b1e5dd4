use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ConfigError, Result};

#[async_trait]
pub trait Prompt: Send + Sync {
    /// Asks for a line of text, pre-filled with `default`.
    async fn input(&self, message: &str, default: Option<&str>) -> Result<String>;
}

/// Terminal prompt. Concurrent callers are queued so only one prompt is
/// rendered at a time.
#[derive(Default)]
pub struct TerminalPrompt {
    term: Mutex<()>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn input(&self, message: &str, default: Option<&str>) -> Result<String> {
        let _term = self.term.lock().await;
        // the theme already appends a colon
        let message = message.trim_end_matches(':').to_string();
        let default = default.map(str::to_owned);
        tokio::task::spawn_blocking(move || {
            let mut input = dialoguer::Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.with_initial_text(default);
            }
            input.interact_text()
        })
        .await
        .map_err(|err| ConfigError::Prompt(err.to_string()))?
        .map_err(|err| ConfigError::Prompt(err.to_string()))
    }
}
