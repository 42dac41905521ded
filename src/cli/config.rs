//! The `config` command: show the active configuration.

use anyhow::{Context, Result};

use echoclaw::config::Config;

use super::ConfigAction;

/// Inspect configuration.
pub(crate) fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let mut config = Config::load().with_context(|| "Failed to load configuration")?;
            // Never print credentials
            if let Some(groq) = config.providers.groq.as_mut() {
                if groq.api_key.is_some() {
                    groq.api_key = Some("***".to_string());
                }
            }
            let rendered = serde_json::to_string_pretty(&config)
                .with_context(|| "Failed to render configuration")?;
            println!("{}", rendered);
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
    }
    Ok(())
}
