//! AI scoring for the matching engine, backed by an OpenAI-compatible
//! chat-completions endpoint. Everything here is optional at runtime: with no
//! credentials the service runs rule-based only.

use tracing::{info, warn};

pub mod config;
pub mod openai;
pub mod prompt;

pub use config::AiRuntimeConfig;
pub use openai::OpenAiClient;

/// Builds the chat client from the environment, or `None` when no credential
/// is configured or the HTTP client cannot be constructed. Callers treat
/// `None` as "rule-based scoring only".
pub fn client_from_env() -> Option<OpenAiClient> {
    let config = AiRuntimeConfig::from_env();
    if !config.has_credentials() {
        info!("no AI credentials configured; scoring runs rule-based only");
        return None;
    }

    let model = config.model.clone();
    let endpoint = config.endpoint.clone();
    match OpenAiClient::new(config) {
        Ok(client) => {
            info!(%model, %endpoint, "AI scoring client ready");
            Some(client)
        }
        Err(error) => {
            warn!(error = %error, "failed to build AI client; scoring runs rule-based only");
            None
        }
    }
}
