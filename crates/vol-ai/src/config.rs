use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Runtime knobs for the chat-completions client. The temperature and token
/// budget here apply to match scoring; impact analysis pins its own.
#[derive(Debug, Clone)]
pub struct AiRuntimeConfig {
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for AiRuntimeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: String::new(),
            timeout_secs: 10,
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

impl AiRuntimeConfig {
    /// Reads `MATCH_AI_*` overrides, falling back to `OPENAI_API_KEY` for the
    /// credential so a stock OpenAI environment works unchanged.
    pub fn from_env() -> Self {
        fn parse_u64(key: &str, default: u64) -> u64 {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or(default)
        }

        fn parse_u32(key: &str, default: u32) -> u32 {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(default)
        }

        fn parse_f64(key: &str, default: f64) -> f64 {
            std::env::var(key)
                .ok()
                .and_then(|raw| raw.parse::<f64>().ok())
                .unwrap_or(default)
        }

        let api_key = std::env::var("MATCH_AI_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_default();

        Self {
            model: std::env::var("MATCH_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            endpoint: std::env::var("MATCH_AI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.into()),
            api_key,
            timeout_secs: parse_u64("MATCH_AI_TIMEOUT_SECS", 10),
            temperature: parse_f64("MATCH_AI_TEMPERATURE", 0.7),
            max_tokens: parse_u32("MATCH_AI_MAX_TOKENS", 1500),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        use std::sync::Mutex;
        static ENV_GUARD: Mutex<()> = Mutex::new(());
        let _guard = ENV_GUARD.lock().unwrap();

        let prev: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var(key).ok();
                match value {
                    Some(v) => unsafe { std::env::set_var(key, v) },
                    None => unsafe { std::env::remove_var(key) },
                }
                (key.to_string(), previous)
            })
            .collect();

        f();

        for (key, previous) in prev {
            if let Some(v) = previous {
                unsafe { std::env::set_var(&key, v) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        with_env(
            &[
                ("MATCH_AI_API_KEY", None),
                ("OPENAI_API_KEY", None),
                ("MATCH_AI_MODEL", None),
                ("MATCH_AI_ENDPOINT", None),
                ("MATCH_AI_TIMEOUT_SECS", None),
                ("MATCH_AI_TEMPERATURE", None),
                ("MATCH_AI_MAX_TOKENS", None),
            ],
            || {
                let cfg = AiRuntimeConfig::from_env();
                assert_eq!(cfg.model, "gpt-4o");
                assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
                assert!(!cfg.has_credentials());
                assert_eq!(cfg.timeout(), Duration::from_secs(10));
                assert_eq!(cfg.temperature, 0.7);
                assert_eq!(cfg.max_tokens, 1500);
            },
        );
    }

    #[test]
    fn dedicated_key_wins_over_openai_key() {
        with_env(
            &[
                ("MATCH_AI_API_KEY", Some("match-secret")),
                ("OPENAI_API_KEY", Some("openai-secret")),
            ],
            || {
                let cfg = AiRuntimeConfig::from_env();
                assert_eq!(cfg.api_key, "match-secret");
            },
        );

        with_env(
            &[
                ("MATCH_AI_API_KEY", None),
                ("OPENAI_API_KEY", Some("openai-secret")),
            ],
            || {
                let cfg = AiRuntimeConfig::from_env();
                assert_eq!(cfg.api_key, "openai-secret");
                assert!(cfg.has_credentials());
            },
        );
    }

    #[test]
    fn env_overrides_and_bad_numbers_fall_back() {
        with_env(
            &[
                ("MATCH_AI_MODEL", Some("gpt-4o-mini")),
                ("MATCH_AI_ENDPOINT", Some("https://proxy.internal/v1/chat")),
                ("MATCH_AI_TIMEOUT_SECS", Some("25")),
                ("MATCH_AI_TEMPERATURE", Some("not-a-number")),
                ("MATCH_AI_MAX_TOKENS", Some("900")),
            ],
            || {
                let cfg = AiRuntimeConfig::from_env();
                assert_eq!(cfg.model, "gpt-4o-mini");
                assert_eq!(cfg.endpoint, "https://proxy.internal/v1/chat");
                assert_eq!(cfg.timeout_secs, 25);
                assert_eq!(cfg.temperature, 0.7);
                assert_eq!(cfg.max_tokens, 900);
            },
        );
    }
}
