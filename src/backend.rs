use serde::{Deserialize, Serialize};

/// How the API key travels to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    XApiKey,
}

pub struct BackendSettings {
    pub base_url: &'static str,
    pub api_key_env_var: &'static str,
    pub auth: Auth,
    pub default_model: &'static str,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Anthropic,
    Openrouter,
}

impl Backend {
    /// Picks the backend from the environment: OPENROUTER_API_KEY wins when
    /// set, otherwise the native Anthropic endpoint is used.
    pub fn detect() -> Self {
        if std::env::var("OPENROUTER_API_KEY").is_ok() {
            Backend::Openrouter
        } else {
            Backend::Anthropic
        }
    }

    pub fn settings(&self) -> BackendSettings {
        match self {
            Backend::Anthropic => BackendSettings {
                base_url: "https://api.anthropic.com",
                api_key_env_var: "ANTHROPIC_API_KEY",
                auth: Auth::XApiKey,
                default_model: "claude-opus-4-5",
            },
            Backend::Openrouter => BackendSettings {
                base_url: "https://openrouter.ai/api",
                api_key_env_var: "OPENROUTER_API_KEY",
                auth: Auth::Bearer,
                default_model: "anthropic/claude-opus-4.5",
            },
        }
    }
}
