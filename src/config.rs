use crate::backend::Backend;
use crate::shell;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

const DEFAULT_SYSTEM_PROMPT: &str = "Concise coding assistant.";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    /// Empty means "use the backend's default model".
    pub model: String,
    pub max_tokens: u32,
    pub request_timeout_seconds: u64,
    pub command_timeout_seconds: u64,
    pub system_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        let backend = Backend::detect();
        Self {
            model: backend.settings().default_model.to_string(),
            backend,
            max_tokens: 8192,
            request_timeout_seconds: 120,
            command_timeout_seconds: shell::DEFAULT_TIMEOUT_SECS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

pub fn load_or_create() -> Result<Config> {
    let xdg_dirs = xdg::BaseDirectories::new();
    let config_path = xdg_dirs.place_config_file("minicode/config.toml")?;

    if !config_path.exists() {
        let default_config = Config::default();
        let toml_string = toml::to_string_pretty(&default_config)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml_string)?;

        println!("Created default config at: {}", config_path.display());
        return Ok(default_config);
    }

    let config_string = fs::read_to_string(&config_path)?;
    let mut config: Config = toml::from_str(&config_string)?;

    if config.model.is_empty() {
        config.model = config.backend.settings().default_model.to_string();
    }
    if config.system_prompt.is_empty() {
        config.system_prompt = DEFAULT_SYSTEM_PROMPT.to_string();
    }

    // Write the complete config back so users can see all available options.
    let final_toml_string = toml::to_string_pretty(&config)?;
    if final_toml_string != config_string {
        fs::write(&config_path, final_toml_string)?;
    }

    Ok(config)
}
