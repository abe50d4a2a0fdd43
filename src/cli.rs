use crate::backend::Backend;
use clap::Parser;

/// A minimal command-line coding agent
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Prompt to submit before entering the interactive loop
    pub prompt: Option<String>,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the configured backend
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_flag_parses_to_the_enum() {
        let cli = Cli::try_parse_from(["minicode", "--backend", "openrouter"]).unwrap();
        assert_eq!(cli.backend, Some(Backend::Openrouter));
        assert!(cli.model.is_none());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["minicode", "--backend", "cohere"]).is_err());
    }
}
