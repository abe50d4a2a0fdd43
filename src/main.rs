use anyhow::Result;
use clap::Parser;
use console::style;
use minicode::agent::Agent;
use minicode::registry::ToolRegistry;
use minicode::{cli, client, config, render};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let mut config = config::load_or_create()?;
    if let Some(backend) = cli.backend {
        // The configured model belongs to the configured backend; switching
        // backends falls back to that backend's default unless --model is
        // also given.
        config.backend = backend;
        config.model = backend.settings().default_model.to_string();
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let client = client::initialize_client(&config)?;
    let registry = ToolRegistry::new(Duration::from_secs(config.command_timeout_seconds));

    let cwd = std::env::current_dir()?;
    let system_prompt = format!("{} cwd: {}", config.system_prompt, cwd.display());

    println!(
        "{} | {}\n",
        style("minicode").bold(),
        style(format!(
            "{} ({:?}) | {}",
            config.model,
            config.backend,
            cwd.display()
        ))
        .dim()
    );

    let mut agent = Agent::new(Box::new(client), registry, system_prompt);
    let mut stdin_receiver = spawn_stdin_channel();

    if let Some(prompt) = cli.prompt
        && !prompt.trim().is_empty()
    {
        run_turn(&mut agent, prompt.trim()).await;
    }

    loop {
        println!("{}", render::separator());
        print!("{} ", style("❯").blue().bold());
        io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            line_opt = stdin_receiver.recv() => {
                match line_opt.flatten() {
                    Some(line) => line,
                    None => {
                        // Ctrl+D
                        println!();
                        break;
                    }
                }
            }
        };
        println!("{}", render::separator());

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/q" || input == "exit" {
            break;
        }
        if input == "/c" {
            agent.clear();
            println!("{} Cleared conversation", style("⏺").green());
            continue;
        }

        run_turn(&mut agent, input).await;
        println!();
    }

    Ok(())
}

/// A turn-level failure is surfaced and the loop continues; the conversation
/// recorded so far is untouched.
async fn run_turn(agent: &mut Agent, input: &str) {
    if let Err(e) = agent.submit(input).await {
        eprintln!("{}", style(format!("⏺ Error: {e}")).red());
    }
}

fn spawn_stdin_channel() -> mpsc::Receiver<Option<String>> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        loop {
            let result = tokio::task::spawn_blocking(|| {
                let mut buffer = String::new();
                match io::stdin().read_line(&mut buffer) {
                    Ok(0) => Ok(None), // EOF (Ctrl+D)
                    Ok(_) => Ok(Some(buffer.trim().to_string())),
                    Err(e) => Err(e),
                }
            })
            .await;

            match result {
                Ok(Ok(line_opt)) => {
                    if tx.send(line_opt).await.is_err() {
                        break;
                    }
                }
                _ => {
                    tx.send(None).await.ok();
                    break;
                }
            }
        }
    });
    rx
}
