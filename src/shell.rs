//! # Process Runner
//!
//! Executes a shell command as a child process, streaming combined
//! stdout/stderr line-by-line to an observer while accumulating the output,
//! under a hard wall-clock timeout.
//!
//! The contract never fails: spawn errors are encoded in the returned text,
//! a timeout appends a sentinel line instead of erroring, and the exit code
//! is deliberately not surfaced — the model infers failure from output text.

use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Wall-clock budget for one command.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runs `cmd` through `sh -c` so pipes, redirects and globs behave as typed.
///
/// Every captured line lands in the accumulator; non-empty lines are also
/// forwarded to `on_line` as they arrive for real-time display. On timeout
/// the child is killed and `(timed out after <n>s)` is appended — a
/// successful result carrying a timeout indication, not an error. Trailing
/// blank lines are dropped (the accumulator is trimmed); an empty capture
/// becomes `(empty)`.
pub async fn run_command(
    cmd: &str,
    timeout: Duration,
    on_line: &mut (dyn FnMut(&str) + Send),
) -> String {
    let mut child = match Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return format!("error: failed to spawn shell: {e}"),
    };

    let (tx, mut rx) = mpsc::channel::<String>(64);
    if let Some(stdout) = child.stdout.take() {
        spawn_line_reader(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        spawn_line_reader(stderr, tx.clone());
    }
    // The readers hold the only remaining senders; recv() returns None once
    // both pipes close.
    drop(tx);

    let deadline = sleep(timeout);
    tokio::pin!(deadline);

    let mut lines: Vec<String> = Vec::new();
    let mut timed_out = false;
    loop {
        tokio::select! {
            received = rx.recv() => {
                match received {
                    Some(line) => {
                        if !line.is_empty() {
                            on_line(&line);
                        }
                        lines.push(line);
                    }
                    None => break,
                }
            }
            _ = &mut deadline => {
                let _ = child.start_kill();
                timed_out = true;
                break;
            }
        }
    }

    let _ = child.wait().await;

    if timed_out {
        lines.push(format!("(timed out after {}s)", timeout.as_secs()));
    }

    let output = lines.join("\n").trim().to_string();
    if output.is_empty() {
        "(empty)".to_string()
    } else {
        output
    }
}

fn spawn_line_reader<R>(stream: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream).lines();
        while let Ok(Some(line)) = reader.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });
}
