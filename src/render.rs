//! Terminal display glue: separator rule, minimal markdown emphasis, and the
//! previews printed around tool execution. Everything here is cosmetic; the
//! agent loop works the same with these stripped out.

use console::{Term, style};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

const ARG_PREVIEW_CHARS: usize = 50;
const RESULT_PREVIEW_CHARS: usize = 60;

/// A dim horizontal rule capped at 80 columns.
pub fn separator() -> String {
    let (_rows, cols) = Term::stdout().size();
    let width = (cols as usize).min(80);
    style("─".repeat(width)).dim().to_string()
}

/// Renders `**emphasis**` as terminal bold.
pub fn markdown_bold(text: &str) -> String {
    BOLD_RE
        .replace_all(text, |caps: &regex::Captures| {
            style(&caps[1]).bold().to_string()
        })
        .into_owned()
}

pub fn print_assistant_text(text: &str) {
    println!("\n{} {}", style("⏺").cyan(), markdown_bold(text));
}

/// `⏺ Toolname(first argument, truncated)` before a tool runs.
pub fn print_tool_call(name: &str, input: &Value) {
    let preview = first_arg_preview(input);
    println!(
        "\n{}({})",
        style(format!("⏺ {}", capitalize(name))).green(),
        style(preview).dim()
    );
}

/// Streamed subprocess line, shown as it arrives.
pub fn print_tool_line(line: &str) {
    println!("  {} {}", style("│").dim(), style(line).dim());
}

/// One-line summary of a tool result: first line truncated, plus a count of
/// the lines not shown.
pub fn print_tool_result(content: &str) {
    let mut lines = content.split('\n');
    let first = lines.next().unwrap_or_default();
    let hidden = lines.count();

    let mut preview: String = first.chars().take(RESULT_PREVIEW_CHARS).collect();
    if hidden > 0 {
        preview.push_str(&format!(" ... +{hidden} lines"));
    } else if first.chars().count() > RESULT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    println!("  {}", style(format!("⎿  {preview}")).dim());
}

fn first_arg_preview(input: &Value) -> String {
    let value = input
        .as_object()
        .and_then(|object| object.values().next());
    let rendered = match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    rendered.chars().take(ARG_PREVIEW_CHARS).collect()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
