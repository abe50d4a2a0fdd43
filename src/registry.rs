//! # Tool Registry
//!
//! Declarative catalog of the tools the model may invoke, plus the single
//! dispatch entry point. Tool calls arrive as a name and untyped JSON
//! arguments; the registry resolves them into a closed [`Invocation`] enum
//! with per-variant typed argument structs before any handler runs.
//!
//! Failure taxonomy: an unknown tool name or malformed arguments means the
//! endpoint violated the declared contract — those are returned as `Err` and
//! abort the turn. A handler failure is recovered here and converted into an
//! `"error: ..."` result so the model can see and react to it.

use crate::files;
use crate::glob;
use crate::protocol::ToolDeclaration;
use crate::search;
use crate::shell;
use anyhow::{Result, anyhow};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

/// One catalog entry. Parameter types are declared as short tags: `"string"`,
/// `"number"`, with a trailing `?` marking the parameter optional.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [(&'static str, &'static str)],
}

pub const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "bash",
        description: "Run shell command",
        params: &[("cmd", "string")],
    },
    ToolSpec {
        name: "read_file",
        description: "Read file content with line numbers",
        params: &[("path", "string")],
    },
    ToolSpec {
        name: "write_file",
        description: "Write content to file (creates dirs if needed)",
        params: &[("path", "string"), ("content", "string")],
    },
    ToolSpec {
        name: "glob",
        description: "Find files matching pattern (supports **)",
        params: &[("pattern", "string")],
    },
    ToolSpec {
        name: "web_search",
        description: "Search the web using DuckDuckGo, returns top results with titles, URLs and snippets",
        params: &[("query", "string")],
    },
];

#[derive(Deserialize, Debug)]
pub struct BashArgs {
    pub cmd: String,
}

#[derive(Deserialize, Debug)]
pub struct ReadFileArgs {
    pub path: String,
}

#[derive(Deserialize, Debug)]
pub struct WriteFileArgs {
    pub path: String,
    pub content: String,
}

#[derive(Deserialize, Debug)]
pub struct GlobArgs {
    pub pattern: String,
}

#[derive(Deserialize, Debug)]
pub struct WebSearchArgs {
    pub query: String,
}

/// A validated tool call: the closed set of tools keyed by name, each with
/// its strongly-typed arguments.
#[derive(Debug)]
pub enum Invocation {
    Bash(BashArgs),
    ReadFile(ReadFileArgs),
    WriteFile(WriteFileArgs),
    Glob(GlobArgs),
    WebSearch(WebSearchArgs),
}

pub struct ToolRegistry {
    command_timeout: Duration,
}

impl ToolRegistry {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }

    /// The tool catalog in the shape the endpoint expects.
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        TOOL_SPECS.iter().map(declaration_for).collect()
    }

    /// Resolves a raw tool call into a typed [`Invocation`]. Unknown names
    /// and malformed arguments are protocol errors.
    pub fn parse(&self, name: &str, input: &Value) -> Result<Invocation> {
        let invocation = match name {
            "bash" => Invocation::Bash(typed_args(name, input)?),
            "read_file" => Invocation::ReadFile(typed_args(name, input)?),
            "write_file" => Invocation::WriteFile(typed_args(name, input)?),
            "glob" => Invocation::Glob(typed_args(name, input)?),
            "web_search" => Invocation::WebSearch(typed_args(name, input)?),
            other => return Err(anyhow!("unknown tool: {other}")),
        };
        Ok(invocation)
    }

    /// The single entry point used to invoke any tool by name.
    ///
    /// `on_line` observes streamed subprocess output. `Err` is reserved for
    /// protocol errors; handler failures come back as `Ok("error: ...")`.
    pub async fn dispatch(
        &self,
        name: &str,
        input: &Value,
        on_line: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        let invocation = self.parse(name, input)?;
        let outcome = self.execute(invocation, on_line).await;
        Ok(match outcome {
            Ok(text) => text,
            Err(e) => format!("error: {e}"),
        })
    }

    async fn execute(
        &self,
        invocation: Invocation,
        on_line: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        match invocation {
            Invocation::Bash(args) => {
                Ok(shell::run_command(&args.cmd, self.command_timeout, on_line).await)
            }
            Invocation::ReadFile(args) => files::read_file(&args.path),
            Invocation::WriteFile(args) => files::write_file(&args.path, &args.content),
            Invocation::Glob(args) => {
                let matches = glob::find_matches(&args.pattern)?;
                Ok(if matches.is_empty() {
                    "(no matches)".to_string()
                } else {
                    matches.join("\n")
                })
            }
            // Fetch failures come back as "search error: ..." text, not Err.
            Invocation::WebSearch(args) => Ok(search::web_search(&args.query).await),
        }
    }
}

fn typed_args<T: DeserializeOwned>(name: &str, input: &Value) -> Result<T> {
    serde_json::from_value(input.clone())
        .map_err(|e| anyhow!("malformed arguments for tool `{name}`: {e}"))
}

/// Converts one catalog entry into the endpoint's function-call schema.
/// Declared `number` parameters are reported as integer-typed; every
/// parameter without the `?` marker lands in `required`.
pub fn declaration_for(spec: &ToolSpec) -> ToolDeclaration {
    let mut properties = serde_json::Map::new();
    let mut required: Vec<&str> = Vec::new();
    for (param, declared) in spec.params {
        let optional = declared.ends_with('?');
        let base = declared.trim_end_matches('?');
        let type_tag = if base == "number" { "integer" } else { base };
        properties.insert((*param).to_string(), json!({ "type": type_tag }));
        if !optional {
            required.push(param);
        }
    }
    ToolDeclaration {
        name: spec.name.to_string(),
        description: spec.description.to_string(),
        input_schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Duration::from_secs(5))
    }

    fn sink() -> impl FnMut(&str) + Send {
        |_: &str| {}
    }

    #[test]
    fn unknown_tool_is_a_protocol_error() {
        let err = registry()
            .parse("launch_missiles", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("unknown tool: launch_missiles"));
    }

    #[test]
    fn malformed_arguments_are_a_protocol_error() {
        let err = registry().parse("bash", &json!({"command": "ls"})).unwrap_err();
        assert!(err.to_string().contains("malformed arguments for tool `bash`"));
    }

    #[tokio::test]
    async fn handler_failure_becomes_error_text() {
        let mut observer = sink();
        let result = registry()
            .dispatch("read_file", &json!({"path": "nope/missing.txt"}), &mut observer)
            .await
            .unwrap();
        assert!(result.starts_with("error: "), "got: {result}");
        assert!(result.contains("file not found"));
    }

    #[tokio::test]
    async fn write_then_read_through_dispatch() {
        let tmp_dir = Builder::new().prefix("test-registry").tempdir().unwrap();
        let path = tmp_dir.path().join("out.txt");
        let path_str = path.to_str().unwrap();
        let reg = registry();
        let mut observer = sink();

        let report = reg
            .dispatch(
                "write_file",
                &json!({"path": path_str, "content": "one\ntwo"}),
                &mut observer,
            )
            .await
            .unwrap();
        assert_eq!(report, format!("wrote 2 lines to {path_str}"));

        let view = reg
            .dispatch("read_file", &json!({"path": path_str}), &mut observer)
            .await
            .unwrap();
        assert_eq!(view, "   1 | one\n   2 | two");
    }

    #[tokio::test]
    async fn glob_with_no_matches_returns_sentinel() {
        let tmp_dir = Builder::new().prefix("test-registry").tempdir().unwrap();
        let pattern = format!("{}/**/*.zig", tmp_dir.path().to_str().unwrap());
        let mut observer = sink();
        let result = registry()
            .dispatch("glob", &json!({"pattern": pattern}), &mut observer)
            .await
            .unwrap();
        assert_eq!(result, "(no matches)");
    }

    #[tokio::test]
    async fn bash_streams_through_the_observer() {
        let mut seen: Vec<String> = Vec::new();
        let mut observer = |line: &str| seen.push(line.to_string());
        let result = registry()
            .dispatch("bash", &json!({"cmd": "echo streamed"}), &mut observer)
            .await
            .unwrap();
        assert_eq!(result, "streamed");
        assert_eq!(seen, vec!["streamed".to_string()]);
    }

    #[test]
    fn declarations_cover_every_spec_in_order() {
        let decls = registry().declarations();
        let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["bash", "read_file", "write_file", "glob", "web_search"]
        );
    }

    #[test]
    fn declaration_shape_matches_endpoint_schema() {
        let decls = registry().declarations();
        let write = decls.iter().find(|d| d.name == "write_file").unwrap();
        assert_eq!(
            write.input_schema,
            json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string"},
                    "content": {"type": "string"},
                },
                "required": ["path", "content"],
            })
        );
    }

    #[test]
    fn number_params_declare_as_integer_and_optional_marker_is_honored() {
        let spec = ToolSpec {
            name: "head",
            description: "First lines of a file",
            params: &[("count", "number"), ("label", "string?")],
        };
        let decl = declaration_for(&spec);
        assert_eq!(
            decl.input_schema,
            json!({
                "type": "object",
                "properties": {
                    "count": {"type": "integer"},
                    "label": {"type": "string"},
                },
                "required": ["count"],
            })
        );
    }
}
