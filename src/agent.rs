//! # Agent Loop
//!
//! The orchestrator. Owns the conversation and drives the turn cycle:
//! send → receive → execute requested tools → append results → resend, until
//! the model emits a turn with no tool requests.

use crate::client::CompletionBackend;
use crate::protocol::{ContentBlock, ToolResult, Turn};
use crate::registry::ToolRegistry;
use crate::render;
use anyhow::Result;

pub struct Agent {
    client: Box<dyn CompletionBackend>,
    registry: ToolRegistry,
    system_prompt: String,
    /// The full conversation, in exact request/response chronology. Mutated
    /// only here, at well-defined points.
    pub turns: Vec<Turn>,
}

impl Agent {
    pub fn new(
        client: Box<dyn CompletionBackend>,
        registry: ToolRegistry,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            registry,
            system_prompt,
            turns: Vec::new(),
        }
    }

    /// Empties the conversation in place without touching any other state.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Processes one user request to completion.
    ///
    /// Tool-use blocks are dispatched synchronously in emission order, and
    /// every block is answered exactly once — all results batched into a
    /// single user turn — before the next remote call. There is no bound on
    /// the number of round trips; the loop ends when the model stops
    /// requesting tools. An `Err` aborts the current turn only: the
    /// conversation recorded so far stays intact and the process continues.
    ///
    /// A dispatch protocol error (unknown tool, malformed arguments) also
    /// aborts the turn, but only after every tool-use block in the assistant
    /// turn has received a result — the failing one an `error:` text, the
    /// not-yet-run ones a not-executed marker. The recorded conversation
    /// never carries an unanswered tool request into the next submission.
    pub async fn submit(&mut self, input: &str) -> Result<()> {
        self.turns.push(Turn::user(input));

        loop {
            let declarations = self.registry.declarations();
            let blocks = self
                .client
                .complete(&self.turns, &self.system_prompt, &declarations)
                .await?;
            self.turns.push(Turn::assistant(blocks.clone()));

            let mut results: Vec<ToolResult> = Vec::new();
            let mut protocol_error: Option<anyhow::Error> = None;
            for block in &blocks {
                match block {
                    ContentBlock::Text { text } => render::print_assistant_text(text),
                    ContentBlock::ToolUse { id, name, input } => {
                        let content = if protocol_error.is_some() {
                            "error: not executed".to_string()
                        } else {
                            render::print_tool_call(name, input);
                            let mut stream = |line: &str| render::print_tool_line(line);
                            match self.registry.dispatch(name, input, &mut stream).await {
                                Ok(content) => content,
                                Err(e) => {
                                    let content = format!("error: {e}");
                                    protocol_error = Some(e);
                                    content
                                }
                            }
                        };
                        render::print_tool_result(&content);
                        results.push(ToolResult {
                            tool_use_id: id.clone(),
                            content,
                        });
                    }
                }
            }

            if results.is_empty() {
                // Final answer: no tool requests in this turn.
                return Ok(());
            }
            self.turns.push(Turn::tool_results(results));
            if let Some(e) = protocol_error {
                return Err(e);
            }
        }
    }
}
