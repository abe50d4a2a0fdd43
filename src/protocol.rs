//! # Conversation Protocol
//!
//! The data model exchanged with the model endpoint: turns, content blocks,
//! tool results and tool declarations. The serde shapes match the Anthropic
//! Messages API, so these types serialize directly into request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One atomic unit of conversation content, attributed to a single role.
///
/// The conversation is an ordered `Vec<Turn>` owned by the agent loop. Order
/// reflects the exact request/response chronology: the endpoint is stateless
/// and receives the full history on every call.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: &'static str,
    pub content: TurnContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TurnContent {
    /// Plain user input.
    Text(String),
    /// An assistant response, in the order the blocks were emitted.
    Blocks(Vec<ContentBlock>),
    /// The batched results for every tool-use block of the preceding
    /// assistant turn.
    Results(Vec<ToolResult>),
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: "user",
            content: TurnContent::Text(text.into()),
        }
    }

    pub fn assistant(blocks: Vec<ContentBlock>) -> Self {
        Turn {
            role: "assistant",
            content: TurnContent::Blocks(blocks),
        }
    }

    /// Tool results travel back to the endpoint as a user turn.
    pub fn tool_results(results: Vec<ToolResult>) -> Self {
        Turn {
            role: "user",
            content: TurnContent::Results(results),
        }
    }
}

/// A single block of assistant output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    /// A request from the model to invoke a named tool. `id` is assigned by
    /// the endpoint and must be echoed back unchanged in the matching
    /// [`ToolResult`].
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
}

/// The textual outcome of one tool-use block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "tool_result")]
pub struct ToolResult {
    pub tool_use_id: String,
    pub content: String,
}

/// One entry of the tool catalog, in the shape the endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}
