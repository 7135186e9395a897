//! Parser module for processing AI responses.
//!
//! Responses arrive as JSON, either as tool-call arguments or, from backends
//! that ignore tools, as plain message content that may be wrapped in a
//! markdown code block.

use serde::de::DeserializeOwned;

use super::{AgentResponse, AiError, AskResponse};

/// Parse the JSON payload for an `agent` request.
pub fn parse_agent_response(raw: &str) -> Result<AgentResponse, AiError> {
    let mut response: AgentResponse = parse_json(raw)?;
    response.command = response.command.trim().to_string();
    response.explanation = response.explanation.trim().to_string();

    if response.command.is_empty() {
        return Err(AiError::InvalidResponse("the response contained no command".to_string()));
    }
    Ok(response)
}

/// Parse the JSON payload for an `ask` request. Options without a command are
/// dropped.
pub fn parse_ask_response(raw: &str) -> Result<AskResponse, AiError> {
    let mut response: AskResponse = parse_json(raw)?;
    response.commands.retain_mut(|option| {
        option.command = option.command.trim().to_string();
        option.description = option.description.trim().to_string();
        !option.command.is_empty()
    });

    if response.commands.is_empty() {
        return Err(AiError::InvalidResponse("the response contained no commands".to_string()));
    }
    Ok(response)
}

/// Render suggestions as a numbered list, one line per option:
/// ``1. `ls -la` - Lists all files``.
pub fn format_ask_response(response: &AskResponse) -> String {
    response
        .commands
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. `{}` - {}", i + 1, option.command, option.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, AiError> {
    let body = strip_code_block(raw);
    if body.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(e.to_string()))
}

/// Return the contents of the first ``` block, or the trimmed input when
/// there is none.
fn strip_code_block(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };

    let after_fence = &trimmed[start + 3..];
    // skip the language tag, e.g. ```json
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(after_fence.len());
    let body = &after_fence[body_start..];
    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}
