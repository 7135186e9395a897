//! AI module for turning natural-language requests into shell commands.
//!
//! This module defines the resolver interface the commands depend on, the
//! response types it produces, and an OpenAI-compatible client that
//! implements it.

pub mod client;
pub mod parser;
pub mod prompt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::AiClient;

/// How many suggestions `ask` requests.
pub const SUGGESTION_COUNT: usize = 3;

/// A single command with an explanation, produced for `agent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub command: String,
    pub explanation: String,
}

/// Several alternative commands, produced for `ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub commands: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key not configured. Run 'ted settings' to set it up")]
    MissingApiKey,

    #[error("AI request failed")]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("no response generated")]
    EmptyResponse,

    #[error("could not understand the AI response: {0}")]
    InvalidResponse(String),
}

/// Turns a natural-language request into candidate commands.
#[allow(async_fn_in_trait)]
pub trait QueryResolver {
    async fn resolve_agent(&self, query: &str) -> Result<AgentResponse, AiError>;

    async fn resolve_ask(&self, question: &str) -> Result<AskResponse, AiError>;
}
