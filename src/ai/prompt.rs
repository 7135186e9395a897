//! Prompt building utilities for AI requests.
//!
//! Prompts carry the user's request plus a little environment context
//! (operating system, shell, working directory) so suggestions fit the
//! machine they will run on.

use std::env;

use super::SUGGESTION_COUNT;

/// System prompt shared by every request.
pub const SYSTEM_PROMPT: &str = r#"You are a helpful command-line assistant. You translate requests written in plain language into shell commands.

Guidelines:
1. Suggest commands that can be executed directly, without placeholders to fill in.
2. Prefer safe, non-destructive commands when the request is ambiguous.
3. Prefer portable POSIX commands unless the environment calls for something else.
4. Keep explanations short and mention side effects when a command modifies files or the system.

Always answer by calling the provided tool."#;

/// Environment details included in prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptContext {
    pub os: String,
    pub shell: String,
    pub cwd: String,
}

impl PromptContext {
    /// Capture the context of the current process.
    pub fn capture() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            shell: env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string()),
            cwd: env::current_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    fn format_for_prompt(&self) -> String {
        let mut out = format!("Operating system: {}\nShell: {}\n", self.os, self.shell);
        if !self.cwd.is_empty() {
            out.push_str(&format!("Current directory: {}\n", self.cwd));
        }
        out
    }
}

/// Prompt asking for a single command that accomplishes `query`.
pub fn build_agent_prompt(query: &str, ctx: &PromptContext) -> String {
    format!(
        "The user wants to accomplish the following task: \"{query}\"\n\n\
         --- Context ---\n{context}\n\
         Respond with the command and a brief explanation of what it does.",
        query = query,
        context = ctx.format_for_prompt()
    )
}

/// Prompt asking for `SUGGESTION_COUNT` alternative commands for `question`.
pub fn build_ask_prompt(question: &str, ctx: &PromptContext) -> String {
    format!(
        "The user is asking: \"{question}\"\n\n\
         --- Context ---\n{context}\n\
         Provide exactly {count} different command-line commands that help answer this question, \
         each with a short description.",
        question = question,
        context = ctx.format_for_prompt(),
        count = SUGGESTION_COUNT
    )
}
