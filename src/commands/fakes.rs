//! Scripted collaborators for driving the flows in tests.

use std::cell::RefCell;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use anyhow::Result;

use crate::ai::{AgentResponse, AiError, AskResponse, CommandOption, QueryResolver};
use crate::shell::{CommandRunner, ShellError};
use crate::ui::confirm::{Confirmation, Decision};

pub struct FakeResolver {
    pub agent: Option<AgentResponse>,
    pub ask: Option<AskResponse>,
}

impl FakeResolver {
    pub fn agent(command: &str, explanation: &str) -> Self {
        Self {
            agent: Some(AgentResponse {
                command: command.to_string(),
                explanation: explanation.to_string(),
            }),
            ask: None,
        }
    }

    pub fn ask(options: &[(&str, &str)]) -> Self {
        Self {
            agent: None,
            ask: Some(AskResponse {
                commands: options
                    .iter()
                    .map(|(command, description)| CommandOption {
                        command: command.to_string(),
                        description: description.to_string(),
                    })
                    .collect(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { agent: None, ask: None }
    }
}

impl QueryResolver for FakeResolver {
    async fn resolve_agent(&self, _query: &str) -> Result<AgentResponse, AiError> {
        self.agent.clone().ok_or(AiError::EmptyResponse)
    }

    async fn resolve_ask(&self, _question: &str) -> Result<AskResponse, AiError> {
        self.ask.clone().ok_or(AiError::EmptyResponse)
    }
}

pub struct FakeConfirm {
    pub decision: Decision,
    pub prompted: Vec<(String, String)>,
}

impl FakeConfirm {
    pub fn new(decision: Decision) -> Self {
        Self {
            decision,
            prompted: Vec::new(),
        }
    }
}

impl Confirmation for FakeConfirm {
    fn prompt(&mut self, command: &str, explanation: &str) -> Result<Decision> {
        self.prompted.push((command.to_string(), explanation.to_string()));
        Ok(self.decision)
    }
}

/// Records every command and exits with a fixed code.
pub struct FakeRunner {
    pub exit_code: i32,
    pub ran: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            ran: RefCell::new(Vec::new()),
        }
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<ExitStatus, ShellError> {
        self.ran.borrow_mut().push(command.to_string());
        // wait status layout: exit code lives in the second byte
        Ok(ExitStatus::from_raw(self.exit_code << 8))
    }
}
