//! OpenAI-compatible chat client.
//!
//! Structured output is requested through tool calling: every request offers
//! exactly one tool and requires the model to call it. The tool arguments are
//! the JSON payload handed to the parser.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionToolChoiceOption,
    ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionObject,
};
use async_openai::Client;
use tracing::{debug, info};

use super::parser::{parse_agent_response, parse_ask_response};
use super::prompt::{self, PromptContext};
use super::{AgentResponse, AiError, AskResponse, QueryResolver, SUGGESTION_COUNT};
use crate::config::Settings;

const TOOL_SUGGEST_COMMAND: &str = "suggest_command";
const TOOL_SUGGEST_COMMANDS: &str = "suggest_commands";

fn suggest_command_tool() -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: TOOL_SUGGEST_COMMAND.to_string(),
            description: Some(
                "Suggest the single shell command that accomplishes the user's task.".to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The executable command that accomplishes the task"
                    },
                    "explanation": {
                        "type": "string",
                        "description": "Brief explanation of what the command does"
                    }
                },
                "required": ["command", "explanation"]
            })),
            strict: None,
        },
    }
}

fn suggest_commands_tool() -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: TOOL_SUGGEST_COMMANDS.to_string(),
            description: Some(format!(
                "Suggest {SUGGESTION_COUNT} different shell commands that help answer the \
                 user's question."
            )),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "commands": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "command": {
                                    "type": "string",
                                    "description": "The command to execute"
                                },
                                "description": {
                                    "type": "string",
                                    "description": "Description of what the command does"
                                }
                            },
                            "required": ["command", "description"]
                        }
                    }
                },
                "required": ["commands"]
            })),
            strict: None,
        },
    }
}

pub struct AiClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    context: PromptContext,
}

impl AiClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature,
            context: PromptContext::capture(),
        }
    }

    /// Build a client from user settings. Fails when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, AiError> {
        let api_key = settings.api_key().ok_or(AiError::MissingApiKey)?;
        Ok(Self::new(
            api_key,
            &settings.base_url,
            settings.model.clone(),
            settings.temperature,
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` offering only `tool` and return the raw JSON arguments
    /// of the resulting call.
    async fn request(&self, prompt: String, tool: ChatCompletionTool) -> Result<String, AiError> {
        let tool_name = tool.function.name.clone();

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt::SYSTEM_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(messages)
            .tools(vec![tool])
            .tool_choice(ChatCompletionToolChoiceOption::Required)
            .build()?;

        info!(model = %self.model, tool = %tool_name, "Sending AI request");
        let response = self.client.chat().create(request).await?;

        let message = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(AiError::EmptyResponse)?;

        if let Some(call) = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .find(|call| call.function.name == tool_name)
        {
            debug!(arguments = %call.function.arguments, "Received tool call");
            return Ok(call.function.arguments);
        }

        // Some backends answer in plain content despite the tool choice.
        debug!("No tool call in response, falling back to message content");
        message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

impl QueryResolver for AiClient {
    async fn resolve_agent(&self, query: &str) -> Result<AgentResponse, AiError> {
        let prompt = prompt::build_agent_prompt(query, &self.context);
        let raw = self.request(prompt, suggest_command_tool()).await?;
        parse_agent_response(&raw)
    }

    async fn resolve_ask(&self, question: &str) -> Result<AskResponse, AiError> {
        let prompt = prompt::build_ask_prompt(question, &self.context);
        let raw = self.request(prompt, suggest_commands_tool()).await?;
        parse_ask_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_requires_api_key() {
        let settings = Settings::default();
        assert!(matches!(
            AiClient::from_settings(&settings),
            Err(AiError::MissingApiKey)
        ));

        let blank = Settings {
            api_key: Some("   ".to_string()),
            ..Settings::default()
        };
        assert!(matches!(AiClient::from_settings(&blank), Err(AiError::MissingApiKey)));
    }

    #[test]
    fn test_from_settings_uses_model() {
        let settings = Settings {
            api_key: Some("key".to_string()),
            model: "gemini-2.0-flash-lite".to_string(),
            ..Settings::default()
        };

        let client = AiClient::from_settings(&settings).unwrap();

        assert_eq!(client.model(), "gemini-2.0-flash-lite");
    }

    #[test]
    fn test_tool_schemas_require_fields() {
        let agent = suggest_command_tool();
        assert_eq!(agent.function.name, TOOL_SUGGEST_COMMAND);
        let params = agent.function.parameters.unwrap();
        assert_eq!(params["required"], serde_json::json!(["command", "explanation"]));

        let ask = suggest_commands_tool();
        let params = ask.function.parameters.unwrap();
        assert_eq!(
            params["properties"]["commands"]["items"]["required"],
            serde_json::json!(["command", "description"])
        );
    }
}
