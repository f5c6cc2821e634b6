use crate::config::Config;
use crate::llm::error::{LlmError, Result};
use serde::{Deserialize, Serialize};

/// Backend a model name is served by. The name prefix decides: `gemini-*`
/// goes to Google's generateContent API, everything else to the OpenAI
/// chat-completions API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

/// One entry of the fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub name: &'static str,
    pub provider: Provider,
}

/// The ordered chain tried on every generation request. First success wins;
/// any failure logs and falls through to the next entry.
pub const DEFAULT_MODEL_CHAIN: &[ModelSpec] = &[
    ModelSpec { name: "gemini-2.5-flash-lite", provider: Provider::Gemini },
    ModelSpec { name: "gemini-1.5-flash", provider: Provider::Gemini },
    ModelSpec { name: "gemini-2.0-flash", provider: Provider::Gemini },
    ModelSpec { name: "gpt-4o-mini", provider: Provider::OpenAi },
    ModelSpec { name: "gpt-3.5-turbo-0125", provider: Provider::OpenAi },
    ModelSpec { name: "gpt-4.1-mini", provider: Provider::OpenAi },
];

const OPENAI_MAX_TOKENS: u32 = 1000;
const OPENAI_TEMPERATURE: f32 = 0.7;

/// Blocking client over the model fallback chain.
pub struct LlmClient {
    http: reqwest::blocking::Client,
    gemini_api_key: String,
    openai_api_key: String,
    chain: Vec<ModelSpec>,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        LlmClient {
            http: reqwest::blocking::Client::new(),
            gemini_api_key: config.gemini_api_key.clone(),
            openai_api_key: config.openai_api_key.clone(),
            chain: DEFAULT_MODEL_CHAIN.to_vec(),
        }
    }

    /// Sends the prompt through the chain and returns the first successful
    /// reply. Exhausting the chain yields a single error carrying the last
    /// cause; retry policy beyond this sequential pass is out of scope.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let mut last_error: Option<LlmError> = None;
        for spec in &self.chain {
            match self.call_model(spec, prompt) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    eprintln!("[LLM] {} 실패: {}", spec.name, e);
                    last_error = Some(e);
                }
            }
        }
        Err(LlmError::ChainExhausted {
            last: last_error.map_or_else(|| "empty model chain".to_string(), |e| e.to_string()),
        })
    }

    fn call_model(&self, spec: &ModelSpec, prompt: &str) -> Result<String> {
        match spec.provider {
            Provider::Gemini => self.call_gemini(spec.name, prompt),
            Provider::OpenAi => self.call_openai(spec.name, prompt),
        }
    }

    fn call_gemini(&self, model: &str, prompt: &str) -> Result<String> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey("Gemini"));
        }
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            model, self.gemini_api_key
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.to_string() }],
            }],
        };
        let response = self.http.post(&url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status,
                model: model.to_string(),
                snippet: snippet(&response.text().unwrap_or_default()),
            });
        }
        let reply: GeminiResponse = response.json()?;
        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(LlmError::Decode { model: model.to_string() })
    }

    fn call_openai(&self, model: &str, prompt: &str) -> Result<String> {
        if self.openai_api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey("OpenAI"));
        }
        let body = OpenAiRequest {
            model: model.to_string(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: OPENAI_MAX_TOKENS,
            temperature: OPENAI_TEMPERATURE,
        };
        let response = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.openai_api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status,
                model: model.to_string(),
                snippet: snippet(&response.text().unwrap_or_default()),
            });
        }
        let reply: OpenAiResponse = response.json()?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::Decode { model: model.to_string() })
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    let cut: String = trimmed.chars().take(200).collect();
    cut
}

#[derive(Serialize, Debug)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Serialize, Debug)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Debug)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_is_gemini_first_then_openai() {
        let providers: Vec<Provider> = DEFAULT_MODEL_CHAIN.iter().map(|s| s.provider).collect();
        assert_eq!(
            providers,
            vec![
                Provider::Gemini,
                Provider::Gemini,
                Provider::Gemini,
                Provider::OpenAi,
                Provider::OpenAi,
                Provider::OpenAi,
            ]
        );
        assert_eq!(DEFAULT_MODEL_CHAIN[0].name, "gemini-2.5-flash-lite");
        assert_eq!(DEFAULT_MODEL_CHAIN.len(), 6);
    }

    #[test]
    fn gemini_response_shape_decodes() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"안녕"}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);
        assert_eq!(text.as_deref(), Some("안녕"));
    }

    #[test]
    fn openai_response_shape_decodes() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"回复"}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        let text = parsed.choices.into_iter().next().map(|c| c.message.content);
        assert_eq!(text.as_deref(), Some("回复"));
    }
}
