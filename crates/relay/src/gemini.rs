//! Gemini backend for the ship computer.
//!
//! Speaks the generateContent REST API with a blocking HTTP client.
//! Turn history is kept client-side and resent with every call, which
//! is what a server-held chat session amounts to anyway. The API key
//! comes strictly from the `GEMINI_API_KEY` environment variable and is
//! never stored in configuration or shown anywhere.

use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{RelayConfig, RelayError, ShipComputer};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn system_instruction() -> String {
    format!(
        "\
You are the central computer of the advanced starship \"VinaSpace-1\".
Your interface is a text-based terminal on the command deck.
Your responses should be concise, slightly robotic but helpful, and immersive.
Avoid long paragraphs; use bullet points or short status updates if possible.

Visual Context:
- The user is seated in the command cockpit.
- Visible outside: A large, blue gas giant planet named \"Aethra\" with glowing purple rings.
- To the left: A distant orange sun.
- Interior: Dashboard is active with cyan and orange holographic displays.

Instructions:
If the user speaks Vietnamese, reply in Vietnamese. If English, reply in English.
You can discuss the ship's status (Warp drive, Shield integrity, Life support), the planet Aethra, or mission objectives.
Current Date: {}.
Location: Orbiting Planet Aethra, Sector 7G.
",
        Local::now().format("%Y-%m-%d")
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: SystemInstruction,
    contents: &'a [Content],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// One conversation with the Gemini backend.
pub struct GeminiComputer {
    http: reqwest::blocking::Client,
    config: RelayConfig,
    api_key: String,
    system_instruction: String,
    history: Vec<Content>,
}

impl GeminiComputer {
    /// Build a session. Fails if the API key is absent or the HTTP
    /// client cannot be constructed.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| RelayError::SessionInit(format!("{API_KEY_ENV} is not set")))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RelayError::SessionInit(format!("failed to build HTTP client: {e}")))?;

        log::info!("ship computer session opened, model {}", config.model);
        Ok(Self {
            http,
            config,
            api_key,
            system_instruction: system_instruction(),
            history: Vec::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ShipComputer for GeminiComputer {
    fn send(&mut self, text: &str) -> Result<String, RelayError> {
        let user_turn = Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        };

        let mut contents = self.history.clone();
        contents.push(user_turn.clone());

        let request = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: self.system_instruction.clone(),
                }],
            },
            contents: &contents,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RelayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| RelayError::MalformedResponse(e.to_string()))?;
        let reply = extract_text(&body)?;

        // History only grows on success so a failed turn can be retyped.
        self.history.push(user_turn);
        self.history.push(Content {
            role: "model".to_string(),
            parts: vec![Part {
                text: reply.clone(),
            }],
        });

        Ok(reply)
    }
}

/// Concatenated text of the first candidate. An answer with no
/// candidates is malformed; a candidate whose parts are empty is a
/// legitimate empty reply.
fn extract_text(response: &GenerateResponse) -> Result<String, RelayError> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| RelayError::MalformedResponse("no candidates in response".into()))?;
    let Some(content) = &candidate.content else {
        return Ok(String::new());
    };
    Ok(content
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_candidate_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"All "},{"text":"nominal."}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "All nominal.");
    }

    #[test]
    fn no_candidates_is_malformed() {
        let response: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            extract_text(&response),
            Err(RelayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn candidate_without_content_is_empty_reply() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(extract_text(&response).unwrap(), "");
    }

    #[test]
    fn request_serializes_camel_case() {
        let contents = vec![Content {
            role: "user".into(),
            parts: vec![Part {
                text: "status".into(),
            }],
        }];
        let request = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part { text: "sys".into() }],
            },
            contents: &contents,
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 300,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 300);
        assert_eq!(json["contents"][0]["role"], "user");
    }
}
