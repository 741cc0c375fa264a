//! Natural-language coaching for a graded hand.
//!
//! The advisor sits outside grading: it is only asked after a decision has
//! been recorded, and whatever it returns (or fails to return) cannot change
//! that record. [`advise_or_fallback`] is the only entry point callers should
//! use; it turns every failure into a fixed, localized message.

use std::fmt;

use crate::trainer::{
    helpers::{action_label, localized},
    models::{Action, Hand, Locale, Position},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceRequest {
    pub hand: Hand,
    pub position: Position,
    pub correct: Action,
    pub chosen: Option<Action>,
    pub locale: Locale,
}

impl AdviceRequest {
    /// Coaching prompt sent to a text-generation model.
    pub fn prompt(&self) -> String {
        let correct = action_label(self.correct, self.position, self.locale);
        let chosen = self
            .chosen
            .map(|a| action_label(a, self.position, self.locale));
        match self.locale {
            Locale::English => {
                let chosen_line = chosen
                    .map(|c| format!("\n- The student chose: {c}"))
                    .unwrap_or_default();
                format!(
                    "You coach 6-max no-limit hold'em cash games with a focus on GTO preflop play.\n\
                     \n\
                     Spot:\n\
                     - Position: {position}\n\
                     - Hand: {hand}\n\
                     - Correct GTO action: {correct}{chosen_line}\n\
                     \n\
                     In at most three sentences, explain why that action is right. Talk about \
                     range construction, equity realization, blockers or positional disadvantage \
                     where relevant. Skip any preamble.",
                    position = self.position,
                    hand = self.hand.label(),
                )
            }
            Locale::Chinese => {
                let chosen_line = chosen
                    .map(|c| format!("\n- 学员的选择：{c}"))
                    .unwrap_or_default();
                format!(
                    "你是一名专注于 6 人桌现金局 GTO 翻前策略的德州扑克教练。\n\
                     \n\
                     局面：\n\
                     - 位置：{position}\n\
                     - 手牌：{hand}\n\
                     - 正确的 GTO 行动：{correct}{chosen_line}\n\
                     \n\
                     请用不超过三句话解释为什么这是正确的行动，可以涉及范围构建、权益实现、\
                     阻断牌或位置劣势。不要开场白，请用中文回答。",
                    position = self.position,
                    hand = self.hand.label(),
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceError {
    /// No API key in the configured environment variable.
    MissingCredential(String),
    /// The request never completed.
    Transport(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The service answered but said nothing usable.
    EmptyResponse,
    /// No advisor is configured.
    Unavailable,
}

impl fmt::Display for AdviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceError::MissingCredential(var) => write!(f, "{} is not set", var),
            AdviceError::Transport(e)           => write!(f, "advisor request failed: {}", e),
            AdviceError::Status(code)           => write!(f, "advisor returned HTTP {}", code),
            AdviceError::EmptyResponse          => write!(f, "advisor returned no text"),
            AdviceError::Unavailable            => write!(f, "no advisor configured"),
        }
    }
}

impl std::error::Error for AdviceError {}

/// Something that can comment on a graded hand.
pub trait Advisor {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

/// Message shown whenever the advisor cannot answer.
pub fn fallback_message(locale: Locale) -> String {
    localized(
        locale,
        "The AI coach is unavailable right now. Check your API key.",
        "AI 教练当前不可用，请检查您的 API 密钥。",
    )
}

/// Ask the advisor once. Errors and blank answers become the fallback
/// message; nothing is retried.
pub fn advise_or_fallback(advisor: &dyn Advisor, request: &AdviceRequest) -> String {
    match advisor.advise(request) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("advisor: {}", AdviceError::EmptyResponse);
            fallback_message(request.locale)
        }
        Err(e) => {
            log::warn!("advisor: {}", e);
            fallback_message(request.locale)
        }
    }
}

/// Used when no model is configured; always falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAdvisor;

impl Advisor for OfflineAdvisor {
    fn advise(&self, _request: &AdviceRequest) -> Result<String, AdviceError> {
        Err(AdviceError::Unavailable)
    }
}

#[cfg(feature = "gemini")]
pub use gemini::GeminiAdvisor;

#[cfg(feature = "gemini")]
mod gemini {
    use serde::{Deserialize, Serialize};

    use super::{AdviceError, AdviceRequest, Advisor};
    use crate::trainer::config::AdvisorConfig;

    const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

    #[derive(Serialize)]
    struct GenerateRequest {
        contents: Vec<Content>,
    }

    #[derive(Serialize)]
    struct Content {
        parts: Vec<Part>,
    }

    #[derive(Serialize)]
    struct Part {
        text: String,
    }

    #[derive(Deserialize)]
    struct GenerateResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: CandidateContent,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<CandidatePart>,
    }

    #[derive(Deserialize)]
    struct CandidatePart {
        #[serde(default)]
        text: String,
    }

    /// Blocking client for the Gemini `generateContent` endpoint.
    pub struct GeminiAdvisor {
        model: String,
        api_key_env: String,
        client: reqwest::blocking::Client,
    }

    impl GeminiAdvisor {
        pub fn new(config: &AdvisorConfig) -> Self {
            GeminiAdvisor {
                model: config.model.clone(),
                api_key_env: config.api_key_env.clone(),
                client: reqwest::blocking::Client::new(),
            }
        }

        /// True when the configured key variable is set, i.e. worth trying.
        pub fn has_credential(&self) -> bool {
            std::env::var(&self.api_key_env).map(|k| !k.is_empty()).unwrap_or(false)
        }
    }

    impl Advisor for GeminiAdvisor {
        fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
            let api_key = std::env::var(&self.api_key_env)
                .ok()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| AdviceError::MissingCredential(self.api_key_env.clone()))?;

            let body = GenerateRequest {
                contents: vec![Content { parts: vec![Part { text: request.prompt() }] }],
            };
            let url = format!("{ENDPOINT}/{}:generateContent", self.model);

            let response = self
                .client
                .post(&url)
                .query(&[("key", api_key.as_str())])
                .json(&body)
                .send()
                .map_err(|e| AdviceError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                return Err(AdviceError::Status(response.status().as_u16()));
            }

            let parsed: GenerateResponse = response
                .json()
                .map_err(|e| AdviceError::Transport(e.to_string()))?;

            let text: String = parsed
                .candidates
                .into_iter()
                .next()
                .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
                .unwrap_or_default();

            if text.trim().is_empty() {
                return Err(AdviceError::EmptyResponse);
            }
            Ok(text)
        }
    }
}
