//! Personalised health tips generated by the LLM

use serde::Deserialize;
use std::sync::Arc;

use crate::infrastructure::llm::{LLMMessage, LLM};

/// Served whenever generation fails or returns nothing usable
pub const FALLBACK_TIPS: [&str; 5] = [
    "Stay hydrated by drinking at least 8 glasses of water daily.",
    "Aim for at least 30 minutes of moderate exercise most days of the week.",
    "Include a variety of fruits and vegetables in your diet for essential nutrients.",
    "Practice stress-reduction techniques like meditation or deep breathing.",
    "Ensure you get 7-8 hours of quality sleep each night.",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietPreferences {
    #[serde(default)]
    pub diet: Option<String>,
}

/// Profile submitted from the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthProfile {
    #[serde(default)]
    pub age: Option<serde_json::Value>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub preferences: DietPreferences,
}

impl HealthProfile {
    pub fn prompt(&self) -> String {
        let or = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let list = |items: &[String]| (!items.is_empty()).then(|| items.join(", "));
        let age = self.age.as_ref().and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        format!(
            "Generate 5 personalized health tips for a person with the following health profile:\n\n\
             Age: {}\n\
             Gender: {}\n\
             Health Conditions: {}\n\
             Health Goals: {}\n\
             Diet Preferences: {}\n\n\
             Each tip should be specific to their profile and provide actionable advice.\n\
             Format the response as a JSON array of strings, with each string being a health tip.",
            or(age, "Not specified"),
            or(self.gender.clone(), "Not specified"),
            or(list(&self.conditions), "None specified"),
            or(list(&self.goals), "None specified"),
            or(self.preferences.diet.clone(), "Not specified"),
        )
    }
}

/// Extract a JSON array of strings from model output, tolerating code fences
pub fn parse_tips(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    let tips: Vec<String> = serde_json::from_str(&text[start..=end]).ok()?;
    let tips: Vec<String> = tips
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    (!tips.is_empty()).then_some(tips)
}

fn fallback() -> Vec<String> {
    FALLBACK_TIPS.iter().map(|t| t.to_string()).collect()
}

pub struct TipsService {
    llm: Option<Arc<dyn LLM>>,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl TipsService {
    pub fn new(llm: Option<Arc<dyn LLM>>, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            llm,
            temperature,
            max_tokens,
        }
    }

    /// Five tips for the profile. Never fails: falls back to the generic list.
    pub async fn generate(&self, profile: &HealthProfile) -> Vec<String> {
        let Some(llm) = &self.llm else {
            return fallback();
        };

        let messages = vec![LLMMessage::user(profile.prompt())];
        match llm.chat(messages, Some(self.temperature), self.max_tokens).await {
            Ok(response) => parse_tips(&response.content).unwrap_or_else(|| {
                tracing::warn!("Could not parse tips from {} output", llm.name());
                fallback()
            }),
            Err(e) => {
                tracing::error!("Tip generation via {} failed: {}", llm.name(), e);
                fallback()
            }
        }
    }
}
