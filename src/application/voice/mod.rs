//! Voice IVR - maps DTMF input to say / getDigits / dial / redirect actions

use serde::{Deserialize, Serialize};

const WELCOME: &str = "Welcome to Ujamaa Health Voice Consultation. Press 1 to speak with our AI voice agent, or press 2 to speak with a human healthcare professional.";
const AI_MENU: &str = "You've selected our AI voice agent. Press 1 for health information, press 2 for symptom assessment, or press 3 for medication information. To return to the main menu, press 0.";
const HUMAN_MENU: &str = "You've selected to speak with a human healthcare professional. Press 1 for General Medicine, press 2 for Cardiology, press 3 for Pediatrics, press 4 for Mental Health, or press 5 for Women's Health. To return to the main menu, press 0.";
const INVALID_INPUT: &str = "Sorry, I didn't understand that input. Let's try again.";

/// Agent the caller picked in an earlier round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    Ai,
    Human,
}

impl AgentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ai" => Some(AgentType::Ai),
            "human" => Some(AgentType::Human),
            _ => None,
        }
    }
}

/// Voice callback fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub caller_id: String,
    #[serde(default)]
    pub dtmf_digits: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
}

impl VoiceRequest {
    pub fn agent(&self) -> Option<AgentType> {
        self.agent_type.as_deref().and_then(AgentType::parse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Say {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDigits {
    pub num_digits: u32,
    pub timeout: u32,
}

impl Default for GetDigits {
    fn default() -> Self {
        Self {
            num_digits: 1,
            timeout: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dial {
    pub phone_numbers: Vec<String>,
    pub record: bool,
    pub sequential: bool,
    pub caller_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAction {
    pub say: Say,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_digits: Option<GetDigits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial: Option<Dial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Box<VoiceResponse>>,
}

/// Serialised as `{"voice": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceResponse {
    pub voice: VoiceAction,
}

impl VoiceResponse {
    fn say(text: &str) -> VoiceAction {
        VoiceAction {
            say: Say {
                text: text.to_string(),
            },
            get_digits: None,
            dial: None,
            redirect: None,
        }
    }

    /// Speak and wait for one key press
    pub fn prompt(text: &str) -> Self {
        Self {
            voice: VoiceAction {
                get_digits: Some(GetDigits::default()),
                ..Self::say(text)
            },
        }
    }

    pub fn welcome() -> Self {
        Self::prompt(WELCOME)
    }

    pub fn invalid_input() -> Self {
        Self {
            voice: VoiceAction {
                redirect: Some(Box::new(Self::welcome())),
                ..Self::say(INVALID_INPUT)
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.voice.say.text
    }
}

/// Specialist line reachable from the human agent menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecialistLine {
    pub name: String,
    pub phone: String,
}

/// Numbers used by the human agent menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct VoiceConfig {
    /// Number presented to the specialist when dialing out
    pub caller_id: String,
    /// Lines in key order: key 1 is the first entry
    pub specialists: Vec<SpecialistLine>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        let line = |name: &str, phone: &str| SpecialistLine {
            name: name.to_string(),
            phone: phone.to_string(),
        };
        Self {
            caller_id: "+0987654321".to_string(),
            specialists: vec![
                line("general medicine", "+1234567890"),
                line("cardiology", "+1234567891"),
                line("pediatrics", "+1234567892"),
                line("mental health", "+1234567893"),
                line("women's health", "+1234567894"),
            ],
        }
    }
}

/// Stateless IVR interpreter
pub struct VoiceService {
    config: VoiceConfig,
}

impl VoiceService {
    pub fn new(config: VoiceConfig) -> Self {
        Self { config }
    }

    pub fn respond(&self, request: &VoiceRequest) -> VoiceResponse {
        let digits = request
            .dtmf_digits
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        tracing::debug!(
            "Voice {} from {}: digits={:?} agent={:?}",
            request.session_id,
            request.caller_id,
            digits,
            request.agent()
        );

        if digits.is_empty() {
            return VoiceResponse::welcome();
        }
        match request.agent() {
            Some(AgentType::Ai) => VoiceResponse::prompt(ai_answer(digits)),
            Some(AgentType::Human) => self.connect(digits),
            None => match digits {
                "1" => VoiceResponse::prompt(AI_MENU),
                "2" => VoiceResponse::prompt(HUMAN_MENU),
                "0" => VoiceResponse::welcome(),
                _ => VoiceResponse::invalid_input(),
            },
        }
    }

    fn connect(&self, digits: &str) -> VoiceResponse {
        if digits == "0" {
            return VoiceResponse::welcome();
        }
        let line = digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.config.specialists.get(i));
        let Some(line) = line else {
            return VoiceResponse::invalid_input();
        };

        tracing::info!("Connecting caller to {} line {}", line.name, line.phone);
        VoiceResponse {
            voice: VoiceAction {
                dial: Some(Dial {
                    phone_numbers: vec![line.phone.clone()],
                    record: true,
                    sequential: true,
                    caller_id: self.config.caller_id.clone(),
                }),
                ..VoiceResponse::say(&format!(
                    "Please hold while we connect you to a {} specialist.",
                    line.name
                ))
            },
        }
    }
}

fn ai_answer(digits: &str) -> &'static str {
    match digits {
        "1" => "Here's some general health information. It's important to stay hydrated, get regular exercise, and eat a balanced diet. Would you like more specific information? Press 1 for nutrition, 2 for exercise, or 3 for sleep.",
        "2" => "I can help assess your symptoms. Please describe what you're experiencing. For fever, press 1. For cough, press 2. For headache, press 3. For stomach pain, press 4.",
        "3" => "I can provide information about medications. For dosage information, press 1. For side effects, press 2. For drug interactions, press 3.",
        _ => "I'm not sure I understand. Please try again or press 0 to return to the main menu.",
    }
}
