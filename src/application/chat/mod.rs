//! Chat interpreter - keyword-driven conversation with per-session context

use serde::{Deserialize, Serialize};

use crate::application::sms::TipCategory;
use crate::infrastructure::session::SessionStore;

const MAIN_OPTIONS: [&str; 4] = ["Mental Health", "Health Info", "Resources", "Emergency"];
const MENTAL_OPTIONS: [&str; 6] = [
    "Anxiety",
    "Depression",
    "Stress Management",
    "Trauma",
    "Counseling Services",
    "Support Groups",
];
const HEALTH_OPTIONS: [&str; 5] = [
    "Health Tips",
    "Find a Doctor",
    "Book Appointment",
    "Symptom Check",
    "Medication Info",
];
const RESOURCE_OPTIONS: [&str; 6] = [
    "Medical Supplies",
    "Food & Nutrition",
    "Transportation",
    "Education",
    "Legal Aid",
    "Housing",
];
const EMERGENCY_OPTIONS: [&str; 6] = [
    "Medical",
    "Security",
    "Weather",
    "Infrastructure",
    "Disease Outbreak",
    "Other",
];

/// Where the conversation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initial,
    MentalHealth,
    HealthSupport,
    ResourceSupport,
    Emergency,
}

/// Session context kept between messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub stage: Stage,
    pub topic: Option<&'static str>,
}

impl ChatContext {
    fn at(stage: Stage) -> Self {
        Self { stage, topic: None }
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::at(Stage::Initial)
    }
}

/// Chat callback fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub message: String,
}

/// One bot message with quick-reply options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub options: Vec<String>,
}

impl ChatReply {
    fn new(message: impl Into<String>, options: &[&str]) -> Self {
        Self {
            message: message.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

fn has_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn welcome() -> ChatReply {
    ChatReply::new(
        "Welcome to Ujamaa Health and Community Support chat. How can I help you today? You can ask about mental health support, health information, community resources, or report an emergency.",
        &MAIN_OPTIONS,
    )
}

pub struct ChatService {
    sessions: SessionStore<ChatContext>,
}

impl ChatService {
    pub fn new(sessions: SessionStore<ChatContext>) -> Self {
        Self { sessions }
    }

    /// Answer one message, updating the session context
    pub fn reply(&self, request: &ChatRequest) -> ChatReply {
        if request.session_id.is_empty() {
            return welcome();
        }
        let Some(context) = self.sessions.get(&request.session_id) else {
            tracing::info!("Chat session {} started by {}", request.session_id, request.user_id);
            self.sessions.set(request.session_id.clone(), ChatContext::default());
            return welcome();
        };

        let text = request.message.trim().to_lowercase();
        let (reply, next) = if context.stage != Stage::Initial
            && has_any(&text, &["different topic", "main menu", "start over"])
        {
            (welcome(), ChatContext::default())
        } else {
            match context.stage {
                Stage::Initial => initial(&text),
                Stage::MentalHealth => mental_health(&text, context),
                Stage::HealthSupport => health_support(&text, context),
                Stage::ResourceSupport => resource_support(&text, context),
                Stage::Emergency => emergency(&text, context),
            }
        };

        tracing::debug!("Chat {} {:?} -> {:?}", request.session_id, context_label(&next), next.topic);
        self.sessions.set(request.session_id.clone(), next);
        reply
    }
}

fn context_label(context: &ChatContext) -> &'static str {
    match context.stage {
        Stage::Initial => "initial",
        Stage::MentalHealth => "mental_health",
        Stage::HealthSupport => "health_support",
        Stage::ResourceSupport => "resource_support",
        Stage::Emergency => "emergency",
    }
}

fn initial(text: &str) -> (ChatReply, ChatContext) {
    if has_any(text, &["mental", "anxiety", "depression", "stress", "counseling"]) {
        (
            ChatReply::new(
                "I'd be happy to help with mental health support. What specific area are you interested in?",
                &MENTAL_OPTIONS,
            ),
            ChatContext::at(Stage::MentalHealth),
        )
    } else if has_any(text, &["health", "medical", "doctor", "appointment", "symptom"]) {
        (
            ChatReply::new(
                "I can help with health information and services. What would you like to know about?",
                &HEALTH_OPTIONS,
            ),
            ChatContext::at(Stage::HealthSupport),
        )
    } else if has_any(text, &["resource", "community", "help", "support", "need"]) {
        (
            ChatReply::new(
                "I can help you find community resources. What type of resources are you looking for?",
                &RESOURCE_OPTIONS,
            ),
            ChatContext::at(Stage::ResourceSupport),
        )
    } else if has_any(text, &["emergency", "urgent", "crisis", "danger"]) {
        (
            ChatReply::new(
                "If this is a life-threatening emergency, please contact emergency services immediately. Otherwise, I can help you report a community emergency. What type of emergency would you like to report?",
                &EMERGENCY_OPTIONS,
            ),
            ChatContext::at(Stage::Emergency),
        )
    } else {
        (
            ChatReply::new(
                "I'm not sure I understand what you're looking for. Could you please specify if you need help with mental health support, health information, community resources, or reporting an emergency?",
                &MAIN_OPTIONS,
            ),
            ChatContext::default(),
        )
    }
}

fn mental_health(text: &str, context: ChatContext) -> (ChatReply, ChatContext) {
    let Some(topic) = context.topic else {
        let topic = if text.contains("anxiety") {
            "anxiety"
        } else if text.contains("depression") {
            "depression"
        } else if text.contains("stress") {
            "stress"
        } else if text.contains("trauma") {
            "trauma"
        } else if has_any(text, &["counseling", "service"]) {
            "counseling"
        } else if text.contains("group") {
            "support_groups"
        } else {
            return (
                ChatReply::new(
                    "I'd like to help with your mental health concerns. Could you please specify which area you're interested in?",
                    &MENTAL_OPTIONS,
                ),
                context,
            );
        };
        let reply = match topic {
            "anxiety" => ChatReply::new(
                "Anxiety is a common mental health concern. Here are some resources that might help:\n\n1. Breathing exercises and mindfulness techniques\n2. Information about anxiety disorders\n3. Connect with an anxiety counselor\n4. Join an anxiety support group\n\nWhat would you like to explore?",
                &["Techniques", "Information", "Counselor", "Support Group"],
            ),
            "depression" => ChatReply::new(
                "Depression can be challenging to deal with, but support is available. Here are some resources that might help:\n\n1. Understanding depression symptoms\n2. Self-care strategies for depression\n3. Connect with a depression counselor\n4. Join a depression support group\n\nWhat would you like to explore?",
                &["Symptoms", "Self-care", "Counselor", "Support Group"],
            ),
            "stress" => ChatReply::new(
                "Managing stress is important for mental wellbeing. Here are some resources that might help:\n\n1. Stress reduction techniques\n2. Understanding stress triggers\n3. Connect with a stress management counselor\n4. Join a stress management workshop\n\nWhat would you like to explore?",
                &["Techniques", "Triggers", "Counselor", "Workshop"],
            ),
            "trauma" => ChatReply::new(
                "Trauma can have lasting effects, but healing is possible. Here are some resources that might help:\n\n1. Understanding trauma responses\n2. Coping strategies for trauma\n3. Connect with a trauma counselor\n4. Join a trauma support group\n\nWhat would you like to explore?",
                &["Information", "Coping", "Counselor", "Support Group"],
            ),
            "counseling" => ChatReply::new(
                "We offer various counseling services for mental health support. Options include:\n\n1. One-on-one counseling via voice call\n2. Text-based counseling\n3. Group counseling sessions\n4. Family counseling\n\nWhat type of counseling are you interested in?",
                &["Voice Call", "Text", "Group", "Family"],
            ),
            _ => ChatReply::new(
                "Support groups can provide community and understanding. We have groups for:\n\n1. Anxiety and panic disorders\n2. Depression and mood disorders\n3. Grief and loss\n4. Trauma survivors\n5. General mental wellness\n\nWhich type of support group are you interested in?",
                &["Anxiety", "Depression", "Grief", "Trauma", "Wellness"],
            ),
        };
        return (reply, ChatContext { topic: Some(topic), ..context });
    };

    let reply = if has_any(text, &["counselor", "connect", "talk to someone"]) {
        ChatReply::new(
            "I'd be happy to help you connect with a mental health counselor. You can:\n\n1. Call our counseling line at 0800-UJAMAA\n2. Schedule a callback from a counselor\n3. Start a text-based counseling session\n\nHow would you prefer to connect?",
            &["Call Now", "Schedule Callback", "Text Counseling"],
        )
    } else if has_any(text, &["group", "join"]) {
        ChatReply::new(
            "Great! To join a support group, you can:\n\n1. Receive SMS notifications about upcoming meetings\n2. Join a voice conference group session\n3. Participate in a text-based group chat\n\nHow would you like to participate?",
            &["SMS Notifications", "Voice Conference", "Text Group"],
        )
    } else if let Some(reply) = has_any(text, &["technique", "information", "tip", "help"])
        .then(|| mental_health_techniques(topic))
        .flatten()
    {
        reply
    } else {
        ChatReply::new(
            format!(
                "Is there something specific about {} that you'd like to know more about? Or would you like to connect with a counselor or support group?",
                topic.replacen('_', " ", 1)
            ),
            &["More Information", "Connect with Counselor", "Join Support Group", "Different Topic"],
        )
    };
    (reply, context)
}

fn mental_health_techniques(topic: &str) -> Option<ChatReply> {
    let reply = match topic {
        "anxiety" => ChatReply::new(
            "Here are some techniques that can help with anxiety:\n\n1. Deep breathing: Inhale for 4 counts, hold for 2, exhale for 6\n2. Progressive muscle relaxation: Tense and release muscle groups\n3. Grounding technique: Name 5 things you can see, 4 you can touch, 3 you can hear, 2 you can smell, 1 you can taste\n4. Mindfulness meditation: Focus on the present moment\n\nWould you like more information on any of these techniques?",
            &["Deep Breathing", "Muscle Relaxation", "Grounding", "Mindfulness", "Connect with Counselor"],
        ),
        "depression" => ChatReply::new(
            "Here are some self-care strategies for depression:\n\n1. Establish a daily routine\n2. Set small, achievable goals\n3. Physical activity, even just a short walk\n4. Connect with supportive people\n5. Practice self-compassion\n\nWould you like more information on any of these strategies?",
            &["Daily Routine", "Goal Setting", "Physical Activity", "Social Connection", "Connect with Counselor"],
        ),
        "stress" => ChatReply::new(
            "Here are some stress reduction techniques:\n\n1. Time management and prioritization\n2. Setting boundaries\n3. Regular physical activity\n4. Mindfulness and meditation\n5. Adequate sleep and nutrition\n\nWould you like more information on any of these techniques?",
            &["Time Management", "Boundaries", "Exercise", "Mindfulness", "Connect with Counselor"],
        ),
        "trauma" => ChatReply::new(
            "Here are some coping strategies for trauma:\n\n1. Grounding techniques to stay present\n2. Creating safety in your environment\n3. Self-care and self-compassion\n4. Connecting with support systems\n5. Professional trauma-informed therapy\n\nWould you like more information on any of these strategies?",
            &["Grounding", "Safety", "Self-care", "Support", "Connect with Counselor"],
        ),
        _ => return None,
    };
    Some(reply)
}

fn health_support(text: &str, context: ChatContext) -> (ChatReply, ChatContext) {
    let Some(topic) = context.topic else {
        let (topic, reply) = if has_any(text, &["tip", "advice"]) {
            (
                "health_tips",
                ChatReply::new(
                    "I can provide health tips on various topics. What are you interested in?",
                    &["General Health", "Nutrition", "Exercise", "Disease Prevention", "Maternal Health", "Child Health"],
                ),
            )
        } else if has_any(text, &["doctor", "find", "facility"]) {
            (
                "find_doctor",
                ChatReply::new(
                    "I can help you find healthcare facilities. What type of facility are you looking for?",
                    &["Hospital", "Clinic", "Pharmacy", "Specialized Care", "Emergency Services"],
                ),
            )
        } else if has_any(text, &["appointment", "book"]) {
            (
                "appointment",
                ChatReply::new(
                    "I can help you book a medical appointment. What type of appointment do you need?",
                    &["General Check-up", "Vaccination", "Prenatal Care", "Child Health", "Chronic Disease", "Dental"],
                ),
            )
        } else if has_any(text, &["symptom", "check"]) {
            (
                "symptom_check",
                ChatReply::new(
                    "I can help with basic symptom assessment. Please note this is not a substitute for professional medical advice. What symptoms are you experiencing?",
                    &["Fever", "Cough", "Headache", "Stomach Pain", "Skin Issues", "Other"],
                ),
            )
        } else if has_any(text, &["medication", "drug", "medicine"]) {
            (
                "medication",
                ChatReply::new(
                    "I can provide general information about medications. What would you like to know?",
                    &["Medication Usage", "Side Effects", "Drug Interactions", "Storage", "Generic vs. Brand"],
                ),
            )
        } else {
            return (
                ChatReply::new(
                    "I'd like to help with your health concerns. Could you please specify what you're looking for?",
                    &HEALTH_OPTIONS,
                ),
                context,
            );
        };
        return (reply, ChatContext { topic: Some(topic), ..context });
    };

    let reply = match topic {
        "health_tips" => health_tips(text),
        "find_doctor" => Some(ChatReply::new(
            "To find a health facility near you, text FIND CLINIC [LOCATION] or dial our USSD code and choose Health Services > Find Health Facility.",
            &["Book Appointment", "Different Topic"],
        )),
        "appointment" => Some(ChatReply::new(
            "To book an appointment, dial our USSD code and choose Health Services > Appointment Booking. You will receive an SMS confirmation with the details.",
            &["Find a Doctor", "Different Topic"],
        )),
        "symptom_check" => Some(ChatReply::new(
            "Rest, drink plenty of water and watch your symptoms. If they are severe, get worse or last more than two days, visit a health facility. If you have trouble breathing or chest pain call 112 now.",
            &["Find a Doctor", "Book Appointment", "Different Topic"],
        )),
        "medication" => Some(ChatReply::new(
            "Always take medication exactly as prescribed and ask a pharmacist before combining medicines. Text REMINDER [MEDICATION] to set a medication reminder.",
            &["Find a Doctor", "Different Topic"],
        )),
        _ => None,
    };
    let reply = reply.unwrap_or_else(|| {
        ChatReply::new(
            format!(
                "Is there something specific about {} that you'd like to know more about?",
                topic.replacen('_', " ", 1)
            ),
            &["More Information", "Different Topic"],
        )
    });
    (reply, context)
}

fn health_tips(text: &str) -> Option<ChatReply> {
    let (title, tips): (&str, Vec<&str>) = if text.contains("general") {
        ("General health", TipCategory::General.tips().to_vec())
    } else if text.contains("nutrition") {
        ("Nutrition", TipCategory::Nutrition.tips().to_vec())
    } else if text.contains("exercise") {
        ("Exercise", TipCategory::Exercise.tips().to_vec())
    } else if has_any(text, &["disease", "prevention"]) {
        (
            "Disease prevention",
            vec![
                "Wash hands frequently with soap and water.",
                "Cover coughs and sneezes with your elbow.",
                "Stay up to date with vaccinations.",
                "Sleep under a treated mosquito net.",
            ],
        )
    } else if has_any(text, &["maternal", "pregnancy"]) {
        (
            "Maternal health",
            vec![
                "Attend all antenatal care visits.",
                "Take iron and folic acid supplements as advised.",
                "Plan to give birth at a health facility.",
            ],
        )
    } else if has_any(text, &["child", "baby"]) {
        (
            "Child health",
            vec![
                "Breastfeed exclusively for the first six months.",
                "Keep your child's vaccinations on schedule.",
                "Give oral rehydration salts for diarrhoea and seek care if it persists.",
            ],
        )
    } else {
        return None;
    };
    let list = tips
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}", i + 1, tip))
        .collect::<Vec<_>>()
        .join("\n");
    Some(ChatReply::new(
        format!("{} tips:\n\n{}\n\nText SUBSCRIBE DAILY to receive a tip by SMS every day.", title, list),
        &["General Health", "Nutrition", "Exercise", "Different Topic"],
    ))
}

fn resource_support(text: &str, context: ChatContext) -> (ChatReply, ChatContext) {
    let keyword = if has_any(text, &["medical", "suppl"]) {
        "MEDICAL"
    } else if has_any(text, &["food", "nutrition"]) {
        "FOOD"
    } else if text.contains("transport") {
        "TRANSPORT"
    } else if text.contains("education") {
        "EDUCATION"
    } else if text.contains("legal") {
        "LEGAL"
    } else if text.contains("housing") {
        "HOUSING"
    } else {
        return (
            ChatReply::new(
                "What type of resources are you looking for?",
                &RESOURCE_OPTIONS,
            ),
            context,
        );
    };
    (
        ChatReply::new(
            format!(
                "To see who is offering this near you, text FIND {k} [LOCATION]. To post a request, text NEED {k} [LOCATION] and we will notify you when a match is found.",
                k = keyword
            ),
            &["Different Topic"],
        ),
        context,
    )
}

fn emergency(text: &str, context: ChatContext) -> (ChatReply, ChatContext) {
    let keyword = if text.contains("medical") {
        "MEDICAL"
    } else if text.contains("security") {
        "SECURITY"
    } else if text.contains("weather") {
        "WEATHER"
    } else if text.contains("infrastructure") {
        "INFRASTRUCTURE"
    } else if has_any(text, &["disease", "outbreak"]) {
        "OUTBREAK"
    } else if text.contains("other") {
        "OTHER"
    } else {
        return (
            ChatReply::new(
                "What type of emergency would you like to report?",
                &EMERGENCY_OPTIONS,
            ),
            context,
        );
    };
    (
        ChatReply::new(
            format!(
                "To report this emergency, text ALERT {} [LOCATION] [DETAILS]. Everyone subscribed to alerts for that location will be notified. If lives are at risk call 112 now.",
                keyword
            ),
            &["Different Topic"],
        ),
        context,
    )
}
