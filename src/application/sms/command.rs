//! SMS keyword commands and their classification table

use once_cell::sync::Lazy;

use crate::application::messaging::{CommandDispatcher, ParsedCommand};
use crate::domain::entities::TipFrequency;

use super::tips::TipCategory;

/// Reply for anything no rule claims
pub const UNRECOGNIZED_REPLY: &str =
    "Command not recognized. Text HELP for a list of available commands.";

/// Reply for `HELP`
pub const HELP_REPLY: &str = "Available commands: TIP, NUTRITION, EXERCISE, REMINDER, SUBSCRIBE DAILY, SUBSCRIBE WEEKLY, UNSUBSCRIBE, FIND, NEED, OFFER, ALERT, VOLUNTEER, ORG";

/// Usage hints returned when a command is missing arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Find,
    Need,
    Offer,
    Alert,
    SubscribeAlerts,
    UnsubscribeAlerts,
    Volunteer,
    Org,
    OrgPost,
    OrgUpdate,
    OrgClose,
}

impl Usage {
    pub fn text(&self) -> &'static str {
        match self {
            Usage::Find => "Please specify what to find and your location. Example: FIND CLINIC NAIROBI",
            Usage::Need => "Please specify what you need and your location. Example: NEED MEDICATION NAIROBI",
            Usage::Offer => "Please specify what you're offering and your location. Example: OFFER FOOD NAIROBI",
            Usage::Alert => "Please specify alert type, location, and details. Example: ALERT MEDICAL NAIROBI AMBULANCE NEEDED",
            Usage::SubscribeAlerts => "Please specify a location to subscribe to. Example: SUBSCRIBE NAIROBI",
            Usage::UnsubscribeAlerts => "Please specify a location to unsubscribe from. Example: UNSUBSCRIBE NAIROBI",
            Usage::Volunteer => "Please specify a volunteer action. Available commands: VOLUNTEER REGISTER, VOLUNTEER LOCATION, VOLUNTEER AVAILABILITY, VOLUNTEER STATUS",
            Usage::Org => "Please specify an organization action. Available commands: ORG REGISTER, ORG POST, ORG UPDATE, ORG CLOSE",
            Usage::OrgPost => "Please specify need, location, and details. Example: ORG POST DRIVERS NAIROBI NEED 3 DRIVERS FOR MEDICAL DELIVERIES",
            Usage::OrgUpdate => "Please specify post ID and update. Example: ORG UPDATE POST1234 NEED 2 MORE VOLUNTEERS",
            Usage::OrgClose => "Please specify post ID. Example: ORG CLOSE POST1234",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolunteerAction {
    Register { skills: Option<String> },
    Location(Option<String>),
    Availability(Option<String>),
    Status,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgAction {
    Register { name: Option<String> },
    Post { need: String, location: String, details: String },
    Update { post: String, update: String },
    Close { post: String },
    Unknown,
}

/// A classified SMS command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsCommand {
    Tip(TipCategory),
    Reminder { details: Option<String> },
    SubscribeTips(TipFrequency),
    UnsubscribeTips,
    Help,
    Find { resource: String, location: String },
    Need { resource: String, location: String },
    Offer { resource: String, location: String },
    CheckRequests,
    CheckOffers,
    Alert { kind: String, location: String, details: String },
    SubscribeAlerts { location: String },
    UnsubscribeAlerts { location: String },
    Volunteer(VolunteerAction),
    Org(OrgAction),
    Usage(Usage),
    Unrecognized,
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// `<KEYWORD> <RESOURCE> <LOCATION...>` with a usage hint below three tokens
fn resource_args(
    p: &ParsedCommand,
    usage: Usage,
    build: fn(String, String) -> SmsCommand,
) -> SmsCommand {
    if p.len() < 3 {
        return SmsCommand::Usage(usage);
    }
    build(p.token(1).unwrap_or_default().to_string(), p.rest(2))
}

fn volunteer(p: &ParsedCommand) -> SmsCommand {
    if p.len() < 2 {
        return SmsCommand::Usage(Usage::Volunteer);
    }
    let value = non_empty(p.rest(2));
    SmsCommand::Volunteer(match p.token(1).unwrap_or_default() {
        "REGISTER" => VolunteerAction::Register { skills: value },
        "LOCATION" => VolunteerAction::Location(value),
        "AVAILABILITY" => VolunteerAction::Availability(value),
        "STATUS" => VolunteerAction::Status,
        _ => VolunteerAction::Unknown,
    })
}

fn org(p: &ParsedCommand) -> SmsCommand {
    if p.len() < 2 {
        return SmsCommand::Usage(Usage::Org);
    }
    let action = match p.token(1).unwrap_or_default() {
        "REGISTER" => OrgAction::Register { name: non_empty(p.rest(2)) },
        "POST" if p.len() < 5 => return SmsCommand::Usage(Usage::OrgPost),
        "POST" => OrgAction::Post {
            need: p.token(2).unwrap_or_default().to_string(),
            location: p.token(3).unwrap_or_default().to_string(),
            details: p.rest(4),
        },
        "UPDATE" if p.len() < 4 => return SmsCommand::Usage(Usage::OrgUpdate),
        "UPDATE" => OrgAction::Update {
            post: p.token(2).unwrap_or_default().to_string(),
            update: p.rest(3),
        },
        "CLOSE" if p.len() < 3 => return SmsCommand::Usage(Usage::OrgClose),
        "CLOSE" => OrgAction::Close {
            post: p.token(2).unwrap_or_default().to_string(),
        },
        _ => OrgAction::Unknown,
    };
    SmsCommand::Org(action)
}

/// Build the SMS rule table. Order matters: see the overlapping
/// `SUBSCRIBE`/`UNSUBSCRIBE` entries.
pub fn sms_dispatcher() -> CommandDispatcher<SmsCommand> {
    CommandDispatcher::new(|_| SmsCommand::Unrecognized)
        // Health tips
        .rule("tip", |p| p.text == "TIP", |_| SmsCommand::Tip(TipCategory::General))
        .rule("nutrition", |p| p.text == "NUTRITION", |_| SmsCommand::Tip(TipCategory::Nutrition))
        .rule("exercise", |p| p.text == "EXERCISE", |_| SmsCommand::Tip(TipCategory::Exercise))
        .rule(
            "reminder",
            |p| p.text.starts_with("REMINDER"),
            |p| SmsCommand::Reminder { details: non_empty(p.rest(1)) },
        )
        // Tip subscriptions
        .rule(
            "subscribe-daily",
            |p| p.text == "SUBSCRIBE DAILY",
            |_| SmsCommand::SubscribeTips(TipFrequency::Daily),
        )
        .rule(
            "subscribe-weekly",
            |p| p.text == "SUBSCRIBE WEEKLY",
            |_| SmsCommand::SubscribeTips(TipFrequency::Weekly),
        )
        .rule("unsubscribe", |p| p.text == "UNSUBSCRIBE", |_| SmsCommand::UnsubscribeTips)
        .rule("help", |p| p.text == "HELP", |_| SmsCommand::Help)
        // Resources
        .rule(
            "find",
            |p| p.text.starts_with("FIND"),
            |p| resource_args(p, Usage::Find, |resource, location| SmsCommand::Find { resource, location }),
        )
        .rule(
            "need",
            |p| p.text.starts_with("NEED"),
            |p| resource_args(p, Usage::Need, |resource, location| SmsCommand::Need { resource, location }),
        )
        .rule(
            "offer",
            |p| p.text.starts_with("OFFER"),
            |p| resource_args(p, Usage::Offer, |resource, location| SmsCommand::Offer { resource, location }),
        )
        .rule("check-request", |p| p.text == "CHECK REQUEST", |_| SmsCommand::CheckRequests)
        .rule("check-offer", |p| p.text == "CHECK OFFER", |_| SmsCommand::CheckOffers)
        // Emergency alerts
        .rule(
            "alert",
            |p| p.text.starts_with("ALERT"),
            |p| {
                if p.len() < 4 {
                    return SmsCommand::Usage(Usage::Alert);
                }
                SmsCommand::Alert {
                    kind: p.token(1).unwrap_or_default().to_string(),
                    location: p.token(2).unwrap_or_default().to_string(),
                    details: p.rest(3),
                }
            },
        )
        .rule(
            "subscribe-location",
            |p| {
                p.text.starts_with("SUBSCRIBE")
                    && !p.text.contains("DAILY")
                    && !p.text.contains("WEEKLY")
            },
            |p| match p.token(1) {
                Some(location) => SmsCommand::SubscribeAlerts { location: location.to_string() },
                None => SmsCommand::Usage(Usage::SubscribeAlerts),
            },
        )
        .rule(
            "unsubscribe-location",
            |p| p.text.starts_with("UNSUBSCRIBE") && p.text.len() > 11,
            |p| match p.token(1) {
                Some(location) => SmsCommand::UnsubscribeAlerts { location: location.to_string() },
                None => SmsCommand::Usage(Usage::UnsubscribeAlerts),
            },
        )
        // Volunteers and organisations
        .rule("volunteer", |p| p.text.starts_with("VOLUNTEER"), volunteer)
        .rule("org", |p| p.text.starts_with("ORG"), org)
}

static DISPATCHER: Lazy<CommandDispatcher<SmsCommand>> = Lazy::new(sms_dispatcher);

/// Classify one raw SMS. Never fails.
pub fn classify(text: &str) -> SmsCommand {
    DISPATCHER.dispatch(text).1
}
