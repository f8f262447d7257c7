//! USSD menu state machine
//!
//! Every screen is a named state. A trail of `*`-separated choices is
//! replayed from [`UssdState::Main`]; each segment either moves to another
//! state, ends the session, or is rejected. A rejected segment leaves the
//! state where it was, so the user is simply shown the same menu again.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::screen::{Screen, UNPROCESSED_BODY};

static CUSTOM_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])$").expect("valid MM/DD pattern")
});

const MAIN_TITLE: &str = "Welcome to Ujamaa Health & Community Support";

pub const FACILITIES: [&str; 3] = ["Hospital", "Clinic", "Specialized Care"];
pub const SERVICES: [&str; 5] = [
    "General check-up",
    "Vaccination",
    "Prenatal care",
    "Child health",
    "Chronic disease management",
];
const DATES: [&str; 4] = ["Tomorrow", "This week", "Next week", "Specific date (MM/DD)"];
pub const TIMES: [&str; 3] = [
    "Morning (8AM-12PM)",
    "Afternoon (12PM-4PM)",
    "Evening (4PM-8PM)",
];

const BOOKED_BODY: &str = "Your appointment has been scheduled. You will receive an SMS confirmation with details. Thank you for using Ujamaa Health Services.";
const CANCELED_BODY: &str =
    "Appointment booking canceled. Thank you for using Ujamaa Health Services.";
const AREA_PROMPT: &str = "Enter your district or area:";
const DATE_PROMPT: &str = "Enter date (MM/DD):";

/// Top-level service categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    HealthServices,
    MentalHealth,
    CommunityResources,
    EmergencyServices,
    VolunteerServices,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::HealthServices,
        Category::MentalHealth,
        Category::CommunityResources,
        Category::EmergencyServices,
        Category::VolunteerServices,
    ];

    /// Label on the main menu
    pub fn label(&self) -> &'static str {
        match self {
            Category::HealthServices => "Health Services",
            Category::MentalHealth => "Mental Health",
            Category::CommunityResources => "Community Resources",
            Category::EmergencyServices => "Emergency Services",
            Category::VolunteerServices => "Volunteer Services",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Category::MentalHealth => "Mental Health Services",
            other => other.label(),
        }
    }

    fn options(&self) -> &'static [&'static str] {
        match self {
            Category::HealthServices => &["Health Tips", "Appointment Booking", "Find Health Facility"],
            Category::MentalHealth => &["Counseling Services", "Support Groups", "Crisis Support"],
            Category::CommunityResources => &["Find Resources", "Request Resources", "Offer Resources"],
            Category::EmergencyServices => &["Report Emergency", "Emergency Contacts"],
            Category::VolunteerServices => &[
                "Register as Volunteer",
                "View Opportunities",
                "Organization Services",
            ],
        }
    }

    fn target(&self, index: usize) -> UssdState {
        use Category::*;
        match (self, index) {
            (HealthServices, 0) => UssdState::HealthTips,
            (HealthServices, 1) => UssdState::FacilityType,
            (HealthServices, _) => UssdState::AreaPrompt(AreaSearch::HealthFacility),
            (MentalHealth, 0) => UssdState::Leaf(LeafMenu::Counseling),
            (MentalHealth, 1) => UssdState::Leaf(LeafMenu::SupportGroups),
            (MentalHealth, _) => UssdState::Leaf(LeafMenu::CrisisSupport),
            (CommunityResources, 0) => UssdState::AreaPrompt(AreaSearch::CommunityResources),
            (CommunityResources, 1) => UssdState::Leaf(LeafMenu::RequestResources),
            (CommunityResources, _) => UssdState::Leaf(LeafMenu::OfferResources),
            (EmergencyServices, 0) => UssdState::Leaf(LeafMenu::ReportEmergency),
            (EmergencyServices, _) => UssdState::Leaf(LeafMenu::EmergencyContacts),
            (VolunteerServices, 0) => UssdState::Leaf(LeafMenu::VolunteerRegistration),
            (VolunteerServices, 1) => UssdState::AreaPrompt(AreaSearch::VolunteerOpportunities),
            (VolunteerServices, _) => UssdState::Leaf(LeafMenu::OrganizationServices),
        }
    }
}

/// Health tip pages reachable from the tips menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipsTopic {
    General,
    Nutrition,
    Exercise,
    DiseasePrevention,
}

impl TipsTopic {
    pub const ALL: [TipsTopic; 4] = [
        TipsTopic::General,
        TipsTopic::Nutrition,
        TipsTopic::Exercise,
        TipsTopic::DiseasePrevention,
    ];

    fn label(&self) -> &'static str {
        match self {
            TipsTopic::General => "General Health",
            TipsTopic::Nutrition => "Nutrition",
            TipsTopic::Exercise => "Exercise",
            TipsTopic::DiseasePrevention => "Disease Prevention",
        }
    }

    fn tips(&self) -> &'static [&'static str] {
        match self {
            TipsTopic::General => &[
                "Stay hydrated by drinking at least 8 glasses of water daily",
                "Eat a balanced diet with fruits and vegetables",
                "Exercise regularly for at least 30 minutes daily",
                "Get 7-8 hours of sleep each night",
                "Wash hands frequently to prevent infections",
            ],
            TipsTopic::Nutrition => &[
                "Eat a variety of colorful fruits and vegetables",
                "Choose whole grains over refined grains",
                "Include protein in every meal",
                "Limit processed foods and added sugars",
                "Stay hydrated with water instead of sugary drinks",
            ],
            TipsTopic::Exercise => &[
                "Start with a 10-minute walk daily",
                "Gradually increase exercise duration",
                "Include both cardio and strength training",
                "Stretch before and after exercise",
                "Find activities you enjoy to stay motivated",
            ],
            TipsTopic::DiseasePrevention => &[
                "Wash hands frequently with soap and water",
                "Cover coughs and sneezes with elbow",
                "Stay up to date with vaccinations",
                "Practice safe food handling",
                "Get regular health check-ups",
            ],
        }
    }
}

/// Free-text area searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSearch {
    HealthFacility,
    CommunityResources,
    VolunteerOpportunities,
}

impl AreaSearch {
    pub fn label(&self) -> &'static str {
        match self {
            AreaSearch::HealthFacility => "health facilities",
            AreaSearch::CommunityResources => "community resources",
            AreaSearch::VolunteerOpportunities => "volunteer opportunities",
        }
    }
}

/// One selectable item in a leaf menu and the SMS sent when it is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafItem {
    pub label: &'static str,
    pub follow_up: &'static str,
}

const fn item(label: &'static str, follow_up: &'static str) -> LeafItem {
    LeafItem { label, follow_up }
}

const COUNSELING: [LeafItem; 3] = [
    item("Anonymous Phone Counseling", "Ujamaa Health: a counselor will call you within 24 hours. The call is confidential and you do not need to give your name."),
    item("Crisis Support", "Ujamaa Health: a crisis counselor will call you back shortly. If you are in immediate danger call 112."),
    item("Specialized Counseling", "Ujamaa Health: we will match you with a specialized counselor and send their contact details by SMS."),
];

const SUPPORT_GROUPS: [LeafItem; 3] = [
    item("Find Support Groups", "Ujamaa Health: a coordinator will send you the support groups that meet near you."),
    item("Join a Group", "Ujamaa Health: your request to join a support group has been received. A facilitator will contact you."),
    item("Meeting Schedule", "Ujamaa Health: support groups meet weekly. Your facilitator will send the schedule for your group."),
];

const CRISIS_SUPPORT: [LeafItem; 3] = [
    item("Immediate Phone Support", "Ujamaa Health: a crisis counselor will call you now. If you are in immediate danger call 112."),
    item("Crisis Text Line", "Ujamaa Health: reply to this number at any time to reach a crisis counselor by text."),
    item("Find Crisis Center", "Ujamaa Health: a crisis team member will send you the location of the nearest crisis center."),
];

const REQUEST_RESOURCES: [LeafItem; 6] = [
    item("Medical Supplies", "Ujamaa Health: to request medical supplies, text NEED MEDICAL [LOCATION]."),
    item("Food & Nutrition", "Ujamaa Health: to request food, text NEED FOOD [LOCATION]."),
    item("Transportation", "Ujamaa Health: to request transport, text NEED TRANSPORT [LOCATION]."),
    item("Childcare", "Ujamaa Health: to request childcare, text NEED CHILDCARE [LOCATION]."),
    item("Education", "Ujamaa Health: to request education support, text NEED EDUCATION [LOCATION]."),
    item("Skills & Services", "Ujamaa Health: to request a skill or service, text NEED SKILLS [LOCATION]."),
];

const OFFER_RESOURCES: [LeafItem; 6] = [
    item("Medical Supplies", "Ujamaa Health: to offer medical supplies, text OFFER MEDICAL [LOCATION]."),
    item("Food & Nutrition", "Ujamaa Health: to offer food, text OFFER FOOD [LOCATION]."),
    item("Transportation", "Ujamaa Health: to offer transport, text OFFER TRANSPORT [LOCATION]."),
    item("Childcare", "Ujamaa Health: to offer childcare, text OFFER CHILDCARE [LOCATION]."),
    item("Education", "Ujamaa Health: to offer education support, text OFFER EDUCATION [LOCATION]."),
    item("Skills & Services", "Ujamaa Health: to offer a skill or service, text OFFER SKILLS [LOCATION]."),
];

const REPORT_EMERGENCY: [LeafItem; 6] = [
    item("Medical", "Ujamaa Health: to report a medical emergency, text ALERT MEDICAL [LOCATION] [DETAILS]. Call 112 if lives are at risk."),
    item("Security", "Ujamaa Health: to report a security emergency, text ALERT SECURITY [LOCATION] [DETAILS]. Call 112 if lives are at risk."),
    item("Weather", "Ujamaa Health: to report a weather emergency, text ALERT WEATHER [LOCATION] [DETAILS]."),
    item("Infrastructure", "Ujamaa Health: to report an infrastructure emergency, text ALERT INFRASTRUCTURE [LOCATION] [DETAILS]."),
    item("Disease Outbreak", "Ujamaa Health: to report a disease outbreak, text ALERT OUTBREAK [LOCATION] [DETAILS]."),
    item("Other", "Ujamaa Health: to report an emergency, text ALERT OTHER [LOCATION] [DETAILS]."),
];

const EMERGENCY_CONTACTS: [LeafItem; 6] = [
    item("Medical Emergency", "Ujamaa Health: for a medical emergency call 112 and ask for an ambulance."),
    item("Police", "Ujamaa Health: to reach the police call 112."),
    item("Fire Department", "Ujamaa Health: to reach the fire department call 112."),
    item("Disaster Response", "Ujamaa Health: for disaster response call 112. Text SUBSCRIBE [LOCATION] to receive alerts for your area."),
    item("Poison Control", "Ujamaa Health: for poisoning call 112 and go to the nearest health facility."),
    item("Mental Health Crisis", "Ujamaa Health: for a mental health crisis call 112 or choose Mental Health > Crisis Support in this menu."),
];

const VOLUNTEER_REGISTRATION: [LeafItem; 6] = [
    item("Medical Assistance", "Ujamaa Health: to register, text VOLUNTEER REGISTER MEDICAL ASSISTANCE."),
    item("Logistics & Transport", "Ujamaa Health: to register, text VOLUNTEER REGISTER LOGISTICS."),
    item("Community Outreach", "Ujamaa Health: to register, text VOLUNTEER REGISTER COMMUNITY OUTREACH."),
    item("Resource Distribution", "Ujamaa Health: to register, text VOLUNTEER REGISTER RESOURCE DISTRIBUTION."),
    item("Technical Support", "Ujamaa Health: to register, text VOLUNTEER REGISTER TECHNICAL SUPPORT."),
    item("Emotional Support", "Ujamaa Health: to register, text VOLUNTEER REGISTER EMOTIONAL SUPPORT."),
];

const ORGANIZATION_SERVICES: [LeafItem; 4] = [
    item("Register Organization", "Ujamaa Health: to register your organization, text ORG REGISTER [NAME]."),
    item("Post Volunteer Need", "Ujamaa Health: to post a need, text ORG POST [NEED] [LOCATION] [DETAILS]."),
    item("Update Existing Post", "Ujamaa Health: to update a post, text ORG UPDATE [POST ID] [UPDATE]."),
    item("View Volunteer Responses", "Ujamaa Health: volunteer responses to your posts will be forwarded to this number."),
];

/// Menus whose items end the session with an SMS follow-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafMenu {
    Counseling,
    SupportGroups,
    CrisisSupport,
    RequestResources,
    OfferResources,
    ReportEmergency,
    EmergencyContacts,
    VolunteerRegistration,
    OrganizationServices,
}

impl LeafMenu {
    fn title(&self) -> &'static str {
        match self {
            LeafMenu::Counseling => "Counseling Services",
            LeafMenu::SupportGroups => "Support Groups",
            LeafMenu::CrisisSupport => "Crisis Support",
            LeafMenu::RequestResources => "Request Resources",
            LeafMenu::OfferResources => "Offer Resources",
            LeafMenu::ReportEmergency => "Report Emergency",
            LeafMenu::EmergencyContacts => "Emergency Contacts",
            LeafMenu::VolunteerRegistration => "Volunteer Registration",
            LeafMenu::OrganizationServices => "Organization Services",
        }
    }

    pub fn items(&self) -> &'static [LeafItem] {
        match self {
            LeafMenu::Counseling => &COUNSELING,
            LeafMenu::SupportGroups => &SUPPORT_GROUPS,
            LeafMenu::CrisisSupport => &CRISIS_SUPPORT,
            LeafMenu::RequestResources => &REQUEST_RESOURCES,
            LeafMenu::OfferResources => &OFFER_RESOURCES,
            LeafMenu::ReportEmergency => &REPORT_EMERGENCY,
            LeafMenu::EmergencyContacts => &EMERGENCY_CONTACTS,
            LeafMenu::VolunteerRegistration => &VOLUNTEER_REGISTRATION,
            LeafMenu::OrganizationServices => &ORGANIZATION_SERVICES,
        }
    }

    fn parent(&self) -> Category {
        match self {
            LeafMenu::Counseling | LeafMenu::SupportGroups | LeafMenu::CrisisSupport => {
                Category::MentalHealth
            }
            LeafMenu::RequestResources | LeafMenu::OfferResources => Category::CommunityResources,
            LeafMenu::ReportEmergency | LeafMenu::EmergencyContacts => Category::EmergencyServices,
            LeafMenu::VolunteerRegistration | LeafMenu::OrganizationServices => {
                Category::VolunteerServices
            }
        }
    }
}

/// Choices made on the way to a booking confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub facility: &'static str,
    pub service: &'static str,
    pub date: String,
    pub time: &'static str,
}

/// Side effect requested by a session-ending choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UssdAction {
    BookAppointment(Booking),
    FindNearby { search: AreaSearch, area: String },
    FollowUp { item: LeafItem },
}

/// A named USSD screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UssdState {
    Main,
    Category(Category),
    HealthTips,
    TipsPage(TipsTopic),
    FacilityType,
    Service {
        facility: &'static str,
    },
    Date {
        facility: &'static str,
        service: &'static str,
    },
    CustomDate {
        facility: &'static str,
        service: &'static str,
    },
    Time {
        facility: &'static str,
        service: &'static str,
        date: String,
    },
    Confirm(Booking),
    AreaPrompt(AreaSearch),
    Leaf(LeafMenu),
    /// A terminal screen has been shown
    Closed,
    /// Input the menu could not place
    Unplaced,
}

/// Result of feeding one segment to a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next(UssdState),
    End {
        body: String,
        action: Option<UssdAction>,
    },
    Invalid,
}

/// State, screen and pending action after a trail has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdOutcome {
    pub state: UssdState,
    pub screen: Screen,
    pub action: Option<UssdAction>,
}

impl UssdOutcome {
    pub fn start() -> Self {
        let state = UssdState::Main;
        Self {
            screen: state.screen(),
            state,
            action: None,
        }
    }
}

fn numbered(items: impl IntoIterator<Item = &'static str>) -> String {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn menu(title: &str, items: impl IntoIterator<Item = &'static str>, back: &str) -> String {
    format!("{}:\n{}\n\n{}", title, numbered(items), back)
}

/// 1-based menu choice to a 0-based index
fn choose(segment: &str, count: usize) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}

const BACK: &str = "0. Back";
const BACK_TO_MAIN: &str = "0. Back to Main Menu";

impl UssdState {
    /// Screen text without the `CON ` marker
    pub fn render(&self) -> String {
        match self {
            UssdState::Main => format!(
                "{}\n\n{}",
                MAIN_TITLE,
                numbered(Category::ALL.iter().map(Category::label))
            ),
            UssdState::Category(category) => menu(
                category.title(),
                category.options().iter().copied(),
                BACK_TO_MAIN,
            ),
            UssdState::HealthTips => menu(
                "Health Tips Categories",
                TipsTopic::ALL.iter().map(TipsTopic::label),
                BACK,
            ),
            UssdState::TipsPage(topic) => menu(
                &format!("{} Tips", topic.label()),
                topic.tips().iter().copied(),
                BACK_TO_MAIN,
            ),
            UssdState::FacilityType => menu("Appointment Booking", FACILITIES, BACK),
            UssdState::Service { .. } => {
                format!("Select service:\n{}\n\n{}", numbered(SERVICES), BACK)
            }
            UssdState::Date { .. } => {
                format!("Select appointment date:\n{}\n\n{}", numbered(DATES), BACK)
            }
            UssdState::CustomDate { .. } => DATE_PROMPT.to_string(),
            UssdState::Time { .. } => {
                format!("Select appointment time:\n{}\n\n{}", numbered(TIMES), BACK)
            }
            UssdState::Confirm(booking) => format!(
                "Appointment details:\nFacility: {}\nService: {}\nDate: {}\nTime: {}\n\n1. Confirm appointment\n2. Cancel\n\n{}",
                booking.facility, booking.service, booking.date, booking.time, BACK_TO_MAIN
            ),
            UssdState::AreaPrompt(_) => AREA_PROMPT.to_string(),
            UssdState::Leaf(leaf) => {
                menu(leaf.title(), leaf.items().iter().map(|i| i.label), BACK)
            }
            UssdState::Closed | UssdState::Unplaced => UNPROCESSED_BODY.to_string(),
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::Continue(self.render())
    }

    /// Apply one trail segment
    pub fn step(&self, segment: &str) -> Step {
        let next = Step::Next;
        match self {
            UssdState::Main => match choose(segment, Category::ALL.len()) {
                Some(i) => next(UssdState::Category(Category::ALL[i])),
                None => Step::Invalid,
            },
            UssdState::Category(_) if segment == "0" => next(UssdState::Main),
            UssdState::Category(category) => match choose(segment, category.options().len()) {
                Some(i) => next(category.target(i)),
                None => Step::Invalid,
            },
            UssdState::HealthTips if segment == "0" => {
                next(UssdState::Category(Category::HealthServices))
            }
            UssdState::HealthTips => match choose(segment, TipsTopic::ALL.len()) {
                Some(i) => next(UssdState::TipsPage(TipsTopic::ALL[i])),
                None => Step::Invalid,
            },
            UssdState::TipsPage(_) if segment == "0" => next(UssdState::Main),
            UssdState::TipsPage(_) => Step::Invalid,
            UssdState::FacilityType if segment == "0" => {
                next(UssdState::Category(Category::HealthServices))
            }
            UssdState::FacilityType => match choose(segment, FACILITIES.len()) {
                Some(i) => next(UssdState::Service {
                    facility: FACILITIES[i],
                }),
                None => Step::Invalid,
            },
            UssdState::Service { .. } if segment == "0" => next(UssdState::FacilityType),
            UssdState::Service { facility } => match choose(segment, SERVICES.len()) {
                Some(i) => next(UssdState::Date {
                    facility: *facility,
                    service: SERVICES[i],
                }),
                None => Step::Invalid,
            },
            UssdState::Date { facility, .. } if segment == "0" => next(UssdState::Service {
                facility: *facility,
            }),
            UssdState::Date { facility, service } => match choose(segment, DATES.len()) {
                Some(3) => next(UssdState::CustomDate {
                    facility: *facility,
                    service: *service,
                }),
                Some(i) => next(UssdState::Time {
                    facility: *facility,
                    service: *service,
                    date: DATES[i].to_string(),
                }),
                None => Step::Invalid,
            },
            UssdState::CustomDate { facility, service } => {
                if CUSTOM_DATE.is_match(segment) {
                    next(UssdState::Time {
                        facility: *facility,
                        service: *service,
                        date: segment.to_string(),
                    })
                } else {
                    Step::Invalid
                }
            }
            UssdState::Time {
                facility, service, ..
            } if segment == "0" => next(UssdState::Date {
                facility: *facility,
                service: *service,
            }),
            UssdState::Time {
                facility,
                service,
                date,
            } => match choose(segment, TIMES.len()) {
                Some(i) => next(UssdState::Confirm(Booking {
                    facility: *facility,
                    service: *service,
                    date: date.clone(),
                    time: TIMES[i],
                })),
                None => Step::Invalid,
            },
            UssdState::Confirm(booking) => match segment {
                "0" => next(UssdState::Main),
                "1" => Step::End {
                    body: BOOKED_BODY.to_string(),
                    action: Some(UssdAction::BookAppointment(booking.clone())),
                },
                "2" => Step::End {
                    body: CANCELED_BODY.to_string(),
                    action: None,
                },
                _ => Step::Invalid,
            },
            UssdState::AreaPrompt(_) if segment.is_empty() => Step::Invalid,
            UssdState::AreaPrompt(search) => Step::End {
                body: format!(
                    "Thank you. We will send you an SMS listing {} in {}.",
                    search.label(),
                    segment
                ),
                action: Some(UssdAction::FindNearby {
                    search: *search,
                    area: segment.to_string(),
                }),
            },
            UssdState::Leaf(leaf) if segment == "0" => next(UssdState::Category(leaf.parent())),
            UssdState::Leaf(leaf) => match choose(segment, leaf.items().len()) {
                Some(i) => {
                    let item = leaf.items()[i];
                    Step::End {
                        body: format!(
                            "Thank you. You will receive an SMS with details about {}.",
                            item.label
                        ),
                        action: Some(UssdAction::FollowUp { item }),
                    }
                }
                None => Step::Invalid,
            },
            UssdState::Closed => next(UssdState::Unplaced),
            UssdState::Unplaced if segment == "0" => next(UssdState::Main),
            UssdState::Unplaced => next(UssdState::Unplaced),
        }
    }
}

/// Apply one segment to a known state
pub fn advance(state: &UssdState, segment: &str) -> UssdOutcome {
    match state.step(segment.trim()) {
        Step::Next(next) => UssdOutcome {
            screen: next.screen(),
            state: next,
            action: None,
        },
        Step::End { body, action } => UssdOutcome {
            state: UssdState::Closed,
            screen: Screen::End(body),
            action,
        },
        Step::Invalid => UssdOutcome {
            state: state.clone(),
            screen: Screen::invalid(&state.render()),
            action: None,
        },
    }
}

/// Segments of a trail; the empty trail has none
pub fn segments(trail: &str) -> Vec<&str> {
    let trail = trail.trim();
    if trail.is_empty() {
        return Vec::new();
    }
    trail.split('*').map(str::trim).collect()
}

/// Replay a whole trail from the main menu
pub fn replay(trail: &str) -> UssdOutcome {
    segments(trail)
        .into_iter()
        .fold(UssdOutcome::start(), |outcome, segment| {
            advance(&outcome.state, segment)
        })
}
