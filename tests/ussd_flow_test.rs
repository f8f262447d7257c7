//! USSD menu flow tests
//! Run with: cargo test --test ussd_flow_test

use std::sync::Arc;
use std::time::Duration;

use ujamaa_gateway::application::ussd::{replay, Screen, UssdRequest, UssdService, UssdSession};
use ujamaa_gateway::infrastructure::database::SqliteStore;
use ujamaa_gateway::infrastructure::gateway::ConsoleGateway;
use ujamaa_gateway::infrastructure::session::SessionStore;

fn screen(trail: &str) -> String {
    replay(trail).screen.to_string()
}

fn service(ttl: Duration) -> (UssdService, SessionStore<UssdSession>, Arc<ConsoleGateway>) {
    let sessions = SessionStore::new(ttl);
    let gateway = Arc::new(ConsoleGateway::new());
    let store = Arc::new(SqliteStore::in_memory().expect("in-memory store"));
    (
        UssdService::new(sessions.clone(), store, gateway.clone()),
        sessions,
        gateway,
    )
}

fn request(session: &str, text: &str) -> UssdRequest {
    UssdRequest {
        session_id: session.to_string(),
        service_code: "*384*123#".to_string(),
        phone_number: "+254700000010".to_string(),
        text: text.to_string(),
    }
}

#[test]
fn test_main_and_category_screens() {
    assert_eq!(
        screen(""),
        "CON Welcome to Ujamaa Health & Community Support\n\n1. Health Services\n2. Mental Health\n3. Community Resources\n4. Emergency Services\n5. Volunteer Services"
    );
    assert_eq!(
        screen("1"),
        "CON Health Services:\n1. Health Tips\n2. Appointment Booking\n3. Find Health Facility\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("2"),
        "CON Mental Health Services:\n1. Counseling Services\n2. Support Groups\n3. Crisis Support\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("3"),
        "CON Community Resources:\n1. Find Resources\n2. Request Resources\n3. Offer Resources\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("4"),
        "CON Emergency Services:\n1. Report Emergency\n2. Emergency Contacts\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("5"),
        "CON Volunteer Services:\n1. Register as Volunteer\n2. View Opportunities\n3. Organization Services\n\n0. Back to Main Menu"
    );
}

#[test]
fn test_health_tip_screens() {
    assert_eq!(
        screen("1*1"),
        "CON Health Tips Categories:\n1. General Health\n2. Nutrition\n3. Exercise\n4. Disease Prevention\n\n0. Back"
    );
    assert_eq!(
        screen("1*1*1"),
        "CON General Health Tips:\n1. Stay hydrated by drinking at least 8 glasses of water daily\n2. Eat a balanced diet with fruits and vegetables\n3. Exercise regularly for at least 30 minutes daily\n4. Get 7-8 hours of sleep each night\n5. Wash hands frequently to prevent infections\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("1*1*2"),
        "CON Nutrition Tips:\n1. Eat a variety of colorful fruits and vegetables\n2. Choose whole grains over refined grains\n3. Include protein in every meal\n4. Limit processed foods and added sugars\n5. Stay hydrated with water instead of sugary drinks\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("1*1*3"),
        "CON Exercise Tips:\n1. Start with a 10-minute walk daily\n2. Gradually increase exercise duration\n3. Include both cardio and strength training\n4. Stretch before and after exercise\n5. Find activities you enjoy to stay motivated\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("1*1*4"),
        "CON Disease Prevention Tips:\n1. Wash hands frequently with soap and water\n2. Cover coughs and sneezes with elbow\n3. Stay up to date with vaccinations\n4. Practice safe food handling\n5. Get regular health check-ups\n\n0. Back to Main Menu"
    );
}

#[test]
fn test_booking_screens() {
    assert_eq!(
        screen("1*2"),
        "CON Appointment Booking:\n1. Hospital\n2. Clinic\n3. Specialized Care\n\n0. Back"
    );
    assert_eq!(
        screen("1*2*1"),
        "CON Select service:\n1. General check-up\n2. Vaccination\n3. Prenatal care\n4. Child health\n5. Chronic disease management\n\n0. Back"
    );
    assert_eq!(
        screen("1*2*1*1"),
        "CON Select appointment date:\n1. Tomorrow\n2. This week\n3. Next week\n4. Specific date (MM/DD)\n\n0. Back"
    );
    assert_eq!(
        screen("1*2*1*1*1"),
        "CON Select appointment time:\n1. Morning (8AM-12PM)\n2. Afternoon (12PM-4PM)\n3. Evening (4PM-8PM)\n\n0. Back"
    );
    assert_eq!(
        screen("1*2*1*1*1*1"),
        "CON Appointment details:\nFacility: Hospital\nService: General check-up\nDate: Tomorrow\nTime: Morning (8AM-12PM)\n\n1. Confirm appointment\n2. Cancel\n\n0. Back to Main Menu"
    );
    assert_eq!(
        screen("1*2*1*1*1*1*1"),
        "END Your appointment has been scheduled. You will receive an SMS confirmation with details. Thank you for using Ujamaa Health Services."
    );
    assert_eq!(
        screen("1*2*1*1*1*1*2"),
        "END Appointment booking canceled. Thank you for using Ujamaa Health Services."
    );
}

#[test]
fn test_area_prompt_screens() {
    for trail in ["1*3", "3*1", "5*2"] {
        assert_eq!(screen(trail), "CON Enter your district or area:", "{trail}");
    }
    assert_eq!(
        screen("1*3*Kibera"),
        "END Thank you. We will send you an SMS listing health facilities in Kibera."
    );
}

#[test]
fn test_leaf_menu_screens() {
    let resources = "1. Medical Supplies\n2. Food & Nutrition\n3. Transportation\n4. Childcare\n5. Education\n6. Skills & Services";
    let cases = [
        ("2*1", "Counseling Services:\n1. Anonymous Phone Counseling\n2. Crisis Support\n3. Specialized Counseling".to_string()),
        ("2*2", "Support Groups:\n1. Find Support Groups\n2. Join a Group\n3. Meeting Schedule".to_string()),
        ("2*3", "Crisis Support:\n1. Immediate Phone Support\n2. Crisis Text Line\n3. Find Crisis Center".to_string()),
        ("3*2", format!("Request Resources:\n{resources}")),
        ("3*3", format!("Offer Resources:\n{resources}")),
        ("4*1", "Report Emergency:\n1. Medical\n2. Security\n3. Weather\n4. Infrastructure\n5. Disease Outbreak\n6. Other".to_string()),
        ("4*2", "Emergency Contacts:\n1. Medical Emergency\n2. Police\n3. Fire Department\n4. Disaster Response\n5. Poison Control\n6. Mental Health Crisis".to_string()),
        ("5*1", "Volunteer Registration:\n1. Medical Assistance\n2. Logistics & Transport\n3. Community Outreach\n4. Resource Distribution\n5. Technical Support\n6. Emotional Support".to_string()),
        ("5*3", "Organization Services:\n1. Register Organization\n2. Post Volunteer Need\n3. Update Existing Post\n4. View Volunteer Responses".to_string()),
    ];
    for (trail, body) in cases {
        assert_eq!(screen(trail), format!("CON {body}\n\n0. Back"), "{trail}");
    }
    assert_eq!(
        screen("2*1*1"),
        "END Thank you. You will receive an SMS with details about Anonymous Phone Counseling."
    );
}

#[test]
fn test_invalid_final_segment_repeats_menu() {
    let invalid = screen("1*9");
    let health = replay("1").screen;
    assert_eq!(invalid, format!("CON Invalid selection. {}", health.body()));

    let invalid_main = replay("7").screen;
    assert_eq!(invalid_main, Screen::invalid(replay("").screen.body()));
}

#[test]
fn test_back_navigation() {
    assert_eq!(screen("1*0"), screen(""));
    assert_eq!(screen("1*2*0"), screen("1"));
    assert_eq!(screen("1*2*1*0"), screen("1*2"));
    assert_eq!(screen("2*1*0"), screen("2"));
}

#[test]
fn test_custom_date_validation() {
    let prompt = screen("1*2*1*1*4");
    assert_eq!(prompt, "CON Enter date (MM/DD):");
    assert!(screen("1*2*1*1*4*13/45").starts_with("CON Invalid selection."));
    assert!(screen("1*2*1*1*4*12/25").starts_with("CON Select appointment time:"));
}

#[test]
fn test_input_after_end_gets_generic_screen() {
    let after = screen("1*2*1*1*1*1*1*5");
    assert!(after.starts_with("CON We couldn't process your request."));
    assert_eq!(screen("1*2*1*1*1*1*1*5*0"), screen(""));
}

#[tokio::test]
async fn test_booking_sends_confirmation_sms() {
    let (service, sessions, gateway) = service(Duration::from_secs(180));
    for text in ["", "1", "1*2", "1*2*2", "1*2*2*3", "1*2*2*3*2", "1*2*2*3*2*3"] {
        let screen = service.handle(&request("booking", text)).await.unwrap();
        assert!(!screen.is_end(), "{text}");
    }
    let done = service
        .respond(&request("booking", "1*2*2*3*2*3*1"))
        .await
        .unwrap();
    assert!(done.screen.is_end());
    done.follow_up.expect("booking action").await.unwrap();
    assert!(sessions.get("booking").unwrap().finished);

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, vec!["+254700000010".to_string()]);
    assert!(sent[0].1.contains("Clinic"), "{}", sent[0].1);
    assert!(sent[0].1.contains("Ref APT0001"), "{}", sent[0].1);
}

#[tokio::test]
async fn test_jump_in_trail_replays() {
    let (service, _, _) = service(Duration::from_secs(180));
    service.handle(&request("jump", "")).await.unwrap();
    let screen = service.handle(&request("jump", "1*2*1")).await.unwrap();
    assert_eq!(screen, replay("1*2*1").screen);
}

#[tokio::test]
async fn test_sessions_expire_after_inactivity() {
    let (service, sessions, _) = service(Duration::from_millis(20));
    service.handle(&request("idle", "1")).await.unwrap();
    assert_eq!(sessions.len(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sessions.cleanup_expired(), 1);
    assert!(sessions.is_empty());

    // A late callback still resolves from the trail alone
    let screen = service.handle(&request("idle", "1*2")).await.unwrap();
    assert_eq!(screen, replay("1*2").screen);
}
