//! HTTP surface for the gateway callbacks and the dashboard

pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ussd", post(handlers::ussd::ussd_handler))
        .route("/sms", post(handlers::sms::sms_handler))
        .route("/voice", post(handlers::voice::voice_handler))
        .route("/chat", post(handlers::chat::chat_handler))
        .route("/emergency-alerts", post(handlers::alerts::alert_handler))
        .route("/reminders", post(handlers::reminders::reminder_handler))
        .route("/personalized-tips", post(handlers::tips::tips_handler))
        .route("/join-group", post(handlers::community::join_group_handler))
        .route("/send-message", post(handlers::community::send_message_handler))
        .route("/volunteer", post(handlers::community::volunteer_handler))
        .route("/post-need", post(handlers::community::post_need_handler));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
