use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};

use crate::application::ussd::{Screen, UssdRequest};
use crate::infrastructure::http::AppState;

fn plain(status: StatusCode, screen: Screen) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        screen.to_string(),
    )
        .into_response()
}

/// Gateway callback; always answers with a `CON`/`END` screen
pub async fn ussd_handler(
    State(state): State<AppState>,
    form: Result<Form<UssdRequest>, FormRejection>,
) -> Response {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            tracing::warn!("Malformed USSD callback: {}", rejection.body_text());
            return plain(StatusCode::BAD_REQUEST, Screen::error());
        }
    };

    match state.ussd.handle(&request).await {
        Ok(screen) => plain(StatusCode::OK, screen),
        Err(e) => {
            tracing::error!("USSD session {} failed: {}", request.session_id, e);
            plain(StatusCode::INTERNAL_SERVER_ERROR, Screen::error())
        }
    }
}
