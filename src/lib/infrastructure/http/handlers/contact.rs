//! Contact form handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::contact::{service::ContactIntake, submission::Submission},
    infrastructure::http::{
        errors::{response_headers, ApiError},
        state::AppState,
    },
};

/// Client identity when no forwarding header is present
const UNKNOWN_CLIENT: &str = "unknown";

/// Contact form request body
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactBody {
    /// The visitor's name
    #[schema(example = "Kim")]
    pub name: Option<String>,

    /// The visitor's reply address
    #[schema(example = "kim@example.com")]
    pub email: Option<String>,

    /// The message, 5 to 4000 characters after trimming
    #[schema(example = "안녕하세요, 문의드립니다.")]
    pub message: Option<String>,

    /// Honeypot. Humans never see this input; leave it empty.
    pub company: Option<String>,
}

impl From<ContactBody> for Submission {
    fn from(body: ContactBody) -> Self {
        Submission::new(body.name, body.email, body.message, body.company)
    }
}

/// Contact form response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Whether the submission was accepted
    #[schema(example = true)]
    pub ok: bool,
}

/// Accept a contact form submission
#[utoipa::path(
    post,
    operation_id = "contact",
    tag = "Contact",
    path = "/api/contact",
    request_body = ContactBody,
    responses(
        (status = StatusCode::OK, description = "Submission accepted", body = ContactResponse),
        (status = StatusCode::BAD_REQUEST, description = "Malformed body or failed validation", body = ErrorResponse),
        (status = StatusCode::TOO_MANY_REQUESTS, description = "A submission from this client is less than 30 seconds old", body = ErrorResponse),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Provider credential missing", body = ErrorResponse),
        (status = StatusCode::BAD_GATEWAY, description = "Provider rejected the message or was unreachable", body = ErrorResponse),
    )
)]
pub async fn handler<C: ContactIntake>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    request: Result<Json<ContactBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    if state.config.api_key.is_none() {
        return Err(ApiError::new_500("RESEND_API_KEY not configured"));
    }

    let client_ip = client_ip(&headers);
    let submission = request.ok().map(|Json(body)| body.into());

    state.contact.submit(submission, &client_ip).await?;

    Ok((response_headers(), Json(ContactResponse { ok: true })))
}

/// Derive the client identity from forwarding headers
///
/// `x-forwarded-for` may hold a comma-separated chain; only the first
/// entry names the client. `cf-connecting-ip` is the platform fallback.
fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let connecting = headers
        .get("cf-connecting-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded
        .or(connecting)
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
