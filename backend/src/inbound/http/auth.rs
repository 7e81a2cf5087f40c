//! Signup and login handlers.
//!
//! ```text
//! POST /auth/signup {"email":"ada@example.com","name":"Ada","password":"s3cret"}
//! POST /auth/login  {"email":"ada@example.com","password":"s3cret"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::Signup;
use crate::domain::user::{Email, UserProfile};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require_text};
use crate::inbound::http::{AckResponse, ApiResult};

/// Request body for `POST /auth/signup`.
///
/// All fields are declared optional so absence is reported through the
/// shared error envelope rather than a deserialisation failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Signed session token, valid for seven days.
    pub token: String,
    /// Public shape of the authenticated account.
    pub user: UserProfile,
}

fn parse_signup(request: SignupRequest) -> Result<Signup, Error> {
    let email_field = FieldName::new("email");
    let email = require_text(request.email, email_field)?;
    let email =
        Email::new(&email).map_err(|err| invalid_value_error(email_field, err.to_string()))?;
    let name = require_text(request.name, FieldName::new("name"))?;
    let password = require_text(request.password, FieldName::new("password"))?;
    Ok(Signup {
        name,
        email,
        password,
    })
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = AckResponse),
        (status = 400, description = "Missing or invalid fields", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<AckResponse>> {
    let signup = parse_signup(payload.into_inner())?;
    state.accounts.sign_up(signup).await?;
    Ok(web::Json(AckResponse::ok()))
}

/// Authenticate and issue a session token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let email = require_text(email, FieldName::new("email"))?;
    let password = require_text(password, FieldName::new("password"))?;

    let outcome = state.accounts.log_in(&email, &password).await?;
    Ok(web::Json(LoginResponse {
        message: "Login successful".to_owned(),
        token: outcome.token,
        user: outcome.user,
    }))
}
