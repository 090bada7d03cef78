use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, patch, post},
};
use axum_helpers::{Claims, JwtAuth, ValidatedJson, session_auth_middleware, session_cookie};
use serde::Serialize;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, LoginRequest, UpdateAvatar, UpdateProfile, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Application state for the user routes
#[derive(Clone)]
pub struct AppState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

/// Create the users router with all HTTP endpoints.
///
/// The `/users/me` routes sit behind the session auth middleware; everything
/// else is public.
pub fn router<R>(state: AppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/users/me", get(current_user::<R>).patch(update_profile::<R>))
        .route("/users/me/avatar", patch(update_avatar::<R>))
        .layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            session_auth_middleware,
        ));

    Router::new()
        .route("/users", get(list_users::<R>).post(create_user::<R>))
        .route("/users/{id}", get(get_user::<R>))
        .route("/login", post(login::<R>))
        .merge(protected)
        .with_state(state)
}

/// Check if running in development mode
fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or_else(|_| cfg!(debug_assertions))
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(state): State<AppState<R>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

/// Get a user by ID
///
/// GET /users/:id
async fn get_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.get_user(&id).await?;
    Ok(Json(user))
}

/// Create a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email/password, issuing the session cookie
///
/// POST /login
async fn login<R: UserRepository>(
    State(state): State<AppState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Response> {
    let user = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    let token = state
        .jwt_auth
        .create_session_token(user.id)
        .map_err(UserError::server)?;

    let cookie = session_cookie(&token, !is_development());
    let cookie_header = HeaderValue::from_str(&cookie).map_err(UserError::server)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie_header)]),
        Json(MessageResponse {
            message: "Authentication successful".to_string(),
        }),
    )
        .into_response())
}

/// Get the authenticated caller's own record
///
/// GET /users/me
async fn current_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(claims): Extension<Claims>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.get_user(&claims.sub).await?;
    Ok(Json(user))
}

/// Update the authenticated caller's profile (name, about)
///
/// PATCH /users/me
async fn update_profile<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(input): ValidatedJson<UpdateProfile>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.update_profile(&claims.sub, input).await?;
    Ok(Json(user))
}

/// Update the authenticated caller's avatar
///
/// PATCH /users/me/avatar
async fn update_avatar<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(input): ValidatedJson<UpdateAvatar>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.update_avatar(&claims.sub, input).await?;
    Ok(Json(user))
}
