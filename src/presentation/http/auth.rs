use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    routing::post,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::errors::ServiceError;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::signin::{Signin, SigninRequest as SigninDto};
use crate::application::use_cases::auth::signup::{Signup, SignupRequest as SignupDto};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::{LoginRole, User};
use crate::presentation::http::error::ApiResult;
use crate::presentation::http::wire::{SuccessMessage, UserOut};

const COOKIE_NAME: &str = "access_token";

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[schema(value_type = String, example = "User")]
    pub login_role: LoginRole,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[schema(value_type = String, example = "Mess Owner")]
    pub login_role: LoginRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserOut,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/signup", tag = "Auth", request_body = SignupRequest, responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, HeaderMap, Json<AuthResponse>)> {
    let users = ctx.user_repo();
    let uc = Signup {
        users: users.as_ref(),
    };
    let user = uc
        .execute(&SignupDto {
            username: req.username,
            email: req.email,
            password: req.password,
            login_role: req.login_role,
        })
        .await?;
    info!(user_id = %user.id, role = %user.login_role, "user_signed_up");
    let (headers, body) = session(&ctx.cfg, &user, "User created successfully")?;
    Ok((StatusCode::CREATED, headers, Json(body)))
}

#[utoipa::path(post, path = "/api/auth/signin", tag = "Auth", request_body = SigninRequest, responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = crate::presentation::http::error::ErrorBody)
))]
pub async fn signin(
    State(ctx): State<AppContext>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<(HeaderMap, Json<AuthResponse>)> {
    let repo = ctx.user_repo();
    let uc = Signin {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&SigninDto {
            username: req.username,
            password: req.password,
            login_role: req.login_role,
        })
        .await?;
    let (headers, body) = session(&ctx.cfg, &user, "Authentication successful")?;
    Ok((headers, Json(body)))
}

#[utoipa::path(post, path = "/api/auth/signout", tag = "Auth", responses((status = 200, body = SuccessMessage)))]
pub async fn signout(State(ctx): State<AppContext>) -> (HeaderMap, Json<SuccessMessage>) {
    (
        clear_cookie_headers(&ctx.cfg),
        Json(SuccessMessage::new("Signed out successfully")),
    )
}

fn session(cfg: &Config, user: &User, message: &str) -> ApiResult<(HeaderMap, AuthResponse)> {
    let token = issue_token(cfg, user)?;
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, cfg.jwt_expires_secs, cfg.cookie_secure);
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    Ok((
        headers,
        AuthResponse {
            success: true,
            message: message.to_string(),
            user: UserOut::from(user),
            token,
        },
    ))
}

pub(crate) fn issue_token(cfg: &Config, user: &User) -> ApiResult<String> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let ttl = usize::try_from(cfg.jwt_expires_secs.max(0)).unwrap_or(usize::MAX);
    let claims = Claims {
        sub: user.id.to_string(),
        role: user.login_role.as_str().to_string(),
        iat: now,
        exp: now.saturating_add(ttl),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
}

pub(crate) fn validate_token(cfg: &Config, token: &str) -> ApiResult<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "token_rejected");
        ServiceError::unauthorized("Invalid or expired token")
    })
}

// --- Bearer extractor ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Authorization header wins over the cookie
        if let Some(auth) = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.trim().to_string()));
            }
        }
        if let Some(cookie_hdr) = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, COOKIE_NAME) {
                return Ok(Bearer(token));
            }
        }
        Err(ServiceError::unauthorized("Not authenticated"))
    }
}

/// The account behind a valid token.
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, ctx).await?;
        let claims = validate_token(&ctx.cfg, &token)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::unauthorized("Invalid or expired token"))?;
        let user = ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::unauthorized("User not found"))?;
        Ok(CurrentUser(user))
    }
}

/// A signed-in account with the Mess Owner role.
pub struct MessOwner(pub User);

#[axum::async_trait]
impl FromRequestParts<AppContext> for MessOwner {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, ctx).await?;
        if !user.is_mess_owner() {
            return Err(ServiceError::forbidden(
                "Only Mess Owners can perform this action",
            ));
        }
        Ok(MessOwner(user))
    }
}

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name && !v.trim().is_empty() {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn cookie_attrs(secure: bool) -> &'static str {
    if secure {
        "HttpOnly; Secure; Path=/; SameSite=None"
    } else {
        "HttpOnly; Path=/; SameSite=Lax"
    }
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    format!(
        "{COOKIE_NAME}={token}; {}; Max-Age={}",
        cookie_attrs(secure),
        max_age_secs.max(0)
    )
}

pub(crate) fn clear_cookie_headers(cfg: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = format!("{COOKIE_NAME}=; {}; Max-Age=0", cookie_attrs(cfg.cookie_secure));
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, v);
    }
    headers
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::mess_repository::MessRepository;
    use crate::testing::{MemoryStore, seed_user, test_config, test_context};

    fn parts_with(name: header::HeaderName, value: &str) -> Parts {
        let req = axum::http::Request::builder()
            .header(name, value)
            .body(())
            .unwrap();
        req.into_parts().0
    }

    #[tokio::test]
    async fn signup_owner_sets_cookie_and_default_mess() {
        let store = Arc::new(MemoryStore::default());
        let ctx = test_context(store.clone());
        let (status, headers, Json(body)) = signup(
            State(ctx),
            Json(SignupRequest {
                username: "owner_one".into(),
                email: "owner@mess.in".into(),
                password: "secret123".into(),
                login_role: LoginRole::MessOwner,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "User created successfully");
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("access_token="));
        assert!(cookie.contains("SameSite=Lax"));
        let mess = MessRepository::find_by_owner(store.as_ref(), body.user.id)
            .await
            .unwrap();
        assert!(mess.is_some());
    }

    #[tokio::test]
    async fn signin_checks_role() {
        let store = Arc::new(MemoryStore::default());
        seed_user(&store, "diner", LoginRole::User).await;
        let ctx = test_context(store);
        let err = signin(
            State(ctx.clone()),
            Json(SigninRequest {
                username: "diner".into(),
                password: "secret123".into(),
                login_role: LoginRole::MessOwner,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        let (_, Json(ok)) = signin(
            State(ctx.clone()),
            Json(SigninRequest {
                username: "diner".into(),
                password: "secret123".into(),
                login_role: LoginRole::User,
            }),
        )
        .await
        .unwrap();
        let claims = validate_token(&ctx.cfg, &ok.token).unwrap();
        assert_eq!(claims.sub, ok.user.id.to_string());
        assert_eq!(claims.role, "User");
    }

    #[tokio::test]
    async fn oversized_lifetime_saturates_expiry() {
        let store = MemoryStore::default();
        let diner = seed_user(&store, "diner", LoginRole::User).await;
        let mut cfg = test_config();
        cfg.jwt_expires_secs = i64::MAX;
        let token = issue_token(&cfg, &diner).unwrap();
        let claims = validate_token(&cfg, &token).unwrap();
        assert_eq!(claims.exp, usize::MAX);
        assert_eq!(claims.sub, diner.id.to_string());
    }

    #[tokio::test]
    async fn extractors_read_header_or_cookie() {
        let store = Arc::new(MemoryStore::default());
        let diner = seed_user(&store, "diner", LoginRole::User).await;
        let ctx = test_context(store);
        let token = issue_token(&ctx.cfg, &diner).unwrap();

        let mut parts = parts_with(header::COOKIE, &format!("theme=dark; access_token={token}"));
        let CurrentUser(user) = CurrentUser::from_request_parts(&mut parts, &ctx)
            .await
            .unwrap();
        assert_eq!(user.id, diner.id);

        let mut parts = parts_with(header::AUTHORIZATION, &format!("Bearer {token}"));
        let err = MessOwner::from_request_parts(&mut parts, &ctx)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let mut parts = parts_with(header::AUTHORIZATION, "Bearer not-a-token");
        let err = CurrentUser::from_request_parts(&mut parts, &ctx)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[test]
    fn secure_cookie_is_cross_site() {
        let mut cfg = test_config();
        cfg.cookie_secure = true;
        let headers = clear_cookie_headers(&cfg);
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Secure; Path=/; SameSite=None"));
        assert!(cookie.ends_with("Max-Age=0"));
    }
}
