use std::sync::Arc;

use axum::{Extension, Json, extract::{State, Request}, http::{header, StatusCode}, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use service::auth::{domain::{LoginInput, RegisterInput}, errors::AuthError, repo::seaorm::SeaOrmAuthRepository, service::{AuthConfig, AuthService}};
use service::catalog::CatalogService;
use service::orders::{repository::SeaOrmOrderRepository, OrderService};

use crate::{errors::JsonApiError, metrics};

pub const SESSION_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub cookie_secure: bool,
}

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub auth_svc: Arc<AuthService<SeaOrmAuthRepository>>,
    pub catalog_svc: CatalogService,
    pub order_svc: Arc<OrderService<SeaOrmOrderRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: &configs::AuthConfig) -> Self {
        let auth_svc = AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(db.clone())),
            AuthConfig::with_secret(auth.jwt_secret.clone(), auth.token_ttl_hours),
        );
        Self {
            auth: ServerAuthConfig { cookie_secure: auth.cookie_secure },
            auth_svc: Arc::new(auth_svc),
            catalog_svc: CatalogService::new(db.clone()),
            order_svc: Arc::new(OrderService::new(Arc::new(SeaOrmOrderRepository::new(db.clone())))),
            db,
        }
    }
}

/// Identity of the caller, inserted into request extensions by [`require_session`].
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct RegisterOutput { pub user_id: Uuid }

#[derive(Serialize)]
pub struct LoginOutput { pub user_id: Uuid, pub name: String, pub email: String, pub role: String, pub token: String }

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<Json<RegisterOutput>, JsonApiError> {
    let user = state.auth_svc.register(input).await?;
    metrics::REGISTRATIONS_TOTAL.inc();
    Ok(Json(RegisterOutput { user_id: user.id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = match state.auth_svc.login(input).await {
        Ok(s) => s,
        Err(e) => {
            metrics::record_login(false);
            return Err(e.into());
        }
    };
    metrics::record_login(true);
    let user = session.user;
    let Some(token) = session.token else {
        return Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some("token generation failed".into())));
    };
    let mut cookie = Cookie::new(SESSION_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.auth.cookie_secure);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    let out = LoginOutput { user_id: user.id, name: user.name, email: user.email, role: user.role, token };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged Out")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Session identity", body = SessionUser), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(user): Extension<SessionUser>) -> Json<SessionUser> {
    Json(user)
}

/// Pull the token from `Authorization: Bearer` or, failing that, the session cookie.
fn session_token(req: &Request, jar: &CookieJar) -> Result<String, JsonApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION) {
        let value = h.to_str().map_err(|_| JsonApiError::unauthorized("malformed Authorization header"))?;
        return match value.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Ok(t.trim().to_string()),
            _ => {
                warn!(path = %req.uri().path(), "invalid Authorization format (expect Bearer)");
                Err(JsonApiError::unauthorized("expected Bearer token"))
            }
        };
    }
    match jar.get(SESSION_COOKIE) {
        Some(c) if !c.value().is_empty() => Ok(c.value().to_string()),
        _ => Err(JsonApiError::unauthorized("missing session")),
    }
}

/// Reject requests without a valid, unexpired session token whose user still
/// exists; on success the caller's [`SessionUser`] is available to handlers as
/// an extension.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = session_token(&req, &jar)?;
    let user = match state.auth_svc.current_user(&token).await {
        Ok(u) => u,
        Err(e @ (AuthError::Repository(_) | AuthError::HashError(_))) => return Err(e.into()),
        Err(e) => {
            info!(path = %req.uri().path(), error = %e, "session token rejected");
            return Err(JsonApiError::unauthorized("invalid or expired session"));
        }
    };
    req.extensions_mut().insert(SessionUser { user_id: user.id, name: user.name, email: user.email, role: user.role });
    Ok(next.run(req).await)
}
