use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::{
    application::{auth_service::AuthService, notifier::Notification},
    domain::credentials::UserDirectory,
    http::types::LoginBody,
};

pub struct AuthState<D: UserDirectory> { pub service: Arc<AuthService<D>> }

impl<D: UserDirectory> Clone for AuthState<D> {
    fn clone(&self) -> Self { Self { service: Arc::clone(&self.service) } }
}

impl<D: UserDirectory> AuthState<D> {
    pub fn new(service: AuthService<D>) -> Self { Self { service: Arc::new(service) } }
}

pub fn router<D: UserDirectory>(state: AuthState<D>) -> Router {
    Router::new()
        .route("/login", post(login::<D>))
        .with_state(state)
}

async fn login<D: UserDirectory>(State(state): State<AuthState<D>>, Json(body): Json<LoginBody>) -> (StatusCode, Json<Notification>) {
    let outcome = state.service.authenticate(&body.username, &body.password);
    let status = if outcome.is_success() { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (status, Json(outcome.notification()))
}
