use std::sync::Arc;

use agenda::application::{auth_service::AuthService, notifier::MemoryNotifier};
use agenda::domain::credentials::Credential;
use agenda::http::routing::{self, auth};
use agenda::infrastructure::static_directory::StaticUserDirectory;
use axum::body::to_bytes;
use axum::Router;
use serde_json::{json, Value};

fn app(notifier: &MemoryNotifier) -> Router {
    let directory = StaticUserDirectory::new(vec![Credential::new("ana", "s3cret")]);
    let service = AuthService::new(directory, Arc::new(notifier.clone()));
    routing::app(auth::router(auth::AuthState::new(service)))
}

#[tokio::test]
async fn acceptance_login_success_and_generic_failure() {
    let notifier = MemoryNotifier::new();
    let app = app(&notifier);

    let (status, body) = login(&app, json!({ "username": "ana", "password": "s3cret" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["severity"], "success");

    let (wrong_password_status, wrong_password) = login(&app, json!({ "username": "ana", "password": "nope" })).await;
    let (unknown_user_status, unknown_user) = login(&app, json!({ "username": "eve", "password": "s3cret" })).await;
    assert_eq!(wrong_password_status, 401);
    assert_eq!(unknown_user_status, 401);
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password, json!({ "message": "incorrect username or password", "severity": "error" }));

    assert_eq!(notifier.take().len(), 3);
}

async fn login(app: &Router, body: Value) -> (u16, Value) {
    use axum::body::Body;
    use http::Request;
    use tower::ServiceExt;

    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res: hyper::Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = res.status().as_u16();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
