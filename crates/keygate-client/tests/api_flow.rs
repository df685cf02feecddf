//! End-to-end tests for the Keygate client against an in-process mock API.
//!
//! The mock mirrors the reference backend: `/register` rejects duplicate
//! usernames with 400, `/login` answers 401 on bad credentials.
//!
//! Run with: cargo test -p keygate-client --test api_flow

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use keygate_client::config::ClientConfig;
use keygate_client::network::{AuthApi, NetworkClient};
use keygate_client::state::{FormController, MessageKind, Submission, UiMode};
use keygate_protocol::{ErrorBody, LoginRequest, RegisterRequest};
use reqwest::Method;
use serde_json::{json, Value};

const DELAY: Duration = Duration::from_millis(2000);

type Users = Arc<Mutex<HashMap<String, String>>>;

/// Mock API server wrapper
struct MockApi {
    addr: std::net::SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockApi {
    async fn start(router: Router) -> anyhow::Result<Self> {
        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn auth() -> Self {
        Self::start(auth_router())
            .await
            .expect("Failed to start mock API")
    }

    fn http_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn client(&self) -> NetworkClient {
        NetworkClient::with_client(reqwest::Client::new(), &self.http_url())
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn auth_router() -> Router {
    let users: Users = Arc::default();

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/ok",
            post(|| async { Json(json!({"ok": true})) }),
        )
        .route(
            "/denied",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "bad credentials"})),
                )
            }),
        )
        .route(
            "/content-type",
            post(|headers: HeaderMap| async move {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                Json(json!({ "content_type": content_type }))
            }),
        )
        .route("/plain", post(|| async { "not json" }))
        .with_state(users)
}

async fn register(
    State(users): State<Users>,
    Json(input): Json<RegisterRequest>,
) -> (StatusCode, Json<Value>) {
    let mut users = users.lock().unwrap();
    if users.contains_key(&input.username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!(ErrorBody::new("Username already exists"))),
        );
    }

    users.insert(input.username.clone(), input.password);
    (
        StatusCode::OK,
        Json(json!({"message": "User registered successfully", "username": input.username})),
    )
}

async fn login(
    State(users): State<Users>,
    Json(input): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let users = users.lock().unwrap();
    match users.get(&input.username) {
        Some(password) if *password == input.password => (
            StatusCode::OK,
            Json(json!({"message": "Login successful", "username": input.username})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!(ErrorBody::new("Invalid credentials"))),
        ),
    }
}

fn fill_register(controller: &mut FormController, username: &str) {
    let form = controller.register_form_mut();
    form.username = username.into();
    form.email = format!("{}@test.com", username);
    form.password = "testpassword123".into();
}

#[tokio::test]
async fn success_status_is_normalized() {
    let api = MockApi::auth().await;

    let result = api.client().call::<()>("/ok", Method::POST, None).await;

    assert!(result.success);
    assert_eq!(result.status, 200);
    assert_eq!(result.data, Some(json!({"ok": true})));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn error_status_keeps_body() {
    let api = MockApi::auth().await;

    let result = api.client().call::<()>("/denied", Method::POST, None).await;

    assert!(!result.success);
    assert_eq!(result.status, 401);
    assert_eq!(result.data, Some(json!({"detail": "bad credentials"})));
    assert_eq!(result.detail().as_deref(), Some("bad credentials"));
}

#[tokio::test]
async fn requests_declare_json_content_type() {
    let api = MockApi::auth().await;

    let result = api.client().call::<()>("/content-type", Method::POST, None).await;

    assert_eq!(
        result.data,
        Some(json!({"content_type": "application/json"}))
    );
}

#[tokio::test]
async fn non_json_body_is_a_transport_failure() {
    let api = MockApi::auth().await;

    let result = api.client().call::<()>("/plain", Method::POST, None).await;

    assert!(!result.success);
    assert_eq!(result.status, 0);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn padded_base_url_still_reaches_api() {
    let api = MockApi::auth().await;
    let builder = config::Config::builder()
        .set_override("api_base", format!("{} ", api.http_url()))
        .unwrap();

    let config = ClientConfig::build(builder).unwrap();
    let network = NetworkClient::new(&config).unwrap();
    let result = network.call::<()>("/ok", Method::POST, None).await;

    assert!(result.success);
    assert_eq!(result.status, 200);
}

#[tokio::test]
async fn unreachable_api_yields_status_zero() {
    // Grab a free port, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NetworkClient::with_client(reqwest::Client::new(), &format!("http://{}", addr));
    let result = client
        .login(&LoginRequest {
            username: "alice".into(),
            password: "hunter2".into(),
        })
        .await;

    assert!(!result.success);
    assert_eq!(result.status, 0);
    assert!(result.error.is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let api = MockApi::auth().await;
    let network = api.client();
    let mut controller = FormController::new(DELAY);

    controller.toggle_mode();
    fill_register(&mut controller, "alice");

    assert_eq!(controller.submit_register(&network).await, Submission::Succeeded);
    let message = controller.message().unwrap();
    assert_eq!(message.text, "Registration successful! You can now login.");
    assert_eq!(message.kind, MessageKind::Success);
    assert!(controller.register_form().username.is_empty());
    assert!(controller.register_form().email.is_empty());
    assert!(controller.register_form().password.is_empty());

    let deadline = controller.auto_switch_at().expect("auto-switch scheduled");
    assert_eq!(controller.mode(), UiMode::Register);
    assert!(controller.poll_auto_switch(deadline));
    assert_eq!(controller.mode(), UiMode::Login);

    controller.login_form_mut().username = "alice".into();
    controller.login_form_mut().password = "testpassword123".into();

    assert_eq!(controller.submit_login(&network).await, Submission::Succeeded);
    assert_eq!(
        controller.message().unwrap().text,
        "Login successful! Welcome, alice."
    );
    assert_eq!(controller.session().unwrap().username, "alice");
}

#[tokio::test]
async fn duplicate_registration_shows_server_detail() {
    let api = MockApi::auth().await;
    let network = api.client();
    let mut controller = FormController::new(DELAY);
    controller.toggle_mode();

    fill_register(&mut controller, "bob");
    assert_eq!(controller.submit_register(&network).await, Submission::Succeeded);

    fill_register(&mut controller, "bob");
    assert_eq!(controller.submit_register(&network).await, Submission::Failed);

    let message = controller.message().unwrap();
    assert_eq!(message.text, "Username already exists");
    assert_eq!(message.kind, MessageKind::Error);
}

#[tokio::test]
async fn wrong_password_shows_invalid_credentials() {
    let api = MockApi::auth().await;
    let network = api.client();
    let mut controller = FormController::new(DELAY);

    controller.login_form_mut().username = "mallory".into();
    controller.login_form_mut().password = "guess".into();

    assert_eq!(controller.submit_login(&network).await, Submission::Failed);
    assert_eq!(controller.message().unwrap().text, "Invalid credentials");
    assert!(controller.session().is_none());
}

#[tokio::test]
async fn register_taken_username_shows_exact_text() {
    let router = Router::new().route(
        "/register",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "username taken"})),
            )
        }),
    );
    let api = MockApi::start(router).await.unwrap();
    let mut controller = FormController::new(DELAY);
    controller.toggle_mode();
    fill_register(&mut controller, "carol");

    assert_eq!(controller.submit_register(&api.client()).await, Submission::Failed);
    assert_eq!(controller.message().unwrap().text, "username taken");
}
