#![allow(dead_code)]

use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use matchday_backend::auth::jwt::generate_token;
use matchday_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use matchday_backend::models::user::UserRole;
use matchday_backend::run;
use matchday_backend::services::NotificationService;
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    let connection_pool = configure_db(&configuration.database).await;
    let jwt_settings = get_jwt_settings(&configuration);
    let notification_service = NotificationService::new(connection_pool.clone());

    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        notification_service,
    )
    .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Insert a user the way the account service would, and mint a token for
/// them against the same settings the middleware validates with.
pub async fn create_user_with_token(app: &TestApp, role: UserRole) -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    let username = format!("user{}", Uuid::new_v4().simple());

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, role)
        VALUES ($1, $2, 'test-hash', $3)
        "#,
    )
    .bind(user_id)
    .bind(&username)
    .bind(role.as_str())
    .execute(&app.db_pool)
    .await
    .expect("Failed to insert test user.");

    let configuration = get_config().expect("Failed to read configuration.");
    let jwt_settings = get_jwt_settings(&configuration);
    let token =
        generate_token(user_id, &username, role, &jwt_settings).expect("Failed to mint token.");

    (user_id, token)
}

pub async fn create_admin(app: &TestApp) -> (Uuid, String) {
    create_user_with_token(app, UserRole::Admin).await
}

pub async fn create_player(app: &TestApp) -> (Uuid, String) {
    create_user_with_token(app, UserRole::User).await
}

/// Create a fixture through the admin API and return its id.
pub async fn create_fixture(app: &TestApp, admin_token: &str, formation_size: &str) -> Uuid {
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/fixtures", app.address))
        .bearer_auth(admin_token)
        .json(&json!({
            "venue": "City Arena",
            "starts_at": "2026-09-01T18:30:00Z",
            "formation_size": formation_size
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.expect("Cannot parse response body.");
    let fixture_id = body["data"]["fixture_id"]
        .as_str()
        .expect("Missing fixture_id in response.");
    Uuid::parse_str(fixture_id).expect("fixture_id is not a UUID.")
}

/// Book a slot, returning the raw response for status assertions.
pub async fn book_slot(
    app: &TestApp,
    token: &str,
    fixture_id: Uuid,
    team: &str,
    position_code: &str,
) -> reqwest::Response {
    Client::new()
        .post(format!("{}/booking/fixtures/{}/book", app.address, fixture_id))
        .bearer_auth(token)
        .json(&json!({ "team": team, "position_code": position_code }))
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn submit_results(
    app: &TestApp,
    admin_token: &str,
    fixture_id: Uuid,
    body: &serde_json::Value,
) -> reqwest::Response {
    Client::new()
        .post(format!("{}/admin/fixtures/{}/results", app.address, fixture_id))
        .bearer_auth(admin_token)
        .json(body)
        .send()
        .await
        .expect("Failed to execute request.")
}
