use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use tempfile::TempDir;

use gw_clock_api::config::Config;

/// An action row as stored: (id, date_time, value, est_effectue, type_action_id).
pub type ActionRow = (i64, String, String, i64, i64);

/// A running test server backed by its own SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Send a request with an optional JSON body, return (body, status).
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> (Value, StatusCode) {
        let mut req = self.client.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await.expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn list(&self) -> (Value, StatusCode) {
        self.send(Method::GET, "/actions", None).await
    }

    pub async fn create(&self, body: &Value) -> (Value, StatusCode) {
        self.send(Method::POST, "/actions", Some(body)).await
    }

    pub async fn update(&self, body: &Value) -> (Value, StatusCode) {
        self.send(Method::PATCH, "/actions", Some(body)).await
    }

    pub async fn delete(&self, body: &Value) -> (Value, StatusCode) {
        self.send(Method::DELETE, "/actions", Some(body)).await
    }

    pub async fn complete(&self, body: &Value) -> (Value, StatusCode) {
        self.send(Method::POST, "/actions/completer", Some(body)).await
    }

    /// Create a valid action and return its id as read back from storage.
    pub async fn create_action(&self, date_time: &str, value: &str, type_action_id: i64) -> i64 {
        let (body, status) = self
            .create(&json!({
                "date_time": date_time,
                "value": value,
                "type_action_id": type_action_id,
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "create action failed: {body}");
        self.rows().await.last().expect("no row after create").0
    }

    /// Read every action row straight from the database file.
    pub async fn rows(&self) -> Vec<ActionRow> {
        let mut conn = connect(&self.db_path, false).await;
        let rows = sqlx::query_as::<_, ActionRow>(
            "SELECT id, date_time, value, est_effectue, type_action_id FROM actions ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        .expect("Failed to read actions");
        conn.close().await.expect("Failed to close connection");
        rows
    }
}

pub async fn connect(path: &Path, create: bool) -> SqliteConnection {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create)
        .foreign_keys(true)
        .connect()
        .await
        .expect("Failed to open test database")
}

/// Create a fresh database file with the actions schema in a temp dir.
pub async fn provision_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("db.db");

    let mut conn = connect(&path, true).await;
    sqlx::raw_sql(include_str!("../fixtures/schema.sql"))
        .execute(&mut conn)
        .await
        .expect("Failed to apply schema");
    conn.close().await.expect("Failed to close connection");

    (dir, path)
}

/// Spawn a test app over a freshly provisioned database.
pub async fn spawn_app() -> TestApp {
    let (dir, db_path) = provision_db().await;
    spawn_with(dir, db_path).await
}

/// Spawn a test app pointing at a database file that does not exist.
#[allow(dead_code)]
pub async fn spawn_app_without_db() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("missing.db");
    spawn_with(dir, db_path).await
}

async fn spawn_with(dir: TempDir, db_path: PathBuf) -> TestApp {
    let mut config = Config::new(&db_path);
    config.log_level = "warn".to_string();

    let app = gw_clock_api::build_app(config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        db_path,
        _dir: dir,
    }
}
