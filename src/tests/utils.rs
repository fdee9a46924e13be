// src/tests/utils.rs
use crate::config::OrderingConfig;
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::{Body, Request, Response};
use serde_json::Value;
use std::io::Read;
use std::ops::Deref;
use std::path::PathBuf;
use tempfile::TempDir;

/// A schema-initialized database in its own temp directory.
/// Dropping it closes this thread's connection and deletes the file.
pub struct TestDb {
    db: Database,
    dir: TempDir,
}

impl TestDb {
    pub fn file(&self) -> PathBuf {
        self.dir.path().join("omd.sqlite3")
    }
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        self.db.close();
    }
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("omd.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestDb { db, dir }
}

/// App state over a throwaway database; derefs to [`AppState`].
pub struct TestApp {
    state: AppState,
    db: TestDb,
}

impl TestApp {
    pub fn db(&self) -> &TestDb {
        &self.db
    }
}

impl Deref for TestApp {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

pub fn test_state(seed: Option<u64>) -> TestApp {
    let db = init_test_db();
    let state = AppState::new(db.db.clone(), OrderingConfig { seed });
    TestApp { state, db }
}

/// Run a request through the router the same way the server loop does.
pub fn send(state: &AppState, req: Request) -> Response {
    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    }
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: String) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn body_json(mut resp: Response) -> Value {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST a JSON payload that must create a row; returns the new id.
pub fn create(state: &AppState, uri: &str, body: Value) -> i64 {
    let resp = send(state, post_json(uri, &body));
    assert_eq!(resp.status(), 201, "POST {uri} failed");
    body_json(resp)["id"].as_i64().unwrap()
}

/// The string at `key` for every element of a JSON array response.
pub fn strings_at(list: &Value, key: &str) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item[key].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_db_is_removed_on_drop() {
    let app = test_state(None);
    send(&app, get("/api/listings?tenant=brasov"));

    let file = app.db().file();
    let db = app.db().deref().clone();
    assert!(file.exists());
    assert!(db.is_open());

    drop(app);
    assert!(!file.exists(), "test db file left behind");
    assert!(!db.is_open(), "connection still cached after drop");
}
