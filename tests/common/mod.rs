use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<Option<TestServer>> = OnceLock::new();
static UNREACHABLE: AtomicBool = AtomicBool::new(false);

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/habitlog-api");
        cmd.env("HABITLOG_PORT", port.to_string())
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .env("APP_ENV", "development")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Spawn the server once and wait for a healthy storage backend. Returns
/// None when the environment has no reachable database, so callers can
/// skip rather than fail.
pub async fn try_server() -> Option<&'static TestServer> {
    if UNREACHABLE.load(Ordering::Relaxed) {
        return None;
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().ok()).as_ref()?;

    match server.wait_ready(Duration::from_secs(10)).await {
        Ok(()) => Some(server),
        Err(e) => {
            UNREACHABLE.store(true, Ordering::Relaxed);
            eprintln!("skipping integration test: {}", e);
            None
        }
    }
}

/// An authenticated test account.
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Register a fresh account and log in, returning its token and id.
pub async fn signup(server: &TestServer, client: &reqwest::Client, prefix: &str) -> Result<Session> {
    let username = unique_username(prefix);

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&serde_json::json!({
            "username": username,
            "firstname": "Test",
            "lastname": "User",
            "password": "pw1"
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({ "username": username, "password": "pw1" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

    let body: serde_json::Value = res.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();
    let user_id = body["id"].as_str().context("missing id")?.to_string();

    Ok(Session { token, user_id, username })
}

/// Create a log for the session and return its assigned id.
pub async fn create_log(
    server: &TestServer,
    client: &reqwest::Client,
    session: &Session,
    entry: &str,
    habits: &[&str],
) -> Result<String> {
    let res = client
        .post(format!("{}/api/logs/create", server.base_url))
        .bearer_auth(&session.token)
        .json(&serde_json::json!({ "entry": entry, "habits": habits }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "log create failed: {}", res.status());

    let body: serde_json::Value = res.json().await?;
    Ok(body["inserted_id"].as_str().context("missing inserted_id")?.to_string())
}

/// Create a habit for the session and return its assigned id.
pub async fn create_habit(
    server: &TestServer,
    client: &reqwest::Client,
    session: &Session,
    name: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/api/habits/create", server.base_url))
        .bearer_auth(&session.token)
        .json(&serde_json::json!({ "name": name, "description": "" }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "habit create failed: {}", res.status());

    let body: serde_json::Value = res.json().await?;
    Ok(body["inserted_id"].as_str().context("missing inserted_id")?.to_string())
}
