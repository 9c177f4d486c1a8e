//! Process-level startup tests.
//!
//! These run the built `hello-gke` binary with a controlled environment and
//! check what an orchestrator sees: the port it listens on, its exit status
//! and its diagnostics.
//!
//! Run with: cargo test --test process_tests
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use reqwest::StatusCode;

const BINARY: &str = env!("CARGO_BIN_EXE_hello-gke");
const DEFAULT_PORT: u16 = 5000;
const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);
const EXIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Manages a spawned server process, killing it if a test bails out early
struct ServerProcess {
    process: Option<Child>,
}

impl ServerProcess {
    /// Spawn the binary with `PORT` set to `port`, or unset when `None`
    fn spawn(port: Option<&str>) -> Self {
        let mut command = Command::new(BINARY);
        command
            .env_remove("PORT")
            .env_remove("LOG_FORMAT")
            .env("RUST_LOG", "hello_gke=info")
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(port) = port {
            command.env("PORT", port);
        }

        let process = command.spawn().expect("Failed to start hello-gke");
        Self {
            process: Some(process),
        }
    }

    fn pid(&self) -> u32 {
        self.process.as_ref().expect("Process already reaped").id()
    }

    /// Wait for the server to accept connections on `port`
    fn wait_for_ready(&mut self, port: u16) {
        let deadline = Instant::now() + STARTUP_TIMEOUT;
        while Instant::now() < deadline {
            if TcpStream::connect((Ipv4Addr::LOCALHOST, port)).is_ok() {
                return;
            }
            if let Some(status) = self.try_wait() {
                panic!("Server exited with {} before listening on {}", status, port);
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        panic!(
            "Server did not listen on {} within {} seconds",
            port,
            STARTUP_TIMEOUT.as_secs()
        );
    }

    fn try_wait(&mut self) -> Option<ExitStatus> {
        self.process
            .as_mut()
            .and_then(|p| p.try_wait().expect("Failed to poll server process"))
    }

    /// Wait for the process to exit, returning its status and stderr
    fn wait_for_exit(mut self) -> (ExitStatus, String) {
        let deadline = Instant::now() + EXIT_TIMEOUT;
        while Instant::now() < deadline {
            if self.try_wait().is_some() {
                let process = self.process.take().expect("Process already reaped");
                let output = process
                    .wait_with_output()
                    .expect("Failed to collect server output");
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                return (output.status, stderr);
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        panic!(
            "Server did not exit within {} seconds",
            EXIT_TIMEOUT.as_secs()
        );
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        if let Some(ref mut process) = self.process {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}

/// A port nothing is listening on right now
fn free_port() -> u16 {
    TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .and_then(|l| l.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to find a free port")
}

fn port_is_free(port: u16) -> bool {
    TcpListener::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).is_ok()
}

async fn get_health(port: u16) -> reqwest::Response {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client");
    client
        .get(format!("http://127.0.0.1:{}/health", port))
        .send()
        .await
        .expect("Health request failed")
}

#[test]
fn test_non_numeric_port_exits_with_diagnostic() {
    let server = ServerProcess::spawn(Some("abc"));
    let (status, stderr) = server.wait_for_exit();

    assert!(!status.success(), "expected failure, got {}", status);
    assert!(stderr.contains("abc"), "stderr was: {}", stderr);
    assert!(stderr.contains("Invalid PORT value"), "stderr was: {}", stderr);
}

#[test]
fn test_occupied_port_exits_with_failure() {
    let occupied = TcpListener::bind((Ipv4Addr::UNSPECIFIED, 0)).unwrap();
    let port = occupied.local_addr().unwrap().port();

    let server = ServerProcess::spawn(Some(&port.to_string()));
    let (status, stderr) = server.wait_for_exit();

    assert!(!status.success(), "expected failure, got {}", status);
    assert!(stderr.contains("Failed to bind"), "stderr was: {}", stderr);
    drop(occupied);
}

#[tokio::test]
async fn test_port_override_serves_health() {
    let port = free_port();
    let mut server = ServerProcess::spawn(Some(&port.to_string()));
    server.wait_for_ready(port);

    let response = get_health(port).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"status":"healthy","service":"flask-app"}"#
    );
}

#[tokio::test]
async fn test_unset_port_serves_on_default() {
    if !port_is_free(DEFAULT_PORT) {
        eprintln!("[test] port {} in use, skipping", DEFAULT_PORT);
        return;
    }

    let mut server = ServerProcess::spawn(None);
    server.wait_for_ready(DEFAULT_PORT);

    let response = get_health(DEFAULT_PORT).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[cfg(unix)]
#[tokio::test]
async fn test_sigterm_exits_cleanly() {
    let port = free_port();
    let mut server = ServerProcess::spawn(Some(&port.to_string()));
    server.wait_for_ready(port);
    assert_eq!(get_health(port).await.status(), StatusCode::OK);

    let kill_status = Command::new("kill")
        .args(["-TERM", &server.pid().to_string()])
        .status()
        .expect("Failed to run kill");
    assert!(kill_status.success());

    let (status, stderr) = server.wait_for_exit();
    assert!(status.success(), "expected clean exit, got {}: {}", status, stderr);
    assert!(
        stderr.contains("initiating graceful shutdown"),
        "stderr was: {}",
        stderr
    );
}
