#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use std::sync::Mutex;

use serde_json::json;
use tempfile::TempDir;
use userdex::{Batch, CollectionSource, FetchParams, Result, User};

/// Runs the userdex binary against an isolated root directory.
///
/// The API URL points at a closed local port so nothing leaves the machine.
pub struct UserdexTest {
    pub temp_dir: TempDir,
}

impl UserdexTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        UserdexTest { temp_dir }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_userdex"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("USERDEX_ROOT", self.temp_dir.path())
            .env("USERDEX_API_URL", "http://127.0.0.1:9/api")
            .env_remove("USERDEX_LOG")
            .output()
            .expect("Failed to execute userdex command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run `userdex browse`, feeding each line to stdin and then waiting
    /// for the paired pause before sending the next one.
    pub fn run_browse(&self, script: &[(&str, Duration)]) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_userdex"))
            .arg("browse")
            .current_dir(self.temp_dir.path())
            .env("USERDEX_ROOT", self.temp_dir.path())
            .env("USERDEX_API_URL", "http://127.0.0.1:9/api")
            .env_remove("USERDEX_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn userdex browse");

        {
            let mut stdin = child.stdin.take().expect("piped stdin");
            for (line, pause) in script {
                writeln!(stdin, "{line}").expect("Failed to write to stdin");
                stdin.flush().expect("Failed to flush stdin");
                std::thread::sleep(*pause);
            }
        }
        child
            .wait_with_output()
            .expect("Failed to wait for userdex browse")
    }

    pub fn state_file(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("state.json")
    }

    pub fn config_file(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }
}

/// A user as the API would send it, with only the fields the listing reads.
pub fn make_user(id: &str, first: &str, last: &str) -> User {
    serde_json::from_value(json!({
        "gender": "female",
        "name": {"title": "Ms", "first": first, "last": last},
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        "login": {"uuid": id, "username": format!("{}{}", first.to_lowercase(), last.len())},
        "nat": "GB"
    }))
    .expect("valid user json")
}

/// `count` users with ids `{prefix}0..{prefix}{count}`.
pub fn make_users(prefix: &str, count: usize) -> Vec<User> {
    (0..count)
        .map(|i| make_user(&format!("{prefix}{i}"), &format!("Person{i}"), &format!("Test{i}")))
        .collect()
}

/// Collection source that replays queued responses and records requests.
#[derive(Default)]
pub struct MockSource {
    responses: Mutex<Vec<Result<Batch>>>,
    requests: Mutex<Vec<FetchParams>>,
}

impl MockSource {
    pub fn new(responses: Vec<Result<Batch>>) -> Self {
        MockSource {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<FetchParams> {
        self.requests.lock().unwrap().clone()
    }
}

impl CollectionSource for MockSource {
    fn fetch_users(
        &self,
        params: &FetchParams,
    ) -> impl std::future::Future<Output = Result<Batch>> + Send {
        self.requests.lock().unwrap().push(params.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Batch::default()));
        async move { response }
    }
}
