//! Common helpers for watchrun binary tests.
//!
//! - `Workspace`: temp directory with an isolated config home
//! - `Running`: a spawned watchrun whose stderr events can be awaited

#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Base command with cwd and config home pointed into the workspace
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_watchrun"));
        cmd.args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.path(".config"))
            .env_remove("WATCHRUN_MAX_TARGETS")
            .env_remove("WATCHRUN_RESTART")
            .env_remove("WATCHRUN_CLEAR")
            .env_remove("WATCHRUN_POSTPONE")
            .env_remove("WATCHRUN_VERBOSITY")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run to completion with `stdin` as the path list
    pub fn run(&self, args: &[&str], stdin: &str) -> Output {
        self.run_with_env(args, stdin, &[])
    }

    pub fn run_with_env(&self, args: &[&str], stdin: &str, env: &[(&str, &str)]) -> Output {
        let mut cmd = self.command(args);
        cmd.envs(env.iter().copied());
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start watchrun");
        write_stdin(&mut child, stdin);
        child.wait_with_output().expect("failed to wait for watchrun")
    }

    /// Start watchrun in the background, collecting stderr line by line
    pub fn spawn(&self, args: &[&str], stdin: &str) -> Running {
        self.spawn_with_env(args, stdin, &[])
    }

    pub fn spawn_with_env(&self, args: &[&str], stdin: &str, env: &[(&str, &str)]) -> Running {
        let mut cmd = self.command(args);
        cmd.envs(env.iter().copied());
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start watchrun");
        write_stdin(&mut child, stdin);

        let stderr = child.stderr.take().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Running {
            child,
            lines: rx,
            seen: Vec::new(),
        }
    }
}

fn write_stdin(child: &mut Child, stdin: &str) {
    // dropping the pipe closes stdin
    let mut pipe = child.stdin.take().unwrap();
    let _ = pipe.write_all(stdin.as_bytes());
}

pub fn path_list(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}

pub struct Running {
    child: Child,
    lines: Receiver<String>,
    pub seen: Vec<String>,
}

impl Running {
    /// Wait for the next NDJSON event named `name`, recording every line seen
    pub fn expect_event(&mut self, name: &str) -> serde_json::Value {
        let deadline = Instant::now() + EVENT_TIMEOUT;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = match self.lines.recv_timeout(remaining) {
                Ok(line) => line,
                Err(_) => panic!(
                    "timed out waiting for '{name}'; saw:\n{}",
                    self.seen.join("\n")
                ),
            };
            self.seen.push(line.clone());
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&line) {
                if value["event"] == name {
                    return value;
                }
            }
        }
    }

    /// Wait for the process to exit on its own
    pub fn wait_exit(&mut self) -> ExitStatus {
        let deadline = Instant::now() + EVENT_TIMEOUT;
        loop {
            if let Some(status) = self.child.try_wait().unwrap() {
                while let Ok(line) = self.lines.recv_timeout(Duration::from_millis(200)) {
                    self.seen.push(line);
                }
                return status;
            }
            if Instant::now() > deadline {
                let _ = self.child.kill();
                panic!("watchrun did not exit; saw:\n{}", self.seen.join("\n"));
            }
            thread::sleep(Duration::from_millis(20));
        }
    }

    pub fn saw_event(&self, name: &str) -> bool {
        let needle = format!("\"event\":\"{name}\"");
        self.seen.iter().any(|line| line.contains(&needle))
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
