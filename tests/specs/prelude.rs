//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing buildprobe CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the buildprobe binary
pub fn buildprobe_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("buildprobe"));
    cmd.env_remove("BUILDPROBE_CONFIG");
    cmd.env_remove("BUILDPROBE_LOG");
    cmd
}

/// Create a builder for `buildprobe run`
pub fn run() -> ProbeBuilder {
    ProbeBuilder::new("run")
}

/// Create a builder for `buildprobe detect`
pub fn detect() -> ProbeBuilder {
    ProbeBuilder::new("detect")
}

/// Fluent builder around a buildprobe subcommand
pub struct ProbeBuilder {
    subcommand: &'static str,
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl ProbeBuilder {
    fn new(subcommand: &'static str) -> Self {
        Self {
            subcommand,
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Set the working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.envs.push((key.to_string(), value.into()));
        self
    }

    /// Prepend a directory of fake tools to PATH
    pub fn tools(self, bin: &Path) -> Self {
        let path = std::env::var("PATH").unwrap_or_default();
        self.env("PATH", format!("{}:{}", bin.display(), path))
    }

    fn command(&self) -> Command {
        let mut cmd = buildprobe_cmd();
        cmd.arg(self.subcommand);
        cmd.args(&self.args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and assert exit code 0
    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    /// Run and assert exit code 1 (install or build failed)
    pub fn fails(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    /// Run and assert a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }

    /// Run with `-o json` and parse stdout, whatever the exit code
    pub fn json(mut self) -> serde_json::Value {
        self.args.extend(["-o".to_string(), "json".to_string()]);
        let output = self.command().output().expect("command should run");
        serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
            panic!(
                "invalid JSON ({e})\nstdout: {}\nstderr: {}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )
        })
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Captured output with fluent assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should not match:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Temporary project directory
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project marked as a git root, so config discovery
    /// never escapes the temp dir
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Create a project whose install and build steps are shell commands
    pub fn with_steps(install: &str, build: &str) -> Self {
        let temp = Self::empty();
        temp.config(&format!(
            "[probe]\ninstall = {}\nbuild = {}\n",
            toml_string(install),
            toml_string(build)
        ));
        temp
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write buildprobe.toml (version line added when missing)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("buildprobe.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Whether a file exists relative to the project root
    pub fn has(&self, path: impl AsRef<Path>) -> bool {
        self.dir.path().join(path).exists()
    }

    /// Read a file relative to the project root
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    /// Install a fake executable under `bin/` that appends its name and
    /// arguments to `calls.log`. It exits with `install_code` when its first
    /// argument is `install`, otherwise with `build_code`.
    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, install_code: i32, build_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join(name);
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"{name} $*\" >> calls.log\n\
                 case \"$1\" in install) exit {install_code};; esac\n\
                 exit {build_code}\n"
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        bin
    }
}

fn toml_string(s: &str) -> String {
    format!("'{}'", s)
}
