//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated data directory per test plus helpers that run the
//! binary to set up accounts, rooms and reservations.

use assert_cmd::Command;
use std::path::PathBuf;
use std::process::Output;
use tempfile::TempDir;

/// Monday far enough ahead that bookings never start in the past.
pub const MONDAY: &str = "2099-03-09";
/// The day after [`MONDAY`].
#[allow(dead_code)]
pub const TUESDAY: &str = "2099-03-10";

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the roomres data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("roomres-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no flags and a scrubbed environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roomres").expect("Failed to find roomres binary");
        cmd.current_dir(&self.temp_path);
        for var in [
            "ROOMRES_DATA_DIR",
            "ROOMRES_TOKEN",
            "ROOMRES_BUSY_TIMEOUT",
            "ROOMRES_DISABLE_AUTOINIT",
            "ROOMRES_OUTPUT_FORMAT",
            "ROOMRES_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command run as the holder of `token`.
    pub fn as_user(&self, token: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("--token").arg(token);
        cmd
    }

    /// Runs `init` with an administrator and returns the admin's token.
    pub fn init_with_admin(&self) -> String {
        let output = self
            .command()
            .args(["init", "--admin-name", "Registrar", "--admin-email", "registrar@example.edu"])
            .output()
            .expect("Failed to run init");
        assert_success(&output, "init");

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout
            .lines()
            .find_map(|line| line.trim().strip_prefix("- Access token: "))
            .expect("init did not print a token")
            .to_string()
    }

    /// Creates an account and returns its token.
    pub fn add_user(&self, admin: &str, name: &str, email: &str, role: &str) -> String {
        let output = self
            .as_user(admin)
            .args(["user", "add", "--name", name, "--email", email, "--role", role])
            .output()
            .expect("Failed to run user add");
        assert_success(&output, "user add");
        stdout_line(output)
    }

    /// Adds a classroom in the Main building and returns its id.
    pub fn add_room(&self, admin: &str, number: &str) -> String {
        let output = self
            .as_user(admin)
            .args(["room", "add", "--number", number, "--building", "Main", "--capacity", "40"])
            .output()
            .expect("Failed to run room add");
        assert_success(&output, "room add");
        stdout_line(output)
    }

    /// Runs `reserve` and returns the raw output.
    pub fn try_reserve(
        &self,
        token: &str,
        room: &str,
        date: &str,
        start: &str,
        end: &str,
        purpose: &str,
    ) -> Output {
        self.as_user(token)
            .args([
                "reserve", "--room", room, "--date", date, "--start", start, "--end", end,
                "--purpose", purpose,
            ])
            .output()
            .expect("Failed to run reserve")
    }

    /// Reserves and returns the new reservation id.
    pub fn reserve(
        &self,
        token: &str,
        room: &str,
        date: &str,
        start: &str,
        end: &str,
        purpose: &str,
    ) -> String {
        let output = self.try_reserve(token, room, date, start, end, purpose);
        assert_success(&output, "reserve");
        stdout_line(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A ready environment: admin, one student, one instructor, one room.
#[allow(dead_code)]
pub struct Department {
    pub env: TestEnv,
    pub admin: String,
    pub student: String,
    pub instructor: String,
    pub room: String,
}

#[allow(dead_code)]
impl Department {
    pub fn new() -> Self {
        let env = TestEnv::new();
        let admin = env.init_with_admin();
        let student = env.add_user(&admin, "Ada Lovelace", "ada@example.edu", "student");
        let instructor = env.add_user(&admin, "Grace Hopper", "grace@example.edu", "instructor");
        let room = env.add_room(&admin, "10");
        Self {
            env,
            admin,
            student,
            instructor,
            room,
        }
    }
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn stdout_line(output: Output) -> String {
    String::from_utf8(output.stdout)
        .expect("Invalid UTF-8 in output")
        .trim()
        .to_string()
}
