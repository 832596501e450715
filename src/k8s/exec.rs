//! Running the minikube binary

use std::cell::RefCell;
use std::ffi::OsString;
use std::process::Command;

use super::minikube::MinikubeError;

/// Executes minikube with an explicit environment.
///
/// Implementations return the combined stdout/stderr text on success.
pub trait MinikubeExec {
    fn run(&self, env: &[(OsString, OsString)], args: &[String]) -> Result<String, MinikubeError>;
}

/// Runs the real binary as a blocking subprocess
#[derive(Debug, Clone)]
pub struct SystemExec {
    binary: String,
}

impl SystemExec {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SystemExec {
    fn default() -> Self {
        Self::new("minikube")
    }
}

impl MinikubeExec for SystemExec {
    fn run(&self, env: &[(OsString, OsString)], args: &[String]) -> Result<String, MinikubeError> {
        let command = render_command(&self.binary, args);
        tracing::debug!("Running: {}", command);

        let output = Command::new(&self.binary)
            .env_clear()
            .envs(env.iter().map(|(k, v)| (k, v)))
            .args(args)
            .output()
            .map_err(|source| MinikubeError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        tracing::trace!("Ran: {} Output: {}", command, combined);

        if !output.status.success() {
            return Err(MinikubeError::CommandFailed {
                command,
                reason: output.status.to_string(),
                output: combined,
            });
        }

        Ok(combined)
    }
}

/// Reports each command instead of running it
#[derive(Debug)]
pub struct DryRunExec {
    binary: String,
    actions: RefCell<Vec<String>>,
}

impl DryRunExec {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            actions: RefCell::new(Vec::new()),
        }
    }

    /// Commands that would have been run, in order
    pub fn actions(&self) -> Vec<String> {
        self.actions.borrow().clone()
    }
}

impl MinikubeExec for DryRunExec {
    fn run(&self, _env: &[(OsString, OsString)], args: &[String]) -> Result<String, MinikubeError> {
        let command = render_command(&self.binary, args);
        crate::log_info!("[DRY RUN] {}", command);
        self.actions.borrow_mut().push(command);
        Ok(String::new())
    }
}

fn render_command(binary: &str, args: &[String]) -> String {
    if args.is_empty() {
        binary.to_string()
    } else {
        format!("{} {}", binary, shell_words::join(args))
    }
}
