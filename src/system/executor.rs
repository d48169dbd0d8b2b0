//! racadm subprocess executor.
//! Locates the racadm binary and runs one remote query under a timeout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::types::Credentials;
use crate::error::ProbeError;
use crate::system::command::ReportCommand;

/// Resolve `binary` to an existing file.
/// Names containing a path separator are checked as-is; bare names are
/// searched for in every `PATH` entry.
pub fn find_binary(binary: &str) -> Option<PathBuf> {
    if binary.is_empty() {
        return None;
    }

    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|path| path.is_file())
}

/// Build `racadm -r <host> -u <user> -p <password> <command>`.
pub fn build_racadm_command(
    binary: &str,
    host: &str,
    credentials: &Credentials,
    command: ReportCommand,
) -> std::process::Command {
    let mut cmd = std::process::Command::new(binary);
    cmd.args(["-r", host, "-u", &credentials.username, "-p", &credentials.password]);
    cmd.arg(command.as_str());
    cmd
}

/// Run a prepared command and return its stdout.
///
/// A non-zero exit is a `QueryFailure` carrying stderr (or the exit status when
/// stderr is empty). Exceeding `timeout` kills the child and is a `QueryTimeout`.
pub async fn run_racadm(cmd: std::process::Command, timeout: Duration) -> Result<String, ProbeError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let mut cmd = tokio::process::Command::from(cmd);
    cmd.kill_on_drop(true);

    trace!("Executing: {} (timeout {:?})", program, timeout);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(result) => result
            .map_err(|e| ProbeError::QueryFailure(format!("failed to execute {}: {}", program, e)))?,
        Err(_) => {
            debug!("{} timed out after {:?}", program, timeout);
            return Err(ProbeError::QueryTimeout(timeout.as_secs()));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("{} exited with {}", program, output.status)
        } else {
            stderr
        };
        return Err(ProbeError::QueryFailure(detail));
    }

    debug!("{} returned {} bytes", program, output.stdout.len());
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            username: "root".to_string(),
            password: "calvin".to_string(),
        }
    }

    #[test]
    fn test_build_racadm_command_argument_order() {
        let cmd = build_racadm_command("racadm", "10.0.0.5", &credentials(), ReportCommand::GetSensorInfo);
        let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();

        assert_eq!(cmd.get_program(), "racadm");
        assert_eq!(args, ["-r", "10.0.0.5", "-u", "root", "-p", "calvin", "getsensorinfo"]);
    }

    #[test]
    fn test_find_binary_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let racadm = dir.path().join("racadm");
        std::fs::write(&racadm, "#!/bin/sh\n").unwrap();

        assert_eq!(find_binary(racadm.to_str().unwrap()), Some(racadm.clone()));
        assert_eq!(find_binary(dir.path().join("missing").to_str().unwrap()), None);
        // A directory is not a binary
        assert_eq!(find_binary(dir.path().to_str().unwrap()), None);
    }

    #[test]
    fn test_find_binary_rejects_unknown_names() {
        assert_eq!(find_binary(""), None);
        assert_eq!(find_binary("racadm-definitely-not-installed-here"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_racadm_returns_stdout() {
        let mut cmd = std::process::Command::new("sh");
        cmd.args(["-c", "printf 'Sensor Type : FAN\\r\\n'"]);

        let output = run_racadm(cmd, Duration::from_secs(10)).await.unwrap();
        assert_eq!(output, "Sensor Type : FAN\r\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_racadm_failure_carries_stderr() {
        let mut cmd = std::process::Command::new("sh");
        cmd.args(["-c", "echo 'ERROR: Unable to connect to RAC' >&2; exit 1"]);

        match run_racadm(cmd, Duration::from_secs(10)).await {
            Err(ProbeError::QueryFailure(detail)) => assert_eq!(detail, "ERROR: Unable to connect to RAC"),
            other => panic!("expected QueryFailure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_racadm_failure_without_stderr() {
        let mut cmd = std::process::Command::new("sh");
        cmd.args(["-c", "exit 3"]);

        match run_racadm(cmd, Duration::from_secs(10)).await {
            Err(ProbeError::QueryFailure(detail)) => assert!(detail.contains("exited with")),
            other => panic!("expected QueryFailure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_racadm_times_out() {
        let mut cmd = std::process::Command::new("sh");
        cmd.args(["-c", "sleep 5"]);

        let result = run_racadm(cmd, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(ProbeError::QueryTimeout(_))));
    }

    #[tokio::test]
    async fn test_run_racadm_missing_program() {
        let cmd = std::process::Command::new("racadm-definitely-not-installed-here");
        let result = run_racadm(cmd, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ProbeError::QueryFailure(_))));
    }
}
