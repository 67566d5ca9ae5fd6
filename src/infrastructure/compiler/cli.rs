//! External mjml CLI discovery and invocation.

use crate::domain::error::MjtError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Well-known install locations, probed before the PATH scan.
const ABSOLUTE_CANDIDATES: &[&str] = &["/usr/bin/mjml", "/usr/local/bin/mjml", "/bin/mjml"];

const CLI_NAME: &str = "mjml";

/// Hard wall-clock bound on one CLI invocation. The process is killed when
/// it expires.
const CLI_TIMEOUT: Duration = Duration::from_secs(30);

/// Locate the mjml executable: explicit override first, then the absolute
/// candidates, then a PATH lookup by name.
pub fn find_cli(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        if is_executable(path) {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "configured mjml cli_path is not executable, falling back to discovery");
    }

    for candidate in ABSOLUTE_CANDIDATES {
        let candidate = Path::new(candidate);
        if is_executable(candidate) {
            return Some(candidate.to_path_buf());
        }
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(CLI_NAME);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }

    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.is_file()
        && std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Compile through the mjml CLI using scoped temp files.
///
/// Success requires the process to finish within the timeout and the
/// output file to be non-empty; the exit status alone is not trusted.
/// Both temp files are owned by this call and removed on every exit path,
/// including the timeout (the child is killed when its future is dropped).
pub async fn compile_via_cli(
    cli: &Path,
    mjml: &str,
    tmp_dir: Option<&Path>,
) -> Result<String, MjtError> {
    let tmp_dir = tmp_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir);

    let input = named_temp(&tmp_dir, "mjml_in_", ".mjml")?;
    let output = named_temp(&tmp_dir, "mjml_out_", ".html")?;

    tokio::fs::write(input.path(), mjml).await?;

    debug!(
        cli = %cli.display(),
        input = %input.path().display(),
        output = %output.path().display(),
        "invoking mjml CLI"
    );

    let child = Command::new(cli)
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| MjtError::CliCompile(format!("failed to spawn {}: {}", cli.display(), e)))?;

    let captured = match timeout(CLI_TIMEOUT, child.wait_with_output()).await {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => {
            return Err(MjtError::CliCompile(format!(
                "failed to wait for mjml CLI: {}",
                e
            )))
        }
        // Dropping the cancelled future kills the child.
        Err(_) => {
            return Err(MjtError::CliCompile(format!(
                "mjml CLI timed out after {}s",
                CLI_TIMEOUT.as_secs()
            )))
        }
    };

    let html = tokio::fs::read_to_string(output.path())
        .await
        .unwrap_or_default();

    if html.is_empty() {
        let stderr = String::from_utf8_lossy(&captured.stderr);
        let stdout = String::from_utf8_lossy(&captured.stdout);
        let detail = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Unknown MJML CLI error")
            .to_string();
        return Err(MjtError::CliCompile(detail));
    }

    Ok(html)
}

fn named_temp(dir: &Path, prefix: &str, suffix: &str) -> Result<NamedTempFile, MjtError> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| MjtError::TempResource(format!("unable to create temp file: {}", e)))
}
