use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::JqError;

/// Environment variable overriding the jq executable
const JQ_BIN_ENV: &str = "BIKESTATS_JQ";

fn jq_program() -> String {
    std::env::var(JQ_BIN_ENV).unwrap_or_else(|_| "jq".to_string())
}

/// Pipe JSON through jq with the given filter expression
pub(crate) fn filter_json(json: &str, filter: &str) -> Result<String, JqError> {
    run_jq(&jq_program(), json, filter)
}

fn run_jq(program: &str, json: &str, filter: &str) -> Result<String, JqError> {
    let mut child = Command::new(program)
        .arg(filter)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => JqError::NotFound,
            _ => JqError::Spawn(e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(json.as_bytes()).map_err(JqError::Stdin)?;
    }

    let output = child.wait_with_output().map_err(JqError::Wait)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(JqError::Filter(stderr.trim().to_string()));
    }
    String::from_utf8(output.stdout).map_err(JqError::Utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_not_found() {
        let err = run_jq("bikestats-no-such-jq-binary", "{}", ".").unwrap_err();
        assert!(matches!(err, JqError::NotFound));
    }
}
