//! Outcome reporting
//!
//! Maps an [`Outcome`] onto what the calling pipeline understands: a process
//! exit code and, on failure, a GitHub Actions `::error::` workflow command.

use std::process::ExitCode;

use jolt_core::domain::build::Outcome;
use tracing::{error, info};

/// Escapes a message for use as workflow command data
///
/// `%`, `\r` and `\n` would otherwise end or corrupt the command.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// The `::error::` line for a failed outcome, `None` on success
pub fn annotation(outcome: &Outcome) -> Option<String> {
    if outcome.succeeded {
        None
    } else {
        Some(format!("::error::{}", escape_data(&outcome.message)))
    }
}

/// Process exit status for an outcome: 0 on success, 1 on failure
pub fn exit_status(outcome: &Outcome) -> u8 {
    if outcome.succeeded { 0 } else { 1 }
}

/// Logs the outcome, prints the failure annotation and returns the exit code
pub fn report(outcome: &Outcome) -> ExitCode {
    match annotation(outcome) {
        None => info!(build_url = ?outcome.build_url, "{}", outcome.message),
        Some(line) => {
            error!(build_url = ?outcome.build_url, "{}", outcome.message);
            println!("{}", line);
        }
    }

    ExitCode::from(exit_status(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_annotation() {
        let outcome = Outcome::succeeded("Build started", Some("http://h/job/x/5/".to_string()));
        assert_eq!(annotation(&outcome), None);
        assert_eq!(exit_status(&outcome), 0);
    }

    #[test]
    fn test_failure_annotation() {
        let outcome = Outcome::failed_build(
            "Unsuccessful job state: http://h/job/x/5/",
            "http://h/job/x/5/",
        );
        assert_eq!(
            annotation(&outcome).as_deref(),
            Some("::error::Unsuccessful job state: http://h/job/x/5/")
        );
        assert_eq!(exit_status(&outcome), 1);
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("100% done\r\nnext"), "100%25 done%0D%0Anext");
    }
}
