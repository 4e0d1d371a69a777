//! Exit status of an external tool (checker or generator)

use std::process::ExitStatus;

/// How an external tool finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Success,
    /// Non-zero exit; `None` when killed by a signal
    Failed { exit_code: Option<i32> },
}

impl ToolStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Success)
    }

    /// Exit code to hand back to make. Signal deaths map to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolStatus::Success => 0,
            ToolStatus::Failed { exit_code } => match exit_code {
                Some(0) | None => 1,
                Some(code) => *code,
            },
        }
    }
}

impl From<ExitStatus> for ToolStatus {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            ToolStatus::Success
        } else {
            ToolStatus::Failed {
                exit_code: status.code(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_exit_code_passes_through() {
        let status = ToolStatus::Failed { exit_code: Some(3) };
        assert_eq!(status.exit_code(), 3);
        assert!(!status.is_success());
    }

    #[test]
    fn signal_death_maps_to_one() {
        let status = ToolStatus::Failed { exit_code: None };
        assert_eq!(status.exit_code(), 1);
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(ToolStatus::Success.exit_code(), 0);
    }
}
