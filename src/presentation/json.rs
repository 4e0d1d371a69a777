//! JSON Event Writer
//!
//! Outputs command events as NDJSON for CI/automation consumption.
//! Every command emits `start`, one domain event, then `complete`.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use crate::application::{CheckReport, GenerateReport};
use crate::domain::entities::CheckUnit;
use crate::domain::services::Freshness;

/// NDJSON writer for one command
pub struct JsonEventWriter<W: Write = io::Stdout> {
    writer: W,
    command: &'static str,
}

impl JsonEventWriter<io::Stdout> {
    /// Create a JSON event writer on stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(io::stdout(), command)
    }
}

impl<W: Write> JsonEventWriter<W> {
    /// Create a JSON event writer on a custom writer (for testing)
    pub fn with_writer(writer: W, command: &'static str) -> Self {
        Self { writer, command }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, event: serde_json::Value) {
        let _ = writeln!(self.writer, "{}", event);
        let _ = self.writer.flush();
    }

    pub fn start(&mut self) {
        let event = serde_json::json!({
            "event": "start",
            "command": self.command,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
        });
        self.emit(event);
    }

    pub fn check(&mut self, unit: &CheckUnit, report: &CheckReport) {
        let event = check_event(unit, report);
        self.emit(event);
    }

    pub fn status(&mut self, unit: &CheckUnit, freshness: &Freshness) {
        let event = status_event(unit, freshness);
        self.emit(event);
    }

    pub fn generate(&mut self, descriptor: &Path, output: &Path, report: &GenerateReport) {
        let event = serde_json::json!({
            "event": "generate",
            "command": self.command,
            "descriptor": descriptor.display().to_string(),
            "output": output.display().to_string(),
            "status": report.outcome.as_str(),
            "exit_code": report.outcome.exit_code(),
        });
        self.emit(event);
    }

    pub fn complete(&mut self, success: bool, exit_code: i32, duration: Duration) {
        let event = serde_json::json!({
            "event": "complete",
            "command": self.command,
            "success": success,
            "exit_code": exit_code,
            "duration_ms": duration.as_millis() as u64,
        });
        self.emit(event);
    }

    pub fn error(&mut self, message: &str) {
        let event = serde_json::json!({
            "event": "error",
            "command": self.command,
            "message": message,
        });
        self.emit(event);
    }
}

fn reason_fields(freshness: &Freshness) -> (serde_json::Value, serde_json::Value) {
    match freshness.reason() {
        Some(reason) => (
            serde_json::Value::from(reason.code()),
            serde_json::Value::from(reason.to_string()),
        ),
        None => (serde_json::Value::Null, serde_json::Value::Null),
    }
}

/// The `check` domain event
pub fn check_event(unit: &CheckUnit, report: &CheckReport) -> serde_json::Value {
    use crate::application::CheckOutcome;

    let (reason, detail) = reason_fields(&report.freshness);
    let mut event = serde_json::json!({
        "event": "check",
        "command": "check",
        "target": unit.target.display().to_string(),
        "stamp": unit.stamp.display().to_string(),
        "status": report.outcome.as_str(),
        "reason": reason,
        "detail": detail,
        "exit_code": report.exit_code(),
    });

    if let CheckOutcome::Passed {
        dependencies,
        stamped,
    } = &report.outcome
    {
        event["stamped"] = serde_json::Value::from(*stamped);
        event["dependencies"] = dependencies
            .iter()
            .map(|p| p.display().to_string())
            .collect();
    }
    event
}

/// The `status` domain event
pub fn status_event(unit: &CheckUnit, freshness: &Freshness) -> serde_json::Value {
    let (reason, detail) = reason_fields(freshness);
    serde_json::json!({
        "event": "status",
        "command": "status",
        "target": unit.target.display().to_string(),
        "stamp": unit.stamp.display().to_string(),
        "status": freshness.as_str(),
        "reason": reason,
        "detail": detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CheckOutcome;
    use crate::domain::services::StaleReason;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn unit() -> CheckUnit {
        CheckUnit::new("App.py", "build/.App.py.stamp", ".dep-py~")
    }

    fn lines(writer: JsonEventWriter<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn check_event_for_a_pass() {
        let report = CheckReport {
            freshness: Freshness::Stale(StaleReason::StampMissing),
            outcome: CheckOutcome::Passed {
                dependencies: BTreeSet::from([PathBuf::from("App.py")]),
                stamped: true,
            },
            duration: Duration::from_millis(5),
        };

        let event = check_event(&unit(), &report);

        assert_eq!(event["status"], "passed");
        assert_eq!(event["reason"], "stamp_missing");
        assert_eq!(event["stamped"], true);
        assert_eq!(event["dependencies"][0], "App.py");
    }

    #[test]
    fn check_event_for_up_to_date_has_null_reason() {
        let report = CheckReport {
            freshness: Freshness::Fresh,
            outcome: CheckOutcome::UpToDate,
            duration: Duration::ZERO,
        };

        let event = check_event(&unit(), &report);

        assert_eq!(event["status"], "up_to_date");
        assert!(event["reason"].is_null());
        assert!(event.get("dependencies").is_none());
    }

    #[test]
    fn status_event_reports_reason() {
        let event = status_event(
            &unit(),
            &Freshness::Stale(StaleReason::DependencyNewer(PathBuf::from("lib/util.py"))),
        );

        assert_eq!(event["status"], "stale");
        assert_eq!(event["reason"], "dependency_newer");
        assert!(event["detail"].as_str().unwrap().contains("lib/util.py"));
    }

    #[test]
    fn writer_emits_one_object_per_line() {
        let mut writer = JsonEventWriter::with_writer(Vec::new(), "status");
        writer.start();
        writer.status(&unit(), &Freshness::Fresh);
        writer.complete(true, 0, Duration::from_millis(3));

        let events = lines(writer);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["version"], env!("CARGO_PKG_VERSION"));
        let timestamp = events[0]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert_eq!(events[1]["event"], "status");
        assert_eq!(events[2]["event"], "complete");
        assert_eq!(events[2]["duration_ms"], 3);
    }

    #[test]
    fn error_event() {
        let mut writer = JsonEventWriter::with_writer(Vec::new(), "generate");
        writer.error("descriptor not found: Gone.ui");

        let events = lines(writer);
        assert_eq!(events[0]["event"], "error");
        assert_eq!(events[0]["command"], "generate");
    }
}
