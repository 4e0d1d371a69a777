//! Make-include dependency record repository
//!
//! Implements the RecordRepository port using the `.d` file syntax that
//! make can `-include` directly:
//!
//! ```text
//! # generated by stampcheck; do not edit
//! build/.App.py.stamp: App.py MainWindow.py
//!
//! App.py:
//! MainWindow.py:
//! ```
//!
//! Every prerequisite also gets an empty rule (as `gcc -MP` does) so make
//! does not stop with "No rule to make target" once a dependency is
//! deleted. Empty rules are dropped again on load.

use std::path::Path;

use crate::domain::entities::DependencyRecord;
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::ports::record_repository::{RecordError, RecordRepository, RecordResult};
use crate::infrastructure::fs::LocalFs;

/// First line of every rendered record
pub const HEADER: &str = "# generated by stampcheck; do not edit";

/// Rendered rule lines wrap before this column
const WRAP_COLUMN: usize = 78;

/// Dependency records stored as make includes
pub struct MakeDepfileRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl MakeDepfileRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for MakeDepfileRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> MakeDepfileRepository<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> RecordRepository for MakeDepfileRepository<F> {
    fn load(&self, path: &Path) -> RecordResult<DependencyRecord> {
        let content = match self.fs.read(path) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => return Err(RecordError::NotFound),
            Err(e) => return Err(RecordError::Io(e.to_string())),
        };
        parse_depfile(&content).map_err(RecordError::Parse)
    }

    fn save(&self, record: &DependencyRecord, path: &Path) -> RecordResult<()> {
        self.fs
            .write_atomic(path, &render_depfile(record))
            .map_err(|e| RecordError::Io(e.to_string()))
    }
}

/// Parse make-include text into a record.
///
/// Errors carry a 1-based line number and mirror make's own complaints.
pub fn parse_depfile(content: &str) -> Result<DependencyRecord, String> {
    let mut record = DependencyRecord::new();

    for (line_no, line) in logical_lines(content) {
        let Some((targets, prerequisites)) =
            parse_rule(&line).map_err(|msg| format!("line {}: {}", line_no, msg))?
        else {
            continue;
        };
        if prerequisites.is_empty() {
            continue;
        }
        for target in &targets {
            record.add_prerequisites(Path::new(target), &prerequisites);
        }
    }

    Ok(record)
}

/// Render a record as make-include text
pub fn render_depfile(record: &DependencyRecord) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    for (stamp, deps) in record.rules() {
        let head = format!("{}:", escape(stamp));
        let mut width = head.len();
        out.push_str(&head);
        for (i, dep) in deps.iter().enumerate() {
            let word = escape(dep);
            if i > 0 && width + 1 + word.len() > WRAP_COLUMN {
                out.push_str(" \\\n ");
                width = 1;
            }
            out.push(' ');
            out.push_str(&word);
            width += 1 + word.len();
        }
        out.push('\n');
    }

    let phony: Vec<_> = record
        .all_prerequisites()
        .into_iter()
        .filter(|p| record.dependencies_of(p).is_none())
        .collect();
    if !phony.is_empty() {
        out.push('\n');
        for path in phony {
            out.push_str(&escape(path));
            out.push_str(":\n");
        }
    }

    out
}

/// Join backslash-continued physical lines
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        // An odd run of trailing backslashes continues the line; an even
        // run is a sequence of escaped backslashes.
        let trailing = raw.chars().rev().take_while(|&c| c == '\\').count();
        let (continued, body) = match trailing % 2 {
            1 => (true, &raw[..raw.len() - 1]),
            _ => (false, raw),
        };
        let (start, mut joined) = pending.take().unwrap_or((idx + 1, String::new()));
        joined.push_str(body);
        if continued {
            joined.push(' ');
            pending = Some((start, joined));
        } else {
            lines.push((start, joined));
        }
    }
    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

type Rule = (Vec<String>, Vec<String>);

/// Split one logical line into targets and prerequisites.
///
/// `Ok(None)` for blank and comment-only lines. The separator is the first
/// `:` followed by whitespace or end of line, so `C:\src\App.py` stays one
/// word.
fn parse_rule(line: &str) -> Result<Option<Rule>, String> {
    let mut targets = Vec::new();
    let mut prerequisites = Vec::new();
    let mut seen_separator = false;
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    fn flush(
        word: &mut String,
        seen_separator: bool,
        targets: &mut Vec<String>,
        prereqs: &mut Vec<String>,
    ) {
        if word.is_empty() {
            return;
        }
        let done = std::mem::take(word);
        if seen_separator {
            prereqs.push(done);
        } else {
            targets.push(done);
        }
    }

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut run = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    run += 1;
                }
                match chars.peek() {
                    Some(&next @ (' ' | '\t' | '#' | ':')) => {
                        push_backslashes(&mut word, run / 2);
                        if run % 2 == 1 {
                            chars.next();
                            word.push(next);
                        }
                    }
                    None => push_backslashes(&mut word, run / 2),
                    Some(_) => push_backslashes(&mut word, run),
                }
            }
            '$' => {
                if chars.peek() == Some(&'$') {
                    chars.next();
                }
                word.push('$');
            }
            '#' => break,
            ':' if !seen_separator && chars.peek().map_or(true, |n| n.is_whitespace()) => {
                flush(&mut word, seen_separator, &mut targets, &mut prerequisites);
                seen_separator = true;
            }
            c if c.is_whitespace() => {
                flush(&mut word, seen_separator, &mut targets, &mut prerequisites);
            }
            other => word.push(other),
        }
    }
    flush(&mut word, seen_separator, &mut targets, &mut prerequisites);

    if !seen_separator {
        if targets.is_empty() {
            return Ok(None);
        }
        return Err("missing separator".to_string());
    }
    if targets.is_empty() {
        return Err("rule without target".to_string());
    }
    Ok(Some((targets, prerequisites)))
}

/// Escape a path for use as a make word
fn escape(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let raw = if cfg!(windows) {
        raw.replace('\\', "/")
    } else {
        raw.into_owned()
    };

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut run = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    run += 1;
                }
                // Backslashes before a special character or the end of the
                // word would be read as an escape or a continuation.
                let doubled = matches!(
                    chars.peek().copied(),
                    None | Some(' ' | '\t' | '#' | ':')
                );
                push_backslashes(&mut out, if doubled { run * 2 } else { run });
            }
            ' ' => out.push_str("\\ "),
            '\t' => out.push_str("\\\t"),
            '#' => out.push_str("\\#"),
            ':' => out.push_str("\\:"),
            '$' => out.push_str("$$"),
            other => out.push(other),
        }
    }
    out
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\\').take(count));
}
