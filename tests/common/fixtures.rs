//! Test fixtures - reusable content for CLI tests

/// Fake checker: logs each target to `checker.log`, prints a line on
/// stdout, and exits with the code in `checker.exit` (default 0).
pub const FAKE_CHECKER: &str = r#"#!/bin/sh
echo "$1" >> checker.log
echo "checking $1"
code=0
if [ -f checker.exit ]; then code=$(cat checker.exit); fi
exit "$code"
"#;

/// Fake UI compiler: `fake-uic.sh <descriptor> <output>`; fails with the
/// code in `uic.exit` after writing a partial file.
pub const FAKE_UIC: &str = r#"#!/bin/sh
echo "$1" >> uic.log
if [ -f uic.exit ]; then
  echo "partial" > "$2"
  exit "$(cat uic.exit)"
fi
printf '# generated from %s\n' "$1" > "$2"
cat "$1" >> "$2"
"#;

/// Project config wiring the fake tools in
pub const PROJECT_CONFIG: &str = r#"
[check]
discovery = "imports"

[[check.commands]]
name = "fake-checker"
argv = ["sh", "fake-checker.sh", "{target}"]

[generate]
argv = ["sh", "fake-uic.sh", "{descriptor}", "{output}"]
"#;

pub const APP_PY: &str = "import sys\n\nfrom MainWindow import MainWindow\n";

pub const MAIN_WINDOW_PY: &str =
    "from PyQt5.QtWidgets import QMainWindow\nfrom widgets import table_model\n";

pub const TABLE_MODEL_PY: &str = "class TableModel:\n    pass\n";

pub const MAIN_WINDOW_UI: &str = "<ui version=\"4.0\"><class>MainWindow</class></ui>\n";
