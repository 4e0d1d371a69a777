//! Python import statement extraction
//!
//! Not a Python parser: the source is split into logical statements
//! (brackets, backslash continuations and `;` honoured, strings and
//! comments blanked out) and only statements starting with `import` or
//! `from` are kept.

/// One import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `import a.b as c, d`
    Import(Vec<String>),
    /// `from ..pkg import x, y`; `level` counts the leading dots
    From {
        level: usize,
        module: Option<String>,
        names: Vec<String>,
    },
}

/// Extract every import statement from Python source
pub fn parse_imports(source: &str) -> Vec<ImportStatement> {
    logical_statements(source)
        .iter()
        .filter_map(|stmt| parse_statement(stmt))
        .collect()
}

fn logical_statements(source: &str) -> Vec<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '\'' | '"' => {
                i = skip_string(&chars, i);
                current.push_str("\"\"");
                continue;
            }
            '\\' if matches!(chars.get(i + 1), Some('\n')) => {
                current.push(' ');
                i += 2;
                continue;
            }
            '\\' if matches!(chars.get(i + 1), Some('\r')) && matches!(chars.get(i + 2), Some('\n')) => {
                current.push(' ');
                i += 3;
                continue;
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '\n' | ';' if depth == 0 => {
                statements.push(std::mem::take(&mut current));
            }
            '\n' | '\r' => current.push(' '),
            _ => current.push(c),
        }
        i += 1;
    }
    if !current.trim().is_empty() {
        statements.push(current);
    }
    statements
}

/// Index just past the string literal opening at `start`
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);
    let mut i = if triple { start + 3 } else { start + 1 };

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => {
                if !triple {
                    return i + 1;
                }
                if chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
                    return i + 3;
                }
                i += 1;
            }
            // unterminated single-quoted string ends at the line
            '\n' if !triple => return i,
            _ => i += 1,
        }
    }
    chars.len()
}

fn parse_statement(stmt: &str) -> Option<ImportStatement> {
    let stmt = stmt.trim();

    if let Some(rest) = strip_keyword(stmt, "import") {
        let modules: Vec<String> = rest
            .split(',')
            .filter_map(|part| part.split_whitespace().next())
            .filter(|m| is_dotted_name(m))
            .map(String::from)
            .collect();
        return (!modules.is_empty()).then_some(ImportStatement::Import(modules));
    }

    let rest = strip_keyword(stmt, "from")?.trim_start();
    let level = rest.chars().take_while(|&c| c == '.').count();
    let rest = rest[level..].trim_start();

    let (module, names_part) = match strip_keyword(rest, "import") {
        Some(after) => (None, after),
        None => {
            let (module, remainder) = rest.split_once(char::is_whitespace)?;
            if !is_dotted_name(module) {
                return None;
            }
            let after = strip_keyword(remainder.trim_start(), "import")?;
            (Some(module.to_string()), after)
        }
    };
    if level == 0 && module.is_none() {
        return None;
    }

    let names = names_part
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .filter(|n| *n == "*" || is_identifier(n))
        .map(String::from)
        .collect();

    Some(ImportStatement::From {
        level,
        module,
        names,
    })
}

/// `s` minus a leading keyword that is not the prefix of a longer name
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn is_dotted_name(s: &str) -> bool {
    s.split('.').all(is_identifier)
}
