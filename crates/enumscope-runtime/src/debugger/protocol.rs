//! Debugger protocol types.
//!
//! `Variable` is what the inspection layer hands to any client. The MI
//! helpers parse the small subset of GDB/MI commands the inspection session
//! answers and render result records with C-string escaping.

use serde::{Deserialize, Serialize};

// ── Variable ─────────────────────────────────────────────────────────────────

/// A named value as reported to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    /// Formatted value, placed verbatim in protocol replies.
    pub value: String,
    pub type_name: String,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            type_name: type_name.into(),
        }
    }
}

// ── VarObject ────────────────────────────────────────────────────────────────

/// A variable object created by `-var-create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarObject {
    /// Generated object name (`var1`, `var2`, ...).
    pub name: String,
    /// Expression the object was created for.
    pub expression: String,
    pub value: String,
    pub type_name: String,
}

impl VarObject {
    /// The `^done` record answering `-var-create`.
    pub fn to_record(&self) -> MiRecord {
        MiRecord::Done(vec![
            ("name".to_string(), self.name.clone()),
            ("exp".to_string(), self.expression.clone()),
            ("numchild".to_string(), "0".to_string()),
            ("value".to_string(), self.value.clone()),
            ("type".to_string(), self.type_name.clone()),
        ])
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

/// MI commands understood by the inspection session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiCommand {
    /// `-var-create <name> <frame> <expression>`
    VarCreate { expression: String },
    /// `-gdb-exit`
    GdbExit,
    /// Anything else, kept verbatim for the error reply.
    Unknown(String),
}

/// A parsed request line: optional numeric token plus command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiRequest {
    pub token: Option<String>,
    pub command: MiCommand,
}

/// Parse one MI input line.
pub fn parse_mi_command(line: &str) -> MiRequest {
    let line = line.trim();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    let token = (digits > 0).then(|| line[..digits].to_string());
    let rest = &line[digits..];

    let (operation, args) = match rest.split_once(char::is_whitespace) {
        Some((op, args)) => (op, args.trim_start()),
        None => (rest, ""),
    };

    let command = match operation {
        "-gdb-exit" => MiCommand::GdbExit,
        "-var-create" => match parse_var_create_args(args) {
            Some(expression) => MiCommand::VarCreate { expression },
            None => MiCommand::Unknown(rest.to_string()),
        },
        _ => MiCommand::Unknown(rest.to_string()),
    };

    MiRequest { token, command }
}

/// `<name> <frame> <expression>`; the expression may be a quoted C string.
fn parse_var_create_args(args: &str) -> Option<String> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let _name = parts.next().filter(|s| !s.is_empty())?;
    let _frame = parts.next().filter(|s| !s.is_empty())?;
    let expression = parts.next()?.trim();
    if expression.is_empty() {
        return None;
    }
    match expression.strip_prefix('"') {
        Some(quoted) => unescape_c_string(quoted.strip_suffix('"')?),
        None => Some(expression.to_string()),
    }
}

fn unescape_c_string(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            other => out.push(other),
        }
    }
    Some(out)
}

// ── Records ──────────────────────────────────────────────────────────────────

/// An MI result record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiRecord {
    /// `^done` with `key="value"` results in order.
    Done(Vec<(String, String)>),
    /// `^error,msg="..."`
    Error(String),
    /// `^exit`
    Exit,
}

impl MiRecord {
    /// Render the record, prefixed with the request token if any.
    pub fn render(&self, token: Option<&str>) -> String {
        let mut out = token.unwrap_or_default().to_string();
        match self {
            MiRecord::Done(results) => {
                out.push_str("^done");
                for (key, value) in results {
                    out.push(',');
                    out.push_str(key);
                    out.push('=');
                    out.push_str(&quote_c_string(value));
                }
            }
            MiRecord::Error(msg) => {
                out.push_str("^error,msg=");
                out.push_str(&quote_c_string(msg));
            }
            MiRecord::Exit => out.push_str("^exit"),
        }
        out
    }
}

/// Quote `s` as an MI C string.
pub fn quote_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
