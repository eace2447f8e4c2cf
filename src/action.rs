use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::fmt::Write as _;

pub const INSERT_ACTION: &str = "insert";
pub const REPEAT_ACTION: &str = "repeat";
/// Replays captured prose with a case template and a word separator.
pub const FORMATTED_INSERT_ACTION: &str = "user.insert_formatted_text";

pub const PROSE_CAPTURE: &str = "user.text";
pub const NUMBER_CAPTURE: &str = "number_small";
/// The repeat action counts extra repetitions, the spoken number counts all of them.
pub const REPEAT_CAPTURE_POSTFIX: &str = " - 1";

/// A typed slot standing in for a literal argument of an abstract command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub kind: String,
    /// 1-based ordinal among captures of the same kind in one chain
    pub instance: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub postfix: String,
}

impl Capture {
    pub fn new(kind: &str, instance: usize, postfix: &str) -> Self {
        Self { kind: kind.to_string(), instance, postfix: postfix.to_string() }
    }

    pub fn prose() -> Self {
        Self::new(PROSE_CAPTURE, 1, "")
    }

    pub fn repeat_count(instance: usize) -> Self {
        Self::new(NUMBER_CAPTURE, instance, REPEAT_CAPTURE_POSTFIX)
    }

    /// Marker used inside a command's spoken name, e.g. `<user.text>`.
    /// Later instances of the same kind carry their ordinal so each slot reads distinctly.
    pub fn placeholder(&self) -> String {
        if self.instance > 1 {
            format!("<{}_{}>", self.kind, self.instance)
        } else {
            format!("<{}>", self.kind)
        }
    }

    /// Name the command body uses to read the captured value.
    pub fn script_reference(&self) -> String {
        let short = self.kind.rsplit('.').next().unwrap_or(&self.kind);
        format!("{}_{}{}", short, self.instance, self.postfix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Text(String),
    /// Integer or float, kept exactly as logged
    Number(Number),
    Bool(bool),
    Capture(Capture),
    Null,
}

impl Argument {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Argument::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Argument::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    fn write_script(&self, out: &mut String) {
        match self {
            Argument::Text(s) => {
                out.push('"');
                for ch in s.chars() {
                    match ch {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\t' => out.push_str("\\t"),
                        c => out.push(c),
                    }
                }
                out.push('"');
            }
            Argument::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Argument::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Argument::Capture(c) => out.push_str(&c.script_reference()),
            Argument::Null => out.push_str("null"),
        }
    }

    fn write_fingerprint(&self, out: &mut String) {
        match self {
            Argument::Text(s) => {
                let _ = write!(out, "{s:?}");
            }
            Argument::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Argument::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Argument::Capture(c) => {
                let _ = write!(out, "<{:?}#{}|{:?}>", c.kind, c.instance, c.postfix);
            }
            Argument::Null => out.push_str("null"),
        }
    }
}

impl From<&str> for Argument {
    fn from(s: &str) -> Self {
        Argument::Text(s.to_string())
    }
}

impl From<String> for Argument {
    fn from(s: String) -> Self {
        Argument::Text(s)
    }
}

impl From<i64> for Argument {
    fn from(n: i64) -> Self {
        Argument::Number(n.into())
    }
}

impl From<Capture> for Argument {
    fn from(c: Capture) -> Self {
        Argument::Capture(c)
    }
}

/// One atomic executable unit recorded in the action log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionToken {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl ActionToken {
    pub fn new(name: &str, arguments: Vec<Argument>) -> Self {
        Self { name: name.to_string(), arguments }
    }

    pub fn insert(text: &str) -> Self {
        Self::new(INSERT_ACTION, vec![Argument::from(text)])
    }

    pub fn repeat(extra: i64) -> Self {
        Self::new(REPEAT_ACTION, vec![Argument::from(extra)])
    }

    /// Literal count of a `repeat` action; `None` once it is a capture.
    pub fn literal_repeat(&self) -> Option<i64> {
        if !self.is_repeat() {
            return None;
        }
        match self.arguments.as_slice() {
            [count] => count.as_i64(),
            _ => None,
        }
    }

    pub fn is_insert(&self) -> bool {
        self.name == INSERT_ACTION
    }

    pub fn is_repeat(&self) -> bool {
        self.name == REPEAT_ACTION
    }

    /// Text of an `insert` action; `None` for anything else.
    pub fn inserted_text(&self) -> Option<&str> {
        if !self.is_insert() {
            return None;
        }
        self.arguments.first().and_then(Argument::as_text)
    }

    pub fn to_script(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 8);
        out.push_str(&self.name);
        out.push('(');
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            arg.write_script(&mut out);
        }
        out.push(')');
        out
    }

    fn write_fingerprint(&self, out: &mut String) {
        let _ = write!(out, "{:?}(", self.name);
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            arg.write_fingerprint(out);
        }
        out.push(')');
    }
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_script())
    }
}

/// Canonical text for an action sequence. Two chains are the same command
/// iff their fingerprints are equal.
pub fn fingerprint(actions: &[ActionToken]) -> String {
    let mut out = String::new();
    for (i, action) in actions.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        action.write_fingerprint(&mut out);
    }
    out
}
