// src/package/marker.rs
//! Environment marker parsing and evaluation
//!
//! Markers gate a requirement on the environment it is installed into:
//! `python_version < "3.8"`, `sys_platform == "win32" and extra == "socks"`.
//! Grammar: comparisons joined by `and`/`or` with parentheses, `and` binding
//! tighter. Both sides of a comparison are a variable or a quoted string.
//!
//! When both sides parse as versions, ordering operators compare as versions;
//! otherwise only `==`, `!=`, `in` and `not in` apply, as string operations.
//! Variables that cannot be known for the target (`platform_release`,
//! `platform_version`) make their comparison true.

use super::canonicalize_name;
use crate::error::{Error, Result};
use crate::version::{RuntimeVersion, Version, VersionConstraint};
use std::str::FromStr;

/// Variables a marker may reference
const MARKER_VARIABLES: &[&str] = &[
    "os_name",
    "sys_platform",
    "platform_machine",
    "platform_python_implementation",
    "platform_release",
    "platform_system",
    "platform_version",
    "python_version",
    "python_full_version",
    "implementation_name",
    "implementation_version",
    "extra",
];

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Compatible,
    /// `===`: plain string equality
    Arbitrary,
    In,
    NotIn,
}

impl MarkerOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Compatible => "~=",
            Self::Arbitrary => "===",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "~=" => Self::Compatible,
            "===" => Self::Arbitrary,
            _ => return None,
        })
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerValue {
    Variable(String),
    Literal(String),
}

/// Parsed marker expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerTree {
    Compare {
        lhs: MarkerValue,
        op: MarkerOp,
        rhs: MarkerValue,
    },
    And(Vec<MarkerTree>),
    Or(Vec<MarkerTree>),
}

impl MarkerTree {
    pub fn parse(s: &str) -> Result<Self> {
        let tokens = tokenize(s)?;
        let mut parser = Parser {
            input: s,
            tokens,
            pos: 0,
        };
        let tree = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(tree)
    }

    /// Whether the marker holds in `env`
    pub fn evaluate(&self, env: &MarkerEnvironment) -> bool {
        match self {
            Self::And(items) => items.iter().all(|m| m.evaluate(env)),
            Self::Or(items) => items.iter().any(|m| m.evaluate(env)),
            Self::Compare { lhs, op, rhs } => evaluate_compare(lhs, *op, rhs, env),
        }
    }
}

impl FromStr for MarkerTree {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Values of the marker variables for one target environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEnvironment {
    python_version: String,
    python_full_version: String,
    /// Canonical names of the extras being installed
    extras: Vec<String>,
}

impl MarkerEnvironment {
    /// Environment of the given runtime on the current platform
    pub fn for_runtime(runtime: &RuntimeVersion) -> Self {
        Self {
            python_version: format!("{}.{}", runtime.major(), runtime.minor()),
            python_full_version: runtime.to_string(),
            extras: Vec::new(),
        }
    }

    /// Copy with `extra` bound to the given extras
    pub fn with_extras(&self, extras: &[String]) -> Self {
        Self {
            extras: extras.iter().map(|e| canonicalize_name(e)).collect(),
            ..self.clone()
        }
    }

    /// Value of a variable, `None` when it cannot be known
    fn value(&self, variable: &str) -> Option<String> {
        let os = std::env::consts::OS;
        let value = match variable {
            "python_version" => self.python_version.as_str(),
            "python_full_version" | "implementation_version" => {
                self.python_full_version.as_str()
            }
            "os_name" if cfg!(windows) => "nt",
            "os_name" => "posix",
            "sys_platform" => match os {
                "macos" => "darwin",
                "windows" => "win32",
                other => other,
            },
            "platform_system" => match os {
                "linux" => "Linux",
                "macos" => "Darwin",
                "windows" => "Windows",
                other => other,
            },
            "platform_machine" => std::env::consts::ARCH,
            "platform_python_implementation" => "CPython",
            "implementation_name" => "cpython",
            _ => return None,
        };
        Some(value.to_string())
    }
}

fn evaluate_compare(
    lhs: &MarkerValue,
    op: MarkerOp,
    rhs: &MarkerValue,
    env: &MarkerEnvironment,
) -> bool {
    let is_extra =
        |v: &MarkerValue| matches!(v, MarkerValue::Variable(name) if name == "extra");
    if is_extra(lhs) || is_extra(rhs) {
        let literal = |v: &MarkerValue| match v {
            MarkerValue::Literal(s) => canonicalize_name(s),
            MarkerValue::Variable(_) => String::new(),
        };
        let (other, extra_on_left) = if is_extra(lhs) {
            (literal(rhs), true)
        } else {
            (literal(lhs), false)
        };
        // No extras requested: `extra` is the empty string
        let extras: Vec<&str> = if env.extras.is_empty() {
            vec![""]
        } else {
            env.extras.iter().map(String::as_str).collect()
        };
        return extras.into_iter().any(|extra| {
            if extra_on_left {
                compare_values(extra, op, &other)
            } else {
                compare_values(&other, op, extra)
            }
        });
    }

    let resolve = |v: &MarkerValue| match v {
        MarkerValue::Literal(s) => Some(s.clone()),
        MarkerValue::Variable(name) => env.value(name),
    };
    match (resolve(lhs), resolve(rhs)) {
        (Some(l), Some(r)) => compare_values(&l, op, &r),
        _ => true,
    }
}

fn compare_values(lhs: &str, op: MarkerOp, rhs: &str) -> bool {
    match op {
        MarkerOp::In => return rhs.contains(lhs),
        MarkerOp::NotIn => return !rhs.contains(lhs),
        MarkerOp::Arbitrary => return lhs == rhs,
        _ => {}
    }

    if let Ok(version) = Version::parse(lhs)
        && let Ok(constraint) = VersionConstraint::parse(&format!("{}{}", op.as_str(), rhs))
    {
        return constraint.satisfies(&version);
    }

    match op {
        MarkerOp::Equal => lhs == rhs,
        MarkerOp::NotEqual => lhs != rhs,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Ident(String),
    Str(String),
    Op(MarkerOp),
    And,
    Or,
    Not,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let invalid = |reason: String| Error::InvalidMarker {
        input: input.to_string(),
        reason,
    };
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' | '\'' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if ch == c {
                        closed = true;
                        break;
                    }
                    value.push(ch);
                }
                if !closed {
                    return Err(invalid(format!("unterminated string at {}", start)));
                }
                tokens.push(Token::Str(value));
            }
            '=' | '!' | '<' | '>' | '~' => {
                let mut symbol = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !matches!(ch, '=' | '!' | '<' | '>' | '~') {
                        break;
                    }
                    symbol.push(ch);
                    chars.next();
                }
                let op = MarkerOp::from_symbol(&symbol)
                    .ok_or_else(|| invalid(format!("unknown operator '{}'", symbol)))?;
                tokens.push(Token::Op(op));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.') {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "in" => Token::Op(MarkerOp::In),
                    "not" => Token::Not,
                    _ => Token::Ident(word),
                });
            }
            other => return Err(invalid(format!("unexpected character '{}'", other))),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> Error {
        Error::InvalidMarker {
            input: self.input.to_string(),
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<MarkerTree> {
        let mut items = vec![self.parse_and()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            items.push(self.parse_and()?);
        }
        Ok(collapse(items, MarkerTree::Or))
    }

    fn parse_and(&mut self) -> Result<MarkerTree> {
        let mut items = vec![self.parse_atom()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            items.push(self.parse_atom()?);
        }
        Ok(collapse(items, MarkerTree::And))
    }

    fn parse_atom(&mut self) -> Result<MarkerTree> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let tree = self.parse_or()?;
            return match self.advance() {
                Some(Token::RParen) => Ok(tree),
                _ => Err(self.error("missing ')'")),
            };
        }

        let lhs = self.parse_value()?;
        let op = match self.advance() {
            Some(Token::Op(op)) => op,
            Some(Token::Not) => match self.advance() {
                Some(Token::Op(MarkerOp::In)) => MarkerOp::NotIn,
                _ => return Err(self.error("expected 'in' after 'not'")),
            },
            _ => return Err(self.error("expected a comparison operator")),
        };
        let rhs = self.parse_value()?;
        Ok(MarkerTree::Compare { lhs, op, rhs })
    }

    fn parse_value(&mut self) -> Result<MarkerValue> {
        match self.advance() {
            Some(Token::Str(value)) => Ok(MarkerValue::Literal(value)),
            Some(Token::Ident(name)) if MARKER_VARIABLES.contains(&name.as_str()) => {
                Ok(MarkerValue::Variable(name))
            }
            Some(Token::Ident(name)) => {
                Err(self.error(&format!("unknown marker variable '{}'", name)))
            }
            _ => Err(self.error("expected a variable or a quoted string")),
        }
    }
}

fn collapse(mut items: Vec<MarkerTree>, join: fn(Vec<MarkerTree>) -> MarkerTree) -> MarkerTree {
    match items.len() {
        1 => items.remove(0),
        _ => join(items),
    }
}
