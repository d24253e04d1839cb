//! Command line parsing
//!
//! Turns one input line into a [`Command`]. Both the space-separated form
//! (`update User 1234 name "Betty"`) and the dotted form
//! (`User.update("1234", "name", "Betty")`) produce the same commands.
//! Parsing never validates class names or ids; that happens at execution so
//! the error order stays the same for both forms.

use serde_json::Value;

use crate::literal::{parse_dict, parse_scalar};

/// Verbs accepted in the dotted form
const DOTTED_VERBS: [&str; 5] = ["all", "show", "destroy", "update", "count"];

/// A shell word and the byte range it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Split a line into words using POSIX shell quoting
///
/// Single quotes are literal, double quotes allow `\"` and `\\`, and a bare
/// backslash escapes the next character. An unclosed quote runs to the end
/// of the line.
pub fn split_command_line(line: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut current: Option<(String, usize)> = None;
    let mut quote: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                } else if let Some((word, _)) = current.as_mut() {
                    word.push(c);
                }
            }
            Some(_) => match c {
                '"' => quote = None,
                '\\' if matches!(chars.peek(), Some((_, '"' | '\\'))) => {
                    if let (Some((_, next)), Some((word, _))) = (chars.next(), current.as_mut()) {
                        word.push(next);
                    }
                }
                _ => {
                    if let Some((word, _)) = current.as_mut() {
                        word.push(c);
                    }
                }
            },
            None => {
                if c.is_whitespace() {
                    if let Some((text, start)) = current.take() {
                        out.push(Token {
                            text,
                            start,
                            end: idx,
                        });
                    }
                    continue;
                }
                let (word, _) = current.get_or_insert_with(|| (String::new(), idx));
                match c {
                    '\'' | '"' => quote = Some(c),
                    '\\' => {
                        if let Some((_, next)) = chars.next() {
                            word.push(next);
                        }
                    }
                    _ => word.push(c),
                }
            }
        }
    }

    if let Some((text, start)) = current {
        out.push(Token {
            text,
            start,
            end: line.len(),
        });
    }
    out
}

/// Class and id as typed, either possibly absent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    pub class: Option<String>,
    pub id: Option<String>,
}

impl Target {
    fn from_words(words: &[String]) -> Self {
        Self {
            class: words.first().cloned(),
            id: words.get(1).cloned(),
        }
    }
}

/// What an `update` asks to change
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Nothing after the id
    Missing,
    /// An attribute name with no value
    NameOnly(String),
    Single { name: String, value: Value },
    Dict(Vec<(String, Value)>),
    /// A mapping literal that did not parse
    InvalidDict(String),
}

impl Change {
    fn from_parts(name: Option<String>, value: Option<String>) -> Self {
        match (name, value) {
            (None, _) => Change::Missing,
            (Some(name), None) => Change::NameOnly(name),
            (Some(name), Some(value)) => Change::Single {
                name,
                value: parse_scalar(&value),
            },
        }
    }

    fn from_dict_text(text: &str) -> Self {
        match parse_dict(text) {
            Ok(pairs) => Change::Dict(pairs),
            Err(err) => Change::InvalidDict(err.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Quit,
    Help(Option<String>),
    Create {
        class: Option<String>,
        params: Vec<String>,
    },
    Show(Target),
    Destroy(Target),
    All(Option<String>),
    Count(Option<String>),
    Update {
        target: Target,
        change: Change,
    },
    Unknown(String),
}

/// Parse one input line
pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    match verb {
        "quit" | "EOF" => Command::Quit,
        "help" => Command::Help(rest.split_whitespace().next().map(str::to_string)),
        "create" => parse_create(rest),
        "show" => Command::Show(Target::from_words(&words(rest))),
        "destroy" => Command::Destroy(Target::from_words(&words(rest))),
        "all" => Command::All(words(rest).into_iter().next()),
        "count" => Command::Count(words(rest).into_iter().next()),
        "update" => parse_update(rest),
        _ => parse_dotted(line).unwrap_or_else(|| Command::Unknown(line.to_string())),
    }
}

fn words(text: &str) -> Vec<String> {
    split_command_line(text)
        .into_iter()
        .map(|token| token.text)
        .collect()
}

fn parse_create(rest: &str) -> Command {
    let mut parts = rest.split_whitespace();
    Command::Create {
        class: parts.next().map(str::to_string),
        params: parts.map(str::to_string).collect(),
    }
}

fn parse_update(rest: &str) -> Command {
    let tokens = split_command_line(rest);
    let target = Target {
        class: tokens.first().map(|t| t.text.clone()),
        id: tokens.get(1).map(|t| t.text.clone()),
    };

    let change = match tokens.get(1) {
        Some(id) if rest[id.end..].trim_start().starts_with('{') => {
            Change::from_dict_text(&rest[id.end..])
        }
        _ => Change::from_parts(
            tokens.get(2).map(|t| t.text.clone()),
            tokens.get(3).map(|t| t.text.clone()),
        ),
    };

    Command::Update { target, change }
}

/// Split dotted-form arguments on commas outside quotes, unquoting each one
fn split_args(args: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in args.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ',') => {
                pieces.push(&args[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&args[start..]);

    pieces
        .into_iter()
        .map(|piece| words(piece).join(" "))
        .collect()
}

fn parse_dotted(line: &str) -> Option<Command> {
    let (class, call) = line.split_once('.')?;
    let (verb, args) = call.split_once('(')?;
    let args = args.trim_end().strip_suffix(')')?;
    if !DOTTED_VERBS.contains(&verb) {
        return None;
    }

    let class = class.trim();
    if verb == "update" {
        return Some(parse_dotted_update(class, args));
    }

    let mut tokens: Vec<String> = Vec::new();
    if !class.is_empty() {
        tokens.push(class.to_string());
    }
    tokens.extend(split_args(args).into_iter().filter(|arg| !arg.is_empty()));

    Some(match verb {
        "all" => Command::All(tokens.into_iter().next()),
        "count" => Command::Count(tokens.into_iter().next()),
        "show" => Command::Show(Target::from_words(&tokens)),
        _ => Command::Destroy(Target::from_words(&tokens)),
    })
}

fn parse_dotted_update(class: &str, args: &str) -> Command {
    let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());

    if class.is_empty() {
        return Command::Update {
            target: Target::default(),
            change: Change::Missing,
        };
    }

    let (id, change) = match args.find('{') {
        Some(brace) => (
            split_args(&args[..brace]).into_iter().find(|s| !s.is_empty()),
            Change::from_dict_text(&args[brace..]),
        ),
        None => {
            let mut parts = split_args(args).into_iter();
            let id = parts.next().and_then(non_empty);
            let name = parts.next().and_then(non_empty);
            let value = parts.next();
            (id, Change::from_parts(name, value))
        }
    };

    Command::Update {
        target: Target {
            class: Some(class.to_string()),
            id,
        },
        change,
    }
}
