// src/command/args.rs

//! Shell-style word splitting and quoting.
//!
//! Operator flags arrive as one free-form string (`-p "-DtableName=t1 -Dday=1"`).
//! They are split here into argv words with POSIX-shell rules for blanks,
//! quotes and backslashes, and nothing else: no expansion, no globbing.

use crate::errors::TemplateError;

/// Split `input` into words.
///
/// - blanks separate words outside quotes
/// - `'...'` is taken literally
/// - `"..."` groups; inside it a backslash only escapes `"` and `\`
/// - outside quotes a backslash escapes the next character
pub fn split_args(input: &str) -> Result<Vec<String>, TemplateError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => return Err(TemplateError::UnterminatedQuote(input.to_string())),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.peek() {
                            Some(&next) if next == '"' || next == '\\' => {
                                current.push(next);
                                chars.next();
                            }
                            _ => current.push('\\'),
                        },
                        Some(inner) => current.push(inner),
                        None => return Err(TemplateError::UnterminatedQuote(input.to_string())),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next().unwrap_or('\\'));
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Quote `arg` so a POSIX shell would read it back as a single word.
pub fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
