// src/command/template.rs

//! Parameterized command template.
//!
//! A template is split into words once, at parse time. Each word is a mix
//! of literal text and `${name}` placeholders. Rendering produces an argv
//! vector:
//!
//! - a word that is exactly `${name}` expands to all of the variable's
//!   values (zero or more argv entries)
//! - a placeholder inside a larger word is replaced by the values joined
//!   with a single space
//!
//! Rendering never drops a placeholder: a variable with no binding is a
//! [`TemplateError::MissingVariable`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::command::args::split_args;
use crate::errors::TemplateError;

/// Variables the assembler binds for every launch.
pub const KNOWN_VARIABLES: &[&str] = &[
    "java",
    "jvm",
    "classpath",
    "params",
    "entry",
    "mode",
    "jobid",
    "job",
];

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(String),
}

#[derive(Debug, Clone)]
pub struct CommandTemplate {
    words: Vec<Vec<Segment>>,
}

/// Variable bindings for [`CommandTemplate::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, Vec<String>>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to a list of argv words.
    pub fn set(&mut self, name: &str, values: Vec<String>) -> &mut Self {
        self.values.insert(name.to_string(), values);
        self
    }

    /// Bind `name` to exactly one argv word.
    pub fn set_one(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.set(name, vec![value.into()])
    }

    fn get(&self, name: &str) -> Result<&[String], TemplateError> {
        self.values
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TemplateError::MissingVariable(name.to_string()))
    }
}

impl CommandTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let words = split_args(source)?
            .iter()
            .map(|word| parse_word(word))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { words })
    }

    /// Placeholder names in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for segment in self.words.iter().flatten() {
            if let Segment::Var(name) = segment {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    pub fn render(&self, vars: &TemplateVars) -> Result<Vec<String>, TemplateError> {
        let mut argv = Vec::new();

        for word in &self.words {
            if let [Segment::Var(name)] = word.as_slice() {
                argv.extend(vars.get(name)?.iter().cloned());
                continue;
            }

            let mut rendered = String::new();
            for segment in word {
                match segment {
                    Segment::Literal(text) => rendered.push_str(text),
                    Segment::Var(name) => rendered.push_str(&vars.get(name)?.join(" ")),
                }
            }
            argv.push(rendered);
        }

        Ok(argv)
    }
}

fn parse_word(word: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(word) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_literal(&mut segments, &word[last..whole.start()], word)?;
        segments.push(Segment::Var(name.as_str().to_string()));
        last = whole.end();
    }
    push_literal(&mut segments, &word[last..], word)?;

    if segments.is_empty() {
        // A quoted empty word in the template.
        segments.push(Segment::Literal(String::new()));
    }
    Ok(segments)
}

fn push_literal(segments: &mut Vec<Segment>, text: &str, word: &str) -> Result<(), TemplateError> {
    if text.contains("${") {
        return Err(TemplateError::UnterminatedPlaceholder(word.to_string()));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}
