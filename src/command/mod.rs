// src/command/mod.rs

//! Engine command assembly.
//!
//! - [`args`] splits operator-supplied flag strings into argv words.
//! - [`template`] parses and renders the `${var}` command template.
//! - [`assemble`] binds runtime options and the job target into the
//!   template, producing an [`InvocationCommand`].
//!
//! The command is an argv vector, never a shell string: nothing the operator
//! types is re-interpreted by a shell.

pub mod args;
pub mod assemble;
pub mod template;

use std::fmt;

use crate::errors::TemplateError;

pub use assemble::{CommandAssembler, LaunchContext, RuntimeOptions};
pub use template::{CommandTemplate, TemplateVars};

/// Fully substituted engine command, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationCommand {
    program: String,
    args: Vec<String>,
}

impl InvocationCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub(crate) fn from_argv(argv: Vec<String>) -> Result<Self, TemplateError> {
        let mut argv = argv.into_iter();
        let program = argv.next().ok_or(TemplateError::EmptyCommand)?;
        Ok(Self::new(program, argv.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Shell-quoted rendering, for logs only.
impl fmt::Display for InvocationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&args::quote_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", args::quote_arg(arg))?;
        }
        Ok(())
    }
}
