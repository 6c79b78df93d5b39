//! Error rendering using miette
//!
//! This module turns [`Error`] values into diagnostics with a stable code
//! and a help line, and renders them with miette's graphical handler.

use std::fmt;
use std::io::Write;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};

use crate::Error;

/// An [`Error`] presented as a [`miette::Diagnostic`].
///
/// ```
/// use arith::{Error, ErrorReport};
/// use miette::Diagnostic;
///
/// let report = ErrorReport::from(Error::ArityMismatch { expected: 2, actual: 1 });
/// assert_eq!(report.code().unwrap().to_string(), "arith::arity_mismatch");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ErrorReport(pub Error);

impl From<Error> for ErrorReport {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl ErrorReport {
    pub fn error(&self) -> &Error {
        &self.0
    }

    fn help_text(&self) -> &'static str {
        match self.0 {
            Error::UnsupportedNodeKind { .. } => {
                "only constants, parameters and binary + - * / can be compiled"
            }
            Error::InvalidParameterIndex { .. } => {
                "parameter indices must be below the number of declared parameters"
            }
            Error::DuplicateParameter { .. } => "give each parameter a distinct name",
            Error::ArityMismatch { .. } => "pass one argument per declared parameter, in order",
            Error::MalformedBytecode { .. } => {
                "each operator needs two values on the stack; the program must leave one"
            }
            Error::BackendUnavailable { .. } => {
                "rebuild with the `jit` feature or use the interpreter backend"
            }
            Error::Codegen { .. } => "the interpreter backend runs the same bytecode",
        }
    }
}

impl Diagnostic for ErrorReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("arith::{}", self.0.kind_name())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.help_text()))
    }
}

/// Render an error with colors to stderr
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    render(error, true)
}

/// Render an error to a String without color codes (useful for tests)
///
/// This is the same as `render_error_to_string` but without ANSI color codes,
/// making the output easier to compare in tests.
pub fn render_error_to_string_no_color(error: &Error) -> String {
    render(error, false)
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    writer.write_all(render(error, use_color).as_bytes())
}

fn render(error: &Error, use_color: bool) -> String {
    let theme = if use_color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);
    let report = ErrorReport::from(error.clone());

    let mut out = String::new();
    if handler.render_report(&mut out, &report).is_err() {
        // Fall back to the plain message.
        out = report.to_string();
    }
    out
}
