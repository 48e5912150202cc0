/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Jinja-style rendering of template text.


use minijinja::value::ValueKind;
use minijinja::{Environment, ErrorKind, Output, State, UndefinedBehavior, Value};
use tracing::debug;

use crate::data::{DataMap, NONE, bool_str};
use crate::error::{GenerateError, Result};

/// Renders template text with the data mapping as top-level variables.
///
/// Undefined variables render as empty text unless the renderer is strict.
/// As with Jinja2's defaults, a single trailing newline is dropped, and
/// none and booleans print as `None`, `True` and `False`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer {
    strict_undefined: bool,
}

impl TemplateRenderer {
    pub fn new(strict_undefined: bool) -> Self {
        Self { strict_undefined }
    }

    pub fn render(&self, template: &str, data: &DataMap) -> Result<String> {
        let mut env = Environment::new();
        env.set_formatter(format_value);
        if self.strict_undefined {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }

        let compiled = env.template_from_str(template).map_err(convert_error)?;
        let rendered = compiled
            .render(Value::from_serialize(data))
            .map_err(convert_error)?;

        debug!(
            variables = data.len(),
            lines = rendered.lines().count(),
            "Rendered template"
        );
        Ok(rendered)
    }
}

/// Print none and booleans the way data values are written into documents;
/// everything else uses the default formatter.
fn format_value(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    let text = match value.kind() {
        ValueKind::None => NONE,
        ValueKind::Bool => bool_str(value.is_true()),
        _ => return minijinja::escape_formatter(out, state, value),
    };
    out.write_str(text)
        .map_err(|_| minijinja::Error::new(ErrorKind::WriteFailure, "failed to write output"))
}

fn convert_error(err: minijinja::Error) -> GenerateError {
    let message = err
        .detail()
        .map(str::to_string)
        .unwrap_or_else(|| err.kind().to_string());
    match err.kind() {
        ErrorKind::SyntaxError => GenerateError::TemplateSyntax {
            message,
            line: err.line(),
        },
        ErrorKind::UndefinedError => GenerateError::UndefinedVariable {
            message: err.to_string(),
        },
        _ => GenerateError::Render(err.to_string()),
    }
}
