//! The Error & Setting Bridge: classifies every diagnostic the grammar
//! engine raises as a warning, a setting-gated recoverable error, or a
//! fatal error, and carries the resulting [`TurtleSyntaxError`] with its
//! source line back out of [`crate::parse`].

use std::fmt;
use std::io;
use ttl_model::handler::HandlerError;
use ttl_model::settings::{Setting, SettingRegistry, Severity};

/// A syntax error in the parsed document.
///
/// Per the source grammar's diagnostic model, positions carry only a line
/// number; there is no column information.
#[derive(Debug, Clone, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct TurtleSyntaxError {
    line: u64,
    message: String,
}

impl TurtleSyntaxError {
    pub(crate) fn new(line: u64, message: impl fmt::Display) -> Self {
        Self {
            line,
            message: message.to_string(),
        }
    }

    /// The 1-based physical line number the error was detected on.
    #[inline]
    pub fn line(&self) -> u64 {
        self.line
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The union of every way a parse run can fail.
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// A violation of the Turtle grammar, or a recoverable violation
    /// escalated to fatal by a setting.
    #[error(transparent)]
    Syntax(#[from] TurtleSyntaxError),
    /// The RDF handler raised an error while processing an event.
    #[error(transparent)]
    Handler(#[from] HandlerError),
    /// The underlying character source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How the bridge resolved a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// The caller's settings say to accept this input silently.
    Ignored,
    /// The caller's settings say to accept this input but a warning was
    /// produced.
    Warned,
}

/// Consults a [`SettingRegistry`] to decide the severity of a diagnostic
/// that is conditioned on a [`Setting`], and accumulates every non-fatal
/// diagnostic produced during a parse run.
pub(crate) struct Bridge<'a> {
    settings: &'a dyn SettingRegistry,
    warnings: Vec<TurtleSyntaxError>,
}

impl<'a> Bridge<'a> {
    pub(crate) fn new(settings: &'a dyn SettingRegistry) -> Self {
        Self {
            settings,
            warnings: Vec::new(),
        }
    }

    /// A diagnostic that is always fatal, regardless of settings.
    pub(crate) fn fatal(&self, line: u64, message: impl fmt::Display) -> TurtleSyntaxError {
        TurtleSyntaxError::new(line, message)
    }

    /// A diagnostic guarded by `setting`: fatal when the setting's severity
    /// is [`Severity::Fatal`], otherwise recorded as a warning (or dropped
    /// entirely when the severity is [`Severity::Ignore`]) and execution
    /// continues.
    pub(crate) fn recoverable(
        &mut self,
        setting: Setting,
        line: u64,
        message: impl fmt::Display,
    ) -> Result<Disposition, TurtleSyntaxError> {
        match self.settings.severity_of(setting) {
            Severity::Fatal => Err(TurtleSyntaxError::new(
                line,
                format!("{message} (set {setting} to relax this check)"),
            )),
            Severity::Warning => {
                self.warnings.push(TurtleSyntaxError::new(line, message));
                Ok(Disposition::Warned)
            }
            Severity::Ignore => Ok(Disposition::Ignored),
        }
    }

    /// A purely informational diagnostic: always recorded, never fatal.
    pub(crate) fn warn(&mut self, line: u64, message: impl fmt::Display) {
        self.warnings.push(TurtleSyntaxError::new(line, message));
    }

    pub(crate) fn is_enabled(&self, setting: Setting) -> bool {
        self.settings.is_enabled(setting)
    }

    pub(crate) fn into_warnings(self) -> Vec<TurtleSyntaxError> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttl_model::settings::TurtleSettings;

    #[test]
    fn recoverable_is_fatal_when_setting_strict() {
        let settings = TurtleSettings::new();
        let mut bridge = Bridge::new(&settings);
        let err = bridge
            .recoverable(Setting::VerifyUriSyntax, 3, "bad IRI")
            .unwrap_err();
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn recoverable_is_a_warning_when_setting_lenient() {
        let settings = TurtleSettings::new().lenient();
        let mut bridge = Bridge::new(&settings);
        let disposition = bridge
            .recoverable(Setting::VerifyUriSyntax, 3, "bad IRI")
            .unwrap();
        assert_eq!(disposition, Disposition::Warned);
        assert_eq!(bridge.into_warnings().len(), 1);
    }
}
