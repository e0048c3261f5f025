//! The setting registry contract and the concrete severities it hands back
//! to the [error and setting bridge](https://www.w3.org/TR/turtle/) inside a parser.
//!
//! A parser never hardcodes whether an optional check is enforced: it asks
//! a [`SettingRegistry`] for the current [`Severity`] of a [`Setting`] and
//! reacts accordingly. [`TurtleSettings`] is the in-memory registry used
//! when no external configuration source is wired in.

use std::fmt;

/// Names a configurable aspect of Turtle parsing.
///
/// Boolean-shaped settings ([`Setting::CaseInsensitiveDirectives`],
/// [`Setting::AcceptTurtleStar`], [`Setting::PreserveBnodeIds`]) are read
/// through [`SettingRegistry::is_enabled`]; the `Verify*` settings control
/// the severity of an otherwise-recoverable syntax error and are read
/// through [`SettingRegistry::severity_of`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Setting {
    /// Accept `@PREFIX`/`@BASE`/`PREFIX`/`BASE` regardless of keyword case.
    CaseInsensitiveDirectives,
    /// Accept the `<< s p o >>` triple-term extension to object/subject position.
    AcceptTurtleStar,
    /// Reject IRIs whose structure is not a valid absolute or relative reference.
    VerifyUriSyntax,
    /// Reject language tags that are not valid BCP47.
    VerifyLanguageTags,
    /// Reject typed literals whose lexical form does not match their datatype.
    VerifyDatatypeValues,
    /// Reject relative IRIs when no base IRI is in scope to resolve them against.
    VerifyRelativeUris,
    /// Keep the textual blank node labels from the input instead of replacing
    /// them with fresh, collision-free ones.
    PreserveBnodeIds,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CaseInsensitiveDirectives => "CASE_INSENSITIVE_DIRECTIVES",
            Self::AcceptTurtleStar => "ACCEPT_TURTLESTAR",
            Self::VerifyUriSyntax => "VERIFY_URI_SYNTAX",
            Self::VerifyLanguageTags => "VERIFY_LANGUAGE_TAGS",
            Self::VerifyDatatypeValues => "VERIFY_DATATYPE_VALUES",
            Self::VerifyRelativeUris => "VERIFY_RELATIVE_URIS",
            Self::PreserveBnodeIds => "PRESERVE_BNODE_IDS",
        })
    }
}

/// How the error and setting bridge should react when a `Verify*` setting's
/// check fails.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub enum Severity {
    /// Accept the input as-is; do not call the handler at all.
    Ignore,
    /// Accept the input, but report it to the RDF handler as a warning.
    #[default]
    Warning,
    /// Abort parsing with a syntax error.
    Fatal,
}

/// A pluggable source of truth for [`Setting`] values.
///
/// External code owns the registry and may change settings between calls;
/// the parser re-reads the relevant setting every time it needs one rather
/// than caching a snapshot, so changes take effect on the next statement.
pub trait SettingRegistry {
    /// Returns whether a boolean-shaped setting is currently turned on.
    fn is_enabled(&self, setting: Setting) -> bool;

    /// Returns the severity the bridge should apply for a `Verify*` setting.
    fn severity_of(&self, setting: Setting) -> Severity;
}

/// An in-memory [`SettingRegistry`] with the conservative defaults a
/// strict-mode parser should start from: no verification is skipped, and
/// none of the optional extensions are enabled.
#[derive(Debug, Clone, Copy)]
pub struct TurtleSettings {
    case_insensitive_directives: bool,
    accept_turtle_star: bool,
    preserve_bnode_ids: bool,
    verify_uri_syntax: Severity,
    verify_language_tags: Severity,
    verify_datatype_values: Severity,
    verify_relative_uris: Severity,
}

impl Default for TurtleSettings {
    fn default() -> Self {
        Self {
            case_insensitive_directives: false,
            accept_turtle_star: false,
            preserve_bnode_ids: true,
            verify_uri_syntax: Severity::Fatal,
            verify_language_tags: Severity::Fatal,
            verify_datatype_values: Severity::Warning,
            verify_relative_uris: Severity::Fatal,
        }
    }
}

impl TurtleSettings {
    /// Starts from the conservative defaults; use the `with_*` builder
    /// methods to relax specific checks.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_case_insensitive_directives(mut self, enabled: bool) -> Self {
        self.case_insensitive_directives = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_turtle_star(mut self, enabled: bool) -> Self {
        self.accept_turtle_star = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_preserve_bnode_ids(mut self, enabled: bool) -> Self {
        self.preserve_bnode_ids = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_verify_uri_syntax(mut self, severity: Severity) -> Self {
        self.verify_uri_syntax = severity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_verify_language_tags(mut self, severity: Severity) -> Self {
        self.verify_language_tags = severity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_verify_datatype_values(mut self, severity: Severity) -> Self {
        self.verify_datatype_values = severity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_verify_relative_uris(mut self, severity: Severity) -> Self {
        self.verify_relative_uris = severity;
        self
    }

    /// Relaxes every `Verify*` setting to [`Severity::Warning`] and leaves
    /// the boolean settings untouched. Mirrors a parser builder's
    /// `.lenient()` shortcut.
    #[inline]
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.verify_uri_syntax = Severity::Warning;
        self.verify_language_tags = Severity::Warning;
        self.verify_datatype_values = Severity::Warning;
        self.verify_relative_uris = Severity::Warning;
        self
    }
}

impl SettingRegistry for TurtleSettings {
    fn is_enabled(&self, setting: Setting) -> bool {
        match setting {
            Setting::CaseInsensitiveDirectives => self.case_insensitive_directives,
            Setting::AcceptTurtleStar => self.accept_turtle_star,
            Setting::PreserveBnodeIds => self.preserve_bnode_ids,
            Setting::VerifyUriSyntax
            | Setting::VerifyLanguageTags
            | Setting::VerifyDatatypeValues
            | Setting::VerifyRelativeUris => true,
        }
    }

    fn severity_of(&self, setting: Setting) -> Severity {
        match setting {
            Setting::VerifyUriSyntax => self.verify_uri_syntax,
            Setting::VerifyLanguageTags => self.verify_language_tags,
            Setting::VerifyDatatypeValues => self.verify_datatype_values,
            Setting::VerifyRelativeUris => self.verify_relative_uris,
            Setting::CaseInsensitiveDirectives
            | Setting::AcceptTurtleStar
            | Setting::PreserveBnodeIds => Severity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let settings = TurtleSettings::new();
        assert!(!settings.is_enabled(Setting::AcceptTurtleStar));
        assert_eq!(
            settings.severity_of(Setting::VerifyUriSyntax),
            Severity::Fatal
        );
    }

    #[test]
    fn lenient_relaxes_verify_settings_only() {
        let settings = TurtleSettings::new().with_turtle_star(true).lenient();
        assert!(settings.is_enabled(Setting::AcceptTurtleStar));
        assert_eq!(
            settings.severity_of(Setting::VerifyUriSyntax),
            Severity::Warning
        );
        assert_eq!(
            settings.severity_of(Setting::VerifyRelativeUris),
            Severity::Warning
        );
    }
}
