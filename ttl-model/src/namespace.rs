//! Tracks the `@prefix`/`PREFIX` bindings and the current base IRI a
//! grammar engine resolves relative and prefixed names against.

use oxiri::{Iri, IriParseError};
use std::collections::HashMap;

/// Resolves prefixed names and relative IRIs against the directives seen
/// so far in a document.
///
/// A `@base`/`BASE` directive changes the base IRI for everything that
/// follows it, including the resolution of later relative IRIs found
/// inside `<...>` tokens; a `@prefix`/`PREFIX` directive adds or replaces
/// a binding with document-wide, not block, scope.
pub trait NamespaceTable {
    /// Records a prefix binding, overwriting any earlier binding for the
    /// same label.
    fn set_namespace(&mut self, prefix: &str, iri: &str) -> Result<(), IriParseError>;

    /// Looks up the IRI bound to a prefix, if any.
    fn get_namespace(&self, prefix: &str) -> Option<&str>;

    /// Replaces the base IRI used to resolve relative references.
    fn set_base_uri(&mut self, iri: &str) -> Result<(), IriParseError>;

    /// Returns the base IRI currently in scope, if one was ever set.
    fn base_uri(&self) -> Option<&str>;

    /// Resolves a relative (or absolute) IRI reference against the
    /// current base IRI.
    fn resolve_uri(&self, iri: &str) -> Result<String, IriParseError>;
}

/// The [`NamespaceTable`] used when a parser is not configured with one:
/// an in-memory prefix map plus an [`Iri`]-backed base IRI resolver.
#[derive(Debug, Default, Clone)]
pub struct DefaultNamespaceTable {
    prefixes: HashMap<String, String>,
    base: Option<Iri<String>>,
}

impl DefaultNamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given IRI already in scope as the base.
    pub fn with_base_uri(iri: &str) -> Result<Self, IriParseError> {
        let mut table = Self::new();
        table.set_base_uri(iri)?;
        Ok(table)
    }
}

impl NamespaceTable for DefaultNamespaceTable {
    fn set_namespace(&mut self, prefix: &str, iri: &str) -> Result<(), IriParseError> {
        let resolved = self.resolve_uri(iri)?;
        self.prefixes.insert(prefix.to_owned(), resolved);
        Ok(())
    }

    fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    fn set_base_uri(&mut self, iri: &str) -> Result<(), IriParseError> {
        let resolved = self.resolve_uri(iri)?;
        self.base = Some(Iri::parse(resolved)?);
        Ok(())
    }

    fn base_uri(&self) -> Option<&str> {
        self.base.as_ref().map(Iri::as_str)
    }

    fn resolve_uri(&self, iri: &str) -> Result<String, IriParseError> {
        match &self.base {
            Some(base) => Ok(base.resolve(iri)?.into_inner()),
            None => Ok(Iri::parse(iri.to_owned())?.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_resolved_against_base() {
        let mut table = DefaultNamespaceTable::with_base_uri("http://example.com/base/").unwrap();
        table.set_namespace("ex", "terms/").unwrap();
        assert_eq!(
            table.get_namespace("ex"),
            Some("http://example.com/base/terms/")
        );
    }

    #[test]
    fn base_directive_changes_later_resolution() {
        let mut table = DefaultNamespaceTable::new();
        table.set_base_uri("http://example.com/a/").unwrap();
        assert_eq!(table.resolve_uri("x").unwrap(), "http://example.com/a/x");
        table.set_base_uri("http://example.com/b/").unwrap();
        assert_eq!(table.resolve_uri("x").unwrap(), "http://example.com/b/x");
    }

    #[test]
    fn absolute_iri_without_base_resolves_to_itself() {
        let table = DefaultNamespaceTable::new();
        assert_eq!(
            table.resolve_uri("http://example.com/s").unwrap(),
            "http://example.com/s"
        );
    }
}
