//! Ties the Line Buffer, Error & Setting Bridge, and external collaborators
//! together into the single entry point external code calls: [`parse`].

use crate::error::{Bridge, TurtleError, TurtleSyntaxError};
use crate::grammar;
use crate::scanner::Cursor;
use std::fmt;
use std::io::Read;
use ttl_model::factory::{DefaultValueFactory, ValueFactory};
use ttl_model::handler::RdfHandler;
use ttl_model::namespace::{DefaultNamespaceTable, NamespaceTable};
use ttl_model::settings::{Setting, TurtleSettings};
use ttl_model::{NamedNode, Subject, Term};

/// The mutable state a single parse invocation owns: the cursor over the
/// character source, the collaborators it was configured with, and the
/// error/setting bridge. Not `Send`/`Sync` by design — a parse run is
/// single-threaded and not reentrant; share an instance across threads
/// only by serializing calls externally.
pub(crate) struct ParserState<'a, R> {
    pub(crate) cursor: Cursor<R>,
    pub(crate) bridge: Bridge<'a>,
    pub(crate) handler: &'a mut dyn RdfHandler,
    pub(crate) factory: &'a mut dyn ValueFactory,
    pub(crate) namespaces: &'a mut dyn NamespaceTable,
    /// Original label -> replacement mapping used when
    /// [`Setting::PreserveBnodeIds`] is off, so repeated occurrences of the
    /// same source label still resolve to the same blank node.
    pub(crate) blank_node_renames: std::collections::HashMap<String, ttl_model::BlankNode>,
}

impl<R: Read> ParserState<'_, R> {
    pub(crate) fn fatal(&self, message: impl fmt::Display) -> TurtleSyntaxError {
        self.bridge.fatal(self.cursor.line_number(), message)
    }

    pub(crate) fn fatal_setting(&self, setting: Setting, message: impl fmt::Display) -> TurtleSyntaxError {
        self.bridge
            .fatal(self.cursor.line_number(), format!("{message} ({setting} is off)"))
    }

    pub(crate) fn emit(&mut self, subject: Subject, predicate: NamedNode, object: Term) -> Result<(), TurtleSyntaxError> {
        let triple = self.factory.create_triple(subject, predicate, object);
        self.handler
            .handle_statement(triple)
            .map_err(|e| self.fatal(e))
    }

    pub(crate) fn report_namespace(&mut self, prefix: &str, iri: &str) -> Result<(), TurtleSyntaxError> {
        self.namespaces
            .set_namespace(prefix, iri)
            .map_err(|e| self.fatal(e))?;
        self.handler
            .handle_namespace(prefix, iri)
            .map_err(|e| self.fatal(e))
    }

    pub(crate) fn report_comment(&mut self, text: &str) -> Result<(), TurtleSyntaxError> {
        self.handler.handle_comment(text).map_err(|e| self.fatal(e))
    }
}

/// Builds a configured Turtle parser and runs it over a byte source.
///
/// Mirrors the builder shape used throughout this stack: start from
/// [`TurtleParser::new`], chain `with_*` calls, then hand the reader and
/// collaborators to [`TurtleParser::parse_reader`].
#[derive(Clone)]
#[must_use]
pub struct TurtleParser {
    settings: TurtleSettings,
    base_iri: Option<String>,
    prefixes: Vec<(String, String)>,
}

impl Default for TurtleParser {
    fn default() -> Self {
        Self {
            settings: TurtleSettings::new(),
            base_iri: None,
            prefixes: Vec::new(),
        }
    }
}

impl TurtleParser {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Relaxes every `Verify*` setting to warning-only. Shorthand for
    /// `.with_settings(TurtleSettings::new().lenient())`.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.settings = self.settings.lenient();
        self
    }

    #[inline]
    pub fn with_settings(mut self, settings: TurtleSettings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    pub fn with_base_iri(mut self, iri: impl Into<String>) -> Self {
        self.base_iri = Some(iri.into());
        self
    }

    /// Pre-binds a prefix before the first byte is read, as if the
    /// document opened with a matching `@prefix` directive.
    #[inline]
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.push((prefix.into(), iri.into()));
        self
    }

    /// Parses `reader` as a Turtle document, reporting every event to
    /// `handler` and constructing terms through `factory`.
    ///
    /// `start_rdf` is called before the first byte is read; `end_rdf` is
    /// called only when the document is parsed to completion. A fatal
    /// syntax or handler error short-circuits before `end_rdf` is called,
    /// since the document did not actually finish.
    pub fn parse_reader<R: Read>(
        &self,
        reader: R,
        handler: &mut dyn RdfHandler,
        factory: &mut dyn ValueFactory,
    ) -> Result<Vec<TurtleSyntaxError>, TurtleError> {
        let mut namespaces = DefaultNamespaceTable::new();
        if let Some(base) = &self.base_iri {
            namespaces
                .set_base_uri(base)
                .map_err(|e| TurtleError::Syntax(TurtleSyntaxError::new(0, e)))?;
        }
        for (prefix, iri) in &self.prefixes {
            namespaces
                .set_namespace(prefix, iri)
                .map_err(|e| TurtleError::Syntax(TurtleSyntaxError::new(0, e)))?;
        }
        self.parse_reader_with(reader, handler, factory, &mut namespaces)
    }

    /// As [`Self::parse_reader`], but with an explicit, caller-owned
    /// namespace table (useful when prefixes should persist across
    /// multiple documents).
    pub fn parse_reader_with<R: Read>(
        &self,
        reader: R,
        handler: &mut dyn RdfHandler,
        factory: &mut dyn ValueFactory,
        namespaces: &mut dyn NamespaceTable,
    ) -> Result<Vec<TurtleSyntaxError>, TurtleError> {
        let mut state = ParserState {
            cursor: Cursor::new(reader),
            bridge: Bridge::new(&self.settings),
            handler,
            factory,
            namespaces,
            blank_node_renames: std::collections::HashMap::new(),
        };

        state.handler.start_rdf().map_err(TurtleError::Handler)?;
        grammar::parse_document(&mut state).map_err(TurtleError::Syntax)?;
        state.handler.end_rdf().map_err(TurtleError::Handler)?;

        Ok(state.bridge.into_warnings())
    }
}

/// Parses `reader` with the default settings and the plain owned term
/// types, a convenience wrapper around [`TurtleParser`].
pub fn parse_reader<R: Read>(
    reader: R,
    handler: &mut dyn RdfHandler,
) -> Result<Vec<TurtleSyntaxError>, TurtleError> {
    let mut factory = DefaultValueFactory;
    TurtleParser::new().parse_reader(reader, handler, &mut factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttl_model::handler::CollectingHandler;

    #[test]
    fn parses_a_single_triple() {
        let mut handler = CollectingHandler::new();
        let mut factory = DefaultValueFactory;
        TurtleParser::new()
            .with_prefix("", "http://example.com/")
            .parse_reader(":a :b :c .".as_bytes(), &mut handler, &mut factory)
            .unwrap();
        assert_eq!(handler.triples.len(), 1);
        assert_eq!(
            handler.triples[0].to_string(),
            "<http://example.com/a> <http://example.com/b> <http://example.com/c>"
        );
    }

    #[test]
    fn parses_a_collection() {
        let mut handler = CollectingHandler::new();
        let mut factory = DefaultValueFactory;
        TurtleParser::new()
            .with_prefix("", "http://example.com/")
            .parse_reader(
                "<http://example.com/s> <http://example.com/p> ( 1 2 ) .".as_bytes(),
                &mut handler,
                &mut factory,
            )
            .unwrap();
        // s p head, head rdf:first 1, head rdf:rest next, next rdf:first 2, next rdf:rest nil
        assert_eq!(handler.triples.len(), 5);
    }
}
