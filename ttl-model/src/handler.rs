//! The sink a parser drives as it recognizes statements, namespace
//! declarations, and comments.

use crate::Triple;
use std::fmt;

/// Receives the events a Turtle parse run produces, in document order.
///
/// A handler is started exactly once before the first byte is read.
/// `end_rdf` is called once the document has been parsed to completion; if
/// parsing is aborted by a fatal error, `end_rdf` is not called, since the
/// document did not finish.
pub trait RdfHandler {
    /// Called once before any other method, before the first line is read.
    fn start_rdf(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called once after the last statement has been handled, only on
    /// normal completion of the document.
    fn end_rdf(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called for each `@prefix`/`PREFIX` directive, with the prefix label
    /// (without the trailing colon) and the IRI it was bound to.
    fn handle_namespace(&mut self, _prefix: &str, _iri: &str) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called for each triple produced by a statement, in the order the
    /// statement's predicate-object list yields them.
    fn handle_statement(&mut self, triple: Triple) -> Result<(), HandlerError>;

    /// Called for each comment line, with the text following `#` (the
    /// leading `#` itself stripped, trailing whitespace preserved).
    fn handle_comment(&mut self, _comment: &str) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// A propagation-only error a handler can raise to abort parsing.
///
/// Unlike a syntax error, a `HandlerError` always carries a message from
/// application code rather than from the grammar engine.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// A reference [`RdfHandler`] that accumulates every event into memory,
/// useful for tests and small one-shot conversions.
#[derive(Debug, Default, Clone)]
pub struct CollectingHandler {
    pub namespaces: Vec<(String, String)>,
    pub triples: Vec<Triple>,
    pub comments: Vec<String>,
    started: bool,
    ended: bool,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl RdfHandler for CollectingHandler {
    fn start_rdf(&mut self) -> Result<(), HandlerError> {
        self.started = true;
        Ok(())
    }

    fn end_rdf(&mut self) -> Result<(), HandlerError> {
        self.ended = true;
        Ok(())
    }

    fn handle_namespace(&mut self, prefix: &str, iri: &str) -> Result<(), HandlerError> {
        self.namespaces.push((prefix.to_owned(), iri.to_owned()));
        Ok(())
    }

    fn handle_statement(&mut self, triple: Triple) -> Result<(), HandlerError> {
        self.triples.push(triple);
        Ok(())
    }

    fn handle_comment(&mut self, comment: &str) -> Result<(), HandlerError> {
        self.comments.push(comment.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NamedNode, Subject, Term};

    #[test]
    fn collecting_handler_records_events_in_order() {
        let mut handler = CollectingHandler::new();
        handler.start_rdf().unwrap();
        handler.handle_namespace("ex", "http://example.com/").unwrap();
        handler
            .handle_statement(Triple::new(
                Subject::NamedNode(NamedNode::new_unchecked("http://example.com/s")),
                NamedNode::new_unchecked("http://example.com/p"),
                Term::NamedNode(NamedNode::new_unchecked("http://example.com/o")),
            ))
            .unwrap();
        handler.end_rdf().unwrap();

        assert!(handler.is_started());
        assert!(handler.is_ended());
        assert_eq!(handler.namespaces.len(), 1);
        assert_eq!(handler.triples.len(), 1);
    }
}
