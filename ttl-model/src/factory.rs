//! Term construction is factored out behind [`ValueFactory`] so that callers
//! can intern strings, pool blank node identifiers, or hand out their own
//! term representations instead of the plain owned types this crate defines.

use crate::{BlankNode, Literal, NamedNode, Subject, Term, Triple};

/// Builds the terms a parser emits.
///
/// [`DefaultValueFactory`] is the trivial implementation that just
/// constructs the owned [`NamedNode`]/[`BlankNode`]/[`Literal`] types
/// directly; a caller that wants string interning or a custom blank node
/// numbering scheme implements this trait instead.
pub trait ValueFactory {
    /// Builds a named node from an already-resolved, absolute IRI.
    fn create_iri(&mut self, iri: &str) -> NamedNode;

    /// Builds a blank node from its textual label (the part after `_:`).
    fn create_blank_node(&mut self, id: &str) -> BlankNode;

    /// Allocates a fresh, never-before-seen blank node, for the `[]`
    /// anonymous blank node syntax.
    fn create_anonymous_blank_node(&mut self) -> BlankNode;

    /// Builds a plain (untyped, non-language-tagged) string literal.
    fn create_simple_literal(&mut self, value: &str) -> Literal;

    /// Builds a language-tagged string literal.
    fn create_lang_literal(&mut self, value: &str, language: &str) -> Literal;

    /// Builds a typed literal.
    fn create_typed_literal(&mut self, value: &str, datatype: NamedNode) -> Literal;

    /// Builds a triple, used both for ordinary statements and to populate
    /// an RDF-star triple term used in subject or object position.
    fn create_triple(&mut self, subject: Subject, predicate: NamedNode, object: Term) -> Triple {
        Triple::new(subject, predicate, object)
    }
}

/// The [`ValueFactory`] used when a parser is not configured with one:
/// constructs the plain owned term types with no interning or pooling.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValueFactory;

impl ValueFactory for DefaultValueFactory {
    fn create_iri(&mut self, iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    fn create_blank_node(&mut self, id: &str) -> BlankNode {
        BlankNode::new_unchecked(id)
    }

    fn create_anonymous_blank_node(&mut self) -> BlankNode {
        BlankNode::default()
    }

    fn create_simple_literal(&mut self, value: &str) -> Literal {
        Literal::new_simple_literal(value)
    }

    fn create_lang_literal(&mut self, value: &str, language: &str) -> Literal {
        Literal::new_language_tagged_literal_unchecked(value, language)
    }

    fn create_typed_literal(&mut self, value: &str, datatype: NamedNode) -> Literal {
        Literal::new_typed_literal(value, datatype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::xsd;

    #[test]
    fn default_factory_builds_plain_terms() {
        let mut factory = DefaultValueFactory;
        let iri = factory.create_iri("http://example.com/s");
        assert_eq!(iri.as_str(), "http://example.com/s");
        let literal = factory.create_typed_literal("1", xsd::INTEGER.into());
        assert_eq!(literal.value(), "1");
    }

    #[test]
    fn anonymous_blank_nodes_are_distinct() {
        let mut factory = DefaultValueFactory;
        let a = factory.create_anonymous_blank_node();
        let b = factory.create_anonymous_blank_node();
        assert_ne!(a, b);
    }
}
