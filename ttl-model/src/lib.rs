#![doc = include_str!("../README.md")]
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod blank_node;
pub mod factory;
pub mod handler;
mod literal;
mod named_node;
pub mod namespace;
pub mod settings;
mod triple;
pub mod vocab;

pub use crate::blank_node::{BlankNode, BlankNodeIdParseError, BlankNodeRef};
pub use crate::factory::{DefaultValueFactory, ValueFactory};
pub use crate::handler::{CollectingHandler, HandlerError, RdfHandler};
pub use crate::literal::{Literal, LiteralParseError, LiteralRef};
pub use crate::named_node::{NamedNode, NamedNodeRef};
pub use crate::namespace::{DefaultNamespaceTable, NamespaceTable};
pub use crate::settings::{Setting, SettingRegistry, Severity, TurtleSettings};
pub use crate::triple::{
    NamedOrBlankNode, NamedOrBlankNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
    TryFromTermError,
};
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;
