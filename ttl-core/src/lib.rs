#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod grammar;
mod line_buffer;
mod parser;
mod scanner;

pub use crate::error::{TurtleError, TurtleSyntaxError};
pub use crate::parser::{parse_reader, TurtleParser};
