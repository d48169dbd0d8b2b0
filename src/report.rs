//! racadm sensor report model and text parser.

pub mod parser;
pub mod types;
