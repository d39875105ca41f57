//! Infer Apex classes from one sample JSON document.
//!
//! `inference` turns a `serde_json::Value` into an `ir::TypeTree`;
//! `codegen` renders that tree as class declarations. Neither side knows
//! about the other's format.
pub mod inference;
pub mod ir;
pub mod codegen;
pub mod cli;
pub mod error;
pub mod path_de;

pub use error::{Error, InferError};
pub use inference::infer;
pub use ir::{Primitive, RecordType, Ty, TypeTree};
