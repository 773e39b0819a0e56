//! GIR → LuaLS stub generation.
//!
//! Pipeline: [`tree::parse`] → [`strip::strip_namespaces`] → [`lower`] builders
//! → [`codegen::Codegen`]. [`assemble::generate`] runs all of it.
pub mod assemble;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod doc;
pub mod error;
pub mod ir;
pub mod lower;
pub mod source;
pub mod strip;
pub mod tree;
pub mod types;

pub use assemble::{build_module, generate};
pub use config::{AliasNamespace, Options};
pub use error::{Error, Result};
