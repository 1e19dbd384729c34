//! # JSON to Record Library
//!
//! Declares typed record shapes and validates loosely-typed JSON mappings
//! against them. Either a strictly-typed record comes back or a structured
//! report of every constraint that was violated; partial records never escape.
//!
//! ## Pipeline
//!
//! 1. **Parse** text or `KEY=VALUE` pairs into a `serde_json::Value` tree
//! 2. **Build** a record with [`Shape::validate`], coercing each field and
//!    collecting [`ValidationIssue`]s along the way
//! 3. **Handle** the outcome with an [`ErrorPolicy`], or directly
//!
//! ## Example
//!
//! ```rust
//! use json2record_lib::{Shape, VerifiedUser};
//!
//! let user = VerifiedUser::validate_json(
//!     r#"{"name": "Alice", "age": 30, "email": "alice@example.com"}"#,
//! ).unwrap();
//! assert_eq!(user.email.as_str(), "alice@example.com");
//!
//! assert!(VerifiedUser::validate_json(
//!     r#"{"name": "Alice", "age": 30, "email": "not-an-email"}"#,
//! ).is_err());
//! ```

pub mod analyzer;
pub mod bounded;
pub mod codegen;
pub mod coerce;
pub mod email;
pub mod error;
pub mod models;
pub mod parser;
pub mod path;
pub mod policy;
pub mod record;
pub mod registry;
pub mod types;

pub use analyzer::*;
pub use bounded::*;
pub use codegen::*;
pub use email::*;
pub use error::*;
pub use models::*;
pub use parser::*;
pub use path::*;
pub use policy::*;
pub use record::*;
pub use registry::*;
pub use types::*;
