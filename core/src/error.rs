#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Walker errors always carry the string form of the failing schema location so
//! the offending node can be found in the source document.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document could not be parsed into the schema document model.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A schema without any `type`.
    #[from(ignore)]
    #[display("schema {location} has no type")]
    MissingType {
        /// Location of the schema.
        location: String,
    },

    /// A schema with a multi-entry `type` list.
    #[from(ignore)]
    #[display("schema {location} has multiple types, which is not supported")]
    MultipleTypes {
        /// Location of the schema.
        location: String,
    },

    /// A `type` keyword the walker has no branch for.
    #[from(ignore)]
    #[display("unhandled type {type_name} for {location}")]
    UnsupportedType {
        /// Location of the schema.
        location: String,
        /// The offending type keyword.
        type_name: String,
    },

    /// A schema using `oneOf` / `anyOf` / `allOf`.
    #[from(ignore)]
    #[display("schema {location} uses {keyword}, which is not supported")]
    Composition {
        /// Location of the schema.
        location: String,
        /// The composition keyword found.
        keyword: String,
    },

    /// A fractional bound or `multipleOf` on an integer schema.
    #[from(ignore)]
    #[display("schema {location} has a {keyword} that is not an integer")]
    NonIntegral {
        /// Location of the schema.
        location: String,
        /// The keyword(s) carrying the fractional value.
        keyword: String,
    },

    /// An enum value or vendor extension that does not fit its expected shape.
    #[from(ignore)]
    #[display("schema {location}: {detail}")]
    Decode {
        /// Location of the schema.
        location: String,
        /// What failed to decode, and why.
        detail: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
