//! Unified error type for the cyco workspace
//!
//! Every stage of the parse → synthesize → serialize pipeline reports failures
//! through [`CycoError`]. Variants carry the tag, attribute or file that
//! triggered them so the caller can report the failure without re-reading the
//! input. Nothing is recovered locally; the first error aborts the stage.
//!
//! # Example
//!
//! ```ignore
//! use cyco_core::{CycoError, CycoResult};
//!
//! fn load(path: &str) -> CycoResult<()> {
//!     let job = read_jobs(path)?;
//!     ensure_mandatory_files(&job)?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by every cyco crate.
#[derive(Error, Debug)]
pub enum CycoError {
    /// Unrecognized or malformed file extension
    #[error("unknown file format for '{path}': {reason}")]
    UnknownFileFormat { path: PathBuf, reason: String },

    /// A tag that no schema table resolves
    #[error("unknown tag '{tag}' in {format} document")]
    UnknownSchemaTag { format: &'static str, tag: String },

    /// Closed-schema attribute without a mapped field
    #[error("attribute '{attribute}' is not allowed on '{context}'")]
    AttributeNotFound { context: String, attribute: String },

    /// A required attribute is absent
    #[error("'{context}' is missing required attribute '{attribute}'")]
    MissingAttribute { context: String, attribute: String },

    /// Scalar value that cannot be coerced into its field type
    #[error("invalid value '{value}' for '{attribute}' on '{context}': expected {expected}")]
    MalformedValue {
        context: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },

    /// A closed-schema section that occurs more than once
    #[error("section '{0}' occurs more than once")]
    RepeatedSection(String),

    /// Directed connection whose emitter is neither of its variables
    #[error("connection '{name}' is not bilateral but its emitter {emitter:?} is neither of its variables")]
    AmbiguousConnection {
        name: String,
        emitter: Option<String>,
    },

    /// A job file that omits a mandatory file reference
    #[error("no {kind} file is referenced by the job descriptor")]
    MissingMandatoryFile { kind: &'static str },

    /// Output file name that is absolute or climbs out of the output directory
    #[error("'{0}' would be written outside the output directory")]
    OutsideOutputDir(String),

    /// Referenced file does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A federate name registered twice
    #[error("a federate named '{0}' is already registered")]
    DuplicateFederate(String),

    /// Re-synthesis of the co-simulation proxy
    #[error("the co-simulation proxy '{0}' is already present in the models")]
    DuplicateProxy(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML tokenizer errors
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON tokenizer errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using CycoError.
pub type CycoResult<T> = Result<T, CycoError>;

impl CycoError {
    pub fn attribute_not_found(context: impl Into<String>, attribute: impl Into<String>) -> Self {
        CycoError::AttributeNotFound {
            context: context.into(),
            attribute: attribute.into(),
        }
    }

    pub fn missing_attribute(context: impl Into<String>, attribute: impl Into<String>) -> Self {
        CycoError::MissingAttribute {
            context: context.into(),
            attribute: attribute.into(),
        }
    }

    pub fn malformed(
        context: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        CycoError::MalformedValue {
            context: context.into(),
            attribute: attribute.into(),
            value: value.into(),
            expected,
        }
    }
}
