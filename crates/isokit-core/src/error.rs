//! Error handling for isokit
//!
//! Provides the error types for the layers of the engine that are allowed
//! to fail hard:
//! - Diagram errors (malformed persisted scene graphs)
//! - Component library errors (registry and persistence)
//! - Shape library errors (template index loading)
//!
//! Geometry and scene-graph edits never fail; they log and degrade
//! instead. All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Diagram error type
///
/// Raised when a persisted diagram cannot be turned back into a valid
/// scene graph. A load that produces this error must leave the caller's
/// current scene graph untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// The document is not valid JSON
    #[error("Invalid diagram JSON: {reason}")]
    InvalidJson {
        /// The parser message.
        reason: String,
    },

    /// The document root is not an array of components
    #[error("Diagram must be an array of components")]
    NotAnArray,

    /// A component entry is not an object
    #[error("Component at index {index} is not an object")]
    NotAnObject {
        /// Index of the offending entry.
        index: usize,
    },

    /// A required string field is missing, empty, or not a string
    #[error("Component at index {index} has an invalid '{field}' field")]
    InvalidField {
        /// Index of the offending entry.
        index: usize,
        /// Name of the field.
        field: String,
    },

    /// A decoration entry is malformed
    #[error("Component at index {index} has an invalid 2D shape entry at {decoration}")]
    InvalidDecoration {
        /// Index of the owning component.
        index: usize,
        /// Index of the decoration inside `attached2DShapes`.
        decoration: usize,
    },

    /// Two components share an id
    #[error("Duplicate component id '{id}'")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// The first component is not a root, or a later component is
    #[error("Component '{id}' breaks the single-root rule")]
    InvalidRoot {
        /// The offending component id.
        id: String,
    },

    /// A parent reference does not point at an earlier component
    #[error("Component '{id}' references '{parent}' which does not precede it")]
    DanglingReference {
        /// The component holding the reference.
        id: String,
        /// The referenced id.
        parent: String,
    },
}

/// Component library error type
#[derive(Error, Debug)]
pub enum LibraryError {
    /// A component with this name already exists
    #[error("Component named '{name}' already exists")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// No component with this id
    #[error("Component '{id}' not found")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// The subgraph handed to the library is empty
    #[error("Cannot create a component from an empty scene graph")]
    EmptyComponent,

    /// Storage I/O error
    #[error("Component storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage serialization error
    #[error("Component storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shape library error type
#[derive(Error, Debug)]
pub enum ShapeLibraryError {
    /// A shape with this name is already registered
    #[error("Shape '{name}' is already registered")]
    DuplicateShape {
        /// The conflicting name.
        name: String,
    },

    /// Index entry has neither inline markup nor a markup file
    #[error("Shape '{name}' has no svgContent or svgFile")]
    MissingContent {
        /// The shape name.
        name: String,
    },

    /// Index I/O error
    #[error("Shape library I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index JSON error
    #[error("Shape library JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main error type for isokit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Diagram error
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    /// Component library error
    #[error(transparent)]
    Library(#[from] LibraryError),

    /// Shape library error
    #[error(transparent)]
    ShapeLibrary(#[from] ShapeLibraryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from loading a diagram
    pub fn is_diagram_error(&self) -> bool {
        matches!(self, Error::Diagram(_))
    }

    /// Check if this error came from the component library
    pub fn is_library_error(&self) -> bool {
        matches!(self, Error::Library(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
