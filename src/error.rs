use std::path::PathBuf;

use thiserror::Error;

use crate::forest::NodeId;

/// Misuse of the forest construction API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("field `{0}` has an empty type annotation")]
    EmptyFieldType(String),
    #[error("declaration name must not be empty")]
    EmptyDeclarationName,
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("node {child:?} already has a parent")]
    AlreadyParented { child: NodeId },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("declaration `{0}` is closed")]
    Sealed(String),
    #[error("no open declaration")]
    NoOpenScope,
}

/// Front-end failures: reading, decoding, and scanning inputs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("{path}:{line}: {source}")]
    Scan { path: PathBuf, line: usize, source: ForestError },
    #[error(transparent)]
    Forest(#[from] ForestError),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
