//! Classify Swift-style type annotations and synthesize mock values for
//! declaration trees.
//!
//! Pipeline: declarations (scanned or decoded) → [`forest::Forest`] with a
//! [`category::Category`] per field → literals from [`synth::Synthesizer`] →
//! emitted mock factories ([`mock`]) or a JSON view ([`schema`]).
pub mod category;
pub mod classify;
pub mod cli;
pub mod error;
pub mod forest;
pub mod input;
pub mod mock;
pub mod scan;
pub mod schema;
pub mod synth;

pub use category::Category;
pub use classify::{classify, is_closure, Classifier, PatternTable};
pub use forest::{Field, Forest, ForestBuilder, NodeId};
pub use synth::Synthesizer;
