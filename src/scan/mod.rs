//! Directory traversal with exclusion pruning and the self-reference guard

pub mod skip;
pub mod walker;

pub use skip::{SkipReason, SkipSet};
pub use walker::{TreeWalker, Visit, WalkSummary};
