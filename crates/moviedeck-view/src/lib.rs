//! View layer for moviedeck.
//!
//! Turns TMDB responses into immutable view models, sequences detail
//! requests so that only the latest one is committed, and maps the
//! resulting state to a renderable view tree.

/// Detail aggregation state machine.
pub mod aggregator;
/// Display formatting helpers.
pub mod format;
/// Image URL construction and placeholder fallback.
pub mod images;
/// View models.
pub mod model;
/// Pure state-to-view mapping.
pub mod render;
