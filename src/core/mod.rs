//! Core business logic - framework-agnostic inventory operations.
//!
//! Everything in here takes explicit state (a connection and plain values)
//! and returns structured results for the caller to render. The pure engines
//! ([`split::plan_split`], the aggregation in [`report`], the filter
//! predicates) never touch the database; persistence lives next to them in
//! the same modules so the two halves stay in step.

/// Bundle lifecycle, creation, moves, and history
pub mod bundle;
/// Dashboard fetch, flattening, and client-side filters
pub mod dashboard;
/// SSCC/LUID identifier validation
pub mod identifier;
/// Storage location catalog seeding and lookups
pub mod location;
/// Material catalog operations
pub mod material;
/// Cut order operations and the order list filter
pub mod order;
/// Per-location and per-material dashboard summaries
pub mod report;
/// The bundle split engine and its atomic commit
pub mod split;
