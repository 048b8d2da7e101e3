//! `hisab` - a personal ledger core
//!
//! This crate models income and expense entries, budgets, and a wishlist for one user at a
//! time. It aggregates them into period summaries and category breakdowns, mirrors the
//! signed-in owner's remote collections into a Local Store through live subscriptions, and
//! keeps a session cookie in step with the authentication state.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Authentication provider seam and session-cookie bridge
pub mod auth;
/// Configuration management for database and application settings
pub mod config;
/// Aggregation engine - summaries, breakdowns, series, and budget views over the Local Store
pub mod core;
/// Normalization boundary between stored documents and the domain model
pub mod document;
/// `SeaORM` entity definitions for the remote store
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Domain model - entries, expense classification, budgets, wishlist, preferences
pub mod models;
/// Local Store - the in-process mirror of the owner's collections
pub mod store;
/// Remote Sync Adapter and the sync engine
pub mod sync;
/// Write-boundary input validation
pub mod validation;

#[cfg(test)]
pub mod test_utils;
