//! Admin client core for the TTJ dormitory management panel.
//!
//! The panel authenticates an administrator against the remote REST backend,
//! fetches the housing-application collection, and derives the view state
//! (filtered list plus per-status badge counts) that a front end renders.
//!
//! ## Features
//!
//! - **Application review list**: fetch, normalize, filter, and count records
//! - **Status vocabulary**: canonical codes reconciled with their localized synonyms
//! - **Draft form**: client-side draft state for a new application

pub mod client;
pub mod config;
pub mod draft;
pub mod filter;
pub mod models;
pub mod session;
pub mod validation;
pub mod view;
