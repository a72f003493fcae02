//! Mortgage cost calculator.
//!
//! Given a mortgage amount and four percentage rates, computes down payment,
//! closing cost and agent commissions for a window of amounts around the one
//! entered. Inputs are kept in sync with a saved settings record and a
//! shareable link.

pub mod app;
pub mod calculator;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod location;
pub mod logging;
pub mod query;
pub mod report;
pub mod storage;
pub mod sync;
pub mod ui;

pub use calculator::{calculate, ResultRow};
pub use form::{Field, FormValues};
pub use sync::StateSynchronizer;
