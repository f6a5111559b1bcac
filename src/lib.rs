//! `pivot-fit` library crate.
//!
//! The binary (`pfit`) is a thin wrapper around this library so that:
//!
//! - the fit transforms and session protocol are testable without a host
//!   animation package
//! - modules are reusable (e.g., embedding the session controller behind a
//!   real curve-editor adapter)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fit;
pub mod host;
pub mod io;
pub mod plot;
pub mod report;
pub mod session;
