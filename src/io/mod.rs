//! File I/O: curve documents in, fitted documents and CSV summaries out.

pub mod document;
pub mod export;
