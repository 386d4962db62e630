//! Error types and error handling for the front end.
//!
//! This module defines the error types shared by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - Error names and suggestions used by diagnostic rendering

pub mod errors;
