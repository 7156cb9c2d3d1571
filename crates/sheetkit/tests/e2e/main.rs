//! End-to-end tests for sheetkit.
//!
//! Every test works on workbook files in its own temporary directory:
//! it creates what it needs through the public operations, then checks
//! what the operations (or the tools) report back.

mod common;
mod formats;
mod operations;
mod properties;
mod tools;

pub use common::*;
