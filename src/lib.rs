//! Core library for the transfer-tools command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the unit tests. The modules are structured
//! to keep responsibilities narrow and composable: IO adapters live under
//! [`transfer::tools::io`], data representations inside [`transfer::tools::model`],
//! the credit-transfer computation in [`transfer::tools::analysis`], the plan
//! merge in [`transfer::tools::combine`], and the orchestration under
//! [`transfer::tools::run`].

pub mod transfer;

pub use transfer::tools::{Result, ToolError, analysis, combine, error, io, model, run};
