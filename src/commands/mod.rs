//! # CLI Command Implementations
//!
//! `stubmerge` has a single command, `update`, whose arguments are flattened
//! into the top-level CLI so that a bare `stubmerge` performs a full run.
//! The command module holds an `Args` struct derived with `clap` and an
//! `execute` function that calls into the `stubmerge` library.

pub mod update;
