//! # stubmerge
//!
//! Fetches third-party MicroPython type-stub packages and consolidates them
//! into a single stub tree.
//!
//! ## Quick Example
//!
//! ```
//! use stubmerge::config::Layout;
//! use stubmerge::consolidate;
//! use stubmerge::filesystem::{Filesystem, MemoryFS};
//! use std::path::Path;
//!
//! let mut fs = MemoryFS::new();
//! fs.add_file_string("input_micropython_stubs/stdlib/builtins.pyi", "BASE").unwrap();
//! fs.add_dir("input_micropython_stubs/stubs").unwrap();
//! fs.add_dir("input_micropython_stubs/_mpy_shed").unwrap();
//! fs.add_file_string("input_micropython_stubs/__builtins__.pyi", "EXT").unwrap();
//! fs.add_file_string("input_micropython_stubs/machine.pyi", "").unwrap();
//! fs.add_file_string("input_micropython_stubs/machine/__init__.pyi", "").unwrap();
//!
//! let report = consolidate::execute(&mut fs, &Layout::default()).unwrap();
//!
//! assert_eq!(report.removed, vec!["machine.pyi"]);
//! assert!(fs.is_file(Path::new("src/stdlib/machine/__init__.pyi")));
//! assert_eq!(fs.read_string("src/stdlib/builtins.pyi").unwrap(), "BASE\n\nEXT");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the optional `stubmerge.yaml`, the
//!   directory `Layout` and package specifiers.
//! - **Filesystem (`filesystem`)**: the narrow interface consolidation runs
//!   against, with host and in-memory implementations.
//! - **Fetching (`fetch`)**: the external package fetcher, backed by pip.
//! - **Consolidation (`consolidate`)**: the merge rules. Packages supersede
//!   same-named modules and external built-ins are appended to seeded ones.
//! - **Pipeline (`pipeline`)**: fetch, then consolidate.

pub mod config;
pub mod consolidate;
pub mod defaults;
pub mod error;
pub mod fetch;
pub mod filesystem;
pub mod output;
pub mod path;
pub mod pipeline;

#[cfg(test)]
mod path_proptest;
