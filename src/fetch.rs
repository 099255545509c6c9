//! # Package Fetching
//!
//! The fetch step is an external collaborator: given package specifiers and a
//! destination directory, it populates the destination with one directory per
//! package plus any shared files. The consolidator never looks at how that
//! happens, only at what ends up on disk.
//!
//! - **`PackageFetcher`**: the trait the pipeline calls. Tests substitute a
//!   fake that writes a known tree.
//! - **`PipFetcher`**: runs `python -m pip install --target <dest> --no-user`
//!   and waits for it to finish.

use crate::config::PackageSpec;
use crate::error::{Error, Result};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Trait for package fetching - allows mocking in tests
pub trait PackageFetcher {
    /// Populate `destination` with the contents of `packages`.
    ///
    /// Must not return until the destination is complete.
    fn fetch(&self, packages: &[PackageSpec], destination: &Path) -> Result<()>;
}

/// Fetches packages with `pip install --target`.
///
/// This uses whatever pip configuration the interpreter already has, so
/// index URLs, proxies and credentials from `pip.conf` apply unchanged.
#[derive(Debug, Clone)]
pub struct PipFetcher {
    python: String,
}

impl PipFetcher {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Arguments passed to the interpreter, in order.
    pub fn args(&self, packages: &[PackageSpec], destination: &Path) -> Vec<String> {
        let mut args = vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "--target".to_string(),
            destination.display().to_string(),
            "--no-user".to_string(),
        ];
        args.extend(packages.iter().map(|p| p.to_string()));
        args
    }

    fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.python, args.join(" "))
    }
}

impl PackageFetcher for PipFetcher {
    fn fetch(&self, packages: &[PackageSpec], destination: &Path) -> Result<()> {
        if packages.is_empty() {
            return Err(Error::ConfigParse {
                message: "No packages to fetch".to_string(),
                hint: Some("List at least one package under 'packages'".to_string()),
            });
        }

        let args = self.args(packages, destination);
        let command_line = self.command_line(&args);
        info!("Fetching {} packages into {}", packages.len(), destination.display());
        debug!("Running {}", command_line);

        let output = Command::new(&self.python)
            .args(&args)
            .output()
            .map_err(|e| Error::Fetch {
                command: command_line.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Fetch {
                command: command_line,
                message: format!("{}\n{}", output.status, stderr.trim_end()),
            });
        }

        debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
        Ok(())
    }
}
