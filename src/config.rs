//! # Configuration
//!
//! This module defines the optional `stubmerge.yaml` configuration file and
//! the package specifiers it lists. Every field has a default, so an absent
//! or empty file yields the fixed run the tool was written for.
//!
//! ```yaml
//! python: python3.12
//! packages:
//!   - micropython-esp32-stubs==1.25.0.post2
//! layout:
//!   input_root: build/input
//!   output_root: build/src
//! ```
//!
//! ## Key Components
//!
//! - **`Config`**: top-level file contents: packages to fetch, the Python
//!   interpreter that runs pip, and the directory layout.
//! - **`Layout`**: where the input and output roots are, and the special
//!   names inside them (seed directories, helper directory, built-ins files,
//!   stub extension).
//! - **`PackageSpec`**: a validated `name==version` (or bare `name`) package
//!   specifier.

use crate::defaults;
use crate::error::{Error, Result};
use crate::path::package_marker;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Package specifiers handed to the fetcher, in order.
    pub packages: Vec<String>,
    /// Python interpreter used to run `pip`.
    pub python: String,
    /// Directory layout of the input and output roots.
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packages: defaults::PACKAGES.iter().map(|s| s.to_string()).collect(),
            python: defaults::PYTHON.to_string(),
            layout: Layout::default(),
        }
    }
}

/// Directory layout consumed and produced by the consolidator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Directory the fetcher populates.
    pub input_root: PathBuf,
    /// Directory rebuilt on every run.
    pub output_root: PathBuf,
    /// Directories under the input root copied verbatim into the output root.
    pub seed_dirs: Vec<String>,
    /// The seed directory that loose modules, packages and helpers merge into.
    pub seeded_tree: String,
    /// Helper directory under the input root, imported into the seeded tree.
    pub helper_dir: String,
    /// External built-ins file under the input root.
    pub builtins_source: String,
    /// Built-ins file inside the seeded tree that the external one is appended to.
    pub builtins_target: String,
    /// Stub file extension, without the dot.
    pub extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from(defaults::INPUT_ROOT),
            output_root: PathBuf::from(defaults::OUTPUT_ROOT),
            seed_dirs: defaults::SEED_DIRS.iter().map(|s| s.to_string()).collect(),
            seeded_tree: defaults::SEEDED_TREE.to_string(),
            helper_dir: defaults::HELPER_DIR.to_string(),
            builtins_source: defaults::BUILTINS_SOURCE.to_string(),
            builtins_target: defaults::BUILTINS_TARGET.to_string(),
            extension: defaults::EXTENSION.to_string(),
        }
    }
}

impl Layout {
    /// `<output>/<seeded_tree>`, where every merge step writes.
    pub fn seeded_root(&self) -> PathBuf {
        self.output_root.join(&self.seeded_tree)
    }

    pub fn helper_source(&self) -> PathBuf {
        self.input_root.join(&self.helper_dir)
    }

    pub fn helper_target(&self) -> PathBuf {
        self.seeded_root().join(&self.helper_dir)
    }

    pub fn builtins_source_path(&self) -> PathBuf {
        self.input_root.join(&self.builtins_source)
    }

    pub fn builtins_target_path(&self) -> PathBuf {
        self.seeded_root().join(&self.builtins_target)
    }

    /// Top-level input entries named like a seed directory are never merged.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.seed_dirs.iter().any(|d| d == name)
    }

    /// Check the layout is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(Error::ConfigParse {
                message: format!("Invalid stub extension '{}'", self.extension),
                hint: Some("Give the extension without a leading dot, e.g. 'pyi'".to_string()),
            });
        }

        if !self.seed_dirs.contains(&self.seeded_tree) {
            return Err(Error::ConfigParse {
                message: format!(
                    "Seeded tree '{}' is not one of the seed directories {:?}",
                    self.seeded_tree, self.seed_dirs
                ),
                hint: Some("Add it to 'layout.seed_dirs'".to_string()),
            });
        }

        if self.input_root.starts_with(&self.output_root)
            || self.output_root.starts_with(&self.input_root)
        {
            return Err(Error::ConfigParse {
                message: format!(
                    "Input and output roots overlap: '{}' and '{}'",
                    self.input_root.display(),
                    self.output_root.display()
                ),
                hint: Some(
                    "The output root is deleted on every run; keep the roots side by side"
                        .to_string(),
                ),
            });
        }

        let marker = package_marker(&self.extension);
        if self.builtins_target == marker {
            return Err(Error::ConfigParse {
                message: format!("Built-ins target cannot be '{}'", marker),
                hint: None,
            });
        }

        Ok(())
    }
}

impl Config {
    /// Parse and validate packages into specifiers.
    pub fn package_specs(&self) -> Result<Vec<PackageSpec>> {
        self.packages.iter().map(|p| p.parse()).collect()
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.package_specs()?;
        if self.python.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "Python interpreter is empty".to_string(),
                hint: None,
            });
        }
        Ok(())
    }

    /// Load the configuration, unvalidated so CLI overrides can still apply.
    ///
    /// An explicit path must exist. Without one, `stubmerge.yaml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        match explicit {
            Some(path) => from_file(path),
            None => {
                let default_path = Path::new(defaults::CONFIG_FILE);
                if default_path.is_file() {
                    from_file(default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Parse a configuration from a YAML string. An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml_content).map_err(Error::Yaml)
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::missing(path, "configuration file"));
    }
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("package name pattern is valid")
});

/// A package to fetch, e.g. `micropython-esp32-stubs==1.25.0.post2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub version: Option<String>,
}

impl FromStr for PackageSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| Error::ConfigParse {
            message,
            hint: Some("Use 'name==version' or a bare package name".to_string()),
        };

        let (name, version) = match s.trim().split_once("==") {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (s.trim(), None),
        };

        if !PACKAGE_NAME.is_match(name) {
            return Err(invalid(format!("Invalid package name in '{}'", s)));
        }

        match version {
            Some("") => Err(invalid(format!("Missing version in '{}'", s))),
            Some(v) if v.chars().any(char::is_whitespace) => {
                Err(invalid(format!("Invalid version in '{}'", s)))
            }
            _ => Ok(PackageSpec {
                name: name.to_string(),
                version: version.map(str::to_string),
            }),
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}
