//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the prelude:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_fetched_tree();
//!     fixture.command().arg("--skip-fetch").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::should_skip_network_tests;
    pub use super::TestFixture;
    #[allow(unused_imports)]
    pub use super::{INPUT, OUTPUT};
}

/// Input root used by the fixture, relative to its directory.
pub const INPUT: &str = "input_micropython_stubs";

/// Output root used by the fixture, relative to its directory.
pub const OUTPUT: &str = "src";

/// Check if network tests should be skipped.
///
/// Returns `true` if the `SKIP_NETWORK_TESTS` environment variable is set.
#[allow(dead_code)]
pub fn should_skip_network_tests() -> bool {
    env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// A temporary working directory laid out like a fetched stub tree.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Populate the input root the way pip leaves it after fetching the
    /// board stubs: seed directories, helpers, packages, loose modules and
    /// the external built-ins.
    pub fn with_fetched_tree(self) -> Self {
        self.with_input_file("stdlib/builtins.pyi", "class int: ...")
            .with_input_file("stdlib/os/__init__.pyi", "def listdir(): ...")
            .with_input_dir("stubs")
            .with_input_file("_mpy_shed/__init__.pyi", "")
            .with_input_file("_mpy_shed/buffer_mp.pyi", "AnyReadableBuf = bytes")
            .with_input_file("machine/__init__.pyi", "class Pin: ...")
            .with_input_file("machine.pyi", "class Pin: ...  # flat")
            .with_input_file("esp32.pyi", "def raw_temperature() -> int: ...")
            .with_input_file("__builtins__.pyi", "def const(x): ...")
            .with_input_dir("micropython_esp32_stubs-1.25.0.post2.dist-info")
    }

    /// Add a file under the input root.
    pub fn with_input_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(INPUT)
            .child(path)
            .write_str(content)
            .expect("Failed to write input file");
        self
    }

    /// Add an empty directory under the input root.
    pub fn with_input_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(INPUT)
            .child(path)
            .create_dir_all()
            .expect("Failed to create input directory");
        self
    }

    /// Add a file relative to the fixture directory.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `relative` under the output root.
    pub fn output(&self, relative: &str) -> PathBuf {
        self.path().join(OUTPUT).join(relative)
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stubmerge");
        cmd.current_dir(self.path())
            .env_remove("STUBMERGE_CONFIG")
            .env_remove("STUBMERGE_PYTHON")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_fetched_tree() {
        let fixture = TestFixture::new().with_fetched_tree();
        let input = fixture.path().join(INPUT);
        assert!(input.join("stubs").is_dir());
        assert!(input.join("__builtins__.pyi").is_file());
    }
}
