//! Integration tests that fetch real stub packages with pip.
//!
//! Disabled by default since they need network access and a Python with pip:
//!
//! ```bash
//! cargo test --test integration_test --features integration-tests
//!
//! # Skip network tests even when integration-tests feature is enabled
//! SKIP_NETWORK_TESTS=1 cargo test --features integration-tests
//! ```

use std::env;
use std::fs;
use stubmerge::config::{Config, Layout};
use stubmerge::fetch::PipFetcher;
use stubmerge::filesystem::HostFS;
use stubmerge::pipeline::{self, Options};
use tempfile::TempDir;

/// Fetch one board package and consolidate it
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_fetch_and_consolidate_esp32_stubs() {
    if env::var("SKIP_NETWORK_TESTS").is_ok() {
        println!("Skipping network integration test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = Config {
        packages: vec!["micropython-esp32-stubs==1.25.0.post2".to_string()],
        ..Config::default()
    };
    let options = Options {
        packages: config.package_specs().unwrap(),
        layout: Layout {
            input_root: temp_dir.path().join("input"),
            output_root: temp_dir.path().join("src"),
            ..Layout::default()
        },
        fetch: true,
    };

    let report = pipeline::run(&mut HostFS, &PipFetcher::new(config.python), &options)
        .expect("Fetch and consolidate should succeed");

    assert_eq!(report.seeded, vec!["stdlib", "stubs"]);
    assert!(temp_dir.path().join("src/stdlib/_mpy_shed").is_dir());

    let builtins = fs::read_to_string(temp_dir.path().join("src/stdlib/builtins.pyi")).unwrap();
    let external = fs::read_to_string(temp_dir.path().join("input/__builtins__.pyi")).unwrap();
    assert!(builtins.ends_with(&format!("\n\n{}", external)));

    for name in &report.removed {
        assert!(!temp_dir.path().join("src/stdlib").join(name).exists());
    }
}
