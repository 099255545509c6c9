//! Default values for stubmerge configuration.
//!
//! These reproduce the fixed behavior of a plain `stubmerge` run: fetch the
//! MicroPython board stubs into `input_micropython_stubs` and consolidate them
//! into `src`.

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "stubmerge.yaml";

/// Interpreter used to run pip.
pub const PYTHON: &str = "python3";

pub const INPUT_ROOT: &str = "input_micropython_stubs";
pub const OUTPUT_ROOT: &str = "src";

/// Seed directories copied verbatim into the output root.
pub const SEED_DIRS: [&str; 2] = ["stdlib", "stubs"];

/// The seed directory every other stub is merged into.
pub const SEEDED_TREE: &str = "stdlib";

/// Shared helper declarations that live outside `stdlib` in the fetched tree.
pub const HELPER_DIR: &str = "_mpy_shed";

pub const BUILTINS_SOURCE: &str = "__builtins__.pyi";
pub const BUILTINS_TARGET: &str = "builtins.pyi";

pub const EXTENSION: &str = "pyi";

/// Stub packages fetched when no config file names any.
pub const PACKAGES: [&str; 4] = [
    "micropython-rp2-rpi_pico2_w-stubs==1.25.0.post1",
    "micropython-esp32-stubs==1.25.0.post2",
    "micropython-stm32-pybv11-stubs==1.25.0.post1",
    "micropython-samd-stubs==1.25.0.post1",
];
