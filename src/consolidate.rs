//! # Stub Tree Consolidation
//!
//! Merges the independently fetched stub packages in the input root into a
//! single tree under the output root. Each step is a public function so it
//! can be exercised on its own; [`execute`] runs them in order:
//!
//! 1.  **Reset**: remove the output root and create it empty.
//! 2.  **Seed**: copy the seed directories (`stdlib`, `stubs`) verbatim.
//! 3.  **Helpers**: copy the helper directory (`_mpy_shed`) into the seeded
//!     tree. A missing helper directory means the fetched layout is not one
//!     we understand, so it is fatal.
//! 4.  **Merge**: copy loose `*.pyi` files and package directories from the
//!     top of the input root into the seeded tree. Packages merge over
//!     whatever is already there.
//! 5.  **Resolve**: drop a loose `name.pyi` when `name/__init__.pyi` exists
//!     next to it. A package always supersedes a same-named module.
//! 6.  **Built-ins**: append the external built-ins file to the seeded one,
//!     separated by a blank line. Seeded declarations come first.
//!
//! Every error aborts the run. The output root is only guaranteed to be
//! complete when [`execute`] returns `Ok`.

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::path::{is_stub_name, module_stem, package_marker};
use log::{debug, info};
use std::path::Path;

/// Separator written between seeded and external built-ins.
pub const BUILTINS_SEPARATOR: &[u8] = b"\n\n";

/// What a consolidation run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Seed directories copied from the input root.
    pub seeded: Vec<String>,
    /// Loose stub files copied into the seeded tree.
    pub modules: Vec<String>,
    /// Package directories merged into the seeded tree.
    pub packages: Vec<String>,
    /// Loose stub files removed because a same-named package exists.
    pub removed: Vec<String>,
    /// Top-level entries skipped because they carry a reserved name.
    pub skipped: Vec<String>,
}

/// Run every consolidation step against `fs`.
pub fn execute<F: Filesystem + ?Sized>(fs: &mut F, layout: &Layout) -> Result<Report> {
    let mut report = Report::default();

    info!("Consolidating {} into {}", layout.input_root.display(), layout.output_root.display());
    reset_output_root(fs, layout)?;
    seed(fs, layout, &mut report)?;
    import_helpers(fs, layout)?;
    merge_top_level(fs, layout, &mut report)?;
    resolve_conflicts(fs, layout, &mut report)?;
    merge_builtins(fs, layout)?;

    Ok(report)
}

/// Step 1: recreate the output root empty.
pub fn reset_output_root<F: Filesystem + ?Sized>(fs: &mut F, layout: &Layout) -> Result<()> {
    let output = &layout.output_root;
    if fs.exists(output) {
        debug!("Removing previous output {}", output.display());
        fs.remove_dir_all(output)?;
    }
    fs.create_dir_all(output)
}

/// Step 2: copy each seed directory from the input root into the output root.
pub fn seed<F: Filesystem + ?Sized>(fs: &mut F, layout: &Layout, report: &mut Report) -> Result<()> {
    for name in &layout.seed_dirs {
        let source = layout.input_root.join(name);
        if !fs.is_dir(&source) {
            return Err(Error::missing(source, "seed directory"));
        }
        debug!("Seeding {}", name);
        fs.copy_tree(&source, &layout.output_root.join(name))?;
        report.seeded.push(name.clone());
    }
    Ok(())
}

/// Step 3: copy the helper directory into the seeded tree.
pub fn import_helpers<F: Filesystem + ?Sized>(fs: &mut F, layout: &Layout) -> Result<()> {
    let source = layout.helper_source();
    if !fs.is_dir(&source) {
        return Err(Error::missing(source, "helper directory"));
    }
    let target = layout.helper_target();
    debug!("Importing helpers into {}", target.display());
    fs.copy_tree(&source, &target)
}

/// Step 4: copy loose stub files and package directories into the seeded tree.
///
/// Entries named like a seed directory are skipped. Everything that is
/// neither a stub file nor a package is ignored.
pub fn merge_top_level<F: Filesystem + ?Sized>(
    fs: &mut F,
    layout: &Layout,
    report: &mut Report,
) -> Result<()> {
    let seeded = layout.seeded_root();
    let marker = package_marker(&layout.extension);

    for name in fs.read_dir(&layout.input_root)? {
        let source = layout.input_root.join(&name);
        let target = seeded.join(&name);

        if layout.is_reserved(&name) {
            debug!("Skipping reserved top-level entry {}", name);
            report.skipped.push(name);
        } else if is_stub_name(&name, &layout.extension) && fs.is_file(&source) {
            debug!("Copying module {}", name);
            fs.copy_file(&source, &target)?;
            report.modules.push(name);
        } else if fs.is_dir(&source) && fs.is_file(&source.join(&marker)) {
            debug!("Merging package {}", name);
            fs.copy_tree(&source, &target)?;
            report.packages.push(name);
        }
    }
    Ok(())
}

/// Step 5: remove loose `name.pyi` files shadowed by a `name/__init__.pyi` package.
///
/// Must run after [`merge_top_level`], which is where new packages appear.
pub fn resolve_conflicts<F: Filesystem + ?Sized>(
    fs: &mut F,
    layout: &Layout,
    report: &mut Report,
) -> Result<()> {
    let seeded = layout.seeded_root();
    let marker = package_marker(&layout.extension);

    for name in fs.read_dir(&seeded)? {
        let Some(stem) = module_stem(&name, &layout.extension) else {
            continue;
        };
        let module = seeded.join(&name);
        if fs.is_file(&module) && has_package(fs, &seeded.join(stem), &marker) {
            info!("Removing plain {}", name);
            fs.remove_file(&module)?;
            report.removed.push(name);
        }
    }
    Ok(())
}

fn has_package<F: Filesystem + ?Sized>(fs: &F, dir: &Path, marker: &str) -> bool {
    fs.is_file(&dir.join(marker))
}

/// Step 6: append the external built-ins to the seeded built-ins file.
///
/// The result is the seeded content, a blank line, then the external content.
pub fn merge_builtins<F: Filesystem + ?Sized>(fs: &mut F, layout: &Layout) -> Result<()> {
    let source = layout.builtins_source_path();
    if !fs.is_file(&source) {
        return Err(Error::missing(source, "external built-ins file"));
    }
    let external = fs.read(&source)?;

    let mut appended = Vec::with_capacity(BUILTINS_SEPARATOR.len() + external.len());
    appended.extend_from_slice(BUILTINS_SEPARATOR);
    appended.extend_from_slice(&external);

    let target = layout.builtins_target_path();
    debug!("Appending {} to {}", source.display(), target.display());
    fs.append(&target, &appended)
}
