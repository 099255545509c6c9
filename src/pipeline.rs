//! # Fetch and Consolidate Pipeline
//!
//! Ties the external fetcher to the consolidator. The fetch always runs to
//! completion before the first consolidation step, and any failure stops the
//! run before the output root is touched.

use crate::config::{Layout, PackageSpec};
use crate::consolidate::{self, Report};
use crate::error::{Error, Result};
use crate::fetch::PackageFetcher;
use crate::filesystem::{load_tree, Filesystem, MemoryFS};
use log::info;

/// What a pipeline run should do.
#[derive(Debug, Clone)]
pub struct Options {
    pub layout: Layout,
    pub packages: Vec<PackageSpec>,
    /// Refetch the input root. When false the input root must already exist.
    ///
    /// Fetchers write to the host disk, so this only makes sense with
    /// [`HostFS`](crate::filesystem::HostFS).
    pub fetch: bool,
}

/// Fetch (optionally) and consolidate.
///
/// The fetcher always writes the input root on the host disk. Running with
/// `fetch` set against a [`MemoryFS`] leaves the in-memory input root empty,
/// and the run fails with a missing input root.
pub fn run<F, P>(fs: &mut F, fetcher: &P, options: &Options) -> Result<Report>
where
    F: Filesystem + ?Sized,
    P: PackageFetcher + ?Sized,
{
    let input = &options.layout.input_root;

    if options.fetch {
        // Start from an empty input root so removed upstream files do not linger
        if fs.exists(input) {
            info!("Removing previous input {}", input.display());
            fs.remove_dir_all(input)?;
        }
        fetcher.fetch(&options.packages, input)?;
    }

    if !fs.is_dir(input) {
        return Err(Error::missing(input.clone(), "input root"));
    }

    let report = consolidate::execute(fs, &options.layout)?;
    info!(
        "Consolidated {} modules and {} packages, removed {} plain modules",
        report.modules.len(),
        report.packages.len(),
        report.removed.len()
    );
    Ok(report)
}

/// Consolidate a snapshot of the on-disk input root in memory.
///
/// Nothing on disk is written. The returned filesystem holds the input
/// snapshot and the output tree the real run would produce.
pub fn dry_run(layout: &Layout) -> Result<(MemoryFS, Report)> {
    let mut memory = load_tree(&layout.input_root)?;
    let report = consolidate::execute(&mut memory, layout)?;
    Ok((memory, report))
}
