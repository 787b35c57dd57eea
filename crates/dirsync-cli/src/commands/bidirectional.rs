use std::path::Path;

use anyhow::Context;
use dirsync_core::{BidirectionalSync, LocalFs, SyncOptions, SyncReporter};

pub struct Bidirectional;

impl Bidirectional {
    pub fn execute(dir_a: &Path, dir_b: &Path, options: SyncOptions) -> anyhow::Result<()> {
        tracing::debug!(?options, "executing bidirectional sync");

        println!("{}", SyncReporter::bidirectional_header(dir_a, dir_b));

        let report = BidirectionalSync::new(LocalFs::new(), options)
            .run(dir_a, dir_b)
            .with_context(|| {
                format!(
                    "Failed to sync {} and {}",
                    dir_a.display(),
                    dir_b.display()
                )
            })?;

        println!("{}", SyncReporter::bidirectional_summary(&report));
        if options.dry_run {
            println!("Dry run: no changes were made");
        }

        Ok(())
    }
}
