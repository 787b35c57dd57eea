use std::path::Path;

use anyhow::Context;
use dirsync_core::{LocalFs, SyncOptions, SyncReporter, TreeSyncer};

pub struct OneWay;

impl OneWay {
    pub fn execute(source: &Path, target: &Path, options: SyncOptions) -> anyhow::Result<()> {
        tracing::debug!(?options, "executing one-way sync");

        println!("{}", SyncReporter::one_way_header(source, target));

        let stats = TreeSyncer::new(LocalFs::new(), options)
            .sync(source, target)
            .with_context(|| {
                format!(
                    "Failed to sync {} into {}",
                    source.display(),
                    target.display()
                )
            })?;

        print!("{}", SyncReporter::one_way_summary(&stats));
        if options.dry_run {
            println!("Dry run: no changes were made");
        }

        Ok(())
    }
}
