//! Bidirectional sync - two one-way passes, A into B and then B into A

use std::path::Path;

use super::orchestrator::run_pass;
use super::reporting::{ConsoleReporter, Phase, SyncObserver};
use super::{SyncOptions, SyncStats};
use crate::error::Result;
use crate::fs::{FileSystem, PlannedFs};

/// Statistics of both passes of a bidirectional sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BidirectionalReport {
    /// First pass, A into B
    pub a_to_b: SyncStats,
    /// Second pass, B into A
    pub b_to_a: SyncStats,
}

impl BidirectionalReport {
    /// Files copied or updated across both passes
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.a_to_b.total_operations() + self.b_to_a.total_operations()
    }
}

/// Runs a one-way pass in both directions
///
/// The second pass sees everything the first one wrote. Files copied into B
/// carry the timestamps of their originals, so the second pass skips them
/// instead of copying them back. Dry runs keep that property: the phases
/// share one write-recording overlay.
pub struct BidirectionalSync<F> {
    fs: F,
    options: SyncOptions,
}

impl<F: FileSystem> BidirectionalSync<F> {
    /// Create a new bidirectional sync over the given filesystem
    #[must_use]
    pub const fn new(fs: F, options: SyncOptions) -> Self {
        Self { fs, options }
    }

    /// Sync `dir_a` and `dir_b`, printing phase progress to stdout
    ///
    /// # Errors
    ///
    /// Returns the first error from either pass. If the first pass fails the
    /// second one never runs.
    pub fn run(&self, dir_a: &Path, dir_b: &Path) -> Result<BidirectionalReport> {
        let mut reporter = ConsoleReporter::new(self.options);
        self.run_with_observer(dir_a, dir_b, &mut reporter)
    }

    /// Sync `dir_a` and `dir_b`, reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`BidirectionalSync::run`].
    pub fn run_with_observer(
        &self,
        dir_a: &Path,
        dir_b: &Path,
        observer: &mut dyn SyncObserver,
    ) -> Result<BidirectionalReport> {
        // Both dry-run phases share one overlay so phase 2 sees phase 1's plan
        let report = if self.options.dry_run {
            let planned = PlannedFs::new(&self.fs);
            self.run_phases(&planned, dir_a, dir_b, observer)?
        } else {
            self.run_phases(&self.fs, dir_a, dir_b, observer)?
        };

        tracing::info!(
            total_operations = report.total_operations(),
            "bidirectional sync finished"
        );

        Ok(report)
    }

    fn run_phases<G: FileSystem + ?Sized>(
        &self,
        fs: &G,
        dir_a: &Path,
        dir_b: &Path,
        observer: &mut dyn SyncObserver,
    ) -> Result<BidirectionalReport> {
        observer.phase_started(Phase::AToB);
        let a_to_b = run_pass(fs, self.options, dir_a, dir_b, observer)?;
        observer.phase_finished(Phase::AToB, &a_to_b);

        observer.phase_started(Phase::BToA);
        let b_to_a = run_pass(fs, self.options, dir_b, dir_a, observer)?;
        observer.phase_finished(Phase::BToA, &b_to_a);

        Ok(BidirectionalReport { a_to_b, b_to_a })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::error::SyncError;
    use crate::fs::MemoryFs;
    use crate::sync::SyncAction;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SyncObserver for Recorder {
        fn phase_started(&mut self, phase: Phase) {
            self.events.push(format!("start {phase:?}"));
        }

        fn action(&mut self, action: &SyncAction) {
            self.events
                .push(format!("action {}", action.source_path().display()));
        }

        fn phase_finished(&mut self, phase: Phase, stats: &SyncStats) {
            self.events
                .push(format!("finish {phase:?} {}", stats.files_visited()));
        }
    }

    fn run(fs: &MemoryFs, recorder: &mut Recorder) -> Result<BidirectionalReport> {
        BidirectionalSync::new(fs, SyncOptions::default()).run_with_observer(
            Path::new("/a"),
            Path::new("/b"),
            recorder,
        )
    }

    #[test]
    fn test_disjoint_files_converge() {
        let fs = MemoryFs::new();
        fs.add_file("/a/x.txt", "x", at(10));
        fs.add_file("/b/y.txt", "y", at(20));

        let report = run(&fs, &mut Recorder::default()).unwrap();

        assert_eq!(report.a_to_b.copied, 1);
        assert_eq!(report.a_to_b.skipped, 0);
        assert_eq!(report.b_to_a.copied, 1);
        assert_eq!(report.b_to_a.skipped, 1);
        assert_eq!(report.total_operations(), 2);
        assert_eq!(fs.files_under("/a"), fs.files_under("/b"));
    }

    #[test]
    fn test_newer_side_wins_in_each_direction() {
        let fs = MemoryFs::new();
        fs.add_file("/a/shared.txt", "a-new", at(200));
        fs.add_file("/b/shared.txt", "b-old", at(100));
        fs.add_file("/a/other.txt", "a-old", at(100));
        fs.add_file("/b/other.txt", "b-new", at(300));

        let report = run(&fs, &mut Recorder::default()).unwrap();

        assert_eq!(report.a_to_b.updated, 1);
        assert_eq!(report.b_to_a.updated, 1);
        assert_eq!(fs.read("/b/shared.txt").unwrap(), b"a-new");
        assert_eq!(fs.read("/a/other.txt").unwrap(), b"b-new");
    }

    #[test]
    fn test_equal_timestamps_keep_divergent_content() {
        let fs = MemoryFs::new();
        fs.add_file("/a/same.txt", "left", at(100));
        fs.add_file("/b/same.txt", "right", at(100));

        let report = run(&fs, &mut Recorder::default()).unwrap();

        assert_eq!(report.total_operations(), 0);
        assert_eq!(fs.read("/a/same.txt").unwrap(), b"left");
        assert_eq!(fs.read("/b/same.txt").unwrap(), b"right");
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let fs = MemoryFs::new();
        fs.add_file("/a/x.txt", "x", at(10));
        fs.add_file("/b/nested/y.txt", "y", at(20));

        run(&fs, &mut Recorder::default()).unwrap();
        let report = run(&fs, &mut Recorder::default()).unwrap();

        assert_eq!(report.total_operations(), 0);
        assert_eq!(report.a_to_b.skipped, 2);
        assert_eq!(report.b_to_a.skipped, 2);
    }

    #[test]
    fn test_observer_sees_phases_in_order() {
        let fs = MemoryFs::new();
        fs.add_file("/a/x.txt", "x", at(10));
        fs.add_dir("/b");

        let mut recorder = Recorder::default();
        run(&fs, &mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            vec![
                "start AToB",
                "action x.txt",
                "finish AToB 1",
                "start BToA",
                "action x.txt",
                "finish BToA 1",
            ]
        );
    }

    #[test]
    fn test_first_phase_failure_stops_second_phase() {
        let fs = MemoryFs::new();
        fs.add_file("/b/y.txt", "y", at(10));

        let mut recorder = Recorder::default();
        let err = run(&fs, &mut recorder).unwrap_err();

        assert!(matches!(err, SyncError::SourceMissing(_)));
        assert_eq!(recorder.events, vec!["start AToB"]);
        assert!(!fs.exists(Path::new("/a")));
    }

    fn run_with(fs: &MemoryFs, options: SyncOptions) -> Result<BidirectionalReport> {
        BidirectionalSync::new(fs, options).run_with_observer(
            Path::new("/a"),
            Path::new("/b"),
            &mut Recorder::default(),
        )
    }

    fn assert_dry_run_matches_real_run(setup: fn(&MemoryFs)) {
        let real_fs = MemoryFs::new();
        setup(&real_fs);
        let real = run_with(&real_fs, SyncOptions::default()).unwrap();

        let dry_fs = MemoryFs::new();
        setup(&dry_fs);
        let dry = run_with(&dry_fs, SyncOptions::new(false, true)).unwrap();

        assert_eq!(dry, real);
        assert_eq!(dry_fs.write_count(), 0);
    }

    #[test]
    fn test_dry_run_into_missing_directory() {
        assert_dry_run_matches_real_run(|fs| {
            fs.add_file("/a/x.txt", "x", at(10));
            fs.add_file("/a/sub/z.txt", "z", at(11));
        });

        let fs = MemoryFs::new();
        fs.add_file("/a/x.txt", "x", at(10));
        let report = run_with(&fs, SyncOptions::new(false, true)).unwrap();

        assert_eq!(report.a_to_b.copied, 1);
        assert_eq!(report.b_to_a.skipped, 1);
        assert!(!fs.exists(Path::new("/b")));
    }

    #[test]
    fn test_dry_run_counts_match_real_run() {
        assert_dry_run_matches_real_run(|fs| {
            fs.add_file("/a/x.txt", "x", at(10));
            fs.add_file("/b/y.txt", "y", at(20));
            fs.add_file("/a/shared.txt", "a-new", at(200));
            fs.add_file("/b/shared.txt", "b-old", at(100));
            fs.add_dir("/b/empty");
        });
    }
}
