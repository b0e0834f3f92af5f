//! # Organizer
//!
//! Runs the full pipeline for single files and series directories:
//! classification, planning, catalog resolution and relocation. Files are
//! processed one at a time to completion. Every per-file failure is logged
//! and counted; only a user abort stops the run.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::TitleClassifier;
use crate::config::OrganizerConfig;
use crate::error::{KinotekaError, Result};
use crate::format::MediaFields;
use crate::process::{
    DirectoryProcessor, FilePlan, MediaProcessor, MovieProcessor, SeriesProcessor, TitleToolkit,
};
use crate::relocate::Relocator;
use crate::resolve::{Catalog, CandidateResolver, CandidateSelector};
use crate::types::{ClassificationVerdict, MediaKind, SkipReason};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub processed: usize,
    pub movies: usize,
    pub series: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed: {} movies, {} episodes, {} skipped, {} failed",
            self.processed, self.movies, self.series, self.skipped, self.failed
        )
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// Not a video file.
    Ignored,
    /// Refused by the ambiguity gate.
    Skipped(SkipReason),
    /// Moved (or, in rehearsal, would be moved) to `destination`.
    Moved { kind: MediaKind, destination: PathBuf },
    /// Relocation failed; the file stays where it is.
    Failed(String),
}

/// Summary of one series directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryReport {
    pub series: Option<MediaFields>,
    pub moved: Vec<PathBuf>,
    pub unmatched: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub removed: bool,
    pub ignored: bool,
}

/// Plan for one file before relocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Planned {
    Skip(SkipReason),
    Place { kind: MediaKind, plan: FilePlan },
}

pub struct Organizer {
    config: OrganizerConfig,
    classifier: TitleClassifier,
    toolkit: TitleToolkit,
    resolver: CandidateResolver,
    stats: RunStats,
}

impl Organizer {
    /// Builds the pipeline. Pass `None` for `catalog` to disable lookups.
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::InvalidConfig` for an unusable configuration
    /// and `KinotekaError::RegexError` if a pattern fails to compile.
    pub fn new(config: OrganizerConfig, catalog: Option<Box<dyn Catalog>>) -> Result<Self> {
        config.validate()?;
        let resolver = CandidateResolver::new(catalog, config.resolve_mode);
        Ok(Self {
            classifier: TitleClassifier::new(&config.known_shows)?,
            toolkit: TitleToolkit::new()?,
            resolver,
            config,
            stats: RunStats::default(),
        })
    }

    pub fn config(&self) -> &OrganizerConfig {
        &self.config
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn classify(&self, file_name: &str) -> ClassificationVerdict {
        self.classifier.classify(file_name)
    }

    /// Classifies and plans `file_name` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`KinotekaError::Aborted`] when the user quits at the prompt.
    pub fn plan_file(
        &mut self,
        file_name: &str,
        selector: &mut dyn CandidateSelector,
    ) -> Result<Planned> {
        let processor: Box<dyn MediaProcessor + '_> = match self.classifier.classify(file_name) {
            ClassificationVerdict::Skipped { reason } => return Ok(Planned::Skip(reason)),
            ClassificationVerdict::Movie => Box::new(MovieProcessor::new(&self.toolkit)),
            ClassificationVerdict::Series(se) => Box::new(SeriesProcessor::new(&self.toolkit, se)),
        };
        let plan = match processor.plan(file_name, &mut self.resolver, selector) {
            Ok(plan) => plan,
            Err(KinotekaError::EmptyInput) => return Ok(Planned::Skip(SkipReason::EmptyTitle)),
            Err(e) => return Err(e),
        };
        Ok(Planned::Place {
            kind: processor.kind(),
            plan,
        })
    }

    /// Processes one downloaded file.
    ///
    /// # Errors
    ///
    /// Only [`KinotekaError::Aborted`] is returned; relocation failures are
    /// reported as [`FileOutcome::Failed`].
    pub fn process_file(
        &mut self,
        path: &Path,
        relocator: &mut dyn Relocator,
        selector: &mut dyn CandidateSelector,
    ) -> Result<FileOutcome> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(FileOutcome::Ignored);
        };
        if !self.config.is_video_file(file_name) {
            return Ok(FileOutcome::Ignored);
        }
        self.stats.processed += 1;

        let (kind, plan) = match self.plan_file(file_name, selector)? {
            Planned::Skip(reason) => {
                warn!(file_name, %reason, "skipping file");
                self.stats.skipped += 1;
                return Ok(FileOutcome::Skipped(reason));
            }
            Planned::Place { kind, plan } => (kind, plan),
        };

        let destination = self.root(kind).join(plan.canonical.relative_path());
        match place(relocator, path, &destination) {
            Ok(()) => {
                self.count(kind);
                Ok(FileOutcome::Moved { kind, destination })
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "relocation failed");
                self.stats.failed += 1;
                Ok(FileOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Processes a download sub-directory as one series. `files` are the
    /// files found inside it (recursively); non-video files are ignored.
    ///
    /// # Errors
    ///
    /// Only [`KinotekaError::Aborted`] is returned.
    pub fn process_directory(
        &mut self,
        dir: &Path,
        files: &[PathBuf],
        relocator: &mut dyn Relocator,
        selector: &mut dyn CandidateSelector,
    ) -> Result<DirectoryReport> {
        if self.config.is_ignored_directory(dir) {
            info!(dir = %dir.display(), "ignoring directory");
            return Ok(DirectoryReport {
                ignored: true,
                ..DirectoryReport::default()
            });
        }
        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
            return Ok(DirectoryReport::default());
        };

        let videos: Vec<PathBuf> = files
            .iter()
            .filter(|f| {
                f.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| self.config.is_video_file(n))
            })
            .cloned()
            .collect();
        if videos.is_empty() {
            return Ok(DirectoryReport::default());
        }

        self.stats.processed += videos.len();
        let plan = match DirectoryProcessor::new(&self.toolkit).plan(
            dir_name,
            &videos,
            &mut self.resolver,
            selector,
        ) {
            Ok(plan) => plan,
            Err(KinotekaError::EmptyInput) => {
                warn!(dir_name, "no series title in directory name, leaving it in place");
                self.stats.skipped += videos.len();
                return Ok(DirectoryReport {
                    unmatched: videos,
                    ..DirectoryReport::default()
                });
            }
            Err(e) => return Err(e),
        };

        let mut report = DirectoryReport {
            series: Some(plan.series),
            unmatched: plan.unmatched,
            ..DirectoryReport::default()
        };
        self.stats.skipped += report.unmatched.len();

        for episode in plan.episodes {
            let destination = self.config.series_root.join(episode.canonical.relative_path());
            match place(relocator, &episode.source, &destination) {
                Ok(()) => {
                    self.stats.series += 1;
                    report.moved.push(destination);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(file = %episode.source.display(), error = %e, "relocation failed");
                    self.stats.failed += 1;
                    report.failed.push(episode.source);
                }
            }
        }

        report.removed = remove_empty_tree(relocator, dir, files);
        Ok(report)
    }

    fn root(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Movie => &self.config.movies_root,
            MediaKind::Series => &self.config.series_root,
        }
    }

    fn count(&mut self, kind: MediaKind) {
        match kind {
            MediaKind::Movie => self.stats.movies += 1,
            MediaKind::Series => self.stats.series += 1,
        }
    }
}

fn place(relocator: &mut dyn Relocator, source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        relocator.ensure_dir(parent)?;
    }
    let verb = if relocator.is_rehearsal() { "would move" } else { "moving" };
    info!(from = %source.display(), to = %destination.display(), "{verb}");
    relocator.move_file(source, destination)
}

/// Removes now-empty sub-directories (deepest first) and then `dir` itself.
fn remove_empty_tree(relocator: &mut dyn Relocator, dir: &Path, files: &[PathBuf]) -> bool {
    let mut nested: BTreeSet<PathBuf> = BTreeSet::new();
    for file in files {
        let mut parent = file.parent();
        while let Some(p) = parent {
            if p == dir || !p.starts_with(dir) {
                break;
            }
            nested.insert(p.to_path_buf());
            parent = p.parent();
        }
    }

    let mut ordered: Vec<PathBuf> = nested.into_iter().collect();
    ordered.sort_by_key(|p| std::cmp::Reverse(p.components().count()));
    for sub in ordered {
        if let Err(e) = relocator.remove_if_empty(&sub) {
            warn!(dir = %sub.display(), error = %e, "could not remove directory");
        }
    }

    match relocator.remove_if_empty(dir) {
        Ok(removed) => {
            if removed {
                info!(dir = %dir.display(), "removed empty directory");
            }
            removed
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "could not remove directory");
            false
        }
    }
}
