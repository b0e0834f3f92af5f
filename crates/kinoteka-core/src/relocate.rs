use std::path::{Path, PathBuf};

use crate::error::Result;

/// Filesystem side of the organizer: directory creation, moves and cleanup.
///
/// Failures are reported as `KinotekaError::Relocation` and are recovered
/// per file by the organizer.
pub trait Relocator {
    /// Creates `dir` and its parents if needed.
    fn ensure_dir(&mut self, dir: &Path) -> Result<()>;

    /// Moves `source` to `destination`. The parent of `destination` exists.
    fn move_file(&mut self, source: &Path, destination: &Path) -> Result<()>;

    /// Removes `dir` when it is empty. Returns `true` when it was removed.
    fn remove_if_empty(&mut self, dir: &Path) -> Result<bool>;

    /// `true` when no real I/O is performed.
    fn is_rehearsal(&self) -> bool {
        false
    }
}

/// One action taken (or that would have been taken) by a relocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationAction {
    EnsureDir(PathBuf),
    Move { from: PathBuf, to: PathBuf },
    RemoveIfEmpty(PathBuf),
}

/// Relocator that only records what it is asked to do.
#[derive(Debug, Default, Clone)]
pub struct RecordingRelocator {
    pub actions: Vec<RelocationAction>,
}

impl RecordingRelocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations of all recorded moves, in order.
    pub fn destinations(&self) -> Vec<&Path> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                RelocationAction::Move { to, .. } => Some(to.as_path()),
                _ => None,
            })
            .collect()
    }
}

impl Relocator for RecordingRelocator {
    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        self.actions.push(RelocationAction::EnsureDir(dir.to_path_buf()));
        Ok(())
    }

    fn move_file(&mut self, source: &Path, destination: &Path) -> Result<()> {
        self.actions.push(RelocationAction::Move {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
        });
        Ok(())
    }

    fn remove_if_empty(&mut self, dir: &Path) -> Result<bool> {
        self.actions.push(RelocationAction::RemoveIfEmpty(dir.to_path_buf()));
        Ok(false)
    }

    fn is_rehearsal(&self) -> bool {
        true
    }
}
