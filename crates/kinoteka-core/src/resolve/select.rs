use crate::types::{CatalogCandidate, MediaKind};

/// What the user chose for a ranked candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the ranked list.
    Pick(usize),
    /// Leave the title without a catalog id.
    Skip,
    /// Stop the whole run.
    Quit,
}

/// Interactive chooser used when ranking cannot decide.
pub trait CandidateSelector {
    /// Presents `ranked` (most popular first) for `query`. `file_hint` is the
    /// original filename, shown for context.
    fn select(
        &mut self,
        query: &str,
        kind: MediaKind,
        ranked: &[CatalogCandidate],
        file_hint: Option<&str>,
    ) -> Selection;
}

/// Selector that always skips. Used when no terminal is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipSelector;

impl CandidateSelector for SkipSelector {
    fn select(
        &mut self,
        _query: &str,
        _kind: MediaKind,
        _ranked: &[CatalogCandidate],
        _file_hint: Option<&str>,
    ) -> Selection {
        Selection::Skip
    }
}
