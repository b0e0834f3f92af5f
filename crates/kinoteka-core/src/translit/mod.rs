//! # Transliteration
//!
//! Scores whether a Latin-script title is a romanisation of a Russian title
//! and rebuilds the Cyrillic spelling when it is. The scorer is deliberately
//! conservative; a false positive garbles a real English title.

pub mod engine;
pub mod scorer;

pub use engine::{CyrillicEngine, Transliterator};
pub use scorer::{ScoreBasis, TransliterationScore, TransliterationScorer};
