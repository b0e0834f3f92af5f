use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::engine::{CyrillicEngine, Transliterator};
use crate::error::Result;

/// Words that mark a title as English. More than 30% of the words in this
/// list rejects the title outright.
const ENGLISH_COMMON: &[&str] = &[
    "the", "and", "doctor", "who", "christmas", "special", "episode", "season", "part",
    "show", "series", "movie", "film", "documentary", "avatar", "friends", "house", "game",
    "breaking", "bad", "severance", "succession", "loki", "mandalorian", "stranger",
    "things", "daily",
];

/// Words that only occur in romanised Russian. Any hit accepts the title.
const ALLOW_WORDS: &[&str] = &[
    "podslushano",
    "rybinske",
    "vypusk",
    "kvartirnyj",
    "vopros",
    "tainstvennye",
    "istorii",
];

/// English function words; their presence disables the lone `i` cue.
const ENGLISH_FUNCTION: &[&str] = &[
    "the", "a", "an", "of", "and", "in", "on", "to", "for", "with", "is", "at", "by",
    "from", "it", "this", "that", "am", "me", "my", "you", "we",
];

const DIGRAPHS: &[(&str, f32)] = &[
    ("shch", 4.0),
    ("sch", 2.0),
    ("zh", 2.0),
    ("kh", 2.0),
    ("ts", 1.0),
    ("ch", 1.0),
];

const ENDINGS: &[(&str, f32)] = &[
    ("iy", 2.0),
    ("yy", 2.0),
    ("ov", 3.0),
    ("ev", 3.0),
    ("sky", 3.0),
    ("skiy", 3.0),
    ("vich", 4.0),
    ("enko", 4.0),
    ("ova", 3.0),
    ("eva", 3.0),
    ("skaya", 4.0),
    ("yj", 3.0),
    ("ij", 3.0),
    ("ogo", 3.0),
    ("ykh", 4.0),
];

const FUNCTION_WORDS: &[(&str, f32)] = &[
    ("v", 1.0),
    ("na", 2.0),
    ("ne", 1.0),
    ("po", 2.0),
    ("ot", 2.0),
    ("dlya", 3.0),
    ("kak", 2.0),
    ("eto", 2.0),
    ("ili", 3.0),
    ("bez", 2.0),
    ("za", 2.0),
    ("iz", 2.0),
    ("pod", 1.0),
    ("pro", 1.0),
];

const ROOTS: &[(&str, f32)] = &[
    ("russk", 3.0),
    ("mosk", 3.0),
    ("istor", 2.0),
    ("vopros", 3.0),
    ("zhizn", 4.0),
    ("lyub", 3.0),
    ("gorod", 3.0),
    ("devush", 4.0),
    ("pesn", 3.0),
    ("skazk", 3.0),
    ("tayn", 3.0),
    ("tain", 2.0),
    ("kvartir", 3.0),
    ("vypus", 4.0),
    ("podslush", 4.0),
    ("rybin", 3.0),
    ("serdts", 4.0),
    ("dobr", 2.0),
    ("vrem", 3.0),
    ("zhen", 3.0),
    ("muzh", 4.0),
    ("sestr", 3.0),
    ("otets", 3.0),
    ("voyn", 3.0),
    ("pobed", 4.0),
    ("schast", 4.0),
    ("krasn", 3.0),
    ("bolsh", 4.0),
    ("khorosh", 4.0),
    ("noch", 3.0),
    ("brat", 2.0),
];

const LONE_I_WEIGHT: f32 = 2.0;
const CLUSTER_WEIGHT: f32 = 1.0;
const CONSONANT_Y_WEIGHT: f32 = 1.0;
const VOWEL_Y_WEIGHT: f32 = 1.0;
const ENGLISH_PENALTY: f32 = 2.0;
const ALLOW_SCORE: f32 = 10.0;
const ENGLISH_RATIO_LIMIT: f32 = 0.3;

/// How the score was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBasis {
    /// Accumulated signal weights.
    Evidence,
    /// A known romanised Russian word.
    AllowList,
    /// Too many common English words.
    DenyList,
    /// Input contains non-ASCII characters and is left alone.
    NotLatin,
}

/// Result of scoring one title. `decision` is always `score >= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransliterationScore {
    pub raw_text: String,
    pub score: f32,
    pub threshold: f32,
    pub decision: bool,
    pub reconstructed: Option<String>,
    pub basis: ScoreBasis,
}

impl TransliterationScore {
    fn new(raw_text: &str, score: f32, threshold: f32, basis: ScoreBasis) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            score,
            threshold,
            decision: score >= threshold,
            reconstructed: None,
            basis,
        }
    }

    /// The reconstructed text if one was produced, otherwise the input.
    pub fn text(&self) -> &str {
        self.reconstructed.as_deref().unwrap_or(&self.raw_text)
    }
}

/// Decides whether a Latin title is a romanised Russian one and, if so,
/// reconstructs the Cyrillic form.
pub struct TransliterationScorer {
    engine: Box<dyn Transliterator + Send + Sync>,
    re_cluster: Regex,
    re_consonant_y: Regex,
    re_vowel_y: Regex,
    english_signals: Vec<(&'static str, Regex)>,
}

impl TransliterationScorer {
    /// Scorer backed by [`CyrillicEngine`].
    ///
    /// # Errors
    ///
    /// Returns `KinotekaError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_engine(Box::new(CyrillicEngine::new()))
    }

    /// Scorer with a custom reconstruction engine.
    pub fn with_engine(engine: Box<dyn Transliterator + Send + Sync>) -> Result<Self> {
        Ok(Self {
            engine,
            re_cluster: Regex::new(r"[bcdfghjklmnpqrstvwxz]{3,}")?,
            re_consonant_y: Regex::new(r"[bcdfghjklmnpqrstvwxz]y$")?,
            re_vowel_y: Regex::new(r"[aeiou]y[aeiou]")?,
            english_signals: vec![
                ("article", Regex::new(r"^(?:the|a|an)$")?),
                ("ing", Regex::new(r"ing$")?),
                ("ed", Regex::new(r"ed$")?),
                ("ment", Regex::new(r"ment")?),
                ("wh", Regex::new(r"wh")?),
                ("qu", Regex::new(r"qu")?),
            ],
        })
    }

    /// Scores `title` and reconstructs it when the decision is positive.
    pub fn evaluate(&self, title: &str) -> TransliterationScore {
        let mut result = self.score(title);
        if result.decision {
            let rebuilt = self.engine.reconstruct(title);
            if rebuilt != title {
                debug!(
                    title,
                    rebuilt = %rebuilt,
                    script = self.engine.script(),
                    score = result.score,
                    "reconstructed title"
                );
                result.reconstructed = Some(rebuilt);
            }
        }
        result
    }

    /// `true` when `title` is judged to be romanised.
    pub fn is_source_script(&self, title: &str) -> bool {
        self.score(title).decision
    }

    /// Returns the reconstructed title, or `title` unchanged.
    pub fn reconstruct(&self, title: &str) -> String {
        self.evaluate(title).text().to_string()
    }

    /// Scores `title` without reconstructing it.
    pub fn score(&self, title: &str) -> TransliterationScore {
        let words: Vec<String> = title
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let threshold = Self::threshold(&words);

        if !title.is_ascii() {
            return TransliterationScore::new(title, 0.0, threshold, ScoreBasis::NotLatin);
        }
        if words.is_empty() {
            return TransliterationScore::new(title, 0.0, threshold, ScoreBasis::Evidence);
        }

        let english = words
            .iter()
            .filter(|w| ENGLISH_COMMON.contains(&w.as_str()))
            .count();
        if english as f32 / words.len() as f32 > ENGLISH_RATIO_LIMIT {
            trace!(title, english, "mostly common English words");
            return TransliterationScore::new(title, 0.0, threshold, ScoreBasis::DenyList);
        }

        if words.iter().any(|w| ALLOW_WORDS.contains(&w.as_str())) {
            return TransliterationScore::new(title, ALLOW_SCORE, threshold, ScoreBasis::AllowList);
        }

        let score = self.evidence(&words);
        trace!(title, score, threshold, "transliteration evidence");
        TransliterationScore::new(title, score, threshold, ScoreBasis::Evidence)
    }

    fn threshold(words: &[String]) -> f32 {
        match words {
            [] => 4.0,
            [only] if only.chars().count() <= 6 => 4.0,
            [_] => 3.0,
            [_, _] => 2.5,
            _ => 2.0,
        }
    }

    fn evidence(&self, words: &[String]) -> f32 {
        let any_contains = |pat: &str| words.iter().any(|w| w.contains(pat));
        let any_ends = |pat: &str| words.iter().any(|w| w.len() > pat.len() && w.ends_with(pat));
        let any_equals = |pat: &str| words.iter().any(|w| w == pat);

        let mut score = 0.0;
        score += weigh(DIGRAPHS, any_contains);
        score += weigh(ENDINGS, any_ends);
        score += weigh(FUNCTION_WORDS, any_equals);
        score += weigh(ROOTS, any_contains);

        let has_english_function = words
            .iter()
            .any(|w| ENGLISH_FUNCTION.contains(&w.as_str()));
        if any_equals("i") && !has_english_function {
            score += LONE_I_WEIGHT;
        }

        if words.iter().any(|w| self.re_cluster.is_match(w)) {
            score += CLUSTER_WEIGHT;
        }
        if words.iter().any(|w| self.re_consonant_y.is_match(w)) {
            score += CONSONANT_Y_WEIGHT;
        }
        if words.iter().any(|w| self.re_vowel_y.is_match(w)) {
            score += VOWEL_Y_WEIGHT;
        }

        let english_hits = self
            .english_signals
            .iter()
            .filter(|(_, re)| words.iter().any(|w| re.is_match(w)))
            .count();
        score - english_hits as f32 * ENGLISH_PENALTY
    }
}

/// Sums the weights of every signal that matched at least once.
fn weigh(signals: &[(&str, f32)], matched: impl Fn(&str) -> bool) -> f32 {
    signals
        .iter()
        .filter(|&&(pat, _)| matched(pat))
        .map(|(_, w)| w)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> TransliterationScorer {
        TransliterationScorer::new().unwrap()
    }

    #[test]
    fn allow_list_reconstructs() {
        let s = scorer();
        let res = s.evaluate("Podslushano v Rybinske");
        assert!(res.decision);
        assert_eq!(res.basis, ScoreBasis::AllowList);
        assert_eq!(res.text(), "Подслушано в Рыбинске");
        assert_eq!(s.reconstruct("Kvartirnyj vopros"), "Квартирный вопрос");
    }

    #[test]
    fn english_titles_rejected() {
        let s = scorer();
        for title in ["Breaking Bad", "The Matrix", "Doctor Who Christmas Special"] {
            let res = s.evaluate(title);
            assert!(!res.decision, "{title}");
            assert_eq!(res.basis, ScoreBasis::DenyList, "{title}");
            assert_eq!(res.text(), title);
        }
    }

    #[test]
    fn english_without_deny_words_stays_below_threshold() {
        let s = scorer();
        for title in ["Inception", "Interstellar", "Taxi Driver", "Shrek", "Chernobyl"] {
            assert!(!s.is_source_script(title), "{title}");
            assert_eq!(s.reconstruct(title), title);
        }
    }

    #[test]
    fn evidence_accumulates() {
        let s = scorer();
        let res = s.evaluate("Moskva slezam ne verit");
        assert_eq!(res.basis, ScoreBasis::Evidence);
        assert!(res.decision);
        assert_eq!(res.text(), "Москва слезам не верит");
    }

    #[test]
    fn thresholds_by_word_count() {
        let s = scorer();
        assert_eq!(s.score("Brat").threshold, 4.0);
        assert_eq!(s.score("Interstellar").threshold, 3.0);
        assert_eq!(s.score("Taxi Driver").threshold, 2.5);
        assert_eq!(s.score("One Two Three").threshold, 2.0);
    }

    #[test]
    fn decision_matches_threshold() {
        let s = scorer();
        for title in [
            "Brat",
            "Moskva slezam ne verit",
            "The Office",
            "Ironiya sudby",
            "Igra prestolov",
            "",
            "1923",
        ] {
            let res = s.score(title);
            assert_eq!(res.decision, res.score >= res.threshold, "{title}");
        }
    }

    #[test]
    fn non_latin_passes_through() {
        let s = scorer();
        let res = s.evaluate("Игра престолов");
        assert_eq!(res.basis, ScoreBasis::NotLatin);
        assert!(!res.decision);
        assert_eq!(res.text(), "Игра престолов");
        assert_eq!(s.reconstruct("Amélie"), "Amélie");
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let s = scorer();
        for title in ["Podslushano v Rybinske", "Moskva slezam ne verit", "The Matrix"] {
            let once = s.reconstruct(title);
            assert_eq!(s.reconstruct(&once), once, "{title}");
        }
    }
}
