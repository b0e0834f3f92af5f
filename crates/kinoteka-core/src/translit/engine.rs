//! Latin → Cyrillic reconstruction for Russian romanisations.

/// Reconstructs the source script of a romanised title.
pub trait Transliterator {
    /// Short name of the source script, used in logs.
    fn script(&self) -> &'static str;

    /// Converts romanised `text` back to the source script. Characters with
    /// no mapping pass through unchanged.
    fn reconstruct(&self, text: &str) -> String;
}

/// Multi-letter sequences, longest first.
const SEQUENCES: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sch", "щ"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ts", "ц"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("yu", "ю"),
    ("ya", "я"),
    ("yo", "ё"),
];

fn single(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => "а",
        'b' => "б",
        'v' | 'w' => "в",
        'g' => "г",
        'd' => "д",
        'e' => "е",
        'z' => "з",
        'i' => "и",
        'j' => "й",
        'k' | 'q' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'f' => "ф",
        'h' => "х",
        'c' => "ц",
        'x' => "кс",
        _ => return None,
    })
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Reverse of the common Russian romanisation (`zh`, `kh`, `shch`, `ya`, …).
///
/// `y` becomes `й` after a vowel or at a word start and `ы` after a
/// consonant; `ye` at a word start or after a vowel becomes `е`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyrillicEngine;

impl CyrillicEngine {
    pub fn new() -> Self {
        Self
    }

    fn match_sequence(lower: &[char], at: usize) -> Option<(&'static str, usize)> {
        SEQUENCES.iter().find_map(|(latin, cyr)| {
            let len = latin.chars().count();
            let end = at + len;
            if end <= lower.len() && lower[at..end].iter().copied().eq(latin.chars()) {
                Some((*cyr, len))
            } else {
                None
            }
        })
    }
}

impl Transliterator for CyrillicEngine {
    fn script(&self) -> &'static str {
        "cyrillic"
    }

    fn reconstruct(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let lower: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();
        let mut out = String::with_capacity(text.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if !c.is_ascii_alphabetic() {
                out.push(c);
                i += 1;
                continue;
            }

            let prev = i.checked_sub(1).map(|p| chars[p]);
            let word_start = prev.is_none_or(|p| !p.is_ascii_alphabetic());
            let after_vowel = prev.is_some_and(is_vowel);

            let (mapped, consumed) = if lower[i] == 'y'
                && lower.get(i + 1) == Some(&'e')
                && (word_start || after_vowel)
            {
                ("е", 2)
            } else if let Some(hit) = Self::match_sequence(&lower, i) {
                hit
            } else if lower[i] == 'y' {
                if word_start || after_vowel {
                    ("й", 1)
                } else {
                    ("ы", 1)
                }
            } else {
                match single(lower[i]) {
                    Some(cyr) => (cyr, 1),
                    None => {
                        out.push(c);
                        i += 1;
                        continue;
                    }
                }
            };

            if c.is_ascii_uppercase() {
                let mut mapped_chars = mapped.chars();
                if let Some(first) = mapped_chars.next() {
                    out.extend(first.to_uppercase());
                    out.extend(mapped_chars);
                }
            } else {
                out.push_str(mapped);
            }
            i += consumed;
        }

        out
    }
}
