//! Terminal chooser for undecided catalog matches.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::warn;

use kinoteka::{CandidateSelector, CatalogCandidate, CatalogId, MediaKind, Selection};

const DIVIDER: &str = "================================================================";
const SECTION: &str = "----------------------------------------------------------------";
const OVERVIEW_LIMIT: usize = 100;

/// Numbered list on `output`, answers read line by line from `input`.
pub struct TerminalSelector<R, W> {
    input: R,
    output: W,
    id_tag: String,
}

impl TerminalSelector<StdinLock<'static>, Stdout> {
    pub fn stdio(id_tag: impl Into<String>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), id_tag)
    }
}

impl<R: BufRead, W: Write> TerminalSelector<R, W> {
    pub fn new(input: R, output: W, id_tag: impl Into<String>) -> Self {
        Self {
            input,
            output,
            id_tag: id_tag.into(),
        }
    }

    fn render(
        &mut self,
        query: &str,
        kind: MediaKind,
        ranked: &[CatalogCandidate],
        file_hint: Option<&str>,
    ) -> io::Result<()> {
        let out = &mut self.output;
        let label = match kind {
            MediaKind::Movie => "MOVIE",
            MediaKind::Series => "TV SHOW",
        };
        writeln!(out)?;
        writeln!(out, "{DIVIDER}")?;
        writeln!(out, "MULTIPLE {label} MATCHES FOUND")?;
        if let Some(file) = file_hint {
            writeln!(out, "Original File: {file}")?;
        }
        writeln!(out, "Search Query: {query}")?;
        writeln!(out, "{DIVIDER}")?;

        for (i, candidate) in ranked.iter().enumerate() {
            let id = CatalogId::new(self.id_tag.as_str(), candidate.id);
            writeln!(
                out,
                "[{}] {candidate} {id}  popularity {:.1}",
                i + 1,
                candidate.popularity
            )?;
            if let Some(overview) = candidate.overview.as_deref() {
                writeln!(out, "    Overview: {}", truncate(overview, OVERVIEW_LIMIT))?;
            }
        }

        writeln!(out, "{SECTION}")?;
        writeln!(out, "[s] Skip (leave without catalog id)")?;
        writeln!(out, "[q] Quit")?;
        writeln!(out, "{SECTION}")?;
        out.flush()
    }

    /// Reads one answer; `None` on end of input.
    fn read_choice(&mut self, count: usize) -> io::Result<Option<String>> {
        write!(self.output, "Please select an option [1-{count}, s, q]: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}

impl<R: BufRead, W: Write> CandidateSelector for TerminalSelector<R, W> {
    fn select(
        &mut self,
        query: &str,
        kind: MediaKind,
        ranked: &[CatalogCandidate],
        file_hint: Option<&str>,
    ) -> Selection {
        if let Err(e) = self.render(query, kind, ranked, file_hint) {
            warn!(error = %e, "cannot write to terminal, skipping selection");
            return Selection::Skip;
        }

        loop {
            let choice = match self.read_choice(ranked.len()) {
                Ok(Some(choice)) => choice,
                Ok(None) | Err(_) => return Selection::Quit,
            };
            match choice.as_str() {
                "q" => return Selection::Quit,
                "s" => return Selection::Skip,
                n => match n.parse::<usize>() {
                    Ok(n) if (1..=ranked.len()).contains(&n) => return Selection::Pick(n - 1),
                    _ => {
                        let _ = writeln!(self.output, "Invalid choice. Please try again.");
                    }
                },
            }
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn candidates() -> Vec<CatalogCandidate> {
        vec![
            CatalogCandidate {
                id: 1399,
                title: "Game of Thrones".into(),
                date: Some("2011-04-17".into()),
                popularity: 90.0,
                overview: Some("x".repeat(150)),
            },
            CatalogCandidate {
                id: 42,
                title: "Game of Thrones".into(),
                date: None,
                popularity: 70.0,
                overview: None,
            },
        ]
    }

    fn run(answers: &str) -> (Selection, String) {
        let mut output = Vec::new();
        let selection = TerminalSelector::new(Cursor::new(answers.as_bytes()), &mut output, "tmdbid")
            .select("Game of Thrones", MediaKind::Series, &candidates(), Some("GoT.S01E01.mkv"));
        (selection, String::from_utf8(output).unwrap())
    }

    #[test]
    fn picks_by_number() {
        let (selection, output) = run("2\n");
        assert_eq!(selection, Selection::Pick(1));
        assert!(output.contains("MULTIPLE TV SHOW MATCHES FOUND"));
        assert!(output.contains("Original File: GoT.S01E01.mkv"));
        assert!(output.contains("[1] Game of Thrones (2011) [tmdbid-1399]"));
        assert!(output.contains("[2] Game of Thrones (????) [tmdbid-42]  popularity 70.0"));
        assert!(output.contains("Please select an option [1-2, s, q]: "));
    }

    #[test]
    fn long_overviews_are_truncated() {
        let (_, output) = run("s\n");
        assert!(output.contains(&format!("    Overview: {}...", "x".repeat(100))));
        assert!(!output.contains(&"x".repeat(101)));
    }

    #[test]
    fn skip_and_quit() {
        assert_eq!(run("s\n").0, Selection::Skip);
        assert_eq!(run("Q\n").0, Selection::Quit);
    }

    #[test]
    fn invalid_answers_are_repeated() {
        let (selection, output) = run("7\nfoo\n1\n");
        assert_eq!(selection, Selection::Pick(0));
        assert_eq!(output.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn end_of_input_quits() {
        assert_eq!(run("").0, Selection::Quit);
    }
}
