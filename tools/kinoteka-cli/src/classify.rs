//! `kinoteka classify`: one JSON verdict per filename read from stdin.

use std::io::{BufRead, Write};

use anyhow::Result;
use serde::Serialize;

use kinoteka::{ClassificationVerdict, Organizer, Planned, SkipSelector};

#[derive(Debug, Serialize)]
pub struct ClassifyOutput {
    pub input: String,
    pub kind: &'static str,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub skip_reason: Option<String>,
    pub title: Option<String>,
    pub year: Option<u16>,
    pub quality: Option<String>,
    pub canonical: Option<String>,
    pub error: Option<String>,
}

impl ClassifyOutput {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            kind: "unknown",
            season: None,
            episode: None,
            skip_reason: None,
            title: None,
            year: None,
            quality: None,
            canonical: None,
            error: None,
        }
    }
}

/// `organizer` must have catalog lookups disabled.
pub fn classify_line(organizer: &mut Organizer, line: &str) -> ClassifyOutput {
    let mut out = ClassifyOutput::new(line);

    match organizer.classify(line) {
        ClassificationVerdict::Skipped { reason } => {
            out.kind = "skipped";
            out.skip_reason = Some(reason.to_string());
            return out;
        }
        ClassificationVerdict::Movie => out.kind = "movie",
        ClassificationVerdict::Series(se) => {
            out.kind = "series";
            out.season = Some(se.season);
            out.episode = Some(se.episode);
        }
    }

    match organizer.plan_file(line, &mut SkipSelector) {
        Ok(Planned::Place { plan, .. }) => {
            out.title = Some(plan.fields.title);
            out.year = plan.fields.year;
            out.quality = plan.fields.quality.map(|q| q.to_string());
            out.canonical = Some(plan.canonical.to_string());
        }
        Ok(Planned::Skip(reason)) => {
            out.kind = "skipped";
            out.skip_reason = Some(reason.to_string());
        }
        Err(e) => out.error = Some(e.to_string()),
    }
    out
}

pub fn run<R: BufRead, W: Write>(organizer: &mut Organizer, input: R, mut output: W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = classify_line(organizer, line);
        writeln!(output, "{}", serde_json::to_string(&result)?)?;
    }
    output.flush()?;
    Ok(())
}
