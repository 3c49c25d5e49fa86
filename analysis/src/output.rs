use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::{AnalysisError, Result};
use crate::query::{Answer, Query};

/// Written in place of an empty common-influencer list.
pub const NO_INFLUENCERS: &str = "0";

/// Written in place of a distance when no retweet path exists.
pub const UNREACHABLE: &str = "Infinity.";

#[derive(Serialize)]
struct AnswerRecord<'a> {
    query: &'static str,
    user_a: &'a str,
    user_b: &'a str,
    result: ResultValue<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResultValue<'a> {
    Users(Vec<&'a str>),
    /// `null` when unreachable.
    Distance(Option<u32>),
}

/// Serializes answered queries in the configured format.
pub struct AnswerWriter<W: Write> {
    out: W,
    format: OutputFormat,
    path: PathBuf,
}

impl<W: Write> AnswerWriter<W> {
    /// `path` is only used to label I/O errors.
    pub fn new(out: W, format: OutputFormat, path: &Path) -> Self {
        Self {
            out,
            format,
            path: path.to_path_buf(),
        }
    }

    pub fn write(&mut self, query: &Query, answer: &Answer) -> Result<()> {
        match self.format {
            OutputFormat::Text => self
                .write_text(query, answer)
                .map_err(|e| AnalysisError::io(&self.path, e)),
            OutputFormat::Json => self.write_json(query, answer),
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out
            .flush()
            .map_err(|e| AnalysisError::io(&self.path, e))?;
        Ok(self.out)
    }

    fn write_text(&mut self, query: &Query, answer: &Answer) -> std::io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "query: {} {} {}", query.kind, query.user_a, query.user_b)?;
        writeln!(out, "<result>")?;
        match answer {
            Answer::Influencers(users) if users.is_empty() => writeln!(out, "{}", NO_INFLUENCERS)?,
            Answer::Influencers(users) => {
                for user in users {
                    writeln!(out, "{}", user)?;
                }
            }
            Answer::Retweets(Some(distance)) => writeln!(out, "{}", distance)?,
            Answer::Retweets(None) => writeln!(out, "{}", UNREACHABLE)?,
        }
        writeln!(out, "</result>")?;
        writeln!(out)
    }

    fn write_json(&mut self, query: &Query, answer: &Answer) -> Result<()> {
        let result = match answer {
            Answer::Influencers(users) => ResultValue::Users(users.iter().map(|u| u.label()).collect()),
            Answer::Retweets(distance) => ResultValue::Distance(*distance),
        };
        let record = AnswerRecord {
            query: query.kind.as_str(),
            user_a: query.user_a.label(),
            user_b: query.user_b.label(),
            result,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out).map_err(|e| AnalysisError::io(&self.path, e))
    }
}
