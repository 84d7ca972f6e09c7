// tags/tag_file.rs

use std::time::Instant;

use enigma_identity::Span;

use super::TagDefinition;
use crate::errors::TagError;

/// All records of one tags file, in file order
#[derive(Debug, Clone)]
pub struct TagFile {
    path: String,
    tags: Vec<TagDefinition>,
    /// `!_TAG_FILE_SORTED` is 1 (sorted) or 2 (case-folded)
    sorted: bool,
}

impl TagFile {
    /// Parse the text of a tags file. Pseudo tags (`!_TAG_...`) and blank
    /// lines are skipped; every malformed record is reported.
    pub fn parse(path: &str, source: &str) -> Result<TagFile, Vec<TagError>> {
        let started = Instant::now();
        let mut tags = Vec::new();
        let mut errors = Vec::new();
        let mut offset = 0;
        let mut sorted = false;

        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let record = raw.trim_end_matches(['\n', '\r']);
            let span = Span::new(offset, offset + record.len(), index as u32 + 1);
            offset += raw.len();

            if let Some(value) = record.strip_prefix("!_TAG_FILE_SORTED\t") {
                sorted = value.split('\t').next().is_some_and(|flag| flag != "0");
                continue;
            }
            if record.is_empty() || record.starts_with("!_") {
                continue;
            }
            match TagDefinition::parse(record, span) {
                Ok(tag) => tags.push(tag),
                Err(err) => {
                    tracing::debug!(line = span.line, "rejected tag record");
                    errors.push(err);
                }
            }
        }

        tracing::debug!(
            path,
            tags = tags.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "parsed tags file"
        );

        if errors.is_empty() {
            Ok(TagFile {
                path: path.to_string(),
                tags,
                sorted,
            })
        } else {
            Err(errors)
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tags(&self) -> &[TagDefinition] {
        &self.tags
    }

    /// Whether records are ordered by name rather than by source position
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }
}
