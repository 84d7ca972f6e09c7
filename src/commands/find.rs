// src/commands/find.rs

use std::path::Path;
use std::process::ExitCode;

use super::common::load_or_report;
use crate::cli::ColorMode;
use crate::sema::ModelQuery;

/// List declarations whose name matches `query`.
///
/// Exits with failure when nothing matches.
pub fn find_in_file(path: &Path, query: &str, color_mode: ColorMode) -> ExitCode {
    let Some(analyzed) = load_or_report(path, color_mode) else {
        return ExitCode::FAILURE;
    };

    let hits = ModelQuery::new(&analyzed.model).find(query);
    if hits.is_empty() {
        eprintln!("no declarations match '{}'", query);
        return ExitCode::FAILURE;
    }
    for hit in hits {
        println!("{}:{}\t{}\t{}", analyzed.file_path, hit.line, hit.kind, hit.name);
    }
    ExitCode::SUCCESS
}
