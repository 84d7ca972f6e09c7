// src/commands/check.rs

use std::io;
use std::path::Path;
use std::process::ExitCode;

use super::common::{analyze_file, render_pipeline_error, resolve_model};
use crate::cli::{ColorMode, expand_paths};

/// Ingest each tags file and resolve every record in it
pub fn check_files(patterns: &[String], deny_warnings: bool, color_mode: ColorMode) -> ExitCode {
    let files = match expand_paths(patterns) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if files.is_empty() {
        eprintln!("error: no tags files found");
        return ExitCode::FAILURE;
    }

    let mut had_error = false;
    let mut warnings = 0;

    for path in &files {
        match check_single_file(path, color_mode) {
            Ok(count) => warnings += count,
            Err(()) => had_error = true,
        }
    }

    if had_error || (deny_warnings && warnings > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Check a single file, returning the number of warnings on success
fn check_single_file(path: &Path, color_mode: ColorMode) -> Result<usize, ()> {
    let file_path = path.to_string_lossy();
    let analyzed = match analyze_file(path) {
        Ok(analyzed) => analyzed,
        Err((source, e)) => {
            render_pipeline_error(&e, &file_path, &source, &mut io::stderr(), color_mode);
            return Err(());
        }
    };

    analyzed.render_warnings(&mut io::stderr(), color_mode);
    if let Err(e) = resolve_model(&analyzed.model) {
        render_pipeline_error(
            &e,
            &file_path,
            &analyzed.source,
            &mut io::stderr(),
            color_mode,
        );
        return Err(());
    }

    let model = &analyzed.model;
    let abstract_records = model
        .resolve_all()
        .into_iter()
        .filter(|(_, result)| result.as_ref().is_ok_and(|r| !r.concrete))
        .count();
    tracing::info!(
        file = %file_path,
        enums = model.enums().len(),
        records = model.graph().len(),
        abstract_records,
        "checked"
    );
    println!(
        "{}: ok ({} enums, {} records, {} abstract)",
        file_path,
        model.enums().len(),
        model.graph().len(),
        abstract_records
    );
    Ok(model.warnings().len())
}
