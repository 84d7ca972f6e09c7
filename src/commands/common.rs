// src/commands/common.rs
//! Shared utilities for CLI commands.

use std::io::{self, Write};
use std::path::Path;

use miette::{Diagnostic, NamedSource};

use crate::cli::ColorMode;
use crate::errors::render_to_writer_terminal;
use crate::frontend::TagError;
use crate::frontend::tags::{TagFile, TagLowering};
use crate::sema::{Model, SemanticError, TypeError, TypeWarning, ingest};

/// Errors that can occur while turning a tags file into a model.
///
/// Each variant carries the structured errors of the failed stage so callers
/// can inspect them or render them via [`render_pipeline_error`].
#[derive(Debug)]
pub enum PipelineError {
    /// I/O error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Tag lines could not be parsed
    Tags(Vec<TagError>),
    /// Tags parsed but could not be lowered into declarations
    Lower(Vec<TagError>),
    /// Ingest rejected the declarations
    Sema(Vec<TypeError>),
    /// One or more records could not be resolved
    Resolve(Vec<SemanticError>),
}

/// A loaded tags file and the model built from it
pub struct Analyzed {
    pub file_path: String,
    pub source: String,
    pub model: Model,
}

impl Analyzed {
    /// Render the model's warnings against the tags file.
    pub fn render_warnings(&self, w: &mut dyn Write, color_mode: ColorMode) {
        for warning in self.model.warnings() {
            render_sema_warning(warning, &self.file_path, &self.source, w, color_mode);
        }
    }
}

/// Read, parse, lower and ingest a tags file.
pub fn analyze_file(path: &Path) -> Result<Analyzed, (String, PipelineError)> {
    let file_path = path.to_string_lossy().to_string();
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return Err((String::new(), PipelineError::Io(e))),
    };
    match analyze_source(&source, &file_path) {
        Ok(model) => Ok(Analyzed {
            file_path,
            source,
            model,
        }),
        Err(e) => Err((source, e)),
    }
}

/// Run the pipeline over tags text: parse -> lower -> ingest.
pub fn analyze_source(source: &str, file_path: &str) -> Result<Model, PipelineError> {
    let _span = tracing::info_span!("analyze", file = file_path).entered();

    let tag_file = TagFile::parse(file_path, source).map_err(PipelineError::Tags)?;
    tracing::debug!(tags = tag_file.tags().len(), "parsed");

    let mut lowering = TagLowering::new();
    let program = lowering.lower(&tag_file).map_err(PipelineError::Lower)?;
    tracing::debug!(declarations = program.declarations.len(), "lowered");

    let interner = lowering.into_interner();
    ingest(&program, &interner).map_err(PipelineError::Sema)
}

/// Resolve every record, collecting resolution failures.
pub fn resolve_model(model: &Model) -> Result<(), PipelineError> {
    let errors: Vec<SemanticError> = model
        .resolve_all()
        .into_iter()
        .filter_map(|(_, result)| result.err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Resolve(errors))
    }
}

fn render_diagnostic<D>(
    diagnostic: D,
    file_path: &str,
    source: &str,
    w: &mut dyn Write,
    color_mode: ColorMode,
) where
    D: Diagnostic + Send + Sync + 'static,
{
    let report = miette::Report::new(diagnostic)
        .with_source_code(NamedSource::new(file_path, source.to_string()));
    let _ = render_to_writer_terminal(report.as_ref(), w, color_mode);
}

/// Render a semantic warning to a writer with source context.
fn render_sema_warning(
    warn: &TypeWarning,
    file_path: &str,
    source: &str,
    w: &mut dyn Write,
    color_mode: ColorMode,
) {
    render_diagnostic(warn.warning.clone(), file_path, source, w, color_mode);
}

/// Render a pipeline error to a writer with source context.
pub fn render_pipeline_error(
    err: &PipelineError,
    file_path: &str,
    source: &str,
    w: &mut dyn Write,
    color_mode: ColorMode,
) {
    match err {
        PipelineError::Io(e) => {
            let _ = writeln!(w, "error: could not read '{}': {}", file_path, e);
        }
        PipelineError::Tags(errors) | PipelineError::Lower(errors) => {
            for e in errors {
                render_diagnostic(e.clone(), file_path, source, w, color_mode);
            }
        }
        PipelineError::Sema(errors) => {
            for e in errors {
                render_diagnostic(e.error.clone(), file_path, source, w, color_mode);
            }
        }
        PipelineError::Resolve(errors) => {
            for e in errors {
                render_diagnostic(e.clone(), file_path, source, w, color_mode);
            }
        }
    }
}

/// Load a tags file for a read-only command, rendering any failure to stderr.
pub fn load_or_report(path: &Path, color_mode: ColorMode) -> Option<Analyzed> {
    match analyze_file(path) {
        Ok(analyzed) => Some(analyzed),
        Err((source, e)) => {
            render_pipeline_error(
                &e,
                &path.to_string_lossy(),
                &source,
                &mut io::stderr(),
                color_mode,
            );
            None
        }
    }
}
