// src/commands/inspect.rs

use std::fmt::Write;
use std::path::Path;
use std::process::ExitCode;

use enigma_identity::NodeId;

use super::common::load_or_report;
use crate::cli::ColorMode;
use crate::sema::{DeclRef, EnumInfo, Model};

/// Print the model built from a tags file
pub fn inspect_file(path: &Path, record: Option<&str>, color_mode: ColorMode) -> ExitCode {
    let Some(analyzed) = load_or_report(path, color_mode) else {
        return ExitCode::FAILURE;
    };
    analyzed.render_warnings(&mut std::io::stderr(), color_mode);

    let printer = ModelPrinter::new(&analyzed.model);
    let output = match record {
        Some(name) => match analyzed.model.record_by_name(name) {
            Some(id) => printer.print_record(id),
            None => {
                eprintln!("error: no record named '{}' in {}", name, path.display());
                return ExitCode::FAILURE;
            }
        },
        None => printer.print_model(),
    };
    print!("{}", output);
    ExitCode::SUCCESS
}

/// Plain-text rendering of a model, one declaration per block
pub struct ModelPrinter<'a> {
    model: &'a Model,
}

impl<'a> ModelPrinter<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }

    pub fn print_model(&self) -> String {
        let blocks: Vec<String> = self
            .model
            .declarations()
            .iter()
            .map(|decl| match decl {
                DeclRef::Enum(id) => self.print_enum(self.model.enum_info(*id)),
                DeclRef::Record(id) => self.print_record(*id),
            })
            .collect();
        blocks.join("\n")
    }

    fn name(&self, sym: enigma_identity::Symbol) -> &'a str {
        self.model.interner().resolve(sym)
    }

    fn print_enum(&self, info: &EnumInfo) -> String {
        let mut out = String::new();
        let keyword = if info.is_scoped() { "enum class" } else { "enum" };
        let storage = if info.underlying_explicit {
            "explicit"
        } else {
            "default"
        };
        let _ = writeln!(
            out,
            "{} {} : {} ({}, {} bytes)",
            keyword,
            self.name(info.name),
            info.underlying_type,
            storage,
            info.underlying_type.size_bytes()
        );
        for enumerator in &info.enumerators {
            let _ = writeln!(
                out,
                "  {} = {}",
                self.name(enumerator.name),
                enumerator.position
            );
        }
        out
    }

    pub fn print_record(&self, id: NodeId) -> String {
        let mut out = String::new();
        let graph = self.model.graph();
        let record = graph.record(id);
        let _ = writeln!(out, "{} {}", record.kind.as_str(), self.name(record.name));

        let chain: Vec<&str> = self
            .model
            .ancestors(id)
            .map(|ancestor| self.name(graph.record(ancestor).name))
            .collect();
        if chain.is_empty() {
            let _ = writeln!(out, "  ancestors: (none)");
        } else {
            let _ = writeln!(out, "  ancestors: {}", chain.join(" -> "));
        }

        for field in graph.fields_of(id) {
            let _ = writeln!(
                out,
                "  field {}: {}",
                self.name(field.name),
                self.name(field.ty)
            );
        }

        let interner = self.model.interner();
        for op in graph.operations_of(id) {
            let mut flags = Vec::new();
            if op.is_virtual {
                flags.push("virtual");
            }
            if op.is_pure {
                flags.push("pure");
            }
            if op.is_override {
                flags.push("override");
            }
            if op.has_body {
                flags.push("body");
            }
            let _ = writeln!(
                out,
                "  op {} [{}]",
                op.signature.display(interner),
                flags.join(", ")
            );
        }

        match self.model.resolve(id) {
            Ok(result) if result.concrete => {
                let _ = writeln!(out, "  concrete");
            }
            Ok(result) => {
                let _ = writeln!(out, "  abstract");
                for (signature, origin) in &result.origins {
                    let _ = writeln!(
                        out,
                        "    unresolved {} (declared pure in {})",
                        signature.display(interner),
                        self.name(graph.record(*origin).name)
                    );
                }
            }
            Err(e) => {
                let _ = writeln!(out, "  unresolvable: {}", e);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::analyze_source;

    const FIXTURE: &str = include_str!("../../test/fixtures/Test.tags");

    #[test]
    fn prints_fixture_model() {
        let model = analyze_source(FIXTURE, "Test.tags").unwrap();
        let output = ModelPrinter::new(&model).print_model();

        assert!(output.contains("enum class EnumClass : i8 (explicit, 1 bytes)"));
        assert!(output.contains("enum EnumSimple : i32 (default, 4 bytes)"));
        assert!(output.contains("  ES_Second = 1"));
        assert!(output.contains("class SubTest\n  ancestors: Test"));
        assert!(output.contains("  op PureVirtual() [virtual, pure]"));
        assert!(output.contains("unresolved PureVirtual() (declared pure in Test)"));
    }

    #[test]
    fn prints_single_record() {
        let model = analyze_source(FIXTURE, "Test.tags").unwrap();
        let id = model.record_by_name("SubTest").unwrap();
        let output = ModelPrinter::new(&model).print_record(id);
        assert!(output.starts_with("class SubTest\n"));
        assert!(output.trim_end().ends_with("concrete"));
        assert!(!output.contains("EnumClass"));
    }
}
