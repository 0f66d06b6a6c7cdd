//! Source tree guideline checks
//!
//! Five independent checks run in a fixed order:
//!
//! 1. every library header has a sibling `.cpp`
//! 2. every source carries the LGPL license in its first lines
//! 3. the Python binding has no undocumented items
//! 4. every source matches the formatter's output
//! 5. no module declares a dependency it already gets transitively
//!
//! Each check reports its findings one by one and returns a count; the
//! total is their sum. With correction enabled, checks 1, 2 and 4 fix the
//! files they flag. Correction is independent of dry-run.

use serde::Serialize;
use std::path::Path;

pub mod deps;
pub mod docs;
pub mod format;
pub mod license;
pub mod pairing;
pub mod sources;
pub mod templates;

use crate::cli::Output;
use crate::config::{ActContext, LayoutConfig};
use crate::error::ActResult;
use deps::{DependencyChecker, ModuleGraph, TransitiveChecker};
use docs::{CommandDocLinter, DocLinter};
use format::{ClangFormat, Formatter};

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    /// Label used in the summary line, e.g. "missing cppfile"
    pub kind: &'static str,
    pub violations: usize,
    pub corrected: usize,
    /// The check could not run at all
    pub skipped: bool,
}

impl CheckResult {
    pub fn new(name: &'static str, kind: &'static str) -> Self {
        Self {
            name,
            kind,
            violations: 0,
            corrected: 0,
            skipped: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GuidelineReport {
    pub checks: Vec<CheckResult>,
}

impl GuidelineReport {
    pub fn total(&self) -> usize {
        self.checks.iter().map(|check| check.violations).sum()
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }
}

pub struct GuidelineEngine {
    layout: LayoutConfig,
    formatter: Box<dyn Formatter>,
    doc_linter: Option<Box<dyn DocLinter>>,
    dependency_checker: Box<dyn DependencyChecker>,
    graph: ModuleGraph,
    output: Output,
}

impl GuidelineEngine {
    /// Engine with no documentation linter, no formatter and an empty graph
    pub fn new(layout: LayoutConfig, output: Output) -> Self {
        Self {
            layout,
            formatter: Box::new(ClangFormat::new(None)),
            doc_linter: None,
            dependency_checker: Box::new(TransitiveChecker),
            graph: ModuleGraph::default(),
            output,
        }
    }

    /// Engine wired to the tools found in `ctx`
    pub fn from_context(ctx: &ActContext, graph_path: &Path, output: Output) -> ActResult<Self> {
        let mut engine = Self::new(ctx.layout.clone(), output)
            .with_formatter(ClangFormat::new(ctx.tools.clang_format.clone()))
            .with_graph(ModuleGraph::load(graph_path)?);

        if let Some(command) = &ctx.tools.doc_linter {
            engine = engine.with_doc_linter(CommandDocLinter::new(
                command.clone(),
                &ctx.layout.root,
                ctx.platform,
            ));
        }

        Ok(engine)
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_doc_linter(mut self, linter: impl DocLinter + 'static) -> Self {
        self.doc_linter = Some(Box::new(linter));
        self
    }

    pub fn with_dependency_checker(mut self, checker: impl DependencyChecker + 'static) -> Self {
        self.dependency_checker = Box::new(checker);
        self
    }

    pub fn with_graph(mut self, graph: ModuleGraph) -> Self {
        self.graph = graph;
        self
    }

    /// Run all checks and return their results in order
    pub fn run(&self, auto_correct: bool) -> ActResult<GuidelineReport> {
        let output = &self.output;
        if auto_correct {
            output.section_header("[aGrUM guideline (with correction)]");
        } else {
            output.section_header("[aGrUM guideline]");
        }

        let mut report = GuidelineReport::default();

        output.notif("[(1)] a .cpp file for every .h file");
        self.record(&mut report, pairing::check_cpp_files(&self.layout, auto_correct, output)?);

        output.notif("[(2)] check for LGPL license");
        self.record(&mut report, license::check_license(&self.layout, auto_correct, output)?);

        output.notif("[(3)] check for missing documentation in pyAgrum");
        self.record(&mut report, self.check_docs(auto_correct));

        output.notif("[(4)] check for format");
        self.record(
            &mut report,
            format::check_format(&self.layout, self.formatter.as_ref(), auto_correct, output)?,
        );

        output.notif("[(5)] check for deps");
        self.record(&mut report, self.check_dependencies());

        Ok(report)
    }

    /// Store a result, printing its summary line when it found anything
    fn record(&self, report: &mut GuidelineReport, result: CheckResult) {
        let nb = result.violations;
        if nb > 0 {
            self.output.error(&format!(
                "{} {} error{}",
                nb,
                result.kind,
                if nb > 1 { "s" } else { "" }
            ));
        }
        report.checks.push(result);
    }

    fn check_docs(&self, auto_correct: bool) -> CheckResult {
        let mut result = CheckResult::new("documentation", "missing documentation");
        let Some(linter) = &self.doc_linter else {
            self.output.warning("No documentation linter configured, check skipped");
            result.skipped = true;
            return result;
        };

        match linter.missing_doc_count(auto_correct, &self.output) {
            Ok(count) => result.violations = count,
            Err(e) => {
                self.output.error(&format!("Documentation linter failed: {e}"));
                result.skipped = true;
            }
        }
        result
    }

    fn check_dependencies(&self) -> CheckResult {
        let mut result = CheckResult::new("dependencies", "redundant dependency");
        for redundancy in self.dependency_checker.redundant_dependencies(&self.graph) {
            self.output.error(&format!(
                "[{}] depends on [{}] which is already provided by [{}]",
                redundancy.module, redundancy.dependency, redundancy.via
            ));
            result.violations += 1;
        }
        result
    }
}
