//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! - Error limits to keep output readable
//! - Deduplication of identical code + location pairs
//! - Follow-on filtering: messages mentioning the error placeholder type
//!   only restate an earlier failure

use rustc_hash::FxHashSet;

use patc_ir::Span;

use crate::{Diagnostic, ErrorCode};

/// Display form of the error placeholder type.
pub const ERROR_TYPE_DISPLAY: &str = "<error>";

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before stopping (0 = unlimited).
    pub error_limit: usize,
    /// Drop errors whose message mentions the error placeholder type.
    pub filter_follow_on: bool,
    /// Drop a diagnostic if one with the same code and primary span exists.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            filter_follow_on: true,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limits, no filtering (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            filter_follow_on: false,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(ErrorCode, Option<Span>)>,
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            config,
        }
    }

    /// Queue `diag`. Returns `false` if it was filtered.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if is_error && self.config.error_limit > 0 && self.error_count >= self.config.error_limit
        {
            return false;
        }

        if self.config.filter_follow_on && is_error && diag.message.contains(ERROR_TYPE_DISPLAY) {
            return false;
        }

        if self.config.deduplicate && !self.seen.insert((diag.code, diag.primary_span())) {
            return false;
        }

        if is_error {
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Drain in source order; diagnostics without a location go last.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| d.primary_span().map_or((1, 0, 0), |s| (0, s.start, s.end)));
        self.seen.clear();
        self.error_count = 0;
        out
    }
}
