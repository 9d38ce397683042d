//! The filter pipeline: scanner events in, C# lines out.
//!
//! [`Filter`] is lazy. Lines are produced as the scanner reaches the declarations that need
//! them; only the module header pre-scan reads the whole unit up front.

use super::emit::{CSharpEmitter, EmitOptions};
use super::scanner::{FilterStats, Scanner};
use super::source::SourceUnit;
use std::collections::VecDeque;

/// Iterator over the output lines for one source unit
pub struct Filter<'a> {
    scanner: Scanner<'a>,
    emitter: CSharpEmitter,
    outbox: VecDeque<String>,
}

impl<'a> Filter<'a> {
    pub fn new(unit: &'a SourceUnit, options: EmitOptions) -> Self {
        Filter {
            scanner: Scanner::new(unit),
            emitter: CSharpEmitter::new(options),
            outbox: VecDeque::new(),
        }
    }

    /// Counters so far; final once the iterator is exhausted
    pub fn stats(&self) -> FilterStats {
        self.scanner.stats()
    }
}

impl<'a> Iterator for Filter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.outbox.pop_front() {
                return Some(line);
            }
            let event = self.scanner.next()?;
            self.outbox.extend(self.emitter.emit(event));
        }
    }
}

/// Run the filter to completion
pub fn filter_source(unit: &SourceUnit, options: &EmitOptions) -> Vec<String> {
    let mut filter = Filter::new(unit, options.clone());
    let lines: Vec<String> = filter.by_ref().collect();
    let stats = filter.stats();
    tracing::debug!(
        declarations = stats.declarations,
        members = stats.members,
        doc_blocks = stats.doc_blocks_attached,
        dropped_doc_lines = stats.doc_lines_dropped,
        suppressed = stats.suppressed_lines,
        "filter finished"
    );
    lines
}
