//! Filter state machine
//!
//!     The scanner walks the logical lines of a unit once and turns them into [`Event`]s.
//!     It owns the pending doc block and the current state:
//!
//!         Scanning    top level; doc lines are buffered, declarations emitted
//!         Procedure   inside a Function/Sub/Property body; everything is skipped up to
//!                     the matching `End` line. Headers too complex to parse still open a
//!                     body, they only produce no declaration.
//!         EnumBody    members become events, `'*` lines document the next member
//!         TypeBody    same for the fields of a user-defined type
//!
//!     The pending doc block is handed out exactly once: it moves into the next
//!     declaration (or member) event and the buffer is left empty. Doc lines that never
//!     find a declaration are dropped and counted in [`FilterStats`].
//!
//!     A unit without any non-blank line produces no events at all.

use super::classify::{classify_line, BlockKind, LineKind};
use super::declaration::{DeclKind, Declaration, Member};
use super::header::ModuleHeader;
use super::signature::{match_enum_member, match_type_field};
use super::source::{LogicalLines, SourceUnit};
use super::tokens::strip_comment;
use serde::Serialize;
use std::collections::VecDeque;

/// Output of the scanner, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Always first (unless the unit is blank)
    ModuleStart(ModuleHeader),
    /// A top-level declaration and the doc lines attached to it
    Declaration { doc: Vec<String>, decl: Declaration },
    /// A member of the enum or type opened by the last declaration
    Member { doc: Vec<String>, member: Member },
    /// Closes the enum or type block
    BlockEnd,
    /// Always last (unless the unit is blank)
    ModuleEnd,
}

/// Counters kept while scanning
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Top-level declarations emitted
    pub declarations: usize,
    /// Enum members and type fields emitted
    pub members: usize,
    /// Non-empty doc blocks attached to a declaration or member
    pub doc_blocks_attached: usize,
    /// `'*` lines that never found a declaration
    pub doc_lines_dropped: usize,
    /// Non-blank lines skipped as code
    pub suppressed_lines: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Scanning,
    Procedure(BlockKind),
    EnumBody,
    TypeBody,
    Finished,
}

/// Event iterator over one source unit
pub struct Scanner<'a> {
    unit: &'a SourceUnit,
    lines: LogicalLines<'a>,
    state: State,
    pending: Vec<String>,
    queued: VecDeque<Event>,
    stats: FilterStats,
}

impl<'a> Scanner<'a> {
    pub fn new(unit: &'a SourceUnit) -> Self {
        let state = if unit.is_blank() {
            State::Finished
        } else {
            State::Start
        };
        Scanner {
            unit,
            lines: unit.logical_lines(),
            state,
            pending: Vec::new(),
            queued: VecDeque::new(),
            stats: FilterStats::default(),
        }
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    fn step(&mut self, line: &str) -> Option<Event> {
        match self.state {
            State::Procedure(kind) => {
                self.skip_body_line(line, kind);
                None
            }
            State::EnumBody => self.block_line(line, BlockKind::Enum),
            State::TypeBody => self.block_line(line, BlockKind::Type),
            _ => self.top_level_line(line),
        }
    }

    fn top_level_line(&mut self, line: &str) -> Option<Event> {
        match classify_line(line) {
            LineKind::Blank | LineKind::Comment | LineKind::ModuleDoc(_) => None,
            LineKind::InterfaceMarker => None,
            LineKind::MemberDoc(text) => {
                self.pending.push(text.to_string());
                None
            }
            LineKind::Declaration(decl) => {
                self.state = state_after(&decl);
                self.stats.declarations += 1;
                tracing::debug!(kind = %decl.kind, name = %decl.name, "declaration");
                Some(Event::Declaration {
                    doc: self.take_doc(),
                    decl,
                })
            }
            LineKind::ProcedureStart(kind) => {
                tracing::debug!(line, "skipping procedure with an unrecognized header");
                self.state = State::Procedure(kind);
                self.drop_pending("unrecognized procedure header");
                self.suppress(line);
                None
            }
            LineKind::EndBlock(_) | LineKind::Other => {
                self.suppress(line);
                None
            }
        }
    }

    fn skip_body_line(&mut self, line: &str, kind: BlockKind) {
        match classify_line(line) {
            LineKind::EndBlock(end) if end == kind => self.state = State::Scanning,
            LineKind::Blank => {}
            _ => self.suppress(line),
        }
    }

    fn block_line(&mut self, line: &str, kind: BlockKind) -> Option<Event> {
        match classify_line(line) {
            LineKind::EndBlock(end) if end == kind => {
                self.state = State::Scanning;
                self.drop_pending("end of block");
                Some(Event::BlockEnd)
            }
            LineKind::Blank
            | LineKind::Comment
            | LineKind::ModuleDoc(_)
            | LineKind::InterfaceMarker => None,
            LineKind::MemberDoc(text) => {
                self.pending.push(text.to_string());
                None
            }
            _ => {
                let code = strip_comment(line);
                let member = match kind {
                    BlockKind::Enum => match_enum_member(code),
                    _ => match_type_field(code),
                };
                match member {
                    Some(member) => {
                        self.stats.members += 1;
                        Some(Event::Member {
                            doc: self.take_doc(),
                            member,
                        })
                    }
                    None => {
                        self.suppress(line);
                        None
                    }
                }
            }
        }
    }

    /// Hand the pending doc block out, leaving the buffer empty
    fn take_doc(&mut self) -> Vec<String> {
        let doc = std::mem::take(&mut self.pending);
        if !doc.is_empty() {
            self.stats.doc_blocks_attached += 1;
        }
        doc
    }

    fn drop_pending(&mut self, reason: &str) {
        if !self.pending.is_empty() {
            tracing::debug!(lines = self.pending.len(), reason, "dropping unattached doc lines");
            self.stats.doc_lines_dropped += self.pending.len();
            self.pending.clear();
        }
    }

    fn suppress(&mut self, line: &str) {
        tracing::trace!(line, "suppressed");
        self.stats.suppressed_lines += 1;
    }

    fn finish(&mut self) {
        if matches!(self.state, State::EnumBody | State::TypeBody) {
            self.queued.push_back(Event::BlockEnd);
        }
        self.drop_pending("end of input");
        self.queued.push_back(Event::ModuleEnd);
        self.state = State::Finished;
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.queued.pop_front() {
                return Some(event);
            }
            match self.state {
                State::Finished => return None,
                State::Start => {
                    self.state = State::Scanning;
                    return Some(Event::ModuleStart(ModuleHeader::scan(self.unit)));
                }
                _ => {}
            }
            match self.lines.next() {
                Some(line) => {
                    if let Some(event) = self.step(&line) {
                        return Some(event);
                    }
                }
                None => self.finish(),
            }
        }
    }
}

fn state_after(decl: &Declaration) -> State {
    match decl.kind {
        DeclKind::Function => State::Procedure(BlockKind::Function),
        DeclKind::Sub => State::Procedure(BlockKind::Sub),
        DeclKind::PropertyGet | DeclKind::PropertyLet | DeclKind::PropertySet => {
            State::Procedure(BlockKind::Property)
        }
        DeclKind::Enum => State::EnumBody,
        DeclKind::Type => State::TypeBody,
        DeclKind::Constant | DeclKind::Variable => State::Scanning,
    }
}

/// A declaration with its doc lines and block members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentedDeclaration {
    pub doc: Vec<String>,
    pub declaration: Declaration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<DocumentedMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentedMember {
    pub doc: Vec<String>,
    pub member: Member,
}

/// Everything the scanner found in one unit, for structured output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleReport {
    pub header: Option<ModuleHeader>,
    pub declarations: Vec<DocumentedDeclaration>,
    pub stats: FilterStats,
}

/// Run the scanner to completion and collect its events
pub fn collect_report(unit: &SourceUnit) -> ModuleReport {
    let mut scanner = Scanner::new(unit);
    let mut header = None;
    let mut declarations: Vec<DocumentedDeclaration> = Vec::new();

    for event in scanner.by_ref() {
        match event {
            Event::ModuleStart(h) => header = Some(h),
            Event::Declaration { doc, decl } => declarations.push(DocumentedDeclaration {
                doc,
                declaration: decl,
                members: Vec::new(),
            }),
            Event::Member { doc, member } => {
                if let Some(last) = declarations.last_mut() {
                    last.members.push(DocumentedMember { doc, member });
                }
            }
            Event::BlockEnd | Event::ModuleEnd => {}
        }
    }

    ModuleReport {
        header,
        declarations,
        stats: scanner.stats(),
    }
}
