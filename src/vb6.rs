//! VB6 filtering
//!
//!     The filter is a single forward pass over one module. Lines are joined into logical
//!     lines (VB's ` _` continuation), classified one at a time, and fed to a small state
//!     machine that buffers doc comments and skips procedure bodies. Every recognized
//!     declaration becomes one event; the emitter turns events into output lines.
//!
//! Comment Markers
//!
//!     '!            module documentation, attached to the synthesized class header
//!     '*            member documentation, attached to the next declaration
//!     '# Interface  render the module as an interface instead of a class
//!
//!     Every other comment is dropped.
//!
//! Laziness
//!
//!     Only the module header needs a look at the whole unit (doc lines, module name,
//!     interface marker and `Implements` can appear anywhere). After that pre-scan the
//!     output is produced line by line through [`Filter`], an `Iterator<Item = String>`.

pub mod classify;
pub mod declaration;
pub mod emit;
pub mod filter;
pub mod formats;
pub mod header;
pub mod patterns;
pub mod scanner;
pub mod signature;
pub mod source;
pub mod tokens;

pub use classify::{classify_line, BlockKind, LineKind};
pub use declaration::{Accessibility, Argument, DeclKind, Declaration, Member};
pub use emit::{CSharpEmitter, EmitOptions};
pub use filter::{filter_source, Filter};
pub use formats::{render, FormatError, OutputFormat};
pub use header::ModuleHeader;
pub use scanner::{collect_report, Event, FilterStats, ModuleReport, Scanner};
pub use source::{LoaderError, ModuleKind, SourceUnit};
