//! # doxyvb
//!
//! A Doxygen input filter for Visual Basic 6 sources.
//!
//! Doxygen has no VB6 front end. This crate reads a VB6 module (`.bas`, `.cls`, `.frm`),
//! keeps only what documentation needs (doc comments and declaration lines) and rewrites it
//! as C#-like pseudo source that Doxygen's default C# parser understands. Procedure bodies
//! never reach the output.
//!
//! File Layout
//!
//! src/vb6
//!   ├── source       Loading and decoding, logical line joining
//!   ├── tokens       Logos tokens for comment stripping
//!   ├── patterns     Anchored declaration regexes
//!   ├── declaration  Declaration data model
//!   ├── signature    Declaration and argument matching
//!   ├── classify     Per-line classification
//!   ├── header       Module pre-scan (name, doc lines, interface marker)
//!   ├── scanner      The state machine, producing filter events
//!   ├── emit         C# pseudo syntax rendering
//!   ├── filter       Lazy line output (scanner + emitter)
//!   └── formats      Output format selection (csharp, json, yaml)

pub mod vb6;
