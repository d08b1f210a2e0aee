//! Heading-boundary text chunker.
//!
//! Splits a [`Document`] into [`Chunk`]s at heading lines so that each
//! chunk approximates one section and a citation (`path:line`) points at
//! something a reader recognises.
//!
//! # Algorithm
//!
//! 1. Split the text into lines, keeping each line terminator.
//! 2. Accumulate lines into a buffer.
//! 3. When a line whose left-trimmed content starts with the heading sigil
//!    arrives and the buffer is non-empty, flush the buffer as a chunk and
//!    start a new one at that line.
//! 4. Flush whatever remains at end of document.
//!
//! A heading on line 1 therefore never produces an empty leading chunk,
//! and an empty document yields no chunks at all.
//!
//! # Example
//!
//! ```rust
//! use docqa_core::chunk::{chunk_document, DEFAULT_HEADING_SIGIL};
//! use docqa_core::models::Document;
//!
//! let doc = Document::new("a.md", "# Intro\ncats\n# Outro\ndogs\n");
//! let chunks = chunk_document(&doc, DEFAULT_HEADING_SIGIL);
//! assert_eq!(chunks.len(), 2);
//! assert_eq!((chunks[1].start_line, chunks[1].end_line), (3, 4));
//! ```

use crate::models::{Chunk, Document};

/// Marker that opens a new section when it starts a (left-trimmed) line.
pub const DEFAULT_HEADING_SIGIL: &str = "#";

/// Split `doc` into heading-delimited chunks.
///
/// # Guarantees
///
/// - Chunks are in document order and never overlap.
/// - Concatenating every chunk's `text` reproduces `doc.text` exactly.
/// - Line ranges cover `1..=line_count` with no gaps.
pub fn chunk_document(doc: &Document, heading_sigil: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buf = String::new();
    let mut start_line = 1;
    let mut line_no = 0;

    for line in doc.text.split_inclusive('\n') {
        line_no += 1;
        if is_heading(line, heading_sigil) && !buf.is_empty() {
            chunks.push(make_chunk(doc, start_line, line_no - 1, &buf));
            buf.clear();
            start_line = line_no;
        }
        buf.push_str(line);
    }

    if !buf.is_empty() {
        chunks.push(make_chunk(doc, start_line, line_no, &buf));
    }

    chunks
}

fn is_heading(line: &str, sigil: &str) -> bool {
    line.trim_start().starts_with(sigil)
}

fn make_chunk(doc: &Document, start_line: usize, end_line: usize, text: &str) -> Chunk {
    Chunk {
        source_path: doc.path.clone(),
        start_line,
        end_line,
        text: text.to_string(),
    }
}
