//! Interactive read-query loop.

use crate::output::{render, Format};
use anyhow::Result;
use lsi_core::{QueryOrchestrator, SnippetSource};
use std::io::{BufRead, Write};

/// Ends the session.
pub const SENTINEL: &str = "ZZZ";

/// Printed in place of results when a line cannot be decoded.
pub const INVALID_UTF8: &str = "Query is not valid UTF-8; skipped.";

/// Reads queries until `ZZZ` or end of input. A line that is not valid UTF-8
/// is skipped with a diagnostic instead of ending the session.
pub fn run<S, R, W>(orchestrator: &QueryOrchestrator<'_, S>, format: Format, mut input: R, mut out: W) -> Result<()>
where
    S: SnippetSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        if format == Format::Text {
            write!(out, "\nEnter your query ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 { break; }
        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(bytes = buf.len(), "skipping query that is not valid UTF-8");
            if format == Format::Text {
                writeln!(out, "{INVALID_UTF8}")?;
            }
            continue;
        };
        let query = line.trim_end_matches(['\n', '\r']);
        if query == SENTINEL { break; }
        if query.is_empty() {
            if format == Format::Text {
                writeln!(out, "No query entered. Enter some query.")?;
            }
            continue;
        }
        let outcome = orchestrator.handle(query);
        let rendered = render(format, query, &outcome);
        if format == Format::Json {
            writeln!(out, "{rendered}")?;
        } else {
            write!(out, "{rendered}")?;
        }
    }
    if format == Format::Text {
        writeln!(out, "\nThank you for trying out the system.")?;
    }
    Ok(())
}
