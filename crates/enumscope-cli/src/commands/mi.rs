//! MI command - answer GDB/MI variable requests on stdin/stdout
//!
//! Each non-blank input line gets one result record, followed by the
//! `(gdb)` prompt. The loop ends after `-gdb-exit` or at end of input.

use anyhow::Result;
use enumscope_runtime::debugger::{InspectionSession, TypeResolver};
use std::io::{self, BufRead, Write};

use super::CatalogOptions;

const PROMPT: &str = "(gdb)";

/// Arguments for the mi command
#[derive(Debug, Clone, Default)]
pub struct MiArgs {
    pub catalog: CatalogOptions,
}

/// Run the mi command
pub fn run(args: MiArgs) -> Result<()> {
    let mut session = args.catalog.session()?;
    tracing::debug!(variables = session.frame().len(), "MI session started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut session, stdin.lock(), stdout.lock())
}

/// Answer MI requests from `input` until exit or end of input.
pub fn serve<R, I, O>(session: &mut InspectionSession<R>, input: I, mut output: O) -> Result<()>
where
    R: TypeResolver,
    I: BufRead,
    O: Write,
{
    writeln!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = session.handle_mi_line(&line);
        writeln!(output, "{}", reply.text)?;
        if reply.exit {
            output.flush()?;
            break;
        }
        writeln!(output, "{PROMPT}")?;
        output.flush()?;
    }
    Ok(())
}
