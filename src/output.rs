use std::io::{self, Write};

/// Writes `message` to stdout and, if given, to `writer` as well.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    println_to(&mut io::stdout(), message, writer)
}

fn println_to(
    out: &mut dyn Write,
    message: &str,
    writer: &mut Option<&mut dyn Write>,
) -> io::Result<()> {
    writeln!(out, "{message}")?;
    out.flush()?;

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
