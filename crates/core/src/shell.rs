//! Interactive read-loop over generic reader/writer pairs so tests
//! can drive it with in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::translate::Translator;

pub const EXIT_SENTINEL: &str = "exit";

/// Runs the prompt/translate loop until EOF or the exit sentinel.
///
/// Blank or whitespace-only lines ask for re-entry without touching
/// the translator. Translation failures are printed and the loop
/// continues; only the sentinel (case-insensitive) or EOF ends it.
pub fn run_session<R, W, T>(reader: &mut R, writer: &mut W, translator: &T) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    T: Translator,
{
    loop {
        write!(writer, "\nEnglish: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);

        if input.eq_ignore_ascii_case(EXIT_SENTINEL) {
            break;
        }
        if input.trim().is_empty() {
            writeln!(writer, "Please enter some text to translate.")?;
            continue;
        }

        match translator.translate(input) {
            Ok(text) => writeln!(writer, "Japanese: {text}")?,
            Err(err) => {
                tracing::error!(error = %err, "translation attempt failed");
                writeln!(writer, "Japanese: {err}")?;
            }
        }
    }

    Ok(())
}
