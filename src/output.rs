use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::Value;

use crate::models::ApiResponse;

/// Where command documents go.
///
/// Handlers write through this trait instead of `println!` so tests can
/// capture what would have been printed.
pub trait Output: Send + Sync {
    /// An informational record (progress, rate-limit pauses, conflicts).
    fn info(&self, record: &Value);

    /// The final `{"status_code", "data"}` document of a command.
    fn result(&self, response: &ApiResponse);
}

/// Writes informational records as single JSON lines and results as
/// pretty-printed JSON, both on stdout. Non-ASCII text is `\u` escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn info(&self, record: &Value) {
        match to_ascii_json(record, false) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!(error = %e, "failed to encode info record"),
        }
    }

    fn result(&self, response: &ApiResponse) {
        match to_ascii_json(response, true) {
            Ok(doc) => println!("{doc}"),
            Err(e) => tracing::error!(error = %e, "failed to encode result document"),
        }
    }
}

/// Serialize `value` as JSON containing only ASCII characters.
pub fn to_ascii_json<T>(value: &T, pretty: bool) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    if pretty {
        let formatter = AsciiEscape(PrettyFormatter::new());
        value.serialize(&mut serde_json::Serializer::with_formatter(&mut buf, formatter))?;
    } else {
        let formatter = AsciiEscape(CompactFormatter);
        value.serialize(&mut serde_json::Serializer::with_formatter(&mut buf, formatter))?;
    }
    // Only ASCII bytes are ever written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Wraps a formatter, escaping every non-ASCII char as UTF-16 `\uXXXX` units.
struct AsciiEscape<F>(F);

impl<F: Formatter> Formatter for AsciiEscape<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}
