//! Output formatting abstraction for text vs JSON rendering
//!
//! All subcommand output flows through [`OutputWriter`] which handles format switching.
//! This keeps format-specific logic out of command handlers entirely.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Abstraction for writing CLI output in different formats.
///
/// Subcommand handlers call `writer.render(&payload)` where `payload`
/// implements both `Serialize` (for JSON) and `Render` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use logsift_cli::cli::OutputFormat;
    /// use logsift_cli::output::OutputWriter;
    ///
    /// let writer = OutputWriter::new(OutputFormat::Text);
    /// ```
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(payload, &mut handle)
    }

    /// Render a payload to an arbitrary writer.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, serialises via `serde_json`.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => {
                payload.render_text(w)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestPayload {
        field1: String,
        field2: u32,
    }

    impl Render for TestPayload {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(w, "Field1: {}", self.field1)?;
            writeln!(w, "Field2: {}", self.field2)?;
            Ok(())
        }
    }

    fn payload() -> TestPayload {
        TestPayload {
            field1: "test value".to_owned(),
            field2: 42,
        }
    }

    #[test]
    fn test_output_writer_text_format() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let mut buffer = Vec::new();
        writer
            .render_to(&payload(), &mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Field1: test value"));
        assert!(output.contains("Field2: 42"));
    }

    #[test]
    fn test_output_writer_json_format() {
        let writer = OutputWriter::new(OutputFormat::Json);
        let mut buffer = Vec::new();
        writer
            .render_to(&payload(), &mut buffer)
            .expect("json rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.ends_with('\n'), "json output should end with newline");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["field1"].as_str(), Some("test value"));
        assert_eq!(parsed["field2"].as_u64(), Some(42));
    }

    #[test]
    fn test_render_text_unicode_content() {
        #[derive(Serialize)]
        struct UnicodePayload {
            text: String,
        }

        impl Render for UnicodePayload {
            fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
                writeln!(w, "{}", self.text)
            }
        }

        let payload = UnicodePayload {
            text: "Unicode: 日本語 한글 🦀".to_owned(),
        };
        let mut buffer = Vec::new();
        OutputWriter::new(OutputFormat::Text)
            .render_to(&payload, &mut buffer)
            .expect("rendering unicode should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("日本語"));
        assert!(output.contains("🦀"));
    }
}
