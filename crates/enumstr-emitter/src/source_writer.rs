//! Indent-aware text buffer for generated source.

/// Accumulates generated source, indenting each line on its first write.
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
    at_line_start: bool,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
            at_line_start: true,
        }
    }

    /// Write text to the current line. Embedded newlines start new,
    /// indented lines.
    pub fn write(&mut self, text: &str) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.write_fragment(first);
        }
        for line in lines {
            self.write_line();
            self.write_fragment(line);
        }
    }

    fn write_fragment(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.write_indent();
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    /// End the current line.
    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write `text` as a complete line.
    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.write_line();
    }

    /// Write an empty line, unless the buffer already ends with one.
    pub fn blank_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.write_line();
        }
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header`, then run `body` one level deeper and close with `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(&format!("{header} {{"));
        self.increase_indent();
        body(self);
        self.decrease_indent();
        self.line("}");
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "../tests/source_writer_tests.rs"]
mod tests;
