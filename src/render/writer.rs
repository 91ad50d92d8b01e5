//! Indent-aware line builder for outlines. Two spaces per level.

pub struct OutlineWriter {
    buf: String,
    indent_level: usize,
}

impl OutlineWriter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(1024),
            indent_level: 0,
        }
    }

    /// Write a complete line at the current indent.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Write `title` and indent what follows.
    pub fn section(&mut self, title: &str) {
        self.line(title);
        self.indent();
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for OutlineWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_indent() {
        let mut w = OutlineWriter::new();
        w.section("objects");
        w.line("#0 start");
        w.dedent();
        w.line("end");
        assert_eq!(w.finish(), "objects\n  #0 start\nend\n");
    }

    #[test]
    fn dedent_saturates_at_zero() {
        let mut w = OutlineWriter::new();
        w.dedent();
        w.line("x");
        assert_eq!(w.finish(), "x\n");
    }
}
