use crate::ast::statements::SourceLine;

/// Forward-only cursor over a pre-loaded line buffer.
///
/// Statements that span several lines (function, `if` and class blocks)
/// pull their continuation lines from the same cursor as the statement
/// header, so a block always comes from the buffer being executed.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<SourceLine>,
    pos: usize,
}

impl LineCursor {
    /// Splits `source` into lines numbered from 1.
    pub fn from_source(source: &str) -> Self {
        let lines = source
            .lines()
            .enumerate()
            .map(|(idx, text)| SourceLine::new(idx + 1, text))
            .collect();

        LineCursor { lines, pos: 0 }
    }

    pub fn from_lines(lines: Vec<SourceLine>) -> Self {
        LineCursor { lines, pos: 0 }
    }

    pub fn next_line(&mut self) -> Option<SourceLine> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    pub fn peek_line(&self) -> Option<&SourceLine> {
        self.lines.get(self.pos)
    }
}
