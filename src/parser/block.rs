use crate::{
    ast::statements::SourceLine,
    errors::errors::{Error, ErrorImpl},
};

use super::cursor::LineCursor;

/// Lines between a `{` and its matching `}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub lines: Vec<SourceLine>,
    /// Text following the closing `}` on its line, e.g. `else {`.
    pub trailing: String,
    /// Line holding the closing `}`.
    pub closing_line: usize,
}

/// Returns the byte offset of the `}` that brings `depth` to zero, updating
/// `depth` for every brace seen. Counting is purely lexical: braces inside
/// string literals count too.
fn find_close(text: &str, depth: &mut usize) -> Option<usize> {
    for (offset, ch) in text.char_indices() {
        match ch {
            '{' => *depth += 1,
            '}' => {
                *depth = depth.saturating_sub(1);
                if *depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn push_fragment(lines: &mut Vec<SourceLine>, number: usize, text: &str) {
    if !text.trim().is_empty() {
        lines.push(SourceLine::new(number, text));
    }
}

/// Captures a block whose `{` has just been consumed. `after_brace` is the
/// rest of the header line; continuation lines come from `cursor`.
pub fn capture_block(
    cursor: &mut LineCursor,
    header: &SourceLine,
    after_brace: &str,
    keyword: &str,
) -> Result<Block, Error> {
    let mut depth = 1;
    let mut lines = vec![];

    if let Some(close) = find_close(after_brace, &mut depth) {
        push_fragment(&mut lines, header.number, &after_brace[..close]);
        return Ok(Block {
            lines,
            trailing: after_brace[close + 1..].trim().to_string(),
            closing_line: header.number,
        });
    }
    push_fragment(&mut lines, header.number, after_brace);

    while let Some(line) = cursor.next_line() {
        if let Some(close) = find_close(&line.text, &mut depth) {
            push_fragment(&mut lines, line.number, &line.text[..close]);
            return Ok(Block {
                lines,
                trailing: line.text[close + 1..].trim().to_string(),
                closing_line: line.number,
            });
        }
        lines.push(line);
    }

    Err(Error::new(
        ErrorImpl::UnterminatedBlock {
            keyword: keyword.to_string(),
        },
        header.number,
    ))
}
