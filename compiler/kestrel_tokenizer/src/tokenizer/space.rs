//! Whitespace and comments between tokens.

use kestrel_lexer_core::{is_new_line, is_whitespace, line_end, utf8, Position};

use super::Tokenizer;
use crate::comment::{Comment, CommentKind};
use crate::error::LexErrorKind;
use crate::token::TokenEntry;

impl Tokenizer<'_> {
    /// Skip whitespace, line terminators and comments.
    pub(super) fn skip_space(&mut self) {
        let buffer = self.state.buffer;
        while let Some(&byte) = buffer.get(self.state.pos) {
            match byte {
                b' ' | b'\t' | 0x0B | 0x0C => self.state.pos += 1,
                b'\n' | b'\r' => {
                    self.state.bump();
                }
                b'/' => match buffer.get(self.state.pos + 1) {
                    Some(b'*') => self.skip_block_comment(),
                    Some(b'/') => self.skip_line_comment(2),
                    _ => break,
                },
                0x80..=0xFF => match utf8::decode(buffer, self.state.pos) {
                    Some((ch, _)) if is_new_line(u32::from(ch)) => {
                        self.state.bump();
                    }
                    Some((ch, width)) if is_whitespace(u32::from(ch)) => self.state.pos += width,
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let buffer = self.state.buffer;
        let start = self.state.pos;
        let start_loc = self.state.cur_position();
        let body = start + 2;
        let (text_end, end) = match memchr::memmem::find(&buffer[body..], b"*/") {
            Some(offset) => (body + offset, body + offset + 2),
            None => {
                self.state
                    .record_error(LexErrorKind::UnterminatedComment, start);
                (buffer.len(), buffer.len())
            }
        };
        self.state.pos = end;
        self.state.track_line_breaks(body, end);
        self.push_comment(CommentKind::Block, &buffer[body..text_end], start, start_loc);
    }

    /// Skip a comment running to the end of the line. `skip` is the length
    /// of the opening delimiter (`//`, `<!--`, `-->`).
    pub(super) fn skip_line_comment(&mut self, skip: usize) {
        let buffer = self.state.buffer;
        let start = self.state.pos;
        let start_loc = self.state.cur_position();
        let body = (start + skip).min(buffer.len());
        let end = line_end(buffer, body);
        self.state.pos = end;
        self.push_comment(CommentKind::Line, &buffer[body..end], start, start_loc);
    }

    /// Record a comment ending at the cursor.
    fn push_comment(&mut self, kind: CommentKind, text: &[u8], start: usize, start_loc: Position) {
        if self.is_lookahead {
            return;
        }
        let comment = Comment {
            kind,
            value: String::from_utf8_lossy(text).into_owned(),
            start,
            end: self.state.pos,
            loc: self.location(start_loc, self.state.cur_position()),
        };
        if self.options.tokens {
            self.state.tokens.push(TokenEntry::Comment(comment.clone()));
        }
        self.state.trailing_comments.push(comment.clone());
        self.state.leading_comments.push(comment.clone());
        self.state.comments.push(comment);
    }
}
