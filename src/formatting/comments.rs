//! Cursor over the sorted comment stream.
//!
//! Comments are consumed strictly left to right while the translator walks
//! sibling sequences; a taken comment is never revisited. The cursor is a
//! plain offset into the caller's slice, advanced in place, local to one
//! top-level formatting call, which keeps the traversal deterministic and
//! testable.

use crate::language::Comment;

#[derive(Debug)]
pub struct CommentCursor<'a> {
    comments: &'a [Comment],
    pos: usize,
}

impl<'a> CommentCursor<'a> {
    pub fn new(comments: &'a [Comment]) -> CommentCursor<'a> {
        CommentCursor { comments, pos: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.comments.len()
    }

    pub fn peek(&self) -> Option<&'a Comment> {
        self.comments.get(self.pos)
    }

    /// Take every remaining comment on a line strictly before `line`.
    pub fn take_before(&mut self, line: u32) -> &'a [Comment] {
        let start = self.pos;
        while self
            .comments
            .get(self.pos)
            .is_some_and(|comment| comment.line < line)
        {
            self.pos += 1;
        }
        &self.comments[start..self.pos]
    }

    /// Take every remaining comment on a line up to and including `line`.
    /// Used for trailing comments that fall inside a just-rendered span.
    pub fn take_through(&mut self, line: u32) -> &'a [Comment] {
        let start = self.pos;
        while self
            .comments
            .get(self.pos)
            .is_some_and(|comment| comment.line <= line)
        {
            self.pos += 1;
        }
        &self.comments[start..self.pos]
    }

    /// Take everything left; used at the end of the outermost block.
    pub fn take_rest(&mut self) -> &'a [Comment] {
        let rest = &self.comments[self.pos..];
        self.pos = self.comments.len();
        rest
    }
}
