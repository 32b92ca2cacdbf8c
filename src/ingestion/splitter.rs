//! Recursive text splitter with overlap
//!
//! Splits text by a preference-ordered separator list: paragraph breaks first,
//! then lines, then sentences, then words, then single characters as the hard
//! fallback. Fragments are greedily packed into chunks of at most `chunk_size`
//! characters, carrying up to `overlap` trailing characters into the next
//! chunk. Output is deterministic for a fixed input and configuration.

use std::collections::VecDeque;

/// Separator preference order; the empty separator splits into characters.
const SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

/// Recursive character splitter
pub struct TextSplitter {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Characters carried over between consecutive chunks
    overlap: usize,
}

impl TextSplitter {
    /// Create a new splitter.
    ///
    /// The overlap must be smaller than the chunk size.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(overlap < chunk_size, "overlap must be smaller than chunk_size");
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into ordered chunks.
    ///
    /// Empty and whitespace-only input produces no chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        let fragments = self.fragment(text, &SEPARATORS);
        self.pack(fragments)
    }

    /// Recursively break text into fragments no longer than `chunk_size`,
    /// preferring the earliest separator that occurs in the text.
    fn fragment(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            if text.is_empty() {
                return Vec::new();
            }
            return vec![text.to_string()];
        }

        // Pick the first separator present; "" always matches.
        let (index, separator) = separators
            .iter()
            .enumerate()
            .find(|(_, sep)| sep.is_empty() || text.contains(**sep))
            .map(|(i, sep)| (i, *sep))
            .unwrap_or((separators.len().saturating_sub(1), ""));

        let mut fragments = Vec::new();
        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) > self.chunk_size {
                fragments.extend(self.fragment(&piece, &separators[index + 1..]));
            } else {
                fragments.push(piece);
            }
        }
        fragments
    }

    /// Greedily pack fragments into chunks, retaining up to `overlap` trailing
    /// characters of fragment tail when a chunk is closed.
    fn pack(&self, fragments: Vec<String>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut window: VecDeque<(String, usize)> = VecDeque::new();
        let mut window_len = 0usize;

        for fragment in fragments {
            let fragment_len = char_len(&fragment);

            if window_len + fragment_len > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window);

                // Drop leading fragments until what remains fits as overlap
                // and leaves room for the incoming fragment.
                while window_len > self.overlap
                    || (window_len + fragment_len > self.chunk_size && window_len > 0)
                {
                    let (_, dropped) = window.pop_front().expect("window not empty");
                    window_len -= dropped;
                }
            }

            window_len += fragment_len;
            window.push_back((fragment, fragment_len));
        }

        // A flush is always triggered by an incoming fragment, so the final
        // window holds at least one fragment not yet emitted.
        push_chunk(&mut chunks, &window);
        chunks
    }
}

/// Join the window and append it as a chunk, skipping blanks.
fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<(String, usize)>) {
    let joined: String = window.iter().map(|(fragment, _)| fragment.as_str()).collect();
    let chunk = joined.trim().to_string();

    if !chunk.is_empty() {
        chunks.push(chunk);
    }
}

/// Split text on a separator, keeping the separator attached to the
/// preceding piece. An empty separator splits into single characters.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(position) = rest.find(separator) {
        let end = position + separator.len();
        pieces.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
