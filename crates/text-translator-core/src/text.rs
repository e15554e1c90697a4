//! Text cleaning, validation and paragraph segmentation.
//!
//! Line separators are structural: cleaning collapses whitespace *within*
//! lines but never across them, and `Paragraph` round-trips any text
//! exactly (`Paragraph::split(t).join() == t`), including blank lines,
//! leading/trailing newlines and CRLF separators.

/// Collapse internal whitespace runs in a single line to single spaces,
/// trimming the ends. The input must not contain line separators.
fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for word in line.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Clean text for translation.
///
/// Trims leading/trailing whitespace and collapses internal whitespace runs
/// within each line to single spaces. Line separators are preserved.
pub fn clean(text: &str) -> String {
    let paragraph = Paragraph::split(text);
    let cleaned: Vec<String> = paragraph
        .lines()
        .iter()
        .map(|line| collapse_whitespace(line))
        .collect();
    paragraph.join_with(&cleaned).trim().to_string()
}

/// Check whether text is worth sending to the provider.
///
/// False for the empty string, whitespace-only text (including bare
/// newlines), or text longer than `max_chars` characters when a limit is
/// given.
pub fn is_valid(text: &str, max_chars: Option<usize>) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    match max_chars {
        Some(limit) => text.chars().count() <= limit,
        None => true,
    }
}

/// A text split into lines with their original separators.
///
/// `separators[i]` is the separator that followed `lines[i]` in the source
/// text (`"\n"` or `"\r\n"`); the final line's separator is empty unless the
/// text ended with one, in which case the final line is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    lines: Vec<String>,
    separators: Vec<&'static str>,
}

impl Paragraph {
    /// Split text into lines, recording each line's separator.
    pub fn split(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut separators = Vec::new();
        let mut current = String::new();

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    lines.push(std::mem::take(&mut current));
                    separators.push("\n");
                }
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    lines.push(std::mem::take(&mut current));
                    separators.push("\r\n");
                }
                _ => current.push(c),
            }
        }
        lines.push(current);
        separators.push("");

        Self { lines, separators }
    }

    /// The lines, without separators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines (blank lines included).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Reassemble the original text exactly.
    pub fn join(&self) -> String {
        self.join_with(&self.lines)
    }

    /// Reassemble with replacement lines, keeping the original separators
    /// in the original order. `replacements` must have one entry per line.
    pub fn join_with(&self, replacements: &[String]) -> String {
        debug_assert_eq!(replacements.len(), self.lines.len());

        let mut out = String::new();
        for (line, sep) in replacements.iter().zip(&self.separators) {
            out.push_str(line);
            out.push_str(sep);
        }
        out
    }
}
