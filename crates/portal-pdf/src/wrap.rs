//! Greedy word wrapping by character count
//!
//! Follows the defaults of Python's `textwrap`: tabs expand to multiples of
//! eight columns, every other whitespace character becomes one space, runs
//! of spaces inside a line are kept and whitespace at line breaks is dropped.

const TAB_SIZE: usize = 8;

fn is_space(chr: char) -> bool {
    matches!(chr, '\t' | '\n' | '\x0b' | '\x0c' | '\r' | ' ')
}

fn is_word(chr: char) -> bool {
    chr.is_alphanumeric() || chr == '_'
}

fn is_letter(chr: char) -> bool {
    chr.is_alphabetic() || chr == '_'
}

fn is_word_punct(chr: char) -> bool {
    is_word(chr) || matches!(chr, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn is_blank(chunk: &str) -> bool {
    chunk.trim().is_empty()
}

fn char_len(chunk: &str) -> usize {
    chunk.chars().count()
}

/// Whether the character at `i` exists and matches `pred`
fn at(text: &[char], i: Option<usize>, pred: impl Fn(char) -> bool) -> bool {
    i.and_then(|i| text.get(i)).map_or(false, |&chr| pred(chr))
}

fn hyphen(chr: char) -> bool {
    chr == '-'
}

/// Expand tabs and turn the remaining whitespace into spaces
fn normalize(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut column = 0;
    for chr in text.chars() {
        match chr {
            '\t' => {
                let n = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(n));
                column += n;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            chr if is_space(chr) => {
                out.push(' ');
                column += 1;
            }
            chr => {
                out.push(chr);
                column += 1;
            }
        }
    }
    out
}

/// A line may break after the hyphen at `i`, as in `well-known` or `x-ray-tion`
fn hyphen_break(text: &[char], i: usize) -> bool {
    if !at(text, Some(i), hyphen) {
        return false;
    }
    let back = |n: usize| i.checked_sub(n);
    let before = (at(text, back(2), is_letter) && at(text, back(1), is_letter))
        || (at(text, back(3), is_letter)
            && at(text, back(2), hyphen)
            && at(text, back(1), is_letter));
    let after = at(text, Some(i + 1), is_letter)
        && (at(text, Some(i + 2), is_letter)
            || (at(text, Some(i + 2), hyphen) && at(text, Some(i + 3), is_letter)));
    before && after
}

/// The length of a dash like `--` between two words, starting at `i`
fn em_dash(text: &[char], i: usize) -> Option<usize> {
    if !at(text, Some(i), hyphen) || !at(text, i.checked_sub(1), is_word_punct) {
        return None;
    }
    let len = text[i..].iter().take_while(|&&chr| chr == '-').count();
    Some(len).filter(|&len| len >= 2 && at(text, Some(i + len), is_word))
}

fn word_end(text: &[char], start: usize) -> usize {
    let mut end = start + 1;
    loop {
        if hyphen_break(text, end) {
            return end + 1;
        }
        if end >= text.len() || text[end] == ' ' {
            return end;
        }
        if at(text, Some(end - 1), is_word_punct) && em_dash(text, end).is_some() {
            return end;
        }
        end += 1;
    }
}

/// Split into runs of spaces, words, word parts ending in a hyphen and dashes
fn split_chunks(text: &[char]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let end = if text[pos] == ' ' {
            pos + text[pos..].iter().take_while(|&&chr| chr == ' ').count()
        } else if let Some(len) = em_dash(text, pos) {
            pos + len
        } else {
            word_end(text, pos)
        };
        chunks.push(text[pos..end].iter().collect());
        pos = end;
    }
    chunks
}

/// Put as much of a chunk that is wider than a line as fits into `line`
///
/// Prefers to break after the last hyphen that fits.
fn break_long_word(chunks: &mut Vec<String>, line: &mut Vec<String>, space_left: usize) {
    if let Some(chunk) = chunks.pop() {
        let chars: Vec<char> = chunk.chars().collect();
        let mut end = space_left.min(chars.len());
        if let Some(pos) = chars[..end].iter().rposition(|&chr| chr == '-') {
            if pos > 0 && chars[..pos].iter().any(|&chr| chr != '-') {
                end = pos + 1;
            }
        }
        line.push(chars[..end].iter().collect());
        chunks.push(chars[end..].iter().collect());
    }
}

/// Wrap `text` into lines of at most `width` characters
///
/// Words longer than `width` are split. Returns no lines for blank input.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = split_chunks(&normalize(text));
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.last().map_or(false, |c| is_blank(c)) {
            chunks.pop();
        }

        let mut line = Vec::new();
        let mut line_len = 0;
        while let Some(chunk) = chunks.last() {
            let len = char_len(chunk);
            if line_len + len > width {
                break;
            }
            line_len += len;
            line.extend(chunks.pop());
        }

        if chunks.last().map_or(false, |c| char_len(c) > width) {
            break_long_word(&mut chunks, &mut line, width - line_len);
        }
        if line.last().map_or(false, |c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap;

    #[test]
    fn short_text() {
        assert_eq!(wrap("A short paragraph.", 90), vec!["A short paragraph."]);
    }

    #[test]
    fn blank() {
        assert!(wrap("", 90).is_empty());
        assert!(wrap(" \n\t ", 90).is_empty());
    }

    #[test]
    fn greedy() {
        assert_eq!(
            wrap("the quick brown fox jumps over the lazy dog", 10),
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn inner_spaces_are_kept() {
        assert_eq!(
            wrap("Hello.  World, two spaces after a period.", 90),
            vec!["Hello.  World, two spaces after a period."]
        );
        assert_eq!(wrap("  lead", 90), vec!["  lead"]);
        assert_eq!(wrap("one two  three", 7), vec!["one two", "three"]);
    }

    #[test]
    fn tabs_and_line_breaks() {
        assert_eq!(wrap("a\tb", 90), vec!["a       b"]);
        assert_eq!(wrap("A well-known\tfact.", 90), vec!["A well-known    fact."]);
        assert_eq!(wrap("  a \n b\t\tc  ", 90), vec!["  a   b              c"]);
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab cdefghij", 5), vec!["ab cd", "efghi", "j"]);
    }

    #[test]
    fn hyphens() {
        assert_eq!(wrap("a well-known fact", 8), vec!["a well-", "known", "fact"]);
        assert_eq!(wrap("well-known", 90), vec!["well-known"]);
        assert_eq!(wrap("e-mail x", 4), vec!["e-", "mail", "x"]);
        assert_eq!(wrap("pre-x-ray-tion", 6), vec!["pre-x-", "ray-", "tion"]);
    }

    #[test]
    fn long_words_break_after_hyphens() {
        assert_eq!(wrap("x-ray", 3), vec!["x-", "ray"]);
    }

    #[test]
    fn dashes() {
        assert_eq!(
            wrap("word--word and more", 6),
            vec!["word--", "word", "and", "more"]
        );
    }

    #[test]
    fn lines_fit() {
        let text = "Normalization reduces redundancy and update anomalies; \
                    transactions keep the database consistent under concurrent access.";
        for line in wrap(text, 20) {
            assert!(line.chars().count() <= 20, "{:?}", line);
        }
    }
}
