//! Prompt recognizer: scans a byte buffer for the first line that looks like
//! a device prompt.

use regex::bytes::Regex;

/// Find the first line in `buf` that, once stripped of a trailing `\r`, is
/// non-empty and matches `pattern`. Returns the offset one past the end of
/// that line (including its newline, if any), suitable for `BytesMut::split_to`.
///
/// Scanning restarts from this offset on the caller's next call, so repeated
/// calls walk through every prompt line in a chunk that happens to contain
/// more than one.
pub fn find_prompt_boundary(buf: &[u8], pattern: &Regex) -> Option<usize> {
    let mut pos = 0usize;
    loop {
        let (line_end, consume_end) = match memchr::memchr(b'\n', &buf[pos..]) {
            Some(rel) => (pos + rel, pos + rel + 1),
            None => (buf.len(), buf.len()),
        };
        let line = trim_trailing_cr(&buf[pos..line_end]);
        if !line.is_empty() && pattern.is_match(line) {
            return Some(consume_end);
        }
        if consume_end >= buf.len() {
            return None;
        }
        pos = consume_end;
    }
}

fn trim_trailing_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junos_pattern() -> Regex {
        Regex::new(r"^(?:[\w\-.]+@[\w\-.]+>\s*)$|^(?:[\w\-.]+@[\w\-.]+#\s*)$").unwrap()
    }

    #[test]
    fn finds_trailing_prompt_with_no_newline() {
        let p = junos_pattern();
        let buf = b"show version\nJunos info\nuser@device> ";
        let boundary = find_prompt_boundary(buf, &p).unwrap();
        assert_eq!(boundary, buf.len());
    }

    #[test]
    fn returns_none_without_a_matching_line() {
        let p = junos_pattern();
        let buf = b"show version\nstill running...\n";
        assert_eq!(find_prompt_boundary(buf, &p), None);
    }

    #[test]
    fn finds_first_of_two_prompts_in_one_chunk() {
        let p = junos_pattern();
        let buf = b"configure\nuser@device# set x y\nuser@device# ";
        let boundary = find_prompt_boundary(buf, &p).unwrap();
        assert_eq!(&buf[..boundary], &b"configure\nuser@device# "[..]);
        let rest = &buf[boundary..];
        let second = find_prompt_boundary(rest, &p).unwrap();
        assert_eq!(second, rest.len());
    }

    #[test]
    fn tolerates_carriage_returns() {
        let p = junos_pattern();
        let buf = b"show version\r\nJunos info\r\nuser@device> \r\n";
        assert!(find_prompt_boundary(buf, &p).is_some());
    }
}
