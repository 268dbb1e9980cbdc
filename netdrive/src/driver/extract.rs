//! Output extractor: pulls the response body out of a captured buffer, given
//! the literal command that was echoed back by the device.

/// Extract the response body bounded by the echoed `command` and the
/// trailing prompt line.
///
/// `buffer` is expected to end with the prompt line that terminated this
/// operation (callers arrange this by only invoking extraction on the slice
/// consumed up to a detected prompt boundary). If `command` is never found,
/// the whitespace-stripped buffer minus its trailing prompt line is returned
/// as a best-effort recovery value.
pub fn extract_output(buffer: &[u8], command: &str) -> String {
    let text = String::from_utf8_lossy(buffer);
    let all_lines: Vec<&str> = text.lines().collect();
    if all_lines.is_empty() {
        return String::new();
    }
    // The last line is the prompt that terminated this chunk; never include it.
    let body = &all_lines[..all_lines.len() - 1];

    match body.iter().position(|line| line.contains(command)) {
        Some(echo_idx) => body[echo_idx + 1..].join("\n").trim().to_string(),
        None => body.join("\n").trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_between_echo_and_prompt() {
        let buf = b"show version\nJuniper version info\nuser@device> ";
        assert_eq!(extract_output(buf, "show version"), "Juniper version info");
    }

    #[test]
    fn strips_surrounding_whitespace_and_joins_multiple_lines() {
        let buf = b"show interfaces\nge-0/0/0  up\nge-0/0/1  down\nuser@device> ";
        assert_eq!(
            extract_output(buf, "show interfaces"),
            "ge-0/0/0  up\nge-0/0/1  down"
        );
    }

    #[test]
    fn falls_back_when_echo_is_missing() {
        let buf = b"unexpected banner\nuser@device> ";
        assert_eq!(extract_output(buf, "show version"), "unexpected banner");
    }

    #[test]
    fn empty_body_between_echo_and_prompt_is_empty_string() {
        let buf = b"show version\nuser@device> ";
        assert_eq!(extract_output(buf, "show version"), "");
    }
}
