use regex::Regex;

/// Collapse every whitespace run (including non-breaking spaces and line
/// breaks) to a single space, then rejoin kerning-split digit runs.
pub fn flatten(text: &str) -> String {
    let ws = Regex::new(r"\s+").unwrap();
    close_digit_gaps(ws.replace_all(text, " ").trim())
}

/// Collapse horizontal whitespace within each line but keep line
/// boundaries, for matches that must not bleed past the end of a line.
pub fn keep_lines(text: &str) -> String {
    let ws = Regex::new(r"[ \t\u{a0}]+").unwrap();
    let joined = text
        .lines()
        .map(|line| ws.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    close_digit_gaps(&joined)
}

/// Rejoin digit runs that character-spaced PDF rendering split apart,
/// e.g. "2 8 1 . 9 3" back to "281.93". Gaps between two digits and
/// between a digit and a decimal point are closed; nothing is reordered.
/// Runs to a fixpoint because each replace pass is non-overlapping.
fn close_digit_gaps(text: &str) -> String {
    let digit_digit = Regex::new(r"(\d) +(\d)").unwrap();
    let digit_point = Regex::new(r"(\d) +\.").unwrap();
    let point_digit = Regex::new(r"(\d\.) +(\d)").unwrap();

    let mut current = text.to_string();
    loop {
        let pass = digit_digit.replace_all(&current, "${1}${2}").into_owned();
        let pass = digit_point.replace_all(&pass, "${1}.").into_owned();
        let pass = point_digit.replace_all(&pass, "${1}${2}").into_owned();
        if pass == current {
            return current;
        }
        current = pass;
    }
}
