use regex::Regex;

use crate::extract::Weekday;

/// Default upper bound on a day block, in bytes. Guards against runaway
/// blocks when no later day label terminates the scan. Tunable through
/// `extraction.day_block_cap` in the config file.
pub const DEFAULT_DAY_BLOCK_CAP: usize = 1200;

/// The substring of `text` attributable to `day`: it starts at the first
/// whole-word occurrence of the day name and ends at the nearest later
/// occurrence of a *different* day name, end of text, or the cap,
/// whichever comes first. A later repeat of the same day name does not
/// close the block. Returns "" when the day name never occurs.
pub fn day_block(text: &str, day: Weekday, cap: usize) -> &str {
    let Some((start, name_end)) = find_day(text, day) else {
        return "";
    };

    let mut end = text.len();
    for other in Weekday::ALL {
        if other == day {
            continue;
        }
        if let Some((pos, _)) = find_day(&text[name_end..], other) {
            end = end.min(name_end + pos);
        }
    }

    let mut end = end.min(start + cap);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[start..end]
}

fn find_day(text: &str, day: Weekday) -> Option<(usize, usize)> {
    let re = Regex::new(&format!(r"(?i)\b{}\b", day.name())).unwrap();
    re.find_iter(text)
        .find(|m| !in_week_ending_label(text, m.start()))
        .map(|m| (m.start(), m.end()))
}

/// "Week ending Saturday" contains a day name. Such an occurrence labels
/// the anchor date, not a day panel, and never opens or closes a block.
fn in_week_ending_label(text: &str, pos: usize) -> bool {
    let mut from = pos.saturating_sub(16);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    text[from..pos].to_lowercase().contains("week end")
}
