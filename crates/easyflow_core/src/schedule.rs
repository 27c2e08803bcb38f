//! crates/easyflow_core/src/schedule.rs
//!
//! Weekday-name normalization for course meeting days. Syllabi write these
//! every way imaginable ("MWF", "TR", "Tue/Thu", "mon - wed"), and the model
//! is only asked, not guaranteed, to expand them. This is the single shared
//! normalizer; both the parse pipeline and manual course entry go through it.

use crate::domain::defaults;

const WEEK_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Normalizes a free-form meeting-days string into full weekday names in
/// fixed week order, joined by ", ". Falls back to the canonical default
/// when no token is recognized.
pub fn normalize_meeting_days(input: &str) -> String {
    let mut present = [false; 7];

    for token in input
        .split(|c: char| c.is_whitespace() || c == ',' || c == '/' || c == '-')
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();
        if let Some(day) = day_for_token(&token) {
            present[day] = true;
        } else {
            for day in expand_compact(&token) {
                present[day] = true;
            }
        }
    }

    let days: Vec<&str> = WEEK_ORDER
        .iter()
        .zip(present)
        .filter_map(|(name, hit)| hit.then_some(*name))
        .collect();

    if days.is_empty() {
        defaults::MEETING_DAYS.to_string()
    } else {
        days.join(", ")
    }
}

/// Maps one lowercased token to a week-order index: full names, three-letter
/// forms, and the short single/double-letter abbreviations.
fn day_for_token(token: &str) -> Option<usize> {
    match token {
        "monday" | "mon" | "m" => Some(0),
        "tuesday" | "tues" | "tue" | "t" => Some(1),
        "wednesday" | "wed" | "w" => Some(2),
        "thursday" | "thurs" | "thur" | "thu" | "th" => Some(3),
        "friday" | "fri" | "f" => Some(4),
        "saturday" | "sat" | "sa" | "s" => Some(5),
        "sunday" | "sun" | "su" => Some(6),
        _ => None,
    }
}

/// Expands a run-together abbreviation like "mwf", "tr", or "tth" by scanning
/// letters left to right ("r" is the registrar's Thursday, "u" Sunday). A
/// token with any unrecognized letter contributes nothing.
fn expand_compact(token: &str) -> Vec<usize> {
    let letters: Vec<char> = token.chars().collect();
    let mut days = Vec::new();
    let mut i = 0;

    while i < letters.len() {
        let pair: String = letters[i..].iter().take(2).collect();
        if let Some(day) = match pair.as_str() {
            "th" => Some(3),
            "sa" => Some(5),
            "su" => Some(6),
            _ => None,
        } {
            days.push(day);
            i += 2;
            continue;
        }

        let day = match letters[i] {
            'm' => 0,
            't' => 1,
            'w' => 2,
            'r' => 3,
            'f' => 4,
            's' => 5,
            'u' => 6,
            _ => return Vec::new(),
        };
        days.push(day);
        i += 1;
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_abbreviations_expand() {
        assert_eq!(normalize_meeting_days("MWF"), "Monday, Wednesday, Friday");
        assert_eq!(normalize_meeting_days("TR"), "Tuesday, Thursday");
        assert_eq!(normalize_meeting_days("TTh"), "Tuesday, Thursday");
        assert_eq!(
            normalize_meeting_days("MTWRF"),
            "Monday, Tuesday, Wednesday, Thursday, Friday"
        );
    }

    #[test]
    fn delimited_tokens_normalize_case_insensitively() {
        assert_eq!(normalize_meeting_days("tue, thu"), "Tuesday, Thursday");
        assert_eq!(
            normalize_meeting_days("Monday / Wednesday"),
            "Monday, Wednesday"
        );
        assert_eq!(normalize_meeting_days("mon-wed-fri"), "Monday, Wednesday, Friday");
    }

    #[test]
    fn output_is_in_week_order_and_deduplicated() {
        assert_eq!(
            normalize_meeting_days("Friday, Monday, friday"),
            "Monday, Friday"
        );
    }

    #[test]
    fn weekend_days_round_trip() {
        assert_eq!(normalize_meeting_days("sat su"), "Saturday, Sunday");
    }

    #[test]
    fn unrecognized_input_falls_back_to_the_canonical_default() {
        assert_eq!(normalize_meeting_days("xyz"), defaults::MEETING_DAYS);
        assert_eq!(normalize_meeting_days(""), defaults::MEETING_DAYS);
    }

    #[test]
    fn partially_garbled_tokens_do_not_leak_days() {
        // "mxf" has an unknown letter in the middle, so the whole token is ignored.
        assert_eq!(normalize_meeting_days("mxf"), defaults::MEETING_DAYS);
    }
}
