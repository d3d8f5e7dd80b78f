//! Header and label normalization.
//!
//! Sheet headers are human labels ("Due date", "Story Points"); JSON field
//! names and lookups need a stable machine form. Sprint labels need an
//! ordering that puts "Sprint 2" before "Sprint 10".

use std::cmp::Ordering;

/// Convert a sheet header to its JSON field name.
///
/// Spaces and dots become underscores and the result is lowercased.
///
/// # Examples
///
/// ```
/// use sprintsheet_core::util::fields::field_name;
///
/// assert_eq!(field_name("Due date"), "due_date");
/// assert_eq!(field_name("Story Points"), "story_points");
/// assert_eq!(field_name("T.Size"), "t_size");
/// assert_eq!(field_name("Key"), "key");
/// ```
pub fn field_name(header: &str) -> String {
    header.replace([' ', '.'], "_").to_lowercase()
}

/// Compare two labels, treating runs of ASCII digits as numbers.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use sprintsheet_core::util::fields::natural_cmp;
///
/// assert_eq!(natural_cmp("Sprint 2", "Sprint 10"), Ordering::Less);
/// assert_eq!(natural_cmp("Sprint 10", "Sprint 10"), Ordering::Equal);
/// assert_eq!(natural_cmp("Alpha", "Beta"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                // Compare by magnitude without parsing (no overflow on long runs).
                let lt = ln.trim_start_matches('0');
                let rt = rn.trim_start_matches('0');
                let ord = lt.len().cmp(&rt.len()).then_with(|| lt.cmp(rt));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.cmp(&r);
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

/// Whether `value` equals any of `candidates`, ignoring ASCII case and
/// surrounding whitespace.
pub fn matches_any(value: &str, candidates: &[String]) -> bool {
    let value = value.trim();
    candidates.iter().any(|c| c.trim().eq_ignore_ascii_case(value))
}
