//! Text rendering for scope diagnostics.
//!
//! Type names coming from [`std::any::type_name`] are fully qualified and
//! noisy. These helpers shorten them, render the chain of scopes a lookup
//! walked, and pick "did you mean?" candidates for missing dependencies.

use std::cmp::Reverse;

/// Characters that end a path segment inside a type name.
const DELIMITERS: &[char] = &['<', '>', '(', ')', '[', ']', ',', ';', '&', '*', ' '];

/// Strips module paths from every path inside a type name.
///
/// Generic arguments, references and tuples keep their shape.
///
/// ```
/// use magnet_support::rendering::short_type_name;
///
/// assert_eq!(short_type_name("app::infra::Database"), "Database");
/// assert_eq!(
///     short_type_name("alloc::sync::Arc<dyn app::Logger>"),
///     "Arc<dyn Logger>"
/// );
/// ```
pub fn short_type_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut segment_start = 0;
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }

        out.push(ch);
        if DELIMITERS.contains(&ch) {
            segment_start = out.len();
        }
    }

    out
}

/// Renders scope names root first, joined by arrows.
///
/// ```
/// use magnet_support::rendering::render_scope_path;
///
/// assert_eq!(render_scope_path(&["app", "session", "request"]), "app → session → request");
/// ```
pub fn render_scope_path(names: &[impl AsRef<str>]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Picks registered type names that look like the requested one.
///
/// Names are compared by their short, lowercased form. A case-insensitive
/// exact match ranks first, then substring matches, then names sharing a
/// prefix of at least three characters (longer prefixes first). The
/// requested name itself is never suggested.
pub fn closest_matches(requested: &str, available: &[&str], limit: usize) -> Vec<String> {
    let wanted = short_type_name(requested).to_lowercase();
    if wanted.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(&str, (u8, usize))> = available
        .iter()
        .copied()
        .filter(|name| *name != requested)
        .filter_map(|name| {
            let candidate = short_type_name(name).to_lowercase();

            if candidate == wanted {
                return Some((name, (3, 0)));
            }
            if candidate.contains(&wanted) || wanted.contains(&candidate) {
                return Some((name, (2, 0)));
            }

            let prefix = candidate
                .chars()
                .zip(wanted.chars())
                .take_while(|(a, b)| a == b)
                .count();
            (prefix >= 3).then_some((name, (1, prefix)))
        })
        .collect();

    scored.sort_by_key(|&(name, score)| (Reverse(score), name));
    scored
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}
