//! Sort keys and list ordering

use super::{SortDirection, SortKey, SortPreference};
use crate::model::{Item, ItemId, ListId, Page};
use crate::view::ViewAdapter;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use tracing::debug;

/// Value given to dates that cannot be parsed
pub const UNPARSABLE_DATE: i64 = i64::MIN;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Convert a raw date attribute to milliseconds since the epoch
///
/// Accepts RFC 3339 and `YYYY-MM-DD[ HH:MM[:SS]]` with either a space or `T`
/// between date and time. Values without an offset are read as UTC.
/// Anything else maps to [`UNPARSABLE_DATE`] so it sorts lowest.
#[must_use]
pub fn parse_date(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNPARSABLE_DATE;
    }
    let normalized = raw.replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return dt.timestamp_millis();
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return dt.and_utc().timestamp_millis();
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(UNPARSABLE_DATE, |dt| dt.and_utc().timestamp_millis())
}

/// Convert a raw importance attribute to an integer
///
/// Reads an optional sign and the leading digits after whitespace; trailing
/// text is ignored. No digits at all means 0.
#[must_use]
pub fn parse_importance(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

/// Title order used to break ties
///
/// Case-insensitive first, then by exact text so the order stays total.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn key_value(item: &Item, key: SortKey) -> i64 {
    match key {
        SortKey::Date => parse_date(&item.date),
        SortKey::Importance => parse_importance(&item.importance),
    }
}

/// New order for a set of items
///
/// Stable; the direction applies to the primary key only and ties are
/// broken by ascending title.
#[must_use]
pub fn sorted_order(page: &Page, items: &[ItemId], pref: SortPreference) -> Vec<ItemId> {
    let mut keyed: Vec<(i64, ItemId)> = items
        .iter()
        .map(|&id| (key_value(page.item(id), pref.key), id))
        .collect();

    keyed.sort_by(|(av, a), (bv, b)| {
        let primary = match pref.direction {
            SortDirection::Asc => av.cmp(bv),
            SortDirection::Desc => bv.cmp(av),
        };
        primary.then_with(|| compare_titles(&page.item(*a).title, &page.item(*b).title))
    });

    keyed.into_iter().map(|(_, id)| id).collect()
}

/// Re-sort every list of the page in place
pub fn sort_lists(page: &mut Page, pref: SortPreference) {
    for index in 0..page.lists.len() {
        let order = sorted_order(page, &page.lists[index].items, pref);
        page.lists[index].items = order;
    }
    debug!(lists = page.lists.len(), %pref, "lists sorted");
}

/// Re-sort every list and push the new orders to the view
pub fn apply(page: &mut Page, pref: SortPreference, view: &mut dyn ViewAdapter) {
    sort_lists(page, pref);
    for (index, list) in page.lists.iter().enumerate() {
        view.reorder_list(ListId(index), &list.items);
    }
}
