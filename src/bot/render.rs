//! Text rendering of item views for Discord messages.

use crate::core::{
    listing::{ItemView, ListFilter},
    notify::{NotificationTone, notification_message},
};
use std::fmt::Write;

/// Discord's limit on embed descriptions.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// One line of the main list.
#[must_use]
pub fn format_item_line(view: &ItemView) -> String {
    let mut line = format!(
        "{} **{}** · {} · {}",
        view.urgency().marker(),
        view.item.name,
        view.item.category,
        view.expires_in()
    );
    if let Some(brand) = &view.item.brand {
        // write! is infallible when writing to String
        let _ = write!(line, " · _{brand}_");
    }
    let _ = write!(line, " `#{}`", view.item.id);
    line
}

/// One entry of the notification view.
#[must_use]
pub fn format_notification_line(view: &ItemView) -> String {
    let tone = NotificationTone::of(&view.assessment);
    let date = view
        .item
        .expiry_date
        .map_or_else(String::new, |d| format!(" · {}", d.format("%b %-d, %Y")));
    format!(
        "{} **{}**\n{}{date} `#{}`",
        tone.emoji(),
        notification_message(view),
        view.item.category,
        view.item.id
    )
}

/// Heading for a list filter.
#[must_use]
pub const fn filter_title(filter: ListFilter) -> &'static str {
    match filter {
        ListFilter::All => "All Items",
        ListFilter::Expiring => "Expiring Soon",
        ListFilter::Expired => "Expired",
        ListFilter::Everything => "Everything",
    }
}

/// Joins `lines` with `separator` without exceeding `max_chars`, replacing the
/// lines that do not fit with an "…and N more" note.
#[must_use]
pub fn join_limited(lines: &[String], separator: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        let separator_len = if out.is_empty() { 0 } else { separator.len() };
        let after = lines.len() - index - 1;
        let reserve = if after > 0 {
            separator.len() + more_note(after).len()
        } else {
            0
        };
        if out.len() + separator_len + line.len() + reserve > max_chars {
            if !out.is_empty() {
                out.push_str(separator);
            }
            out.push_str(&more_note(lines.len() - index));
            return out;
        }
        if !out.is_empty() {
            out.push_str(separator);
        }
        out.push_str(line);
    }
    out
}

fn more_note(count: usize) -> String {
    format!("…and {count} more")
}
