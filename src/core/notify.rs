//! Notification selection and wording.
//!
//! An item is notifiable when its expiry date is known and at most
//! `threshold_days` away. Expired items stay notifiable until they are deleted.

use crate::core::{
    expiry::{Assessment, Urgency},
    item::FoodItem,
    listing::ItemView,
};
use chrono::NaiveDate;

/// Default look-ahead for notifications, in days.
pub const DEFAULT_NOTIFY_WITHIN_DAYS: i64 = 2;

/// Badge counts above this are shown as `"9+"`.
const BADGE_MAX: usize = 9;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTone {
    /// Already expired
    Expired,
    /// Expires today
    Today,
    /// Expires tomorrow
    Tomorrow,
    /// Expires later, within the threshold
    Upcoming,
    /// No expiry date
    Neutral,
}

impl NotificationTone {
    /// Tone for an assessment.
    #[must_use]
    pub const fn of(assessment: &Assessment) -> Self {
        match assessment {
            Assessment::Expired { .. } => Self::Expired,
            Assessment::Fresh { days_left: 0, .. } => Self::Today,
            Assessment::Fresh { days_left: 1, .. } => Self::Tomorrow,
            Assessment::Fresh { .. } => Self::Upcoming,
            Assessment::Unknown => Self::Neutral,
        }
    }

    /// Emoji used by the bot for this tone.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Expired => "⚫",
            Self::Today => "🔴",
            Self::Tomorrow => "🟠",
            Self::Upcoming => "🟡",
            Self::Neutral => "⚪",
        }
    }
}

fn is_notifiable(view: &ItemView, threshold_days: i64) -> bool {
    let urgency = view.urgency();
    if matches!(urgency, Urgency::Safe | Urgency::Unknown) {
        return false;
    }
    view.assessment
        .days_left()
        .is_some_and(|days| days <= threshold_days)
}

/// Items that deserve a notification, most severe first.
///
/// Keeps items whose days-until-expiry is at most `threshold_days`, expired items
/// included. Safe and undated items are never selected, whatever the threshold.
/// Ordered by tier, then by expiry date, then by input order.
#[must_use]
pub fn select_notifiable(
    items: Vec<FoodItem>,
    today: NaiveDate,
    threshold_days: i64,
) -> Vec<ItemView> {
    let mut selected: Vec<ItemView> = items
        .into_iter()
        .map(|item| ItemView::new(item, today))
        .filter(|view| is_notifiable(view, threshold_days))
        .collect();
    selected.sort_by(|a, b| {
        a.urgency()
            .cmp(&b.urgency())
            .then_with(|| a.item.expiry_date.cmp(&b.item.expiry_date))
    });
    selected
}

/// Sentence shown for one notification.
#[must_use]
pub fn notification_message(view: &ItemView) -> String {
    let name = &view.item.name;
    match view.assessment {
        Assessment::Expired { days_ago: 1 } => format!("{name} expired 1 day ago"),
        Assessment::Expired { days_ago } => format!("{name} expired {days_ago} days ago"),
        Assessment::Fresh { days_left: 0, .. } => format!("{name} expires today!"),
        Assessment::Fresh { days_left: 1, .. } => format!("{name} expires tomorrow"),
        Assessment::Fresh { days_left, .. } => format!("{name} expires in {days_left} days"),
        Assessment::Unknown => format!("{name} needs attention"),
    }
}

/// Text for the notification counter, `None` when there is nothing to show.
#[must_use]
pub fn notification_badge(count: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}

/// Heading line for the notification view.
#[must_use]
pub fn notification_summary(count: usize) -> String {
    match count {
        0 => "No urgent notifications at the moment".to_string(),
        1 => "You have 1 item that needs attention".to_string(),
        n => format!("You have {n} items that need attention"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn ids(views: &[ItemView]) -> Vec<&str> {
        views.iter().map(|v| v.item.id.as_str()).collect()
    }

    #[test]
    fn test_select_notifiable_default_threshold() {
        let items = vec![
            item_in_days("in-3", "Meat", 3),
            item_in_days("in-2", "Fish", 2),
            item_in_days("today", "Milk", 0),
            item_in_days("gone", "Bread", -4),
            item_in_days("in-1", "Cream", 1),
            test_item("undated", "Salt", None),
            item_in_days("far", "Juice", 90),
        ];

        let selected = select_notifiable(items, test_today(), DEFAULT_NOTIFY_WITHIN_DAYS);
        assert_eq!(ids(&selected), vec!["gone", "today", "in-1", "in-2"]);
    }

    #[test]
    fn test_select_notifiable_never_includes_safe() {
        let items = vec![
            item_in_days("soon", "Cheese", 5),
            item_in_days("safe", "Rice", 9),
            item_in_days("safe-2", "Beans", 20),
        ];

        let selected = select_notifiable(items, test_today(), 30);
        assert_eq!(ids(&selected), vec!["soon"]);
        assert!(selected.iter().all(|v| v.urgency() != Urgency::Safe));
    }

    #[test]
    fn test_select_notifiable_orders_by_severity_then_date() {
        let items = vec![
            item_in_days("soon-6", "A", 6),
            item_in_days("urgent-3", "B", 3),
            item_in_days("expired-1", "C", -1),
            item_in_days("urgent-0", "D", 0),
            item_in_days("expired-9", "E", -9),
            item_in_days("soon-4", "F", 4),
        ];

        let selected = select_notifiable(items, test_today(), 7);
        assert_eq!(
            ids(&selected),
            vec!["expired-9", "expired-1", "urgent-0", "urgent-3", "soon-4", "soon-6"]
        );
    }

    #[test]
    fn test_select_notifiable_empty() {
        assert!(select_notifiable(Vec::new(), test_today(), 2).is_empty());
    }

    #[test]
    fn test_notification_messages() {
        let today = test_today();
        let msg = |offset| notification_message(&ItemView::new(item_in_days("i", "Milk", offset), today));

        assert_eq!(msg(-1), "Milk expired 1 day ago");
        assert_eq!(msg(-3), "Milk expired 3 days ago");
        assert_eq!(msg(0), "Milk expires today!");
        assert_eq!(msg(1), "Milk expires tomorrow");
        assert_eq!(msg(2), "Milk expires in 2 days");
        assert_eq!(
            notification_message(&ItemView::new(test_item("s", "Salt", None), today)),
            "Salt needs attention"
        );
    }

    #[test]
    fn test_notification_tone() {
        let today = test_today();
        let tone = |offset| NotificationTone::of(&item_in_days("i", "X", offset).assess(today));
        assert_eq!(tone(-2), NotificationTone::Expired);
        assert_eq!(tone(0), NotificationTone::Today);
        assert_eq!(tone(1), NotificationTone::Tomorrow);
        assert_eq!(tone(2), NotificationTone::Upcoming);
        assert_eq!(
            NotificationTone::of(&test_item("s", "S", None).assess(today)),
            NotificationTone::Neutral
        );
    }

    #[test]
    fn test_notification_badge() {
        assert_eq!(notification_badge(0), None);
        assert_eq!(notification_badge(1).as_deref(), Some("1"));
        assert_eq!(notification_badge(9).as_deref(), Some("9"));
        assert_eq!(notification_badge(10).as_deref(), Some("9+"));
    }

    #[test]
    fn test_notification_summary() {
        assert_eq!(notification_summary(0), "No urgent notifications at the moment");
        assert_eq!(notification_summary(1), "You have 1 item that needs attention");
        assert_eq!(notification_summary(4), "You have 4 items that need attention");
    }
}
