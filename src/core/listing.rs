//! List view ordering and filtering.
//!
//! Items are projected into [`ItemView`]s at read time so the urgency tier and the
//! remaining-time label always reflect today's date rather than whatever was true
//! when the item was created.

use crate::core::{
    expiry::{Assessment, Urgency},
    item::FoodItem,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;

/// An item together with its assessment for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// The stored item
    pub item: FoodItem,
    /// Classification relative to the day the view was built for
    pub assessment: Assessment,
}

impl ItemView {
    /// Assesses `item` relative to `today`.
    #[must_use]
    pub fn new(item: FoodItem, today: NaiveDate) -> Self {
        let assessment = item.assess(today);
        Self { item, assessment }
    }

    /// Current urgency tier.
    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.assessment.urgency()
    }

    /// Current remaining-time label, e.g. `"3 days"` or `"Expired 1 day ago"`.
    #[must_use]
    pub fn expires_in(&self) -> String {
        self.assessment.label()
    }

    const fn is_expired(&self) -> bool {
        matches!(self.assessment, Assessment::Expired { .. })
    }
}

/// Where expired items go in the display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiredPlacement {
    /// After every non-expired item
    #[default]
    Last,
    /// Before every non-expired item
    First,
}

/// Which items a list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Everything that has not expired, undated items included
    #[default]
    All,
    /// Urgent and soon items
    Expiring,
    /// Expired items only
    Expired,
    /// Every item, expired ones placed per [`ExpiredPlacement`]
    Everything,
}

impl ListFilter {
    /// Whether an item with this tier passes the filter.
    #[must_use]
    pub const fn matches(self, urgency: Urgency) -> bool {
        match self {
            Self::All => !matches!(urgency, Urgency::Expired),
            Self::Expiring => matches!(urgency, Urgency::Urgent | Urgency::Soon),
            Self::Expired => matches!(urgency, Urgency::Expired),
            Self::Everything => true,
        }
    }
}

/// Earliest date first, undated items after every dated one.
fn ascending_dates_undated_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn display_order(a: &ItemView, b: &ItemView, placement: ExpiredPlacement) -> Ordering {
    match (a.is_expired(), b.is_expired()) {
        // Most recently expired first
        (true, true) => b.item.expiry_date.cmp(&a.item.expiry_date),
        (false, false) => ascending_dates_undated_last(a.item.expiry_date, b.item.expiry_date),
        (true, false) => match placement {
            ExpiredPlacement::Last => Ordering::Greater,
            ExpiredPlacement::First => Ordering::Less,
        },
        (false, true) => match placement {
            ExpiredPlacement::Last => Ordering::Less,
            ExpiredPlacement::First => Ordering::Greater,
        },
    }
}

/// Orders items for the main list.
///
/// Non-expired items come by ascending expiry date with undated items at the end
/// of that group; expired items come most-recently-expired first, placed according
/// to `placement`. Equal keys keep their input order.
#[must_use]
pub fn sort_for_display(
    items: Vec<FoodItem>,
    today: NaiveDate,
    placement: ExpiredPlacement,
) -> Vec<ItemView> {
    let mut views: Vec<ItemView> = items
        .into_iter()
        .map(|item| ItemView::new(item, today))
        .collect();
    views.sort_by(|a, b| display_order(a, b, placement));
    views
}

/// Keeps the views that pass `filter`, preserving order.
#[must_use]
pub fn filter_items(views: Vec<ItemView>, filter: ListFilter) -> Vec<ItemView> {
    views
        .into_iter()
        .filter(|view| filter.matches(view.urgency()))
        .collect()
}
