//! Core business logic - framework-agnostic classification, listing and storage.

/// Expiry date arithmetic, urgency tiers and remaining-time labels
pub mod expiry;
/// Food item type, categories and the creation flow
pub mod item;
/// Ordering and filtering of the main list
pub mod listing;
/// Barcode product lookup with placeholder fallback
pub mod lookup;
/// Notification selection and wording
pub mod notify;
/// JSON record import and export
pub mod record;
/// Demo items for a fresh installation
pub mod seed;
/// The item store trait and its database implementation
pub mod store;
