mod criteria;
mod listing;
mod user_preferences;

pub use criteria::FilterCriteria;
pub use listing::{Listing, LISTING_COLUMNS};
pub use user_preferences::{PreferenceBook, UserPreference};
