pub mod listings;

pub use listings::{load_listings, write_listings, ListingStore};
