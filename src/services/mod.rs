pub mod filter;
pub mod recommendations;

pub use filter::ListingFilter;
pub use recommendations::{run_batch, Recommender, UserRecommendation};
