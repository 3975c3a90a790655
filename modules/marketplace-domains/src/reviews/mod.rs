pub mod feedback;
pub mod models;
pub mod sentiment;

pub use feedback::FeedbackSummary;
pub use models::review::Review;
pub use sentiment::{classify, Sentiment};
