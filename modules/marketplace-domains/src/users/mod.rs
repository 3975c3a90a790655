pub mod activities;
pub mod models;

pub use activities::{create_user, ElevationPhrases, NewUser};
pub use models::inbox::{Message, MessageReaction, Notification};
pub use models::rewards::{UserAchievement, UserBadge};
pub use models::search::{SavedSearch, SearchHistory};
pub use models::social::{UserActivity, UserRating};
pub use models::user::{Language, RoleCount, User};
