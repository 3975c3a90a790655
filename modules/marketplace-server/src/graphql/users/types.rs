use async_graphql::*;
use marketplace_domains::users::{
    Language, Message, MessageReaction, Notification, RoleCount, SavedSearch, SearchHistory, User,
    UserAchievement, UserActivity, UserBadge, UserRating,
};

use crate::graphql::enums::{GqlReactionType, GqlRole};
use crate::graphql::scalars::Timestamp;

/// Public view of an account. The password hash never leaves the domain layer.
#[derive(SimpleObject, Clone)]
#[graphql(name = "User")]
pub struct GqlUser {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub role: GqlRole,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub language_id: Option<i32>,
    pub last_active: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for GqlUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            role: u.role.into(),
            bio: u.bio,
            profile_picture: u.profile_picture,
            language_id: u.language_id,
            last_active: u.last_active.map(Timestamp::from),
            created_at: u.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "RoleCount")]
pub struct GqlRoleCount {
    pub role: GqlRole,
    pub count: i64,
}

impl From<RoleCount> for GqlRoleCount {
    fn from(r: RoleCount) -> Self {
        Self {
            role: r.role.into(),
            count: r.count,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Language")]
pub struct GqlLanguage {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<Language> for GqlLanguage {
    fn from(l: Language) -> Self {
        Self {
            id: l.id,
            code: l.code,
            name: l.name,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "UserRating")]
pub struct GqlUserRating {
    pub id: i32,
    pub rater_id: i32,
    pub rated_id: i32,
    pub rating: i32,
    pub created_at: Timestamp,
}

impl From<UserRating> for GqlUserRating {
    fn from(r: UserRating) -> Self {
        Self {
            id: r.id,
            rater_id: r.rater_id,
            rated_id: r.rated_id,
            rating: r.rating,
            created_at: r.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "UserActivity")]
pub struct GqlUserActivity {
    pub id: i32,
    pub user_id: i32,
    pub action: i32,
    pub created_at: Timestamp,
}

impl From<UserActivity> for GqlUserActivity {
    fn from(a: UserActivity) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            action: a.action,
            created_at: a.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "UserBadge")]
pub struct GqlUserBadge {
    pub id: i32,
    pub user_id: i32,
    pub badge_id: i32,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl From<UserBadge> for GqlUserBadge {
    fn from(b: UserBadge) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            badge_id: b.badge_id,
            name: b.badge_name,
            description: b.badge_description,
            created_at: b.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "UserAchievement")]
pub struct GqlUserAchievement {
    pub id: i32,
    pub user_id: i32,
    pub achievement_id: i32,
    pub name: String,
    pub description: String,
    pub criteria: Json<serde_json::Value>,
    pub created_at: Timestamp,
}

impl From<UserAchievement> for GqlUserAchievement {
    fn from(a: UserAchievement) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            achievement_id: a.achievement_id,
            name: a.achievement_name,
            description: a.achievement_description,
            criteria: Json(a.criteria),
            created_at: a.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Notification")]
pub struct GqlNotification {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub read: bool,
    pub created_at: Timestamp,
}

impl From<Notification> for GqlNotification {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            message: n.message,
            read: n.read,
            created_at: n.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Message")]
pub struct GqlMessage {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub content: String,
    pub created_at: Timestamp,
}

impl From<Message> for GqlMessage {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            receiver_id: m.receiver_id,
            content: m.content,
            created_at: m.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "MessageReaction")]
pub struct GqlMessageReaction {
    pub id: i32,
    pub message_id: i32,
    pub user_id: i32,
    #[graphql(name = "type")]
    pub reaction_type: GqlReactionType,
    pub created_at: Timestamp,
}

impl From<MessageReaction> for GqlMessageReaction {
    fn from(r: MessageReaction) -> Self {
        Self {
            id: r.id,
            message_id: r.message_id,
            user_id: r.user_id,
            reaction_type: r.reaction_type.into(),
            created_at: r.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "SearchHistory")]
pub struct GqlSearchHistory {
    pub id: i32,
    pub user_id: i32,
    pub query: String,
    pub created_at: Timestamp,
}

impl From<SearchHistory> for GqlSearchHistory {
    fn from(s: SearchHistory) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            query: s.query,
            created_at: s.created_at.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "SavedSearch")]
pub struct GqlSavedSearch {
    pub id: i32,
    pub user_id: i32,
    pub query: String,
    pub filters: Json<serde_json::Value>,
    pub created_at: Timestamp,
}

impl From<SavedSearch> for GqlSavedSearch {
    fn from(s: SavedSearch) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            query: s.query,
            filters: Json(s.filters),
            created_at: s.created_at.into(),
        }
    }
}
