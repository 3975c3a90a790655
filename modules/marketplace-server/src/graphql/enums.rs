//! GraphQL mirrors of the domain enums. Variant names render as
//! SCREAMING_SNAKE_CASE, matching the stored text values.

use async_graphql::Enum;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "Role", remote = "marketplace_domains::shared::Role")]
pub enum GqlRole {
    Admin,
    Moderator,
    User,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "Condition", remote = "marketplace_domains::shared::Condition")]
pub enum GqlCondition {
    BrandNew,
    TriedOn,
    NewWithDefects,
    NewWithTags,
    NewWithoutTags,
    Used,
    InBox,
    NoBox,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "RaffleType", remote = "marketplace_domains::shared::RaffleType")]
pub enum GqlRaffleType {
    InApp,
    Online,
    InStore,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "RaffleStatus", remote = "marketplace_domains::shared::RaffleStatus")]
pub enum GqlRaffleStatus {
    Open,
    Closed,
    Canceled,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "RaffleResult", remote = "marketplace_domains::shared::RaffleResult")]
pub enum GqlRaffleResult {
    Won,
    Lost,
    Pending,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "ReactionType", remote = "marketplace_domains::shared::ReactionType")]
pub enum GqlReactionType {
    Like,
    Love,
    Wow,
    Sad,
    Angry,
    Cheer,
    Laugh,
    Surprise,
    Dislike,
    Confused,
    Grateful,
    Applaud,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(
    name = "ProductFlagReason",
    remote = "marketplace_domains::shared::ProductFlagReason"
)]
pub enum GqlProductFlagReason {
    Spam,
    Counterfeit,
    Inappropriate,
    Misleading,
    Other,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(
    name = "ProductFlagStatus",
    remote = "marketplace_domains::shared::ProductFlagStatus"
)]
pub enum GqlProductFlagStatus {
    Open,
    Reviewed,
    Dismissed,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "SortOrder", remote = "marketplace_domains::shared::SortOrder")]
pub enum GqlSortOrder {
    Asc,
    Desc,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "ProductSort", remote = "marketplace_domains::products::ProductSort")]
pub enum GqlProductSort {
    CreatedAt,
    Price,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "Sentiment", remote = "marketplace_domains::reviews::Sentiment")]
pub enum GqlSentiment {
    Positive,
    Negative,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{InputType, Name, Value};
    use marketplace_domains::shared::{Condition, Role};

    #[test]
    fn conversions_follow_variant_names() {
        assert_eq!(Role::from(GqlRole::Moderator), Role::Moderator);
        assert_eq!(GqlCondition::from(Condition::NewWithoutTags), GqlCondition::NewWithoutTags);
    }

    #[test]
    fn graphql_names_match_stored_text() {
        for condition in Condition::ALL {
            let gql = GqlCondition::from(*condition);
            assert_eq!(gql.to_value(), Value::Enum(Name::new(condition.as_str())));
        }
    }
}
