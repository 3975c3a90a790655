use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use marketplace_domains::reviews::{FeedbackSummary, Review};

use crate::graphql::error::loader_error;
use crate::graphql::loaders::*;
use crate::graphql::products::types::GqlProduct;
use crate::graphql::scalars::Timestamp;
use crate::graphql::users::types::GqlUser;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Review", complex)]
pub struct GqlReview {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub content: String,
    pub percentage: f64,
    pub created_at: Timestamp,
}

impl From<Review> for GqlReview {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            user_id: r.user_id,
            content: r.content,
            percentage: r.percentage,
            created_at: r.created_at.into(),
        }
    }
}

#[ComplexObject]
impl GqlReview {
    async fn product(&self, ctx: &Context<'_>) -> Result<Option<GqlProduct>> {
        let loader = ctx.data_unchecked::<DataLoader<ProductByIdLoader>>();
        loader.load_one(self.product_id).await.map_err(loader_error)
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<GqlUser>> {
        let loader = ctx.data_unchecked::<DataLoader<UserByIdLoader>>();
        loader.load_one(self.user_id).await.map_err(loader_error)
    }
}

/// Average rating plus sentiment bucket counts. Buckets sum to `totalReviews`.
#[derive(SimpleObject, Clone)]
#[graphql(name = "FeedbackSummary")]
pub struct GqlFeedbackSummary {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
}

impl From<FeedbackSummary> for GqlFeedbackSummary {
    fn from(s: FeedbackSummary) -> Self {
        Self {
            total_reviews: s.total_reviews,
            average_rating: s.average_rating,
            positive: s.positive,
            negative: s.negative,
            neutral: s.neutral,
        }
    }
}
