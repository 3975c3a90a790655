use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use marketplace_domains::products::{Product, ProductCount, ProductFlag, ProductMargin};

use crate::graphql::enums::{GqlCondition, GqlProductFlagReason, GqlProductFlagStatus};
use crate::graphql::error::loader_error;
use crate::graphql::loaders::*;
use crate::graphql::reviews::types::GqlReview;
use crate::graphql::scalars::Timestamp;
use crate::graphql::users::types::GqlUser;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Product", complex)]
pub struct GqlProduct {
    pub id: i32,
    pub seller_id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub cost: Option<f64>,
    pub stock: i32,
    pub quantity: i32,
    pub condition: GqlCondition,
    pub created_at: Timestamp,
    pub listed_at: Timestamp,
    pub sold_at: Option<Timestamp>,
}

impl From<Product> for GqlProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            seller_id: p.seller_id,
            title: p.title,
            description: p.description,
            price: p.price,
            cost: p.cost,
            stock: p.stock,
            quantity: p.quantity,
            condition: p.condition.into(),
            created_at: p.created_at.into(),
            listed_at: p.listed_at.into(),
            sold_at: p.sold_at.map(Timestamp::from),
        }
    }
}

#[ComplexObject]
impl GqlProduct {
    async fn seller(&self, ctx: &Context<'_>) -> Result<Option<GqlUser>> {
        let loader = ctx.data_unchecked::<DataLoader<UserByIdLoader>>();
        loader.load_one(self.seller_id).await.map_err(loader_error)
    }

    async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<GqlReview>> {
        let loader = ctx.data_unchecked::<DataLoader<ReviewsForProductLoader>>();
        Ok(loader
            .load_one(self.id)
            .await
            .map_err(loader_error)?
            .unwrap_or_default())
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "ProductMargin")]
pub struct GqlProductMargin {
    pub product: GqlProduct,
    /// `(price - cost) / cost`
    pub margin: f64,
}

impl From<ProductMargin> for GqlProductMargin {
    fn from(m: ProductMargin) -> Self {
        Self {
            product: m.product.into(),
            margin: m.margin,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "ProductCount")]
pub struct GqlProductCount {
    pub product: GqlProduct,
    pub count: i64,
}

impl From<ProductCount> for GqlProductCount {
    fn from(c: ProductCount) -> Self {
        Self {
            product: c.product.into(),
            count: c.count,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "ProductFlag")]
pub struct GqlProductFlag {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub reason: GqlProductFlagReason,
    pub status: GqlProductFlagStatus,
    pub created_at: Timestamp,
}

impl From<ProductFlag> for GqlProductFlag {
    fn from(f: ProductFlag) -> Self {
        Self {
            id: f.id,
            product_id: f.product_id,
            user_id: f.user_id,
            reason: f.reason.into(),
            status: f.status.into(),
            created_at: f.created_at.into(),
        }
    }
}
