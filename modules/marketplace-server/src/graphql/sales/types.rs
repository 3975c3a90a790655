use async_graphql::dataloader::DataLoader;
use async_graphql::*;
use marketplace_domains::sales::{Sale, SalesSummary};

use crate::graphql::error::loader_error;
use crate::graphql::loaders::*;
use crate::graphql::products::types::GqlProduct;
use crate::graphql::scalars::Date;
use crate::graphql::users::types::GqlUser;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Sale", complex)]
pub struct GqlSale {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub quantity: i32,
    pub total_price: f64,
    pub sold_at: Date,
}

impl From<Sale> for GqlSale {
    fn from(s: Sale) -> Self {
        Self {
            id: s.id,
            product_id: s.product_id,
            user_id: s.user_id,
            quantity: s.quantity,
            total_price: s.total_price,
            sold_at: s.sold_at.into(),
        }
    }
}

#[ComplexObject]
impl GqlSale {
    async fn product(&self, ctx: &Context<'_>) -> Result<Option<GqlProduct>> {
        let loader = ctx.data_unchecked::<DataLoader<ProductByIdLoader>>();
        loader.load_one(self.product_id).await.map_err(loader_error)
    }

    async fn buyer(&self, ctx: &Context<'_>) -> Result<Option<GqlUser>> {
        let loader = ctx.data_unchecked::<DataLoader<UserByIdLoader>>();
        loader.load_one(self.user_id).await.map_err(loader_error)
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "SalesSummary")]
pub struct GqlSalesSummary {
    pub sale_count: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

impl From<SalesSummary> for GqlSalesSummary {
    fn from(s: SalesSummary) -> Self {
        Self {
            sale_count: s.sale_count,
            total_quantity: s.total_quantity,
            total_revenue: s.total_revenue,
        }
    }
}
