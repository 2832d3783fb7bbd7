//! Sales statistics

use crate::domain::{
    DateRange, IncomeStatistics, RankingStatistics, SalesStatistics, StatisticsRequest,
    TOP_ITEMS_LIMIT,
};
use crate::error::{AppError, Result};
use crate::repository::OrderRepository;
use std::sync::Arc;

pub struct StatisticsService<O: OrderRepository> {
    order_repo: Arc<O>,
}

fn range_of(request: &StatisticsRequest) -> Result<DateRange> {
    request
        .range()
        .ok_or_else(|| AppError::BadRequest("Invalid request!".to_string()))
}

impl<O: OrderRepository> StatisticsService<O> {
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Number of orders per day
    pub async fn sales_in_time(&self, request: &StatisticsRequest) -> Result<SalesStatistics> {
        let per_day = self.order_repo.orders_per_day(range_of(request)?).await?;
        Ok(SalesStatistics {
            total: per_day.iter().map(|d| d.occurence).sum(),
            per_day,
        })
    }

    /// Sum of order totals per day
    pub async fn income_in_time(&self, request: &StatisticsRequest) -> Result<IncomeStatistics> {
        let per_day = self.order_repo.income_per_day(range_of(request)?).await?;
        let total: f64 = per_day.iter().map(|d| d.income).sum();
        Ok(IncomeStatistics {
            total: (total * 100.0).round() / 100.0,
            per_day,
        })
    }

    pub async fn most_sold_categories(
        &self,
        request: &StatisticsRequest,
    ) -> Result<RankingStatistics> {
        let per_day = self.order_repo.category_sales(range_of(request)?).await?;
        Ok(RankingStatistics {
            total: per_day.iter().map(|c| c.occurence).sum(),
            per_day,
        })
    }

    pub async fn most_sold_items(&self, request: &StatisticsRequest) -> Result<RankingStatistics> {
        let per_day = self
            .order_repo
            .item_sales(range_of(request)?, TOP_ITEMS_LIMIT)
            .await?;
        Ok(RankingStatistics {
            total: per_day.iter().map(|c| c.occurence).sum(),
            per_day,
        })
    }
}
