pub mod error;
pub mod filter;
pub mod player;
pub mod validation;

use std::str::FromStr as _;

pub use error::Error;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;
use crate::player::PlayerOrder;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

pub const MAX_LIMIT: usize = 10_000;

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Brings the schema up to date, safe to call on every start.
pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ListingParams {
    pub offset: i64,
    pub limit: i64,
    pub order: PlayerOrder,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: MAX_LIMIT as i64,
            order: PlayerOrder::default(),
        }
    }
}

impl ListingParams {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit: limit.min(MAX_LIMIT as i64),
            order: PlayerOrder::default(),
        }
    }

    /// Zero based page of given size
    pub fn page(page_number: u32, page_size: u32) -> Self {
        let offset = i64::from(page_number) * i64::from(page_size);
        Self::new(offset, page_size.into())
    }

    pub fn with_order(mut self, order: PlayerOrder) -> Self {
        self.order = order;
        self
    }

    /// `ORDER BY` body, `id` is appended as tie-break so pages do not overlap.
    pub fn ordering(&self) -> String {
        match self.order {
            PlayerOrder::Id => "id".to_string(),
            other => format!("{}, id", other.column()),
        }
    }
}
