//! Share record and share-click repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use myark_core::error::{AppError, ErrorKind};
use myark_core::result::AppResult;
use myark_entity::share::{ConversionType, CreateShareRecord, ShareClick, ShareRecord};

/// Filters for the analytics share listing.
#[derive(Debug, Clone, Default)]
pub struct ShareFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub opportunity_id: Option<String>,
}

/// Repository for share tracking.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a share with zeroed metrics.
    pub async fn create(&self, data: &CreateShareRecord, now: DateTime<Utc>) -> AppResult<ShareRecord> {
        sqlx::query_as::<_, ShareRecord>(
            "INSERT INTO shares (share_code, user_id, user_email, user_name, is_authenticated, \
             ip_address, user_agent, opportunity_id, opportunity_title, opportunity_slug, \
             share_method, platform, shared_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(&data.share_code)
        .bind(&data.user_id)
        .bind(&data.user_email)
        .bind(&data.user_name)
        .bind(data.user_id.is_some())
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(&data.opportunity_id)
        .bind(&data.opportunity_title)
        .bind(&data.opportunity_slug)
        .bind(data.share_method)
        .bind(data.platform)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record share", e))
    }

    /// Store a click and update the share's metrics.
    ///
    /// The click is stored even when the code is unknown; in that case
    /// `None` is returned. `unique_visitors` only moves on the first click
    /// from a visitor.
    pub async fn record_click(&self, click: &ShareClick) -> AppResult<Option<ShareRecord>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let returning: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM share_clicks WHERE share_code = $1 AND visitor_id = $2)",
        )
        .bind(&click.share_code)
        .bind(&click.visitor_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check visitor", e))?;

        sqlx::query(
            "INSERT INTO share_clicks (id, share_code, visitor_id, user_id, clicked_at, ip_address, \
             user_agent, referrer, viewed_opportunity, registered, bookmarked) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(click.id)
        .bind(&click.share_code)
        .bind(&click.visitor_id)
        .bind(&click.user_id)
        .bind(click.clicked_at)
        .bind(&click.ip_address)
        .bind(&click.user_agent)
        .bind(&click.referrer)
        .bind(click.viewed_opportunity)
        .bind(click.registered)
        .bind(click.bookmarked)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record click", e))?;

        let share = sqlx::query_as::<_, ShareRecord>(
            "UPDATE shares SET click_count = click_count + 1, \
             unique_visitors = unique_visitors + CASE WHEN $3 THEN 0 ELSE 1 END, \
             last_click_at = $2 WHERE share_code = $1 RETURNING *",
        )
        .bind(&click.share_code)
        .bind(click.clicked_at)
        .bind(returning)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share clicks", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit click", e)
        })?;
        Ok(share)
    }

    /// Flag the visitor's latest click and bump the share's conversion
    /// counter. Returns `None` when the share does not exist.
    pub async fn record_conversion(
        &self,
        share_code: &str,
        visitor_id: &str,
        conversion: ConversionType,
        user_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>> {
        let (click_sql, share_sql) = match conversion {
            ConversionType::Viewed => (
                "UPDATE share_clicks SET viewed_opportunity = TRUE, \
                 user_id = COALESCE($3, user_id) WHERE id = ( \
                    SELECT id FROM share_clicks WHERE share_code = $1 AND visitor_id = $2 \
                    ORDER BY clicked_at DESC LIMIT 1)",
                "UPDATE shares SET conversions_viewed = conversions_viewed + 1, \
                 last_conversion_at = $2 WHERE share_code = $1 RETURNING *",
            ),
            ConversionType::Registered => (
                "UPDATE share_clicks SET registered = TRUE, registered_at = $4, \
                 user_id = COALESCE($3, user_id) WHERE id = ( \
                    SELECT id FROM share_clicks WHERE share_code = $1 AND visitor_id = $2 \
                    ORDER BY clicked_at DESC LIMIT 1)",
                "UPDATE shares SET conversions_registered = conversions_registered + 1, \
                 last_conversion_at = $2 WHERE share_code = $1 RETURNING *",
            ),
            ConversionType::Bookmarked => (
                "UPDATE share_clicks SET bookmarked = TRUE, bookmarked_at = $4, \
                 user_id = COALESCE($3, user_id) WHERE id = ( \
                    SELECT id FROM share_clicks WHERE share_code = $1 AND visitor_id = $2 \
                    ORDER BY clicked_at DESC LIMIT 1)",
                "UPDATE shares SET conversions_bookmarked = conversions_bookmarked + 1, \
                 last_conversion_at = $2 WHERE share_code = $1 RETURNING *",
            ),
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut flag_click = sqlx::query(click_sql)
            .bind(share_code)
            .bind(visitor_id)
            .bind(user_id);
        if conversion != ConversionType::Viewed {
            flag_click = flag_click.bind(now);
        }
        flag_click
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to flag click conversion", e)
            })?;

        let share = sqlx::query_as::<_, ShareRecord>(share_sql)
            .bind(share_code)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update share conversions", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit conversion", e)
        })?;
        Ok(share)
    }

    /// Shares matching the filter, newest first.
    pub async fn list(&self, filter: &ShareFilter) -> AppResult<Vec<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>(
            "SELECT * FROM shares \
             WHERE ($1::timestamptz IS NULL OR shared_at >= $1) \
             AND ($2::timestamptz IS NULL OR shared_at <= $2) \
             AND ($3::text IS NULL OR opportunity_id = $3) \
             ORDER BY shared_at DESC",
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.opportunity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }
}
