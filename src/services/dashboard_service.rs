use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::ServiceError;
use crate::catalog::{Category, Entry, Section, Tag};
use crate::database::Repository;
use crate::filter::FilterData;
use crate::types::EntryStatus;

const DASHBOARD_CATEGORIES: i32 = 6;
const DASHBOARD_RECENT_SECTIONS: i64 = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub entries: i64,
    pub published_entries: i64,
    pub categories: i64,
    pub sections: i64,
    pub tags: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentSection {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub section: Section,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub categories: Vec<Category>,
    pub recent_sections: Vec<RecentSection>,
}

pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Counts and previews for the admin landing page, read one after another
    pub async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let all = FilterData::default;
        let totals = Totals {
            entries: Repository::<Entry>::new("entries", self.pool.clone()).count(all()).await?,
            published_entries: Repository::<Entry>::new("entries", self.pool.clone())
                .count(FilterData::eq("status", EntryStatus::Published.as_str()))
                .await?,
            categories: Repository::<Category>::new("categories", self.pool.clone()).count(all()).await?,
            sections: Repository::<Section>::new("sections", self.pool.clone()).count(all()).await?,
            tags: Repository::<Tag>::new("tags", self.pool.clone()).count(all()).await?,
        };

        let categories = Repository::<Category>::new("categories", self.pool.clone())
            .select_any(FilterData::default().order_by("order_index").limit(DASHBOARD_CATEGORIES))
            .await?;

        let recent_sections = sqlx::query_as::<_, RecentSection>(
            r#"
            SELECT s.*, c.name AS category_name
            FROM sections s
            LEFT JOIN categories c ON c.id = s.category_id
            ORDER BY s.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(DASHBOARD_RECENT_SECTIONS)
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardSummary { totals, categories, recent_sections })
    }
}
