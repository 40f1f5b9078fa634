use crate::models::{Lead, NewLead};
use crate::storage::trait_def::now_unix;
use crate::storage::LeadStore;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteLeadStore {
    pool: Arc<SqlitePool>,
}

impl SqliteLeadStore {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl LeadStore for SqliteLeadStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS leads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                source TEXT,
                location TEXT,
                project_type TEXT,
                customer_type TEXT,
                message TEXT,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_created_at ON leads(created_at)")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn insert_lead(&self, lead: &NewLead) -> Result<Lead> {
        let created_at = match lead.created_at {
            Some(ts) => ts,
            None => now_unix()?,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO leads (name, email, phone, source, location, project_type, customer_type, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.source)
        .bind(&lead.location)
        .bind(&lead.project_type)
        .bind(&lead.customer_type)
        .bind(&lead.message)
        .bind(created_at)
        .execute(self.pool.as_ref())
        .await?;

        let stored = sqlx::query_as::<_, Lead>(
            r#"
            SELECT id, name, email, phone, source, location, project_type, customer_type, message, created_at
            FROM leads
            WHERE id = ?
            "#,
        )
        .bind(result.last_insert_rowid())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(stored)
    }

    async fn list_leads(&self) -> Result<Vec<Lead>> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT id, name, email, phone, source, location, project_type, customer_type, message, created_at
            FROM leads
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(leads)
    }

    async fn count_leads(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
