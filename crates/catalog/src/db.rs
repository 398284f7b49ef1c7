//! Database connection and session management.

use crate::catalog::MediaCatalog;
use crate::error::{ErrorKind, Result};
use crate::models::{MediaRecord, MediaRow, TenantId, TenantRow, TenantSummary};
use async_trait::async_trait;
use exn::ResultExt;
use sqlx::Postgres;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::instrument;

// Relocation is strictly sequential; a second connection would sit idle.
const MAX_CONNECTIONS: u32 = 1;

/// Connection pool for the platform database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database at `url`.
    ///
    /// `acquire_timeout` bounds both the initial connection and every later
    /// [`session`](Self::session) checkout.
    #[instrument("connecting to database", skip_all)]
    pub async fn connect(url: &str, acquire_timeout: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(Self { pool })
    }

    /// Check out the pool's connection for exclusive use.
    ///
    /// The connection goes back to the pool when the [`Session`] is dropped,
    /// whether the work using it succeeded or not.
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await.or_raise(|| ErrorKind::Database)?;
        Ok(Session { conn })
    }

    /// Close the connection pool.
    ///
    /// Waits for any checked-out session to be returned first, so drop
    /// sessions before calling this.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A single database connection, checked out for the length of a run.
#[derive(Debug)]
pub struct Session {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl MediaCatalog for Session {
    #[instrument("listing tenants with media", skip_all)]
    async fn list_tenants_with_media(&mut self) -> Result<Vec<TenantSummary>> {
        let rows: Vec<TenantRow> = sqlx::query_as(include_str!("../queries/list_tenants_with_media.sql"))
            .fetch_all(&mut *self.conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(TenantSummary::try_from).collect()
    }

    #[instrument("listing media for tenant", skip(self))]
    async fn list_media_for_tenant(&mut self, tenant: TenantId) -> Result<Vec<MediaRecord>> {
        let rows: Vec<MediaRow> = sqlx::query_as(include_str!("../queries/list_media_for_tenant.sql"))
            .bind(i64::from(tenant.0))
            .fetch_all(&mut *self.conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(MediaRecord::try_from).collect()
    }
}
