//! Store introspection and maintenance on PostgreSQL.

use async_trait::async_trait;
use tracing::warn;

use quickdesk_core::result::AppResult;

use super::{db_error, to_count};
use crate::collection::{Collection, CollectionStats, DatabaseHealth};
use crate::connection::DatabasePool;
use crate::repositories::MaintenanceRepository;

/// Maintenance operations using PostgreSQL catalog functions.
#[derive(Debug, Clone)]
pub struct PgMaintenanceRepository {
    db: DatabasePool,
}

impl PgMaintenanceRepository {
    /// Create a new maintenance repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn collection_stats(&self) -> AppResult<Vec<CollectionStats>> {
        let mut stats = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            let table = collection.table_name();
            // Table names come from a closed enum, never from input.
            let count_sql = format!("SELECT COUNT(*) FROM {table}");
            let count = sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(self.db.pool())
                .await
                .map_err(db_error("Failed to count collection"))?;

            let (size, storage_size, indexes) = sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT pg_relation_size($1::regclass),
                       pg_total_relation_size($1::regclass),
                       (SELECT COUNT(*) FROM pg_index WHERE indrelid = $1::regclass)
                "#,
            )
            .bind(table)
            .fetch_one(self.db.pool())
            .await
            .map_err(db_error("Failed to read collection size"))?;

            stats.push(CollectionStats::new(
                collection,
                to_count(count),
                to_count(size),
                to_count(storage_size),
                to_count(indexes),
            ));
        }
        Ok(stats)
    }

    async fn clear(&self, collection: Collection) -> AppResult<u64> {
        let sql = format!("DELETE FROM {}", collection.table_name());
        let result = sqlx::query(&sql)
            .execute(self.db.pool())
            .await
            .map_err(db_error("Failed to clear collection"))?;
        Ok(result.rows_affected())
    }

    async fn health(&self) -> AppResult<DatabaseHealth> {
        let name = sqlx::query_scalar::<_, String>("SELECT current_database()")
            .fetch_one(self.db.pool())
            .await;
        Ok(match name {
            Ok(name) => DatabaseHealth {
                status: "connected".to_string(),
                host: self.db.host().to_string(),
                name,
            },
            Err(e) => {
                warn!(error = %e, "Database health probe failed");
                DatabaseHealth {
                    status: "disconnected".to_string(),
                    host: self.db.host().to_string(),
                    name: String::new(),
                }
            }
        })
    }
}
