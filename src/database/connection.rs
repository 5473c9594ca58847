use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use super::setup::ensure_schema;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Opens the ledger file, creating missing tables.
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = build_pool(manager, 4)?;
    ensure_schema(&mut get_connection(&pool)?)?;
    Ok(pool)
}

/// Single-connection in-memory ledger, used by tests and dry runs.
pub fn create_memory_pool() -> Result<DbPool> {
    let pool = build_pool(SqliteConnectionManager::memory(), 1)?;
    ensure_schema(&mut get_connection(&pool)?)?;
    Ok(pool)
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
