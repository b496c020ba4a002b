//! Connection bootstrap: database creation and pool setup.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Create the database named in `database_url` if it does not exist, by
/// connecting to the `postgres` maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

fn invalid_url(message: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: crate::config::DATABASE_URL_VAR,
        message,
    })
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres`, `db`).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_url("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((db, q)) => (db.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}
