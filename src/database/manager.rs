use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::{DbConfig, SslMode};

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection options for the catalog database
pub fn connect_options(config: &DbConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .ssl_mode(pg_ssl_mode(config.ssl_mode));

    if let Some(dbname) = &config.dbname {
        options = options.database(dbname);
    }
    options
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Build the pool and verify connectivity with a ping
pub async fn connect(config: &DbConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(connect_options(config))
        .await?;

    health_check(&pool).await?;

    info!(
        host = %config.host,
        port = config.port,
        max_connections = config.max_connections,
        "Connected to catalog database"
    );
    Ok(pool)
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_ssl_mode() {
        assert!(matches!(pg_ssl_mode(SslMode::Disable), PgSslMode::Disable));
        assert!(matches!(pg_ssl_mode(SslMode::Require), PgSslMode::Require));
        assert!(matches!(pg_ssl_mode(SslMode::VerifyFull), PgSslMode::VerifyFull));
    }

    #[test]
    fn query_errors_render_their_message() {
        let err = DatabaseError::QueryError("relation \"movies\" does not exist".into());
        assert_eq!(err.to_string(), "Query error: relation \"movies\" does not exist");
    }
}
