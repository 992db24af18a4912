use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::types::ToSql;

/// Database defines the few operations the installer needs from a session.
/// The handle stays owned by the caller and is never closed here.
#[async_trait::async_trait]
pub trait Database: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    /// Submits a multi-statement script in a single round trip.
    async fn execute(&self, sql: &str) -> Result<(), Self::Error>;
    /// Runs a parameterized query returning exactly one row of one boolean.
    async fn scalar(&self, sql: &str, args: &[&str]) -> Result<bool, Self::Error>;
    /// Blocks until the session holds the advisory lock for `key`.
    async fn lock(&self, key: &str) -> Result<(), Self::Error>;
    /// Releases a session advisory lock taken with [`Database::lock`].
    async fn unlock(&self, key: &str) -> Result<(), Self::Error>;
}

#[async_trait::async_trait]
impl Database for Client {
    type Error = tokio_postgres::Error;
    async fn execute(&self, sql: &str) -> Result<(), Self::Error> {
        self.batch_execute(sql).await
    }
    async fn scalar(&self, sql: &str, args: &[&str]) -> Result<bool, Self::Error> {
        let params = args
            .iter()
            .map(|a| a as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();
        self.query_one(sql, &params).await?.try_get::<_, bool>(0)
    }
    async fn lock(&self, key: &str) -> Result<(), Self::Error> {
        const SQL: &str = "SELECT pg_advisory_lock(hashtext($1))";
        self.query_one(SQL, &[&key]).await.map(|_| ())
    }
    async fn unlock(&self, key: &str) -> Result<(), Self::Error> {
        const SQL: &str = "SELECT pg_advisory_unlock(hashtext($1))";
        self.query_one(SQL, &[&key]).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl Database for Arc<Client> {
    type Error = tokio_postgres::Error;
    async fn execute(&self, sql: &str) -> Result<(), Self::Error> {
        <Client as Database>::execute(self, sql).await
    }
    async fn scalar(&self, sql: &str, args: &[&str]) -> Result<bool, Self::Error> {
        <Client as Database>::scalar(self, sql, args).await
    }
    async fn lock(&self, key: &str) -> Result<(), Self::Error> {
        <Client as Database>::lock(self, key).await
    }
    async fn unlock(&self, key: &str) -> Result<(), Self::Error> {
        <Client as Database>::unlock(self, key).await
    }
}
