use async_trait::async_trait;

use crate::error::RepoError;

/// A parameter value for ad-hoc and named queries.
///
/// Core stays free of database types; infrastructure converts these into
/// whatever the backing store expects.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Bytes(Vec<u8>),
}

/// Generic repository trait defining the persistence contract for one
/// entity type.
///
/// Every method runs as its own independent transaction - there is no
/// cross-call atomicity. Callers composing several calls get exactly the
/// sequence of transactions they wrote.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Insert a new record and return the same entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Fetch a record by its primary key. Absence is `Ok(None)`, never an
    /// error.
    async fn read(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Replace the stored record matching the entity's id.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Remove the record matching the id.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;

    /// Fetch every record of the entity type, in store-native order.
    async fn read_all(&self) -> Result<Vec<T>, RepoError>;

    /// Execute a parameterized ad-hoc query returning entities.
    async fn query(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<T>, RepoError>;

    /// Execute a registered named query returning entities.
    async fn named_query(&self, name: &str, params: Vec<QueryValue>) -> Result<Vec<T>, RepoError>;
}
