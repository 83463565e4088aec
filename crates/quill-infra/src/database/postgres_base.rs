use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, Statement, TransactionTrait, Value,
};

use quill_core::error::RepoError;
use quill_core::ports::{QueryValue, Repository};

/// Convert a port-level query parameter into a SeaORM value.
pub(crate) fn to_db_value(value: QueryValue) -> Value {
    match value {
        QueryValue::Int(v) => v.into(),
        QueryValue::Text(v) => v.into(),
        QueryValue::Bool(v) => v.into(),
        QueryValue::Bytes(v) => v.into(),
    }
}

pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

pub(crate) fn connection_err(e: DbErr) -> RepoError {
    RepoError::Connection(e.to_string())
}

/// Generic SeaORM repository for entities that map to a single table.
///
/// Every operation opens its own transaction and commits before
/// returning; two calls never share one.
pub struct PostgresRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    named_queries: HashMap<String, String>,
    _entity: PhantomData<E>,
}

impl<E> PostgresRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            named_queries: HashMap::new(),
            _entity: PhantomData,
        }
    }

    /// Register a named query executable through
    /// [`Repository::named_query`].
    pub fn with_named_query(mut self, name: impl Into<String>, sql: impl Into<String>) -> Self {
        self.named_queries.insert(name.into(), sql.into());
        self
    }
}

#[async_trait]
impl<E, T, ID> Repository<T, ID> for PostgresRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Clone + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Clone + Send + Sync + 'static,
{
    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let active: E::ActiveModel = entity.clone().into();
        E::insert(active)
            .exec_without_returning(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(entity)
    }

    async fn read(&self, id: ID) -> Result<Option<T>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let result = E::find_by_id(id).one(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(result.map(Into::into))
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let active: E::ActiveModel = entity.into();
        let model = E::update(active).exec(&txn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;

        txn.commit().await.map_err(connection_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let result = E::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<T>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let result = E::find().all(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn query(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<T>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            params.into_iter().map(to_db_value),
        );
        let result = E::find()
            .from_raw_sql(stmt)
            .all(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn named_query(&self, name: &str, params: Vec<QueryValue>) -> Result<Vec<T>, RepoError> {
        let sql = self
            .named_queries
            .get(name)
            .ok_or_else(|| RepoError::Query(format!("no named query registered as '{name}'")))?
            .clone();

        self.query(&sql, params).await
    }
}
