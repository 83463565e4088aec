//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    Statement, TransactionTrait,
};

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{QueryValue, Repository};

use super::entity::image::Entity as ImageEntity;
use super::entity::{post, post_image, post_tag};
use super::postgres_base::{PostgresRepository, connection_err, map_db_err, to_db_value};

/// PostgreSQL image repository - images map 1:1 to a table, so the
/// generic adapter serves them directly.
pub type PostgresImageRepository = PostgresRepository<ImageEntity>;

/// PostgreSQL post repository.
///
/// A post spans three tables: its scalar row, one row per tag, and one
/// join row per owned image. Each port operation still runs as a single
/// transaction; updates replace the dependent rows wholesale.
pub struct PostgresPostRepository {
    db: DbConn,
    named_queries: HashMap<String, String>,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        let mut named_queries = HashMap::new();
        named_queries.insert(
            "posts_by_author".to_owned(),
            "SELECT * FROM blog_post WHERE author = $1".to_owned(),
        );
        Self { db, named_queries }
    }

    async fn load_collections<C>(conn: &C, model: post::Model) -> Result<Post, DbErr>
    where
        C: ConnectionTrait,
    {
        let tags = post_tag::Entity::find()
            .filter(post_tag::Column::PostId.eq(model.id))
            .order_by_asc(post_tag::Column::Position)
            .all(conn)
            .await?
            .into_iter()
            .map(|row| row.tag)
            .collect();

        let image_ids = post_image::Entity::find()
            .filter(post_image::Column::BlogPostId.eq(model.id))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| row.image_id)
            .collect();

        Ok(model.into_post(tags, image_ids))
    }

    async fn store_collections<C>(conn: &C, entity: &Post) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if !entity.tags.is_empty() {
            let rows = entity
                .tags
                .iter()
                .enumerate()
                .map(|(position, tag)| post_tag::ActiveModel {
                    post_id: Set(entity.id),
                    position: Set(position as i32),
                    tag: Set(tag.clone()),
                });
            post_tag::Entity::insert_many(rows)
                .exec_without_returning(conn)
                .await?;
        }

        if !entity.image_ids.is_empty() {
            let rows = entity.image_ids.iter().map(|image_id| post_image::ActiveModel {
                blog_post_id: Set(entity.id),
                image_id: Set(*image_id),
            });
            post_image::Entity::insert_many(rows)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(())
    }

    async fn clear_collections<C>(conn: &C, post_id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(conn)
            .await?;
        post_image::Entity::delete_many()
            .filter(post_image::Column::BlogPostId.eq(post_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Post, i32> for PostgresPostRepository {
    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let active: post::ActiveModel = (&entity).into();
        post::Entity::insert(active)
            .exec_without_returning(&txn)
            .await
            .map_err(map_db_err)?;
        Self::store_collections(&txn, &entity)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(entity)
    }

    async fn read(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let Some(model) = post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
        else {
            txn.commit().await.map_err(connection_err)?;
            return Ok(None);
        };
        let entity = Self::load_collections(&txn, model)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(Some(entity))
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let active: post::ActiveModel = (&entity).into();
        post::Entity::update(active)
            .exec(&txn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoError::NotFound,
                other => map_db_err(other),
            })?;
        Self::clear_collections(&txn, entity.id)
            .await
            .map_err(map_db_err)?;
        Self::store_collections(&txn, &entity)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        Self::clear_collections(&txn, id).await.map_err(map_db_err)?;
        let result = post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(connection_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let models = post::Entity::find().all(&txn).await.map_err(map_db_err)?;
        let mut posts = Vec::with_capacity(models.len());
        for model in models {
            posts.push(
                Self::load_collections(&txn, model)
                    .await
                    .map_err(map_db_err)?,
            );
        }

        txn.commit().await.map_err(connection_err)?;
        Ok(posts)
    }

    async fn query(&self, sql: &str, params: Vec<QueryValue>) -> Result<Vec<Post>, RepoError> {
        let txn = self.db.begin().await.map_err(connection_err)?;

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            params.into_iter().map(to_db_value),
        );
        let models = post::Entity::find()
            .from_raw_sql(stmt)
            .all(&txn)
            .await
            .map_err(map_db_err)?;
        let mut posts = Vec::with_capacity(models.len());
        for model in models {
            posts.push(
                Self::load_collections(&txn, model)
                    .await
                    .map_err(map_db_err)?,
            );
        }

        txn.commit().await.map_err(connection_err)?;
        Ok(posts)
    }

    async fn named_query(&self, name: &str, params: Vec<QueryValue>) -> Result<Vec<Post>, RepoError> {
        let sql = self
            .named_queries
            .get(name)
            .ok_or_else(|| RepoError::Query(format!("no named query registered as '{name}'")))?
            .clone();

        self.query(&sql, params).await
    }
}
