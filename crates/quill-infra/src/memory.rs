//! In-memory repository - used as fallback when the database is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::Identified;
use quill_core::error::RepoError;
use quill_core::ports::{QueryValue, Repository};

/// HashMap-backed store keyed by entity id, behind an async RwLock.
///
/// Note: Data is lost on process restart. Ad-hoc and named queries are
/// not available here.
pub struct MemoryRepository<T> {
    rows: RwLock<HashMap<i32, T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T, i32> for MemoryRepository<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.id()) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn read(&self, id: i32) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }

    async fn read_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn query(&self, _sql: &str, _params: Vec<QueryValue>) -> Result<Vec<T>, RepoError> {
        Err(RepoError::Query(
            "ad-hoc queries are not supported by the in-memory store".to_string(),
        ))
    }

    async fn named_query(&self, _name: &str, _params: Vec<QueryValue>) -> Result<Vec<T>, RepoError> {
        Err(RepoError::Query(
            "named queries are not supported by the in-memory store".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use quill_core::domain::Image;

    use super::*;

    fn image(id: i32) -> Image {
        Image {
            id,
            data: vec![1, 2, 3],
            mime_type: "image/png".to_owned(),
            description: Some("test".to_owned()),
            post_id: None,
        }
    }

    #[tokio::test]
    async fn create_and_read() {
        let repo = MemoryRepository::new();
        repo.create(image(1)).await.unwrap();
        assert_eq!(repo.read(1).await.unwrap(), Some(image(1)));
        assert_eq!(repo.read(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let repo = MemoryRepository::new();
        repo.create(image(1)).await.unwrap();
        assert!(matches!(
            repo.create(image(1)).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn update_requires_existing_row() {
        let repo = MemoryRepository::new();
        assert!(matches!(
            repo.update(image(1)).await,
            Err(RepoError::NotFound)
        ));
        repo.create(image(1)).await.unwrap();
        repo.update(image(1)).await.unwrap();
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = MemoryRepository::new();
        repo.create(image(1)).await.unwrap();
        repo.delete(1).await.unwrap();
        assert_eq!(repo.read(1).await.unwrap(), None);
        assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn read_all_returns_every_row() {
        let repo = MemoryRepository::new();
        repo.create(image(1)).await.unwrap();
        repo.create(image(2)).await.unwrap();
        assert_eq!(repo.read_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn raw_queries_are_unsupported() {
        let repo = MemoryRepository::<Image>::new();
        assert!(matches!(
            repo.query("SELECT 1", vec![]).await,
            Err(RepoError::Query(_))
        ));
        assert!(matches!(
            repo.named_query("posts_by_author", vec![]).await,
            Err(RepoError::Query(_))
        ));
    }
}
