use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::Identified;

/// A blog post with its scalar fields, ordered tags, and the ids of the
/// images it owns.
///
/// The id is caller-assigned. Image rows are not embedded here; the post
/// owns their ids and the API layer fetches the rows explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    /// Published-date marker. Stored as supplied; the format is not
    /// validated.
    pub date: String,
    pub tags: Vec<String>,
    pub preview_image: Option<Vec<u8>>,
    pub image_ids: Vec<i32>,
}

/// Posts compare by identifier alone.
impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}

impl Hash for Post {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identified for Post {
    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn post(id: i32, title: &str) -> Post {
        Post {
            id,
            title: title.to_owned(),
            content: "content".to_owned(),
            author: None,
            date: "2024-01-01".to_owned(),
            tags: vec![],
            preview_image: None,
            image_ids: vec![],
        }
    }

    #[test]
    fn equality_is_by_id_only() {
        assert_eq!(post(1, "a"), post(1, "b"));
        assert_ne!(post(1, "a"), post(2, "a"));
    }

    #[test]
    fn hash_is_consistent_with_equality() {
        let mut set = HashSet::new();
        set.insert(post(1, "a"));
        set.insert(post(1, "b"));
        set.insert(post(2, "a"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&post(1, "anything")));
    }
}
