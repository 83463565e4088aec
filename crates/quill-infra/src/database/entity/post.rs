//! Blog post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Post;

/// Scalar columns of a post. Tags and owned image ids live in their own
/// tables and are loaded separately.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: Option<String>,
    pub date: String,
    pub preview_image: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain post from this row plus its loaded collections.
    pub fn into_post(self, tags: Vec<String>, image_ids: Vec<i32>) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            date: self.date,
            tags,
            preview_image: self.preview_image,
            image_ids,
        }
    }
}

/// Conversion from a domain Post to the scalar-column ActiveModel.
impl From<&Post> for ActiveModel {
    fn from(post: &Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            author: Set(post.author.clone()),
            date: Set(post.date.clone()),
            preview_image: Set(post.preview_image.clone()),
        }
    }
}
