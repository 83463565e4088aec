//! Image entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Image;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub data: Vec<u8>,
    pub mime_type: String,
    pub description: Option<String>,
    pub post_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Image.
impl From<Model> for Image {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            data: model.data,
            mime_type: model.mime_type,
            description: model.description,
            post_id: model.post_id,
        }
    }
}

/// Conversion from the domain Image to SeaORM ActiveModel.
impl From<Image> for ActiveModel {
    fn from(image: Image) -> Self {
        Self {
            id: Set(image.id),
            data: Set(image.data),
            mime_type: Set(image.mime_type),
            description: Set(image.description),
            post_id: Set(image.post_id),
        }
    }
}
