//! SeaORM entities for the blog schema.

pub mod image;
pub mod post;
pub mod post_image;
pub mod post_tag;
