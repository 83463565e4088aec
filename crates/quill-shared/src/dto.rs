//! Data Transfer Objects - request payload types for the API.
//!
//! Every field is optional at the wire level; the handlers decide which
//! absences are errors, in a fixed order.

use serde::{Deserialize, Serialize};

/// Candidate blog post, as submitted on create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub preview_image: Option<Vec<u8>>,
    pub image_ids: Option<Vec<i32>>,
}

/// Candidate image, as submitted when attaching to a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagePayload {
    pub id: Option<i32>,
    pub data: Option<Vec<u8>>,
    pub mime_type: Option<String>,
    pub description: Option<String>,
}
