use std::hash::{Hash, Hasher};

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use super::Identified;

/// A binary image record with MIME type and description.
///
/// Images are created standalone and then attached to exactly one post's
/// collection. `post_id` back-references the owning post; it is
/// informational and not consulted for membership checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: i32,
    pub data: Vec<u8>,
    pub mime_type: String,
    pub description: Option<String>,
    pub post_id: Option<i32>,
}

impl Image {
    /// Render the stored payload as a `data:` URI with the payload
    /// base64-encoded.
    pub fn to_data_uri(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

/// Images compare by identifier alone.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Image {}

impl Hash for Image {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identified for Image {
    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_encodes_payload() {
        let image = Image {
            id: 1,
            data: b"hello".to_vec(),
            mime_type: "image/png".to_owned(),
            description: Some("a greeting".to_owned()),
            post_id: None,
        };
        assert_eq!(image.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn data_uri_handles_empty_payload() {
        let image = Image {
            id: 2,
            data: vec![],
            mime_type: "image/jpeg".to_owned(),
            description: None,
            post_id: None,
        };
        assert_eq!(image.to_data_uri(), "data:image/jpeg;base64,");
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = Image {
            id: 7,
            data: vec![1],
            mime_type: "image/png".to_owned(),
            description: None,
            post_id: None,
        };
        let b = Image {
            id: 7,
            data: vec![2, 3],
            mime_type: "image/gif".to_owned(),
            description: Some("other".to_owned()),
            post_id: Some(1),
        };
        assert_eq!(a, b);
    }
}
