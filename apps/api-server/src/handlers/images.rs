//! Image handlers.

use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /image/{id}
///
/// Returns the stored payload re-encoded as a `data:` URI in a plain
/// text body. Unlike the blog post routes, the id is not range-checked
/// here.
pub async fn get_image(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let image = state
        .images
        .read(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image does not exist".to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(image.to_data_uri()))
}
