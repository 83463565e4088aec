//! Blog post handlers: CRUD on posts plus a post's image collection.

use actix_web::{HttpResponse, web};
use futures::future::try_join_all;

use quill_core::domain::{Image, Post};
use quill_shared::dto::{ImagePayload, PostPayload};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Check the candidate's required fields in a fixed order and build the
/// domain post. The order is part of the API contract: id (update only),
/// title, content, date.
fn validated_post(payload: PostPayload, require_id: bool) -> Result<Post, AppError> {
    if require_id && payload.id.is_none() {
        return Err(AppError::BadRequest("Blog post must have an id".to_string()));
    }
    let title = match payload.title {
        Some(title) if !title.is_empty() => title,
        _ => {
            return Err(AppError::BadRequest(
                "Blog post must have a title".to_string(),
            ));
        }
    };
    let content = match payload.content {
        Some(content) if !content.is_empty() => content,
        _ => {
            return Err(AppError::BadRequest(
                "Blog post must have a content".to_string(),
            ));
        }
    };
    let Some(date) = payload.date else {
        return Err(AppError::BadRequest(
            "Blog post must have a published date".to_string(),
        ));
    };

    Ok(Post {
        id: payload.id.unwrap_or_default(),
        title,
        content,
        author: payload.author,
        date,
        tags: payload.tags.unwrap_or_default(),
        preview_image: payload.preview_image,
        image_ids: payload.image_ids.unwrap_or_default(),
    })
}

/// Shared id guard: the id must be positive and the post must exist.
async fn existing_post(state: &AppState, id: i32) -> Result<Post, AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest(
            "id must be greater than 0".to_string(),
        ));
    }
    state
        .posts
        .read(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post does not exist".to_string()))
}

/// GET /blogposts/list
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.read_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /blogposts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let candidate = validated_post(body.into_inner(), false)?;

    if state.posts.read(candidate.id).await?.is_some() {
        return Err(AppError::Conflict("Blog post already exists".to_string()));
    }

    let created = state.posts.create(candidate).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /blogposts
pub async fn update(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let candidate = validated_post(body.into_inner(), true)?;

    if state.posts.read(candidate.id).await?.is_none() {
        return Err(AppError::NotFound("Blog post does not exist".to_string()));
    }

    let updated = state.posts.update(candidate).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /blogposts/{id}
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = existing_post(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /blogposts/{id}
///
/// Returns the deleted post so the caller sees what was removed.
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = existing_post(&state, id).await?;

    state.posts.delete(id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /blogposts/{id}/images
pub async fn attach_image(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<ImagePayload>,
) -> AppResult<HttpResponse> {
    let mut post = existing_post(&state, path.into_inner()).await?;

    let payload = body.into_inner();
    let Some(description) = payload.description else {
        return Err(AppError::BadRequest(
            "Image must have a description".to_string(),
        ));
    };
    let image = Image {
        id: payload.id.unwrap_or_default(),
        data: payload.data.unwrap_or_default(),
        mime_type: payload.mime_type.unwrap_or_default(),
        description: Some(description),
        post_id: Some(post.id),
    };

    post.image_ids.push(image.id);

    // Two independent transactions; a failure after the first leaves the
    // image persisted but unlinked.
    state.images.create(image).await?;
    let updated = state.posts.update(post).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /blogposts/{id}/images/{image_id}
pub async fn detach_image(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> AppResult<HttpResponse> {
    let (post_id, image_id) = path.into_inner();
    let mut post = existing_post(&state, post_id).await?;

    if image_id <= 0 {
        return Err(AppError::BadRequest(
            "image id must be greater than 0".to_string(),
        ));
    }
    if state.images.read(image_id).await?.is_none() {
        return Err(AppError::NotFound("Image does not exist".to_string()));
    }
    if !post.image_ids.contains(&image_id) {
        return Err(AppError::Conflict(
            "Image is not associated with the blog post".to_string(),
        ));
    }

    post.image_ids.retain(|&owned| owned != image_id);

    state.images.delete(image_id).await?;
    let updated = state.posts.update(post).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /blogposts/{id}/images
///
/// The owned image rows are fetched here, one read per id; rows that
/// disappeared out from under the post are skipped.
pub async fn list_images(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = existing_post(&state, path.into_inner()).await?;

    let images: Vec<Image> = try_join_all(post.image_ids.iter().map(|id| state.images.read(*id)))
        .await?
        .into_iter()
        .flatten()
        .collect();
    Ok(HttpResponse::Ok().json(images))
}
