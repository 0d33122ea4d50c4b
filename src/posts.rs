use spin_sdk::http::{Request, Response};
use crate::models::models::{Comment, Database, Post};
use crate::core::db::Db;
use crate::core::errors::ApiError;
use crate::core::helpers::{now_iso, sanitize_text};
use crate::auth::validate_token;
use crate::feed::assemble_feed;

// === Store operations ===

/// Append a post. Content is accepted as-is at this layer, empty strings
/// included; the user id is not re-checked against the user collection.
pub fn create_post(db: &mut Database, user_id: u64, content: &str) -> Post {
    let post = Post {
        id: db.allocate_id(),
        user_id,
        content: content.to_string(),
        created_at: now_iso(),
    };
    db.posts.push(post.clone());
    post
}

/// Append a comment. The post id is deliberately not validated: a comment on
/// an unknown post is stored but never surfaced by any view.
pub fn add_comment(db: &mut Database, user_id: u64, post_id: u64, content: &str) -> Comment {
    let comment = Comment {
        id: db.allocate_id(),
        post_id,
        user_id,
        content: content.to_string(),
        created_at: now_iso(),
    };
    db.comments.push(comment.clone());
    comment
}

// === HTTP handlers ===

pub fn handle_create_post(req: Request) -> anyhow::Result<Response> {
    let user_id = match validate_token(&req) {
        Some(uid) => uid,
        None => return Ok(ApiError::Unauthorized.into()),
    };

    let body: serde_json::Value = serde_json::from_slice(req.body())?;
    let content = sanitize_text(body["content"].as_str().unwrap_or_default());

    let mut db = Db::open()?;
    let post = create_post(&mut db.data, user_id, &content);
    db.flush()?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Post created!",
            "post": post,
        }))?)
        .build())
}

/// Public feed: every post, assembled fresh on each read.
pub fn list_posts() -> anyhow::Result<Response> {
    let db = Db::open()?;
    let feed = assemble_feed(&db.data);

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&feed)?)
        .build())
}

pub fn handle_add_comment(req: Request) -> anyhow::Result<Response> {
    let user_id = match validate_token(&req) {
        Some(uid) => uid,
        None => return Ok(ApiError::Unauthorized.into()),
    };

    // Path shape: /api/posts/{id}/comment
    let post_id = match post_id_from_path(req.path(), "comment") {
        Some(id) => id,
        None => return Ok(ApiError::BadRequest("Invalid post id".to_string()).into()),
    };

    let body: serde_json::Value = serde_json::from_slice(req.body())?;
    let content = sanitize_text(body["content"].as_str().unwrap_or_default());

    let mut db = Db::open()?;
    let comment = add_comment(&mut db.data, user_id, post_id, &content);
    db.flush()?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Comment added!",
            "comment": comment,
        }))?)
        .build())
}

pub fn post_id_from_path(path: &str, action: &str) -> Option<u64> {
    let rest = path.strip_prefix("/api/posts/")?;
    let id = rest.strip_suffix(action)?.strip_suffix('/')?;
    id.parse::<u64>().ok()
}
