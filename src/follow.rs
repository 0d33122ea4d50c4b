use spin_sdk::http::{Request, Response};
use crate::models::models::{Database, Follow, Like};
use crate::core::db::Db;
use crate::core::errors::{ApiError, StoreError};
use crate::core::helpers::decode_segment;
use crate::auth::validate_token;
use crate::posts::post_id_from_path;
use crate::users::lookup_by_username;

// === Store operations ===

/// Insert the like edge if absent, remove it if present. Returns the
/// resulting presence state; two consecutive toggles restore the original.
pub fn toggle_like(db: &mut Database, user_id: u64, post_id: u64) -> bool {
    if let Some(pos) = db
        .likes
        .iter()
        .position(|l| l.user_id == user_id && l.post_id == post_id)
    {
        db.likes.remove(pos);
        false
    } else {
        db.likes.push(Like { user_id, post_id });
        true
    }
}

/// Same toggle semantics as likes, with the self-follow edge rejected before
/// any mutation.
pub fn toggle_follow(db: &mut Database, follower_id: u64, following_id: u64) -> Result<bool, StoreError> {
    if follower_id == following_id {
        return Err(StoreError::SelfFollow);
    }

    if let Some(pos) = db
        .follows
        .iter()
        .position(|f| f.follower_id == follower_id && f.following_id == following_id)
    {
        db.follows.remove(pos);
        Ok(false)
    } else {
        db.follows.push(Follow { follower_id, following_id });
        Ok(true)
    }
}

pub fn is_following(db: &Database, follower_id: u64, following_id: u64) -> bool {
    db.follows
        .iter()
        .any(|f| f.follower_id == follower_id && f.following_id == following_id)
}

pub fn count_followers(db: &Database, user_id: u64) -> usize {
    db.follows.iter().filter(|f| f.following_id == user_id).count()
}

pub fn count_following(db: &Database, user_id: u64) -> usize {
    db.follows.iter().filter(|f| f.follower_id == user_id).count()
}

// === HTTP handlers ===

pub fn handle_like(req: Request) -> anyhow::Result<Response> {
    let user_id = match validate_token(&req) {
        Some(uid) => uid,
        None => return Ok(ApiError::Unauthorized.into()),
    };

    // Path shape: /api/posts/{id}/like
    let post_id = match post_id_from_path(req.path(), "like") {
        Some(id) => id,
        None => return Ok(ApiError::BadRequest("Invalid post id".to_string()).into()),
    };

    let mut db = Db::open()?;
    let liked = toggle_like(&mut db.data, user_id, post_id);
    db.flush()?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({ "liked": liked }))?)
        .build())
}

pub fn handle_follow(req: Request) -> anyhow::Result<Response> {
    let user_id = match validate_token(&req) {
        Some(uid) => uid,
        None => return Ok(ApiError::Unauthorized.into()),
    };

    let username = decode_segment(req.path().trim_start_matches("/api/follow/"));

    let mut db = Db::open()?;
    let target_id = match lookup_by_username(&db.data, &username) {
        Some(target) => target.id,
        None => return Ok(ApiError::from(StoreError::NotFound("User")).into()),
    };

    let following = match toggle_follow(&mut db.data, user_id, target_id) {
        Ok(state) => state,
        Err(err) => return Ok(ApiError::from(err).into()),
    };
    db.flush()?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({ "following": following }))?)
        .build())
}

/// Anonymous callers and unknown targets both read as "not following",
/// matching the frontend's expectations.
pub fn handle_is_following(req: Request) -> anyhow::Result<Response> {
    let username = decode_segment(req.path().trim_start_matches("/api/isFollowing/"));

    let following = match validate_token(&req) {
        Some(user_id) => {
            let db = Db::open()?;
            match lookup_by_username(&db.data, &username) {
                Some(target) => is_following(&db.data, user_id, target.id),
                None => false,
            }
        }
        None => false,
    };

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({ "following": following }))?)
        .build())
}
