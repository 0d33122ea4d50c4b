use serde::Serialize;
use crate::models::models::{Comment, Database};
use crate::follow::{count_followers, count_following};
use crate::users::lookup_by_username;

/// Author username joined in for display; absent authors fall back to this
/// sentinel rather than dropping the post.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// A post as the feed renders it: the post fields plus the author's
/// username, the like count and the full comment list. Comments are embedded
/// raw and not joined to their own authors.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
    pub user: String,
    pub likes: usize,
    pub comments: Vec<Comment>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePost {
    pub id: u64,
    pub content: String,
    pub created_at: String,
    pub likes: usize,
    pub comments: Vec<Comment>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub username: String,
    pub bio: String,
    pub followers: usize,
    pub following: usize,
    pub posts: Vec<ProfilePost>,
}

fn likes_of(db: &Database, post_id: u64) -> usize {
    db.likes.iter().filter(|l| l.post_id == post_id).count()
}

fn comments_of(db: &Database, post_id: u64) -> Vec<Comment> {
    db.comments
        .iter()
        .filter(|c| c.post_id == post_id)
        .cloned()
        .collect()
}

/// Join every post with its author, like count and comments, in insertion
/// order of the post collection (creation order, not recency).
pub fn assemble_feed(db: &Database) -> Vec<PostView> {
    db.posts
        .iter()
        .map(|p| PostView {
            id: p.id,
            user_id: p.user_id,
            content: p.content.clone(),
            created_at: p.created_at.clone(),
            user: db
                .users
                .iter()
                .find(|u| u.id == p.user_id)
                .map(|u| u.username.clone())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            likes: likes_of(db, p.id),
            comments: comments_of(db, p.id),
        })
        .collect()
}

pub fn assemble_profile(db: &Database, username: &str) -> Option<ProfileView> {
    let user = lookup_by_username(db, username)?;

    let posts = db
        .posts
        .iter()
        .filter(|p| p.user_id == user.id)
        .map(|p| ProfilePost {
            id: p.id,
            content: p.content.clone(),
            created_at: p.created_at.clone(),
            likes: likes_of(db, p.id),
            comments: comments_of(db, p.id),
        })
        .collect();

    Some(ProfileView {
        username: user.username.clone(),
        bio: user.bio.clone(),
        followers: count_followers(db, user.id),
        following: count_following(db, user.id),
        posts,
    })
}
