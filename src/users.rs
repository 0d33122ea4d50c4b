use spin_sdk::http::{Request, Response};
use crate::models::models::{Database, User};
use crate::core::db::Db;
use crate::core::errors::{ApiError, StoreError};
use crate::core::helpers::{decode_segment, hash_password, sanitize_text, verify_password};
use crate::auth::issue_token;
use crate::feed::assemble_profile;

// === Store operations ===

/// Create a user with a salted argon2 hash of the password. Fails with
/// `DuplicateUsername` on an exact case-sensitive match; no partial state is
/// left behind.
pub fn register(db: &mut Database, username: &str, password: &str, bio: &str) -> Result<User, StoreError> {
    if db.users.iter().any(|u| u.username == username) {
        return Err(StoreError::DuplicateUsername);
    }

    let password_hash = hash_password(password).map_err(|e| StoreError::Internal(e.to_string()))?;
    let user = User {
        id: db.allocate_id(),
        username: username.to_string(),
        password_hash,
        bio: bio.to_string(),
    };
    db.users.push(user.clone());
    Ok(user)
}

/// A missing user and a wrong password produce the same `InvalidCredentials`
/// failure, so callers cannot tell the two apart.
pub fn authenticate(db: &Database, username: &str, password: &str) -> Result<User, StoreError> {
    let user = match lookup_by_username(db, username) {
        Some(u) => u,
        None => return Err(StoreError::InvalidCredentials),
    };
    if verify_password(password, &user.password_hash) {
        Ok(user.clone())
    } else {
        Err(StoreError::InvalidCredentials)
    }
}

pub fn lookup_by_username<'a>(db: &'a Database, username: &str) -> Option<&'a User> {
    db.users.iter().find(|u| u.username == username)
}

/// Response shape for a user. The password hash never leaves the store.
pub fn build_user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "bio": user.bio,
    })
}

// === HTTP handlers ===

pub fn register_user(req: Request) -> anyhow::Result<Response> {
    let body: serde_json::Value = serde_json::from_slice(req.body())?;
    let username = body["username"].as_str().unwrap_or("");
    let password = body["password"].as_str().unwrap_or("");
    let bio = body["bio"].as_str().unwrap_or("");

    if username.is_empty() {
        return Ok(ApiError::BadRequest("Username is required".to_string()).into());
    }
    if password.is_empty() {
        return Ok(ApiError::BadRequest("Password is required".to_string()).into());
    }

    // Sanitize at input time; the store stays permissive.
    let username = sanitize_text(username);
    let bio = sanitize_text(bio);

    let mut db = Db::open()?;
    let user = match register(&mut db.data, &username, password, &bio) {
        Ok(user) => user,
        Err(err) => return Ok(ApiError::from(err).into()),
    };
    db.flush()?;

    let token = issue_token(user.id)?;

    Ok(Response::builder()
        .status(201)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "User registered successfully!",
            "user": build_user_json(&user),
            "token": token,
        }))?)
        .build())
}

pub fn get_profile(path: &str) -> anyhow::Result<Response> {
    let username = decode_segment(path.trim_start_matches("/api/profile/"));

    if username.is_empty() {
        return Ok(ApiError::BadRequest("Username required".to_string()).into());
    }

    let db = Db::open()?;
    match assemble_profile(&db.data, &username) {
        Some(profile) => Ok(Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(&profile)?)
            .build()),
        None => Ok(ApiError::from(StoreError::NotFound("User")).into()),
    }
}
