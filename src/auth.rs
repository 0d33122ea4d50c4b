use spin_sdk::http::{Request, Response};
use spin_sdk::key_value::Store;
use uuid::Uuid;
use crate::models::models::TokenData;
use crate::core::db::Db;
use crate::core::errors::ApiError;
use crate::core::helpers::now_iso;
use crate::config::token_expiration_hours;
use crate::users::authenticate;

fn token_store() -> anyhow::Result<Store> {
    Store::open_default().map_err(|e| anyhow::anyhow!("failed to open key-value store: {e}"))
}

/// Associate a fresh opaque token with a user id. Tokens live as separate
/// key-value entries, outside the main document; the store operations only
/// ever see the resolved user id.
pub fn issue_token(user_id: u64) -> anyhow::Result<String> {
    let store = token_store()?;
    let token = Uuid::new_v4().to_string();
    let data = TokenData {
        user_id,
        created_at: now_iso(),
    };
    store.set_json(&format!("token:{}", token), &data)?;
    Ok(token)
}

pub fn login_user(req: Request) -> anyhow::Result<Response> {
    let creds: serde_json::Value = serde_json::from_slice(req.body())?;
    let username = creds["username"].as_str().unwrap_or_default();
    let password = creds["password"].as_str().unwrap_or_default();

    let db = Db::open()?;
    match authenticate(&db.data, username, password) {
        Ok(user) => {
            let token = issue_token(user.id)?;
            Ok(Response::builder()
                .status(200)
                .header("Content-Type", "application/json")
                .body(serde_json::to_vec(&serde_json::json!({
                    "message": "Login successful!",
                    "token": token,
                    "user_id": user.id,
                }))?)
                .build())
        }
        Err(err) => Ok(ApiError::from(err).into()),
    }
}

pub fn logout_user(req: Request) -> anyhow::Result<Response> {
    let auth_header = req.header("Authorization").and_then(|h| h.as_str()).unwrap_or_default();

    if !auth_header.starts_with("Bearer ") {
        return Ok(ApiError::Unauthorized.into());
    }

    let token = auth_header.trim_start_matches("Bearer ");
    let store = token_store()?;
    store.delete(&format!("token:{}", token))?;

    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(serde_json::to_vec(&serde_json::json!({
            "message": "Logged out successfully"
        }))?)
        .build())
}

/// Resolve a request to "current user id, or none". Users are never deleted,
/// so an unexpired token always points at a live record.
pub fn validate_token(req: &Request) -> Option<u64> {
    let store = Store::open_default().ok()?;
    let auth_header = req.header("Authorization")?.as_str().unwrap_or_default();
    if !auth_header.starts_with("Bearer ") {
        return None;
    }
    let token = auth_header.trim_start_matches("Bearer ");
    let data = store.get_json::<TokenData>(&format!("token:{}", token)).ok()??;

    if let Ok(created) = chrono::DateTime::parse_from_rfc3339(&data.created_at) {
        let now = chrono::Utc::now();
        let age_hours = (now - created.with_timezone(&chrono::Utc)).num_hours();
        if age_hours > token_expiration_hours() {
            return None;
        }
    }
    Some(data.user_id)
}
