pub mod config;
pub mod core;
pub mod models;

pub mod auth;
pub mod feed;
pub mod follow;
pub mod posts;
pub mod static_server;
pub mod users;

use spin_sdk::http::{IntoResponse, Request, Response};
#[cfg(target_arch = "wasm32")]
use spin_sdk::http_component;
use crate::core::errors::ApiError;

// === Component entrypoint ===
#[cfg(target_arch = "wasm32")]
#[http_component]
fn handle(req: Request) -> anyhow::Result<impl IntoResponse> {
    let method = req.method().to_string();
    let path = req.path().to_string();

    // Validation failures come back as 4xx from the handlers themselves;
    // anything escaping as an error here is an I/O-level fault.
    match route(&method, &path, req) {
        Ok(resp) => Ok(resp),
        Err(err) => Ok(ApiError::InternalError(err.to_string()).into()),
    }
}

fn route(method: &str, path: &str, req: Request) -> anyhow::Result<Response> {
    match (method, path) {
        ("POST", "/api/register") => users::register_user(req),
        ("POST", "/api/login") => auth::login_user(req),
        ("POST", "/api/logout") => auth::logout_user(req),
        ("POST", "/api/posts") => posts::handle_create_post(req),
        ("GET", "/api/posts") => posts::list_posts(),
        ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/comment") => {
            posts::handle_add_comment(req)
        }
        ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/like") => {
            follow::handle_like(req)
        }
        ("POST", p) if p.starts_with("/api/follow/") => follow::handle_follow(req),
        ("GET", p) if p.starts_with("/api/isFollowing/") => follow::handle_is_following(req),
        ("GET", p) if p.starts_with("/api/profile/") => users::get_profile(p),
        ("GET", p) => static_server::serve_static(p),
        _ => Ok(Response::builder().status(404).body("Not found").build()),
    }
}
