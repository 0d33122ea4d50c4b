#[cfg(not(target_arch = "wasm32"))]
mod native {
    extern crate chirp;

    use actix_web::{web, App, HttpServer, HttpRequest, HttpResponse};

    mod adapter {
        use actix_web::HttpRequest;
        use spin_sdk::http::{Request, Response, Method};

        pub fn actix_to_spin_request(
            req: &HttpRequest,
            body: actix_web::web::Bytes,
        ) -> anyhow::Result<Request> {
            let method = match req.method().as_str() {
                "GET" => Method::Get,
                "POST" => Method::Post,
                "PUT" => Method::Put,
                "DELETE" => Method::Delete,
                "HEAD" => Method::Head,
                "OPTIONS" => Method::Options,
                "PATCH" => Method::Patch,
                _ => Method::Get,
            };

            let uri = req.uri().to_string();
            let body_vec = body.to_vec();

            let mut req_builder = Request::builder();
            let method_set = req_builder.method(method);
            let uri_set = method_set.uri(&uri);

            // Copy headers
            let mut with_headers = uri_set;
            for (name, value) in req.headers() {
                if let Ok(val_str) = value.to_str() {
                    with_headers = with_headers.header(name.as_str(), val_str);
                }
            }

            Ok(with_headers.body(body_vec).build())
        }

        pub fn spin_to_actix_response(spin_resp: spin_sdk::http::Response) -> actix_web::HttpResponse {
            let status = *spin_resp.status();
            let body = spin_resp.body().to_vec();

            let mut response = actix_web::HttpResponse::build(
                actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            );

            response.body(body)
        }
    }

    pub async fn run() -> std::io::Result<()> {
        println!("Server listening on http://0.0.0.0:3000");

        HttpServer::new(|| {
            App::new()
                .default_service(web::route().to(handle_all))
        })
        .bind("0.0.0.0:3000")?
        .run()
        .await
    }

    async fn handle_all(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let path = req.path().to_string();
        let method = req.method().as_str();

        let spin_req = match adapter::actix_to_spin_request(&req, body) {
            Ok(r) => r,
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({"error": "Invalid request"}))
            }
        };

        let result = match (method, path.as_str()) {
            ("POST", "/api/register") => chirp::users::register_user(spin_req),
            ("POST", "/api/login") => chirp::auth::login_user(spin_req),
            ("POST", "/api/logout") => chirp::auth::logout_user(spin_req),
            ("POST", "/api/posts") => chirp::posts::handle_create_post(spin_req),
            ("GET", "/api/posts") => chirp::posts::list_posts(),
            ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/comment") => {
                chirp::posts::handle_add_comment(spin_req)
            }
            ("POST", p) if p.starts_with("/api/posts/") && p.ends_with("/like") => {
                chirp::follow::handle_like(spin_req)
            }
            ("POST", p) if p.starts_with("/api/follow/") => chirp::follow::handle_follow(spin_req),
            ("GET", p) if p.starts_with("/api/isFollowing/") => {
                chirp::follow::handle_is_following(spin_req)
            }
            ("GET", p) if p.starts_with("/api/profile/") => chirp::users::get_profile(p),
            ("GET", p) => chirp::static_server::serve_static(p),
            _ => {
                return HttpResponse::NotFound()
                    .json(serde_json::json!({"error": "No route found"}))
            }
        };

        match result {
            Ok(spin_resp) => adapter::spin_to_actix_response(spin_resp),
            Err(e) => {
                eprintln!("request failed: {e}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({"error": "Internal server error"}))
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
