pub fn token_expiration_hours() -> i64 {
    std::env::var("CHIRP_TOKEN_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(24)
}
