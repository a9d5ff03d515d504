//! Minimal waymark example: CRUD-style routes, one guarded by middleware.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/users/me
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'
//!   curl -X DELETE http://localhost:3000/users/42 -H 'authorization: yes'
//!   curl -X PURGE http://localhost:3000/cache/users
//!   curl http://localhost:3000/health

use waymark::middleware::{self, Next};
use waymark::{BoxError, Method, Request, Response, Router, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let auth = middleware::from_fn(|req: Request, next: Next| async move {
        if req.header("authorization").is_none() {
            return Ok(Response::status(401));
        }
        next.run(req).await
    });

    let app = Router::new()
        .middleware("trace", middleware::trace())
        .middleware("auth", auth)
        .route("GET", "/users/{id}", get_user, &["trace"])
        .route("GET", "/users/me", get_me, &["trace"])
        .route("POST", "/users", create_user, &["trace"])
        .route("DELETE", "/users/{id}", delete_user, &["trace", "auth"])
        .on(Method::Purge, "/cache/{key}", purge)
        .any("/health", health);

    for (pattern, score) in app.routes() {
        tracing::info!(pattern, score, "route");
    }

    if let Err(e) = Server::bind("0.0.0.0:3000").serve(app).await {
        tracing::error!("server error: {e}");
    }
}

// GET /users/{id}
async fn get_user(req: Request) -> Result<Response, BoxError> {
    let id = req.param("id").unwrap_or("unknown");
    Ok(Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#)))
}

// GET /users/me: more literal segments, so it is tried before /users/{id}.
async fn get_me(_req: Request) -> Result<Response, BoxError> {
    Ok(Response::json(r#"{"id":"me"}"#))
}

// POST /users
async fn create_user(req: Request) -> Result<Response, BoxError> {
    if req.body().is_empty() {
        return Err("empty body".into());
    }
    Ok(Response::json(r#"{"id":"99","name":"new_user"}"#)
        .with_status(201)
        .with_header("location", "/users/99"))
}

// DELETE /users/{id} → 204 No Content
async fn delete_user(_req: Request) -> Result<Response, BoxError> {
    Ok(Response::status(204))
}

// PURGE /cache/{key}: bound to a non-standard method, so GET /cache/x is a 404.
async fn purge(req: Request) -> Result<Response, BoxError> {
    let evicted: Vec<String> = req.params().iter().map(|(k, v)| format!("{k}={v}")).collect();
    Ok(Response::text(evicted.join(",")))
}

// Any method.
async fn health(_req: Request) -> Result<&'static str, BoxError> {
    Ok("ok")
}
