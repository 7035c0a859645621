//! Minimal interpose example — a unary "service" behind the built-in
//! interceptors plus one hand-written one.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic

use std::time::Duration;

use interpose::middleware::{BearerAuth, Recover, Timeout, Trace};
use interpose::unary::{Next, UnaryChain, UnaryResult};
use interpose::{Code, Request, Response, Status};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    // Outermost first: Trace sees everything, Recover only what Timeout and
    // the handler produce, BearerAuth rejects before any of the work starts.
    let app = UnaryChain::builder()
        .with(Trace::new())
        .with(BearerAuth::new("s3cret"))
        .with(Recover::new(|status: Status| match status.code() {
            Code::DeadlineExceeded => Ok(Response::new("stale but cached".to_owned())),
            _ => Err(status),
        }))
        .with(Timeout::new(Duration::from_millis(100)))
        .with(normalize)
        .handler(lookup);

    for (token, name) in [("s3cret", " Alice "), ("s3cret", "slow"), ("guess", "bob")] {
        let mut req = Request::new(name.to_owned()).with_method("/users.Users/Lookup");
        req.metadata_mut()
            .insert("authorization", format!("Bearer {token}").parse().expect("valid header"));

        match app.call(req).await {
            Ok(res) => println!("ok:  {}", res.into_inner()),
            Err(status) => println!("err: {status}"),
        }
    }
}

// Trims and lower-cases the name before anything downstream sees it.
async fn normalize(req: Request<String>, next: Next<String, String>) -> UnaryResult<String> {
    next.run(req.map(|name| name.trim().to_lowercase())).await
}

// GET-style lookup; "slow" simulates a backend that misses the deadline.
async fn lookup(req: Request<String>) -> UnaryResult<String> {
    if req.get_ref() == "slow" {
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    Ok(Response::new(format!(r#"{{"user":"{}"}}"#, req.get_ref())))
}
