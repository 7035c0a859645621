//! Built-in unary interceptors.
//!
//! Each one exercises a different thing an interceptor can do with
//! [`Next`](crate::unary::Next):
//!
//! | Interceptor | Calls `next` | Does |
//! |---|---|---|
//! | [`Trace`] | always | span around the call, latency and code afterwards |
//! | [`Timeout`] | always | drops the rest of the chain once the deadline passes |
//! | [`BearerAuth`] | only when authenticated | short-circuits with `unauthenticated` |
//! | [`Recover`] | always | replaces a failure with a fallback response |
//!
//! Order matters. Put `Trace` first to measure everything, `Recover` before
//! whatever it should recover from:
//!
//! ```rust
//! use std::time::Duration;
//! use interpose::{Request, Response, UnaryChain};
//! use interpose::middleware::{BearerAuth, Timeout, Trace};
//! use interpose::unary::UnaryResult;
//!
//! async fn get_user(req: Request<u64>) -> UnaryResult<String> {
//!     Ok(Response::new(format!("user {}", req.get_ref())))
//! }
//!
//! let app = UnaryChain::builder()
//!     .with(Trace::new())
//!     .with(BearerAuth::new("s3cret"))
//!     .with(Timeout::new(Duration::from_secs(2)))
//!     .handler(get_user);
//! ```

mod auth;
mod recover;
mod timeout;
mod trace;

pub use auth::BearerAuth;
pub use recover::Recover;
pub use timeout::Timeout;
pub use trace::Trace;
