//! # interpose
//!
//! Middleware chains for request handlers. One terminal handler, an ordered
//! list of middleware units in front of it, one handler out.
//!
//! ## The contract
//!
//! Each unit receives the request and `next`, the rest of the chain. It may
//! act before calling `next`, after it returns, rewrite what it returns, or
//! never call it at all:
//!
//! - **Order** — units run in the order given, the terminal handler last.
//! - **Short-circuit** — a unit that skips `next` stops everything after it.
//! - **Wrap** — whatever a unit does after `next` returns happens after every
//!   later unit and the terminal handler are done.
//! - **No opinions** — the chain never logs, retries, catches or wraps
//!   anything. Results come back exactly as the outermost unit returned them.
//!
//! Two flavours share that contract:
//!
//! - [`chain`] — synchronous, generic over request, response and error.
//! - [`unary`] — async, gRPC-style: [`Request`] / [`Response`] envelopes
//!   with metadata, [`Status`] errors, and built-in interceptors in
//!   [`middleware`].
//!
//! ## Quick start
//!
//! ```rust
//! use interpose::{Chain, from_fn};
//!
//! #[derive(Debug, PartialEq)]
//! struct Denied;
//!
//! struct Call {
//!     token: String,
//!     n: u32,
//! }
//!
//! let app = Chain::builder()
//!     .with(from_fn(|req: Call, next| {
//!         if req.token != "secret" {
//!             return Err(Denied);
//!         }
//!         next.run(req)
//!     }))
//!     .with(from_fn(|req: Call, next| next.run(Call { n: req.n * 10, ..req })))
//!     .handler(|req: Call| Ok(req.n + 1));
//!
//! let call = |token: &str, n| Call { token: token.to_owned(), n };
//! assert_eq!(app.call(call("secret", 4)), Ok(41));
//! assert_eq!(app.call(call("guess", 4)), Err(Denied));
//! ```

mod request;
mod response;
mod status;

pub mod chain;
pub mod handler;
pub mod middleware;
pub mod unary;

pub use chain::{BoxedMiddleware, Chain, ChainBuilder, Middleware, Next, chain, from_fn};
pub use handler::{BoxedHandler, Handler};
pub use request::Request;
pub use response::Response;
pub use status::{Code, Status};
pub use unary::UnaryChain;
