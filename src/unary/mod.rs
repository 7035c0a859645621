//! Async, gRPC-style unary interceptor chains.
//!
//! The same composition as [`crate::chain`], for handlers that return
//! futures. Requests and responses travel in [`Request`](crate::Request) /
//! [`Response`](crate::Response) envelopes so interceptors can read metadata
//! and hand values forward through extensions; failures are
//! [`Status`](crate::Status) values.
//!
//! The chain itself never awaits anything on its own: every suspension point
//! belongs to an interceptor or the terminal handler.

pub mod handler;
pub mod interceptor;

mod chain;

pub use chain::{UnaryChain, UnaryChainBuilder, chain};
pub use handler::{BoxFuture, BoxedUnaryHandler, UnaryHandler, UnaryResult};
pub use interceptor::{BoxedInterceptor, Interceptor, Next};
