//! Async unary handlers.
//!
//! Same shape as [`crate::Handler`], but the result arrives through a
//! future. A handler is any async function or closure taking a
//! [`Request`] and resolving to [`UnaryResult`]:
//!
//! ```text
//! async fn say_hello(req: Request<String>) -> UnaryResult<String> { … }
//!        ↓ unary::handler::boxed(say_hello)
//! Arc<dyn UnaryHandler<String, String>>        ← BoxedUnaryHandler
//!        ↓
//! handler.call(req)  at request time           ← one vtable dispatch
//!        ↓
//! Box::pin(say_hello(req))                     ← BoxFuture
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// A heap-allocated, type-erased future.
///
/// `Send + 'static` so a runtime may move it across worker threads.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// What every handler and interceptor in a unary chain resolves to.
pub type UnaryResult<T> = Result<Response<T>, Status>;

/// Async terminal handler of a unary chain.
pub trait UnaryHandler<Req, Res>: Send + Sync + 'static {
    fn call(&self, req: Request<Req>) -> BoxFuture<UnaryResult<Res>>;
}

/// A shared, type-erased unary handler.
pub type BoxedUnaryHandler<Req, Res> = Arc<dyn UnaryHandler<Req, Res>>;

impl<F, Fut, Req, Res> UnaryHandler<Req, Res> for F
where
    F: Fn(Request<Req>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = UnaryResult<Res>> + Send + 'static,
{
    fn call(&self, req: Request<Req>) -> BoxFuture<UnaryResult<Res>> {
        Box::pin(self(req))
    }
}

/// Erases an async function or closure into a [`BoxedUnaryHandler`].
pub fn boxed<F, Fut, Req, Res>(f: F) -> BoxedUnaryHandler<Req, Res>
where
    F: Fn(Request<Req>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = UnaryResult<Res>> + Send + 'static,
    Req: 'static,
    Res: 'static,
{
    Arc::new(f)
}
