//! Unary interceptors and the [`Next`] continuation.

use std::future::Future;
use std::sync::Arc;

use crate::request::Request;

use super::handler::{BoxFuture, BoxedUnaryHandler, UnaryResult};

/// An async middleware unit for unary calls.
///
/// Receives the request and the rest of the chain. Await `next.run(req)` to
/// continue; return without doing so to short-circuit.
///
/// Implemented for every async function or closure with the signature
///
/// ```text
/// async fn name(req: Request<Req>, next: Next<Req, Res>) -> UnaryResult<Res>
/// ```
pub trait Interceptor<Req, Res>: Send + Sync + 'static {
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>>;
}

/// A shared, type-erased interceptor.
pub type BoxedInterceptor<Req, Res> = Arc<dyn Interceptor<Req, Res>>;

impl<F, Fut, Req, Res> Interceptor<Req, Res> for F
where
    F: Fn(Request<Req>, Next<Req, Res>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = UnaryResult<Res>> + Send + 'static,
{
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>> {
        Box::pin(self(req, next))
    }
}

/// Erases an interceptor into a [`BoxedInterceptor`].
pub fn boxed<I, Req, Res>(interceptor: I) -> BoxedInterceptor<Req, Res>
where
    I: Interceptor<Req, Res>,
{
    Arc::new(interceptor)
}

// ── Next ──────────────────────────────────────────────────────────────────────

/// The remainder of a unary chain.
///
/// Futures outlive the stack frame that created them, so unlike the
/// synchronous [`crate::Next`] this one owns its position: a shared handle to
/// the interceptor list, the index of the next interceptor, and the terminal
/// handler. Index `len` means "the terminal handler is next".
pub struct Next<Req, Res> {
    interceptors: Arc<[BoxedInterceptor<Req, Res>]>,
    index: usize,
    terminal: BoxedUnaryHandler<Req, Res>,
}

impl<Req: 'static, Res: 'static> Next<Req, Res> {
    pub(crate) fn new(
        interceptors: Arc<[BoxedInterceptor<Req, Res>]>,
        index: usize,
        terminal: BoxedUnaryHandler<Req, Res>,
    ) -> Self {
        Self { interceptors, index, terminal }
    }

    /// Runs the rest of the chain.
    pub fn run(self, req: Request<Req>) -> BoxFuture<UnaryResult<Res>> {
        let current = self.interceptors.get(self.index).cloned();
        match current {
            Some(current) => {
                let next = Next { index: self.index + 1, ..self };
                current.intercept(req, next)
            }
            None => self.terminal.call(req),
        }
    }

    /// Number of interceptors left before the terminal handler.
    pub fn remaining(&self) -> usize {
        self.interceptors.len() - self.index
    }
}

impl<Req, Res> Clone for Next<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            interceptors: Arc::clone(&self.interceptors),
            index: self.index,
            terminal: Arc::clone(&self.terminal),
        }
    }
}
