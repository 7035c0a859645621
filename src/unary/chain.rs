//! Chaining unary interceptors.

use std::sync::Arc;

use crate::request::Request;

use super::handler::{BoxFuture, BoxedUnaryHandler, UnaryHandler, UnaryResult};
use super::interceptor::{BoxedInterceptor, Interceptor, Next};

/// A terminal unary handler wrapped in an ordered list of interceptors.
///
/// Handed out as a [`BoxedUnaryHandler`] by [`chain`] and the builder.
pub struct UnaryChain<Req, Res> {
    interceptors: Arc<[BoxedInterceptor<Req, Res>]>,
    terminal: BoxedUnaryHandler<Req, Res>,
}

impl<Req, Res> UnaryChain<Req, Res> {
    pub fn builder() -> UnaryChainBuilder<Req, Res> {
        UnaryChainBuilder { interceptors: Vec::new() }
    }
}

impl<Req: 'static, Res: 'static> UnaryHandler<Req, Res> for UnaryChain<Req, Res> {
    fn call(&self, req: Request<Req>) -> BoxFuture<UnaryResult<Res>> {
        Next::new(Arc::clone(&self.interceptors), 0, Arc::clone(&self.terminal)).run(req)
    }
}

/// Combines `interceptors` and `terminal` into one unary handler.
///
/// Interceptors run in iteration order, `terminal` last. An empty sequence
/// returns `terminal` itself.
///
/// ```rust
/// use interpose::{Request, Response, unary};
/// use interpose::unary::{Next, UnaryResult};
///
/// async fn shout(req: Request<String>, next: Next<String, String>) -> UnaryResult<String> {
///     let res = next.run(req).await?;
///     Ok(res.map(|s| s.to_uppercase()))
/// }
///
/// async fn greet(req: Request<String>) -> UnaryResult<String> {
///     Ok(Response::new(format!("hello {}", req.get_ref())))
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let app = unary::chain([unary::interceptor::boxed(shout)], unary::handler::boxed(greet));
/// let res = app.call(Request::new("bob".to_owned())).await.unwrap();
/// assert_eq!(res.into_inner(), "HELLO BOB");
/// # }
/// ```
pub fn chain<Req, Res>(
    interceptors: impl IntoIterator<Item = BoxedInterceptor<Req, Res>>,
    terminal: BoxedUnaryHandler<Req, Res>,
) -> BoxedUnaryHandler<Req, Res>
where
    Req: 'static,
    Res: 'static,
{
    let interceptors: Arc<[BoxedInterceptor<Req, Res>]> = interceptors.into_iter().collect();
    if interceptors.is_empty() {
        return terminal;
    }
    Arc::new(UnaryChain { interceptors, terminal })
}

/// Fluent construction of a unary chain, outermost interceptor first.
pub struct UnaryChainBuilder<Req, Res> {
    interceptors: Vec<BoxedInterceptor<Req, Res>>,
}

impl<Req: 'static, Res: 'static> UnaryChainBuilder<Req, Res> {
    /// Appends an interceptor. It runs after every interceptor added before it.
    pub fn with(mut self, interceptor: impl Interceptor<Req, Res>) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_boxed(mut self, interceptor: BoxedInterceptor<Req, Res>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Finishes the chain around `terminal`.
    pub fn handler(self, terminal: impl UnaryHandler<Req, Res>) -> BoxedUnaryHandler<Req, Res> {
        chain(self.interceptors, Arc::new(terminal))
    }
}
