//! Turn downstream failures into responses.

use std::sync::Arc;

use crate::request::Request;
use crate::status::Status;
use crate::unary::{BoxFuture, Interceptor, Next, UnaryResult};

/// Runs the rest of the chain and hands any failure to `fallback`.
///
/// The fallback decides: return `Ok` to answer with a substitute response,
/// or `Err` to fail with the same or a different status. Successful results
/// are passed through untouched.
///
/// ```rust
/// use interpose::{Code, Response, Status};
/// use interpose::middleware::Recover;
///
/// let cached = Recover::new(|status: Status| match status.code() {
///     Code::Unavailable => Ok(Response::new("cached".to_owned())),
///     _ => Err(status),
/// });
/// # let _ = cached;
/// ```
pub struct Recover<F> {
    fallback: Arc<F>,
}

impl<F> Recover<F> {
    pub fn new(fallback: F) -> Self {
        Self { fallback: Arc::new(fallback) }
    }
}

impl<F> Clone for Recover<F> {
    fn clone(&self) -> Self {
        Self { fallback: Arc::clone(&self.fallback) }
    }
}

impl<Req, Res, F> Interceptor<Req, Res> for Recover<F>
where
    Req: Send + 'static,
    Res: Send + 'static,
    F: Fn(Status) -> UnaryResult<Res> + Send + Sync + 'static,
{
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>> {
        let fallback = Arc::clone(&self.fallback);
        Box::pin(async move {
            match next.run(req).await {
                Ok(res) => Ok(res),
                Err(status) => fallback(status),
            }
        })
    }
}
