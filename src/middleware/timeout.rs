//! Deadline around the rest of the chain.

use std::time::Duration;

use crate::request::Request;
use crate::status::Status;
use crate::unary::{BoxFuture, Interceptor, Next, UnaryResult};

/// Fails the call with `deadline_exceeded` if the rest of the chain takes
/// longer than `duration`.
///
/// When the deadline passes the downstream future is dropped, so interceptors
/// and the handler after this one stop at their next `.await`. Requires a
/// tokio runtime with the time driver enabled.
#[derive(Clone, Copy, Debug)]
pub struct Timeout {
    duration: Duration,
}

impl Timeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl<Req, Res> Interceptor<Req, Res> for Timeout
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>> {
        let duration = self.duration;
        Box::pin(async move {
            match tokio::time::timeout(duration, next.run(req)).await {
                Ok(result) => result,
                Err(_) => Err(Status::deadline_exceeded(format!("call exceeded {duration:?}"))),
            }
        })
    }
}
