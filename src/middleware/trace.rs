//! Per-call span with method, code and latency.

use std::time::Instant;

use tracing::{Instrument, Level, Span, event, span};

use crate::request::Request;
use crate::unary::{BoxFuture, Interceptor, Next, UnaryResult};

/// Wraps the rest of the chain in a `unary` span and logs how it ended.
///
/// The span and the event for successful calls use the configured level
/// (`INFO` by default); failures are always logged at `WARN`.
#[derive(Clone, Copy, Debug)]
pub struct Trace {
    level: Level,
}

impl Trace {
    /// Traces at `INFO`.
    pub fn new() -> Self {
        Self { level: Level::INFO }
    }

    /// Level for the span and for successful calls.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for Trace {
    fn default() -> Self { Self::new() }
}

impl<Req, Res> Interceptor<Req, Res> for Trace
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>> {
        let level = self.level;
        let span = call_span(level, req.method());

        Box::pin(
            async move {
                let start = Instant::now();
                let result = next.run(req).await;
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

                match &result {
                    Ok(_) => finished(level, elapsed_ms),
                    Err(status) => event!(
                        Level::WARN,
                        code = %status.code(),
                        error = status.message(),
                        elapsed_ms,
                        "call failed"
                    ),
                }
                result
            }
            .instrument(span),
        )
    }
}

// Levels are part of the static callsite, so pick the macro at runtime.
fn call_span(level: Level, method: &str) -> Span {
    match level {
        Level::TRACE => span!(Level::TRACE, "unary", method = %method),
        Level::DEBUG => span!(Level::DEBUG, "unary", method = %method),
        Level::INFO  => span!(Level::INFO,  "unary", method = %method),
        Level::WARN  => span!(Level::WARN,  "unary", method = %method),
        _            => span!(Level::ERROR, "unary", method = %method),
    }
}

fn finished(level: Level, elapsed_ms: f64) {
    match level {
        Level::TRACE => event!(Level::TRACE, code = "ok", elapsed_ms, "call finished"),
        Level::DEBUG => event!(Level::DEBUG, code = "ok", elapsed_ms, "call finished"),
        Level::INFO  => event!(Level::INFO,  code = "ok", elapsed_ms, "call finished"),
        Level::WARN  => event!(Level::WARN,  code = "ok", elapsed_ms, "call finished"),
        _            => event!(Level::ERROR, code = "ok", elapsed_ms, "call finished"),
    }
}
