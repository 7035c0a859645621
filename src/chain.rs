//! Middleware and chain construction.
//!
//! A chain wraps a terminal [`Handler`] in an ordered list of
//! [`Middleware`] units. Calling the chain runs the first unit, which gets a
//! [`Next`] standing for "everything after me". The unit decides whether and
//! when to call it:
//!
//! ```text
//! chain([m0, m1], terminal)(req)
//!   m0(req, next₁)            ← before
//!     m1(req, next₂)          ← before
//!       terminal(req)
//!     m1 returns              ← after
//!   m0 returns                ← after
//! ```
//!
//! Not calling `next` short-circuits: nothing further down runs, and the
//! unit's own result travels back up through the units still waiting on the
//! stack. Each of them may pass it on, rewrite it, or turn an error into a
//! success.
//!
//! # Construction cost
//!
//! Building a chain does not nest closures. The chain keeps the units in one
//! shared slice and [`Next`] walks it with `split_first`, so construction is
//! constant time and the call stack only grows as deep as the units that
//! actually call `next`.

use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};

// ── Middleware trait ──────────────────────────────────────────────────────────

/// A unit of a chain: sees the request on the way in, the result on the way
/// out, and decides whether the rest of the chain runs at all.
///
/// Implemented for every `Fn(Req, Next<'_, Req, Res, E>) -> Result<Res, E>`.
/// Wrap closures in [`from_fn`] so their argument types are inferred.
pub trait Middleware<Req, Res, E> {
    fn call(&self, req: Req, next: Next<'_, Req, Res, E>) -> Result<Res, E>;
}

/// A shared, type-erased middleware unit.
pub type BoxedMiddleware<Req, Res, E> = Arc<dyn Middleware<Req, Res, E> + Send + Sync + 'static>;

impl<F, Req, Res, E> Middleware<Req, Res, E> for F
where
    F: for<'a> Fn(Req, Next<'a, Req, Res, E>) -> Result<Res, E>,
{
    fn call(&self, req: Req, next: Next<'_, Req, Res, E>) -> Result<Res, E> {
        self(req, next)
    }
}

/// Pins a closure to the middleware signature.
///
/// ```rust
/// use interpose::{chain, from_fn, handler};
///
/// let double = from_fn(|req: u32, next| next.run(req * 2));
/// let app = chain::chain([chain::boxed(double)], handler::boxed(|req: u32| Ok::<_, ()>(req + 1)));
///
/// assert_eq!(app.call(20), Ok(41));
/// ```
pub fn from_fn<F, Req, Res, E>(f: F) -> F
where
    F: for<'a> Fn(Req, Next<'a, Req, Res, E>) -> Result<Res, E>,
{
    f
}

/// Erases a middleware unit into a [`BoxedMiddleware`].
pub fn boxed<M, Req, Res, E>(middleware: M) -> BoxedMiddleware<Req, Res, E>
where
    M: Middleware<Req, Res, E> + Send + Sync + 'static,
{
    Arc::new(middleware)
}

// ── Next ──────────────────────────────────────────────────────────────────────

/// The remainder of a chain, as seen from one middleware unit.
///
/// Borrowed from the chain for the duration of one call. `Next` is `Copy`,
/// so a unit may run the remainder more than once (a retry) or not at all.
pub struct Next<'a, Req, Res, E> {
    rest: &'a [BoxedMiddleware<Req, Res, E>],
    terminal: &'a (dyn Handler<Req, Res, E> + Send + Sync),
}

impl<'a, Req, Res, E> Next<'a, Req, Res, E> {
    fn new(
        rest: &'a [BoxedMiddleware<Req, Res, E>],
        terminal: &'a (dyn Handler<Req, Res, E> + Send + Sync),
    ) -> Self {
        Self { rest, terminal }
    }

    /// Runs the rest of the chain and returns its result unchanged.
    pub fn run(self, req: Req) -> Result<Res, E> {
        match self.rest.split_first() {
            Some((first, rest)) => first.call(req, Next::new(rest, self.terminal)),
            None => self.terminal.call(req),
        }
    }

    /// Number of middleware units left before the terminal handler.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }
}

impl<Req, Res, E> Clone for Next<'_, Req, Res, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Req, Res, E> Copy for Next<'_, Req, Res, E> {}

impl<Req, Res, E> Handler<Req, Res, E> for Next<'_, Req, Res, E> {
    fn call(&self, req: Req) -> Result<Res, E> {
        self.run(req)
    }
}

// ── Chain ─────────────────────────────────────────────────────────────────────

/// A terminal handler wrapped in an ordered list of middleware.
///
/// Only ever handed out as a [`BoxedHandler`] from [`chain`] or
/// [`ChainBuilder::handler`]; share it by cloning that `Arc`.
pub struct Chain<Req, Res, E> {
    middleware: Arc<[BoxedMiddleware<Req, Res, E>]>,
    terminal: BoxedHandler<Req, Res, E>,
}

impl<Req, Res, E> Chain<Req, Res, E> {
    /// Starts an empty builder.
    pub fn builder() -> ChainBuilder<Req, Res, E> {
        ChainBuilder { middleware: Vec::new() }
    }
}

impl<Req, Res, E> Handler<Req, Res, E> for Chain<Req, Res, E> {
    fn call(&self, req: Req) -> Result<Res, E> {
        Next::new(&self.middleware, &*self.terminal).run(req)
    }
}

/// Combines `middleware` and `terminal` into one handler.
///
/// Units run in iteration order, `terminal` last. An empty sequence returns
/// `terminal` itself.
pub fn chain<Req, Res, E>(
    middleware: impl IntoIterator<Item = BoxedMiddleware<Req, Res, E>>,
    terminal: BoxedHandler<Req, Res, E>,
) -> BoxedHandler<Req, Res, E>
where
    Req: 'static,
    Res: 'static,
    E: 'static,
{
    let middleware: Arc<[BoxedMiddleware<Req, Res, E>]> = middleware.into_iter().collect();
    if middleware.is_empty() {
        return terminal;
    }
    Arc::new(Chain { middleware, terminal })
}

// ── ChainBuilder ──────────────────────────────────────────────────────────────

/// Fluent construction of a chain, outermost unit first.
///
/// ```rust
/// use interpose::{Chain, from_fn};
///
/// let app = Chain::builder()
///     .with(from_fn(|req: String, next| next.run(req.trim().to_owned())))
///     .with(from_fn(|req: String, next| {
///         if req.is_empty() { Err("empty") } else { next.run(req) }
///     }))
///     .handler(|req: String| Ok(req.len()));
///
/// assert_eq!(app.call("  abc ".to_owned()), Ok(3));
/// assert_eq!(app.call("   ".to_owned()), Err("empty"));
/// ```
pub struct ChainBuilder<Req, Res, E> {
    middleware: Vec<BoxedMiddleware<Req, Res, E>>,
}

impl<Req, Res, E> ChainBuilder<Req, Res, E>
where
    Req: 'static,
    Res: 'static,
    E: 'static,
{
    /// Appends a unit. It runs after every unit added before it.
    pub fn with(mut self, middleware: impl Middleware<Req, Res, E> + Send + Sync + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Appends an already boxed unit.
    pub fn with_boxed(mut self, middleware: BoxedMiddleware<Req, Res, E>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Finishes the chain around `terminal`.
    pub fn handler(
        self,
        terminal: impl Handler<Req, Res, E> + Send + Sync + 'static,
    ) -> BoxedHandler<Req, Res, E> {
        chain(self.middleware, Arc::new(terminal))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::handler;

    type Log = Arc<Mutex<Vec<String>>>;

    fn marker(log: &Log, name: &'static str) -> BoxedMiddleware<u32, u32, String> {
        let log = Arc::clone(log);
        boxed(from_fn(move |req: u32, next| {
            log.lock().unwrap().push(name.to_owned());
            next.run(req)
        }))
    }

    fn terminal(log: &Log) -> BoxedHandler<u32, u32, String> {
        let log = Arc::clone(log);
        handler::boxed(move |req: u32| {
            log.lock().unwrap().push("terminal".to_owned());
            Ok(req)
        })
    }

    #[test]
    fn empty_chain_is_the_terminal_itself() {
        let log = Log::default();
        let base = terminal(&log);
        let built = chain(Vec::new(), Arc::clone(&base));
        assert!(Arc::ptr_eq(&base, &built));
    }

    #[test]
    fn next_reports_remaining_units() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = |seen: &Arc<Mutex<Vec<usize>>>| {
            let seen = Arc::clone(seen);
            boxed(from_fn(move |req: (), next: Next<'_, (), (), ()>| {
                seen.lock().unwrap().push(next.remaining());
                next.run(req)
            }))
        };
        let app = chain(
            [recorder(&seen), recorder(&seen), recorder(&seen)],
            handler::boxed(|_: ()| Ok(())),
        );
        app.call(()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn next_may_run_more_than_once() {
        let attempts = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&attempts);
        let flaky = handler::boxed(move |req: u32| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n < 3 { Err(format!("attempt {n}")) } else { Ok(req) }
        });
        let retry = boxed(from_fn(|req: u32, next: Next<'_, u32, u32, String>| {
            let mut last = next.run(req);
            for _ in 0..2 {
                if last.is_ok() {
                    break;
                }
                last = next.run(req);
            }
            last
        }));

        let app = chain([retry], flaky);
        assert_eq!(app.call(7), Ok(7));
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let log = Log::default();
        let inner = Arc::clone(&log);
        let app = Chain::builder()
            .with_boxed(marker(&log, "first"))
            .with_boxed(marker(&log, "second"))
            .handler(move |req: u32| {
                inner.lock().unwrap().push("terminal".to_owned());
                Ok(req)
            });

        assert_eq!(app.call(5), Ok(5));
        assert_eq!(*log.lock().unwrap(), ["first", "second", "terminal"]);
    }
}
