//! Handler trait and type erasure.
//!
//! A handler is the innermost piece of a chain: it takes a request and
//! produces either a response or an error. A built chain is itself a handler,
//! which is what lets chains nest inside other chains.
//!
//! # How handlers are stored
//!
//! A chain has to hold a terminal handler whose concrete type the caller
//! picked, next to middleware of other concrete types. We hide all of them
//! behind trait objects so one chain type fits every combination:
//!
//! ```text
//! fn echo(req: String) -> Result<String, E> { … }   ← user writes this
//!        ↓ Arc::new(echo)
//! BoxedHandler<String, String, E>                    ← Arc<dyn Handler>
//!        ↓
//! handler.call(req)  at request time                 ← one vtable dispatch
//! ```

use std::sync::Arc;

// ── Handler trait ─────────────────────────────────────────────────────────────

/// Something that turns a request into a response or an error.
///
/// Implemented for every `Fn(Req) -> Result<Res, E>`, so plain functions and
/// closures work directly:
///
/// ```rust
/// use interpose::Handler;
///
/// fn shout(req: &str) -> Result<String, ()> {
///     Ok(req.to_uppercase())
/// }
///
/// assert_eq!(Handler::call(&shout, "hi"), Ok("HI".to_owned()));
/// ```
pub trait Handler<Req, Res, E> {
    fn call(&self, req: Req) -> Result<Res, E>;
}

/// A heap-allocated, type-erased handler that can be shared across threads.
///
/// `Arc` gives cheap shared ownership: the same chain can be cloned into
/// every worker without copying any middleware.
pub type BoxedHandler<Req, Res, E> = Arc<dyn Handler<Req, Res, E> + Send + Sync + 'static>;

// ── Blanket implementation ────────────────────────────────────────────────────

impl<F, Req, Res, E> Handler<Req, Res, E> for F
where
    F: Fn(Req) -> Result<Res, E>,
{
    fn call(&self, req: Req) -> Result<Res, E> {
        self(req)
    }
}

/// Erases a handler into a [`BoxedHandler`].
///
/// Mostly useful for closures, whose parameter types are inferred from the
/// `Fn` bound here rather than left ambiguous:
///
/// ```rust
/// use interpose::handler;
///
/// let terminal = handler::boxed(|req: u32| Ok::<_, ()>(req * 2));
/// assert_eq!(terminal.call(21), Ok(42));
/// ```
pub fn boxed<F, Req, Res, E>(f: F) -> BoxedHandler<Req, Res, E>
where
    F: Fn(Req) -> Result<Res, E> + Send + Sync + 'static,
{
    Arc::new(f)
}
