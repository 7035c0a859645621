//! Bearer-token check on call metadata.

use http::header::AUTHORIZATION;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::request::Request;
use crate::status::Status;
use crate::unary::{BoxFuture, Interceptor, Next, UnaryResult};

/// Lets a call through only if its `authorization` metadata is
/// `Bearer <token>`.
///
/// The scheme is matched case-insensitively; the token must match exactly
/// and is compared as a SHA-256 digest in constant time, so neither its
/// content nor its length shows in the rejection latency.
///
/// Anything else short-circuits with `unauthenticated`: interceptors after
/// this one and the handler never run.
#[derive(Clone, Debug)]
pub struct BearerAuth {
    expected: [u8; 32],
}

impl BearerAuth {
    /// Accepts calls carrying `token`.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self { expected: Sha256::digest(token.as_ref().as_bytes()).into() }
    }

    fn check<T>(&self, req: &Request<T>) -> Result<(), Status> {
        let Some(value) = req.metadata().get(AUTHORIZATION) else {
            return Err(Status::unauthenticated("missing authorization metadata"));
        };
        let Some(token) = bearer_token(value.as_bytes()) else {
            return Err(Status::unauthenticated("expected bearer authorization"));
        };
        let provided = Sha256::digest(token);
        if !bool::from(provided.as_slice().ct_eq(&self.expected)) {
            return Err(Status::unauthenticated("invalid bearer token"));
        }
        Ok(())
    }
}

// `<scheme> <token>`, scheme compared case-insensitively.
fn bearer_token(value: &[u8]) -> Option<&[u8]> {
    let space = value.iter().position(|&b| b == b' ')?;
    let (scheme, rest) = value.split_at(space);
    scheme.eq_ignore_ascii_case(b"bearer").then_some(&rest[1..])
}

impl<Req, Res> Interceptor<Req, Res> for BearerAuth
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    fn intercept(&self, req: Request<Req>, next: Next<Req, Res>) -> BoxFuture<UnaryResult<Res>> {
        match self.check(&req) {
            Ok(()) => next.run(req),
            Err(status) => {
                debug!(method = req.method(), reason = status.message(), "rejected call");
                Box::pin(std::future::ready(Err(status)))
            }
        }
    }
}
