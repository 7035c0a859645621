//! Unary request envelope.

use http::{Extensions, HeaderMap};

/// A unary call on its way to a handler: the message plus everything
/// interceptors look at without touching the message.
///
/// - `method` is the full method name, `/package.Service/Method`.
/// - `metadata` carries call headers (`authorization`, `x-request-id`, …).
/// - `extensions` carries typed values one interceptor hands to later ones.
#[derive(Debug)]
pub struct Request<T> {
    method: String,
    metadata: HeaderMap,
    extensions: Extensions,
    message: T,
}

impl<T> Request<T> {
    /// Wraps `message` with no method name, empty metadata and no extensions.
    pub fn new(message: T) -> Self {
        Self {
            method: String::new(),
            metadata: HeaderMap::new(),
            extensions: Extensions::new(),
            message,
        }
    }

    /// Sets the full method name. Returns `self` for chaining.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn metadata(&self) -> &HeaderMap { &self.metadata }
    pub fn metadata_mut(&mut self) -> &mut HeaderMap { &mut self.metadata }
    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }
    pub fn get_ref(&self) -> &T { &self.message }
    pub fn get_mut(&mut self) -> &mut T { &mut self.message }
    pub fn into_inner(self) -> T { self.message }

    /// Replaces the message, keeping method, metadata and extensions.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Request<U> {
        Request {
            method: self.method,
            metadata: self.metadata,
            extensions: self.extensions,
            message: f(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_the_envelope() {
        let mut req = Request::new("42").with_method("/calc.Calc/Parse");
        req.metadata_mut().insert("x-request-id", "abc".parse().unwrap());
        req.extensions_mut().insert(7u8);

        let req = req.map(|s| s.parse::<u32>().unwrap());
        assert_eq!(req.method(), "/calc.Calc/Parse");
        assert_eq!(req.metadata()["x-request-id"], "abc");
        assert_eq!(req.extensions().get::<u8>(), Some(&7));
        assert_eq!(req.into_inner(), 42);
    }
}
