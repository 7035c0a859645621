//! Unary response envelope.

use http::HeaderMap;

/// The success half of a unary call: a message plus response metadata.
#[derive(Debug)]
pub struct Response<T> {
    metadata: HeaderMap,
    message: T,
}

impl<T> Response<T> {
    /// Wraps `message` with empty metadata.
    pub fn new(message: T) -> Self {
        Self { metadata: HeaderMap::new(), message }
    }

    pub fn metadata(&self) -> &HeaderMap { &self.metadata }
    pub fn metadata_mut(&mut self) -> &mut HeaderMap { &mut self.metadata }
    pub fn get_ref(&self) -> &T { &self.message }
    pub fn get_mut(&mut self) -> &mut T { &mut self.message }
    pub fn into_inner(self) -> T { self.message }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response { metadata: self.metadata, message: f(self.message) }
    }
}
