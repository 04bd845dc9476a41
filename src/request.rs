//! Incoming HTTP request type.
//!
//! A [`Request`] is the per-request context: everything the transport read
//! off the wire, the decoded query string and form body, the path captures
//! filled in by the router, and the [`Locals`] scratch space middleware uses
//! to hand data downstream.

use bytes::Bytes;

use crate::locals::Locals;
use crate::method::Method;
use crate::params::Params;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An incoming HTTP request.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: Params,
    pub(crate) query: Params,
    pub(crate) form: Params,
    pub(crate) locals: Locals,
}

impl Request {
    /// Builds a request from its wire parts.
    ///
    /// `target` is the request target as sent (`/hello?name=keiko`). The
    /// query string is decoded immediately; the body is decoded as a form
    /// only when `content-type` says it is one.
    pub fn from_parts(
        method: Method,
        target: &str,
        headers: Vec<(String, String)>,
        body: impl Into<Bytes>,
    ) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Params::from_urlencoded(query.as_bytes())),
            None => (target, Params::new()),
        };
        let body = body.into();

        let mut req = Self {
            method,
            path: path.to_owned(),
            headers,
            body,
            params: Params::new(),
            query,
            form: Params::new(),
            locals: Locals::default(),
        };
        if req.is_form() {
            req.form = Params::from_urlencoded(&req.body);
        }
        req
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/:id`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn params(&self) -> &Params { &self.params }

    /// Returns a decoded query-string value.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key)
    }

    pub fn query_params(&self) -> &Params { &self.query }

    /// The decoded form body. Empty unless the request was form-encoded.
    pub fn form(&self) -> &Params { &self.form }

    pub fn locals(&self) -> &Locals { &self.locals }
    pub fn locals_mut(&mut self) -> &mut Locals { &mut self.locals }

    fn is_form(&self) -> bool {
        self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
    }
}
