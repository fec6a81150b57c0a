use headers::HeaderMapExt;
use http::header::{HeaderName, HeaderValue};
use tracing::debug;

use super::{Entity, Request};
use crate::endpoint::Endpoint;
use crate::error::RequestError;

impl<R> Request<R> {
    /// Materializes the path and query string of the request.
    ///
    /// The path template is resolved against the path parameters, then every query
    /// parameter is appended, form-urlencoded. Array values repeat the parameter name.
    /// The order of the query parameters is not part of the contract.
    ///
    /// The result is a reference relative to the endpoint: method-derived requests
    /// have no leading `/`.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::PathUnresolved`] if a template variable is unbound,
    /// or if a parameter value has no string form.
    pub fn uri(&self) -> Result<String, RequestError> {
        let path = self.template.resolve(&self.path_params)?;

        let mut pairs = Vec::with_capacity(self.query_params.len());
        for (name, value) in &self.query_params {
            for value in value.to_query_values()? {
                pairs.push((name.as_str(), value));
            }
        }

        if pairs.is_empty() {
            return Ok(path);
        }
        let query = serde_urlencoded::to_string(&pairs)?;
        Ok([path.as_str(), "?", query.as_str()].concat())
    }

    /// The transport-ready body, `None` when the request has no body.
    pub fn entity(&self) -> Option<Entity> {
        self.body.as_deref().map(Entity::json)
    }

    /// Builds an [`http::Request`] targeting the given endpoint.
    ///
    /// Header parameters are converted to their string form, and the `content-type`
    /// header is set when the request has a body.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::MissingMethod`] if no method has been set, or if the
    /// URI, a header name, or a header value is invalid.
    pub fn to_http_request(&self, endpoint: &Endpoint) -> Result<http::Request<Vec<u8>>, RequestError> {
        let method = self.method.ok_or_else(|| RequestError::MissingMethod {
            path: self.path().to_string(),
        })?;
        let uri = endpoint.uri_for(&self.uri()?)?;

        let mut request = http::Request::builder()
            .method(http::Method::from(method))
            .uri(uri)
            .body(Vec::new())?;

        let headers = request.headers_mut();
        for (name, value) in &self.header_params {
            let name = HeaderName::try_from(name.as_str())?;
            let value = HeaderValue::try_from(value.to_string_value()?)?;
            headers.insert(name, value);
        }

        if let Some(entity) = self.entity() {
            headers.typed_insert(entity.content_type().clone());
            *request.body_mut() = entity.into_data();
        }

        debug!(
            method = %request.method(),
            uri = %request.uri(),
            headers = request.headers().len(),
            "http request built"
        );
        Ok(request)
    }
}
