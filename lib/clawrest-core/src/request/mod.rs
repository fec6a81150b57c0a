use std::any::TypeId;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::body::to_formatted_json;
use crate::error::RequestError;
use crate::parameters::{
    Annotated, CallArg, Classification, MethodSpec, ParamValue, classify_method, classify_object,
};
use crate::template::UriTemplate;

mod method;
pub use self::method::Method;

mod entity;
pub use self::entity::Entity;

mod materialize;

/// The expected response type of a request.
///
/// Only metadata for the transport, nothing is deserialized here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseType {
    name: &'static str,
    id: TypeId,
}

impl ResponseType {
    /// The response type of `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// The name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type id.
    pub fn id(&self) -> TypeId {
        self.id
    }
}

/// A request descriptor: everything needed to issue one HTTP call.
///
/// A `Request` is built once per call from one of the factories, then optionally
/// adjusted with the `with_*` methods before being handed to a transport.
///
/// - [`Request::new`] - explicit method and path
/// - [`Request::target`] - path parameters bound by position
/// - [`Request::from_object`] - parameters classified from a tagged object
/// - [`Request::from_method`] - parameters classified from a client method call
///
/// The type parameter `R` is the expected response type, see [`Request::response`].
///
/// # Example
///
/// ```rust
/// use clawrest_core::{Method, Request};
///
/// let request = Request::target("/repos/{owner}/{repo}/pulls", ["tomitribe", "orange"])?
///     .with_method(Method::Get)
///     .with_query("state", "open")
///     .with_header("link", "http://foo.example.com/");
///
/// assert_eq!(request.uri()?, "/repos/tomitribe/orange/pulls?state=open");
/// assert!(request.entity().is_none());
/// # Ok::<(), clawrest_core::RequestError>(())
/// ```
#[derive(derive_more::Debug)]
pub struct Request<R = ()> {
    method: Option<Method>,
    template: UriTemplate,
    body: Option<String>,
    response_type: Option<ResponseType>,
    path_params: IndexMap<String, ParamValue>,
    query_params: IndexMap<String, ParamValue>,
    header_params: IndexMap<String, ParamValue>,
    #[debug(ignore)]
    marker: PhantomData<fn() -> R>,
}

impl<R> Clone for Request<R> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            template: self.template.clone(),
            body: self.body.clone(),
            response_type: self.response_type,
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
            header_params: self.header_params.clone(),
            marker: PhantomData,
        }
    }
}

// Create
impl Request {
    /// A request with an explicit method and path, and no parameters.
    pub fn new(method: impl Into<Option<Method>>, path: impl Into<String>) -> Self {
        Self::with_parts(method.into(), path.into(), Classification::default())
    }

    /// A request whose path parameters are bound by position.
    ///
    /// The i-th value is bound to the i-th variable of the path template.
    /// Remaining variables can be bound later with [`Request::with_path_param`].
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::ExcessParameters`] when more values than variables
    /// are supplied.
    pub fn target<I>(path: impl Into<String>, values: I) -> Result<Self, RequestError>
    where
        I: IntoIterator,
        I::Item: Into<ParamValue>,
    {
        let template = UriTemplate::parse(path);
        let path_params = template.bind(values)?;
        let classification = Classification {
            path_params,
            ..Default::default()
        };
        Ok(Self::from_template(None, template, classification))
    }

    /// A request built from the tagged fields of an object.
    ///
    /// Every field must carry a tag. Path, query and header values are keyed by their
    /// tag name. If any field is tagged as body, the whole object is serialized as the
    /// JSON body.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::UnrecognizedField`] if a field has no tag, or if a
    /// value cannot be serialized.
    pub fn from_object<T>(path: impl Into<String>, object: &T) -> Result<Self, RequestError>
    where
        T: Annotated,
    {
        let classification = classify_object(object)?;
        Ok(Self::with_parts(None, path.into(), classification))
    }

    /// A request built from a client method description and the arguments of one call.
    ///
    /// The single leading `/` of the route is removed. Arguments are classified by the
    /// tag of their parameter. At most one argument may be untagged: if it exposes a
    /// body-tagged field it becomes the JSON body, and its other tagged fields are
    /// merged with the tagged arguments. An `accept` header always includes
    /// `application/json`.
    ///
    /// The HTTP method is left unset, see [`MethodSpec::http_method`].
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::InvalidMethodSignature`] with more than one untagged
    /// argument, a missing route, or a mismatch between parameters and arguments.
    pub fn from_method(method: &MethodSpec, args: &[CallArg<'_>]) -> Result<Self, RequestError> {
        let (route, classification) = classify_method(method, args)?;
        Ok(Self::with_parts(None, route, classification))
    }
}

impl<R> Request<R> {
    fn with_parts(method: Option<Method>, path: String, classification: Classification) -> Self {
        Self::from_template(method, UriTemplate::parse(path), classification)
    }

    fn from_template(
        method: Option<Method>,
        template: UriTemplate,
        classification: Classification,
    ) -> Self {
        let Classification {
            path_params,
            query_params,
            header_params,
            body,
        } = classification;

        debug!(?method, path = %template, "request created");
        Self {
            method,
            template,
            body,
            response_type: None,
            path_params,
            query_params,
            header_params,
            marker: PhantomData,
        }
    }
}

// Update
impl<R> Request<R> {
    /// Sets the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets a path parameter, replacing any previous value.
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Sets a query parameter, replacing any previous value.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Sets a header, replacing any previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.header_params.insert(name.into(), value.into());
        self
    }

    /// Replaces the body with the JSON serialization of `value`.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized.
    pub fn with_body<T>(mut self, value: &T) -> Result<Self, RequestError>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(to_formatted_json(value)?);
        Ok(self)
    }

    /// A copy of this request expecting a response of type `T`.
    ///
    /// Method, path and body are copied, the parameters are cloned so the two
    /// requests never share state.
    ///
    /// ```rust
    /// use clawrest_core::Request;
    ///
    /// #[derive(Debug)]
    /// struct Pull;
    ///
    /// let request = Request::target("/repos/{owner}/{repo}/pulls/{number}", ["tomitribe", "orange"])?;
    /// let typed = request.response::<Pull>().with_path_param("number", 42);
    ///
    /// assert!(request.response_type().is_none());
    /// assert!(!request.path_params().contains_key("number"));
    /// assert!(typed.response_type().is_some());
    /// # Ok::<(), clawrest_core::RequestError>(())
    /// ```
    pub fn response<T: 'static>(&self) -> Request<T> {
        Request {
            method: self.method,
            template: self.template.clone(),
            body: self.body.clone(),
            response_type: Some(ResponseType::of::<T>()),
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
            header_params: self.header_params.clone(),
            marker: PhantomData,
        }
    }
}

// Read
impl<R> Request<R> {
    /// The HTTP method, `None` when not determined yet.
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    /// The path template.
    pub fn path(&self) -> &str {
        self.template.as_str()
    }

    /// The parsed path template.
    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// The JSON body.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` if the request has a body.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// The expected response type.
    pub fn response_type(&self) -> Option<ResponseType> {
        self.response_type
    }

    /// The path parameters.
    pub fn path_params(&self) -> &IndexMap<String, ParamValue> {
        &self.path_params
    }

    /// The query parameters.
    pub fn query_params(&self) -> &IndexMap<String, ParamValue> {
        &self.query_params
    }

    /// The header parameters.
    pub fn header_params(&self) -> &IndexMap<String, ParamValue> {
        &self.header_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ParamSpec, Tag};

    #[derive(Debug)]
    struct Pull;

    #[test]
    fn should_create_request_without_parameters() {
        let request = Request::new(Method::Delete, "/repos/{owner}");

        assert_eq!(request.method(), Some(Method::Delete));
        assert_eq!(request.path(), "/repos/{owner}");
        assert!(request.path_params().is_empty());
        assert!(!request.has_body());
    }

    #[test]
    fn should_leave_method_unset() {
        let request = Request::new(None, "/health");

        assert_eq!(request.method(), None);
    }

    #[test]
    fn should_bind_target_values() {
        let request = Request::target("/repos/{owner}/{repo}", ["tomitribe"])
            .expect("fewer values are accepted")
            .with_path_param("repo", "orange");

        insta::assert_debug_snapshot!(request.path_params(), @r#"
        {
            "owner": ParamValue(
                String("tomitribe"),
            ),
            "repo": ParamValue(
                String("orange"),
            ),
        }
        "#);
    }

    #[test]
    fn should_reject_excess_target_values() {
        let result = Request::target("/repos/{owner}/{repo}", ["a", "b", "c"]);

        assert!(matches!(
            result,
            Err(RequestError::ExcessParameters {
                expected: 2,
                supplied: 3,
                ..
            })
        ));
    }

    #[test]
    fn should_overwrite_parameters() {
        let request = Request::new(Method::Get, "/search")
            .with_query("page", 1)
            .with_query("page", 2)
            .with_header("x-trace", "a")
            .with_header("x-trace", "b");

        assert_eq!(request.query_params().get("page"), Some(&ParamValue::from(2)));
        assert_eq!(request.header_params().get("x-trace"), Some(&ParamValue::from("b")));
    }

    #[test]
    fn should_replace_body() {
        let request = Request::new(Method::Post, "/pulls")
            .with_body(&serde_json::json!({ "title": "first" }))
            .and_then(|request| request.with_body(&serde_json::json!({ "draft": true })))
            .expect("serializable");

        insta::assert_snapshot!(request.body().unwrap_or_default(), @r#"
        {
          "draft": true
        }
        "#);
    }

    #[test]
    fn should_retype_without_aliasing() {
        let request = Request::new(Method::Get, "/pulls/{number}").with_query("state", "open");

        let typed: Request<Pull> = request.response::<Pull>().with_query("state", "closed");

        assert_eq!(request.query_params().get("state"), Some(&ParamValue::from("open")));
        assert_eq!(typed.query_params().get("state"), Some(&ParamValue::from("closed")));
        assert_eq!(typed.method(), Some(Method::Get));
        assert_eq!(typed.path(), "/pulls/{number}");
        assert_eq!(
            typed.response_type().map(|it| it.id()),
            Some(TypeId::of::<Pull>())
        );
        assert!(request.response_type().is_none());
    }

    #[test]
    fn should_create_request_from_method() {
        const GET_PULL: MethodSpec = MethodSpec::new("get_pull")
            .with_route("/repos/{owner}/{repo}/pulls/{number}")
            .with_verb(Method::Get)
            .with_params(&[
                ParamSpec::path("owner", "owner"),
                ParamSpec::path("repo", "repo"),
                ParamSpec::path("number", "number"),
                ParamSpec::new("accept", Tag::Header("accept")),
            ]);
        let args = [
            CallArg::from(ParamValue::from("tomitribe")),
            CallArg::from(ParamValue::from("orange")),
            CallArg::from(ParamValue::from(42)),
            CallArg::from(ParamValue::from("text/xml")),
        ];

        let request = Request::from_method(&GET_PULL, &args).expect("valid call");

        assert_eq!(request.method(), None);
        assert_eq!(request.path(), "repos/{owner}/{repo}/pulls/{number}");
        assert_eq!(
            request.header_params().get("accept"),
            Some(&ParamValue::from("text/xml, application/json"))
        );
        assert!(request.body().is_none());

        let request = request.with_method(GET_PULL.http_method().expect("declared verb"));
        assert_eq!(request.method(), Some(Method::Get));
    }

    #[test]
    fn should_fail_resolving_missing_verb() {
        const PING: MethodSpec = MethodSpec::new("ping").with_route("/ping");

        let result = PING.http_method();

        assert!(matches!(
            result,
            Err(RequestError::InvalidMethodSignature { method: "ping", .. })
        ));
    }
}
