use serde::Serialize;

use super::tag::{Annotated, ParamSpec};
use super::value::ParamValue;
use crate::error::RequestError;
use crate::request::Method;

/// Static description of a client interface method.
///
/// This is the metadata a method-derived [`Request`](crate::Request) is built from:
/// the route template, the declared verb, and the tags of every parameter.
///
/// ```rust
/// use clawrest_core::{Method, MethodSpec, ParamSpec};
///
/// const LIST_PULLS: MethodSpec = MethodSpec::new("list_pulls")
///     .with_route("/repos/{owner}/{repo}/pulls")
///     .with_verb(Method::Get)
///     .with_params(&[
///         ParamSpec::path("owner", "owner"),
///         ParamSpec::path("repo", "repo"),
///         ParamSpec::untagged("filter"),
///     ]);
/// # assert_eq!(LIST_PULLS.params().len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    name: &'static str,
    route: Option<&'static str>,
    verb: Option<Method>,
    params: &'static [ParamSpec],
}

impl MethodSpec {
    /// A method without route, verb or parameters.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            route: None,
            verb: None,
            params: &[],
        }
    }

    /// Sets the route template of the method.
    pub const fn with_route(mut self, route: &'static str) -> Self {
        self.route = Some(route);
        self
    }

    /// Sets the HTTP verb declared on the method.
    pub const fn with_verb(mut self, verb: Method) -> Self {
        self.verb = Some(verb);
        self
    }

    /// Sets the parameters of the method, in declaration order.
    pub const fn with_params(mut self, params: &'static [ParamSpec]) -> Self {
        self.params = params;
        self
    }

    /// The method name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared route template.
    pub const fn route(&self) -> Option<&'static str> {
        self.route
    }

    /// The parameters of the method.
    pub const fn params(&self) -> &'static [ParamSpec] {
        self.params
    }

    /// Resolves the HTTP verb declared on the method.
    ///
    /// Method-derived requests leave the verb unset, use this together with
    /// [`Request::with_method`](crate::Request::with_method) to opt in.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::InvalidMethodSignature`] if no verb is declared.
    pub fn http_method(&self) -> Result<Method, RequestError> {
        self.verb.ok_or_else(|| {
            RequestError::invalid_signature(
                self.name,
                "method must declare one of GET, POST, PUT, DELETE, PATCH, OPTIONS or HEAD",
            )
        })
    }
}

/// An argument of a client method call.
///
/// Every argument carries its serialized value. An argument built with
/// [`CallArg::object`] also exposes its tagged fields, which matters when it is the
/// single untagged argument of the call: its tagged fields are merged into the
/// request and a body-tagged field makes it the JSON body.
#[derive(Clone)]
pub struct CallArg<'a> {
    value: ParamValue,
    object: Option<&'a dyn Annotated>,
}

impl<'a> CallArg<'a> {
    /// A plain value argument.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized.
    pub fn value<T>(value: &T) -> Result<Self, RequestError>
    where
        T: Serialize + ?Sized,
    {
        let value = ParamValue::new(value)?;
        Ok(Self {
            value,
            object: None,
        })
    }

    /// An argument whose fields carry classification tags.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized.
    pub fn object<T>(object: &'a T) -> Result<Self, RequestError>
    where
        T: Annotated + Serialize,
    {
        let value = ParamValue::new(object)?;
        Ok(Self {
            value,
            object: Some(object),
        })
    }

    /// The serialized value of the argument.
    pub fn param_value(&self) -> &ParamValue {
        &self.value
    }

    pub(crate) fn annotated(&self) -> Option<&'a dyn Annotated> {
        self.object
    }
}

impl From<ParamValue> for CallArg<'_> {
    fn from(value: ParamValue) -> Self {
        Self {
            value,
            object: None,
        }
    }
}

impl std::fmt::Debug for CallArg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallArg")
            .field("value", &self.value)
            .field("object", &self.object.map(|object| object.type_name()))
            .finish()
    }
}
