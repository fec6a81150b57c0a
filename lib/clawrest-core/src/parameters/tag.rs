use super::value::ParamValue;
use crate::error::RequestError;

/// The role of a classified value in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ParamKind {
    /// Substituted into the URI template.
    #[display("path")]
    Path,
    /// Appended to the query string.
    #[display("query")]
    Query,
    /// Sent as an HTTP header.
    #[display("header")]
    Header,
    /// Triggers the JSON serialization of the owning object.
    #[display("body")]
    Body,
    /// Carries none of the recognized tags.
    #[display("unknown")]
    Unknown,
}

/// A classification tag with the external name it declares.
///
/// For [`Tag::Body`] the name is the JSON property name of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `{name}` variable of the path template.
    Path(&'static str),
    /// Query string parameter.
    Query(&'static str),
    /// HTTP header.
    Header(&'static str),
    /// JSON body property.
    Body(&'static str),
}

impl Tag {
    /// The kind of parameter this tag declares.
    pub const fn kind(&self) -> ParamKind {
        match self {
            Self::Path(_) => ParamKind::Path,
            Self::Query(_) => ParamKind::Query,
            Self::Header(_) => ParamKind::Header,
            Self::Body(_) => ParamKind::Body,
        }
    }

    /// The external name declared by this tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Path(name) | Self::Query(name) | Self::Header(name) | Self::Body(name) => *name,
        }
    }
}

/// Static metadata of a struct field or of a method parameter.
///
/// Metadata tables are `&'static [ParamSpec]`, declared once per type or per
/// method, either by `#[derive(Annotated)]` or by hand.
///
/// ```rust
/// use clawrest_core::ParamSpec;
///
/// const PARAMS: &[ParamSpec] = &[
///     ParamSpec::path("owner", "owner"),
///     ParamSpec::query("page", "page"),
///     ParamSpec::untagged("filter"),
/// ];
/// assert_eq!(PARAMS[1].tag.map(|tag| tag.name()), Some("page"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// The Rust name of the field or parameter.
    pub name: &'static str,
    /// Its classification tag, if any.
    pub tag: Option<Tag>,
}

impl ParamSpec {
    /// A field or parameter with the given tag.
    pub const fn new(name: &'static str, tag: Tag) -> Self {
        Self {
            name,
            tag: Some(tag),
        }
    }

    /// A field or parameter without any tag.
    pub const fn untagged(name: &'static str) -> Self {
        Self { name, tag: None }
    }

    /// A path parameter bound to the `{param}` template variable.
    pub const fn path(name: &'static str, param: &'static str) -> Self {
        Self::new(name, Tag::Path(param))
    }

    /// A query parameter.
    pub const fn query(name: &'static str, param: &'static str) -> Self {
        Self::new(name, Tag::Query(param))
    }

    /// A header parameter.
    pub const fn header(name: &'static str, param: &'static str) -> Self {
        Self::new(name, Tag::Header(param))
    }

    /// A body property.
    pub const fn body(name: &'static str, property: &'static str) -> Self {
        Self::new(name, Tag::Body(property))
    }

    /// The kind of this field or parameter, [`ParamKind::Unknown`] when untagged.
    pub const fn kind(&self) -> ParamKind {
        match &self.tag {
            Some(tag) => tag.kind(),
            None => ParamKind::Unknown,
        }
    }
}

/// A named value with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The tag name, or the Rust name for [`ParamKind::Unknown`].
    pub name: String,
    /// The classification.
    pub kind: ParamKind,
    /// The value.
    pub value: ParamValue,
}

/// A data object whose fields carry classification tags.
///
/// Usually implemented with `#[derive(Annotated)]`:
///
/// ```rust
/// use clawrest_core::{Annotated, Request};
/// use serde::Serialize;
///
/// #[derive(Serialize, Annotated)]
/// struct ListPulls {
///     #[serde(skip)]
///     #[param(path = "owner")]
///     owner: String,
///     #[serde(skip)]
///     #[param(path = "repo")]
///     repo: String,
///     #[serde(skip)]
///     #[param(query = "state")]
///     state: Option<String>,
/// }
///
/// let pulls = ListPulls {
///     owner: "tomitribe".to_string(),
///     repo: "orange".to_string(),
///     state: Some("open".to_string()),
/// };
/// let request = Request::from_object("/repos/{owner}/{repo}/pulls", &pulls)?;
/// assert_eq!(request.uri()?, "/repos/tomitribe/orange/pulls?state=open");
/// # Ok::<(), clawrest_core::RequestError>(())
/// ```
///
/// The trait is object safe, the classifier works on `&dyn Annotated`.
pub trait Annotated {
    /// The name of the type, used in error messages.
    fn type_name(&self) -> &'static str;

    /// The metadata of every field, in declaration order.
    fn param_specs(&self) -> &'static [ParamSpec];

    /// Reads the value of the field at `index` in [`Annotated::param_specs`].
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::UnreadableField`] for a field that cannot be read,
    /// or if the value cannot be serialized.
    fn read_field(&self, index: usize) -> Result<ParamValue, RequestError>;

    /// Serializes the whole object as a JSON body.
    ///
    /// Returns `None` when the type does not support body serialization.
    ///
    /// # Errors
    ///
    /// Fails if the object cannot be serialized.
    fn to_body(&self) -> Result<Option<String>, RequestError>;
}
