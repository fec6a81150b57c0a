//! # Clawrest Core
//!
//! Build HTTP request descriptors from tagged data, without hand-written
//! request-assembly code.
//!
//! A [`Request`] carries everything a transport needs to issue one HTTP call:
//! the method, the path template, the path, query and header parameters, an
//! optional JSON body, and the expected response type. This crate never executes
//! requests, it only builds them.
//!
//! ## Requests from tagged structs
//!
//! Fields are tagged with `#[param(...)]`, the derive generates the metadata
//! read by the classifier:
//!
//! ```rust
//! use clawrest_core::{Annotated, Request};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Annotated)]
//! struct CreatePull {
//!     #[serde(skip)]
//!     #[param(path = "owner")]
//!     owner: String,
//!     #[serde(skip)]
//!     #[param(path = "repo")]
//!     repo: String,
//!     #[serde(skip)]
//!     #[param(header = "x-request-id")]
//!     request_id: u64,
//!     #[param(body)]
//!     title: String,
//! }
//!
//! let pull = CreatePull {
//!     owner: "tomitribe".to_string(),
//!     repo: "orange".to_string(),
//!     request_id: 42,
//!     title: "Fix the build".to_string(),
//! };
//!
//! let request = Request::from_object("/repos/{owner}/{repo}/pulls", &pull)?;
//! assert_eq!(request.uri()?, "/repos/tomitribe/orange/pulls");
//! assert_eq!(request.body(), Some("{\n  \"title\": \"Fix the build\"\n}"));
//! # Ok::<(), clawrest_core::RequestError>(())
//! ```
//!
//! A single body-tagged field makes the **whole** object the JSON body: use the
//! usual serde attributes to keep path, query and header fields out of it.
//!
//! ## Requests from client methods
//!
//! A [`MethodSpec`] describes a client interface method, [`CallArg`] the
//! arguments of one call:
//!
//! ```rust
//! use clawrest_core::{CallArg, Method, MethodSpec, ParamSpec, Request};
//!
//! const GET_PULL: MethodSpec = MethodSpec::new("get_pull")
//!     .with_route("/repos/{owner}/{repo}/pulls/{number}")
//!     .with_verb(Method::Get)
//!     .with_params(&[
//!         ParamSpec::path("owner", "owner"),
//!         ParamSpec::path("repo", "repo"),
//!         ParamSpec::path("number", "number"),
//!     ]);
//!
//! let args = [
//!     CallArg::value("tomitribe")?,
//!     CallArg::value("orange")?,
//!     CallArg::value(&42)?,
//! ];
//! let request = Request::from_method(&GET_PULL, &args)?
//!     .with_method(GET_PULL.http_method()?);
//!
//! // the leading `/` of the route is dropped
//! assert_eq!(request.uri()?, "repos/tomitribe/orange/pulls/42");
//! # Ok::<(), clawrest_core::RequestError>(())
//! ```
//!
//! ## Handing over to a transport
//!
//! [`Request::uri`] and [`Request::entity`] expose the materialized parts,
//! [`Request::to_http_request`] builds an [`http::Request`] against an [`Endpoint`].
//!
//! ## Error Handling
//!
//! Every failure is reported as a [`RequestError`], synchronously, when the
//! request is built or materialized.

extern crate self as clawrest_core;

pub mod body;

mod endpoint;
pub use self::endpoint::{Endpoint, EndpointBuilder};

mod error;
pub use self::error::RequestError;

pub mod parameters;
pub use self::parameters::{
    Annotated, CallArg, MethodSpec, Param, ParamKind, ParamSpec, ParamValue, Tag, classify,
};

mod request;
pub use self::request::{Entity, Method, Request, ResponseType};

mod template;
pub use self::template::UriTemplate;

/// Derives [`Annotated`](trait@Annotated) from `#[param(...)]` field attributes.
pub use clawrest_macro::Annotated;
