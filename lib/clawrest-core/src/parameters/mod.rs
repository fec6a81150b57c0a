//! Parameter classification.
//!
//! This module turns tagged data into classified parameters:
//!
//! - [`ParamSpec`] and [`Tag`] - static metadata of fields and method parameters
//! - [`Annotated`] - a data object exposing its tagged fields
//! - [`MethodSpec`] and [`CallArg`] - a client method and the arguments of one call
//! - [`ParamValue`] - the serialized value of a parameter
//! - [`classify`] - the object classification, as a list of [`Param`]
//!
//! Requests are usually built through [`Request::from_object`](crate::Request::from_object)
//! and [`Request::from_method`](crate::Request::from_method), which rely on this module.

mod value;
pub use self::value::ParamValue;

mod tag;
pub use self::tag::{Annotated, Param, ParamKind, ParamSpec, Tag};

mod signature;
pub use self::signature::{CallArg, MethodSpec};

mod classify;
pub use self::classify::classify;
pub(crate) use self::classify::{Classification, classify_method, classify_object};
