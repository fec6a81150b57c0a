use http::header::ACCEPT;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use super::signature::{CallArg, MethodSpec};
use super::tag::{Annotated, Param, ParamKind};
use super::value::ParamValue;
use crate::error::RequestError;

/// Classifies every field of a tagged object.
///
/// Each field must carry exactly one tag, the returned parameters are named after
/// their tag and keep the declaration order of the fields.
///
/// # Errors
///
/// Fails with [`RequestError::UnrecognizedField`] on the first untagged field,
/// or if a field value cannot be read.
pub fn classify(object: &dyn Annotated) -> Result<Vec<Param>, RequestError> {
    classify_fields(object, FieldPolicy::Strict)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPolicy {
    /// Untagged fields are an error.
    Strict,
    /// Untagged fields are ignored.
    Lenient,
}

fn classify_fields(
    object: &dyn Annotated,
    policy: FieldPolicy,
) -> Result<Vec<Param>, RequestError> {
    let type_name = object.type_name();
    let mut result = Vec::new();

    for (index, spec) in object.param_specs().iter().enumerate() {
        let Some(tag) = spec.tag else {
            if policy == FieldPolicy::Strict {
                return Err(RequestError::UnrecognizedField {
                    type_name,
                    field: spec.name,
                });
            }
            trace!(type_name, field = spec.name, "skip untagged field");
            continue;
        };

        let value = object.read_field(index)?;
        result.push(Param {
            name: tag.name().to_string(),
            kind: tag.kind(),
            value,
        });
    }

    ensure_unique(type_name, &result)?;
    Ok(result)
}

/// Path, query and header names must be unique per kind.
fn ensure_unique(owner: &'static str, params: &[Param]) -> Result<(), RequestError> {
    let mut seen = IndexSet::new();
    for Param { name, kind, .. } in params {
        if matches!(kind, ParamKind::Body | ParamKind::Unknown) {
            continue;
        }
        if !seen.insert((*kind, name.as_str())) {
            return Err(RequestError::DuplicateParameter {
                owner,
                kind: *kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// The outcome of a classification, ready to be turned into a request.
#[derive(Debug, Default)]
pub(crate) struct Classification {
    pub(crate) path_params: IndexMap<String, ParamValue>,
    pub(crate) query_params: IndexMap<String, ParamValue>,
    pub(crate) header_params: IndexMap<String, ParamValue>,
    pub(crate) body: Option<String>,
}

impl Classification {
    fn extend(&mut self, params: impl IntoIterator<Item = Param>) {
        for Param { name, kind, value } in params {
            // a null value means the parameter is absent
            if value.is_null() {
                continue;
            }
            let target = match kind {
                ParamKind::Path => &mut self.path_params,
                ParamKind::Query => &mut self.query_params,
                ParamKind::Header => &mut self.header_params,
                ParamKind::Body | ParamKind::Unknown => continue,
            };
            target.insert(name, value);
        }
    }
}

fn has_body(params: &[Param]) -> bool {
    params.iter().any(|param| param.kind == ParamKind::Body)
}

/// Object-derived classification.
///
/// A single body-tagged field triggers the serialization of the whole object.
pub(crate) fn classify_object(object: &dyn Annotated) -> Result<Classification, RequestError> {
    let params = classify(object)?;

    let body = if has_body(&params) {
        object.to_body()?
    } else {
        None
    };

    let mut result = Classification {
        body,
        ..Default::default()
    };
    result.extend(params);

    debug!(
        type_name = object.type_name(),
        path = result.path_params.len(),
        query = result.query_params.len(),
        header = result.header_params.len(),
        body = result.body.is_some(),
        "object classified"
    );
    Ok(result)
}

/// Method-derived classification, returns the route without its leading `/`.
pub(crate) fn classify_method(
    method: &MethodSpec,
    args: &[CallArg<'_>],
) -> Result<(String, Classification), RequestError> {
    let name = method.name();
    let route = method
        .route()
        .ok_or_else(|| RequestError::invalid_signature(name, "missing route"))?;
    let route = route.strip_prefix('/').unwrap_or(route).to_string();

    let specs = method.params();
    if specs.len() != args.len() {
        return Err(RequestError::invalid_signature(
            name,
            format!("expected {} arguments, got {}", specs.len(), args.len()),
        ));
    }

    let mut params = Vec::with_capacity(args.len());
    let mut unknown = Vec::new();
    for (spec, arg) in specs.iter().zip(args) {
        match spec.tag {
            Some(tag) => params.push(Param {
                name: tag.name().to_string(),
                kind: tag.kind(),
                value: arg.param_value().clone(),
            }),
            None => unknown.push(arg),
        }
    }

    if unknown.len() > 1 {
        return Err(RequestError::invalid_signature(
            name,
            format!(
                "client interface methods may only have one non-annotated parameter. Found {}",
                unknown.len()
            ),
        ));
    }

    ensure_unique(name, &params)?;

    let mut result = Classification::default();
    if let Some(object) = unknown.first().and_then(|arg| arg.annotated()) {
        let fields = classify_fields(object, FieldPolicy::Lenient)?;
        if has_body(&fields) {
            result.body = object.to_body()?;
        }
        result.extend(fields);
    }
    // explicitly tagged arguments win over the fields of the untagged one
    result.extend(params);

    merge_accept(&mut result.header_params)?;

    debug!(
        method = name,
        %route,
        path = result.path_params.len(),
        query = result.query_params.len(),
        header = result.header_params.len(),
        body = result.body.is_some(),
        "method classified"
    );
    Ok((route, result))
}

/// Unions the caller supplied `accept` values with `application/json`.
fn merge_accept(headers: &mut IndexMap<String, ParamValue>) -> Result<(), RequestError> {
    let keys = headers
        .keys()
        .filter(|key| key.eq_ignore_ascii_case(ACCEPT.as_str()))
        .cloned()
        .collect::<Vec<_>>();

    let mut accept = IndexSet::new();
    for key in keys {
        let Some(value) = headers.shift_remove(&key) else {
            continue;
        };
        for item in value.to_string_value()?.split(',') {
            let item = item.trim();
            if !item.is_empty() {
                accept.insert(item.to_string());
            }
        }
    }
    accept.insert(mime::APPLICATION_JSON.essence_str().to_string());

    let accept = accept.into_iter().collect::<Vec<_>>().join(", ");
    headers.insert(ACCEPT.as_str().to_string(), ParamValue::from(accept));
    Ok(())
}
