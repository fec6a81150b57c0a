use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tracing::warn;

use crate::error::RequestError;
use crate::parameters::ParamValue;

/// Regular expression for matching path variables in the format `{name}`.
///
/// Names may contain `-` and `.` after their first character, as in `{repo-name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w[\w.-]*)}").expect("a valid regex"));

/// Characters kept as-is in a path segment: alphanumerics and `-._~`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// A path template with `{name}` placeholders.
///
/// Variables are extracted once, left to right, duplicates included.
///
/// # Examples
///
/// ```rust
/// use clawrest_core::UriTemplate;
///
/// let template = UriTemplate::from("/repos/{owner}/{repo}/pulls");
/// assert_eq!(template.variables(), ["owner", "repo"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{path}")]
pub struct UriTemplate {
    path: String,
    variables: Vec<String>,
}

impl UriTemplate {
    /// Parses a path template.
    pub fn parse(path: impl Into<String>) -> Self {
        let path = path.into();
        let variables = RE
            .captures_iter(&path)
            .filter_map(|caps| caps.name("name"))
            .map(|m| m.as_str().to_string())
            .collect();
        Self { path, variables }
    }

    /// The template itself.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The variable names, in declaration order, duplicates included.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Binds values to the variables by position.
    ///
    /// The i-th value is bound to the i-th variable. Supplying fewer values than
    /// variables is fine, the remaining variables stay unbound.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::ExcessParameters`] when more values than
    /// variables are supplied.
    pub fn bind<I>(&self, values: I) -> Result<IndexMap<String, ParamValue>, RequestError>
    where
        I: IntoIterator,
        I::Item: Into<ParamValue>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if values.len() > self.variables.len() {
            return Err(RequestError::ExcessParameters {
                path: self.path.clone(),
                expected: self.variables.len(),
                supplied: values.len(),
            });
        }

        let result = self.variables.iter().cloned().zip(values).collect();
        Ok(result)
    }

    /// Substitutes every placeholder with the percent-encoded string form of its value.
    ///
    /// # Errors
    ///
    /// Fails with [`RequestError::PathUnresolved`] when a variable has no binding,
    /// or if a value has no string form.
    pub fn resolve(&self, args: &IndexMap<String, ParamValue>) -> Result<String, RequestError> {
        let mut path = self.path.clone();

        for name in args.keys() {
            if !self.variables.contains(name) {
                warn!(?name, path = %self.path, "argument name not found");
            }
        }

        let mut missings = Vec::new();
        for name in &self.variables {
            // all occurrences of a duplicated variable are replaced at once
            if missings.contains(name) || !path.contains(&["{", name, "}"].concat()) {
                continue;
            }
            let Some(value) = args.get(name) else {
                missings.push(name.clone());
                continue;
            };
            let encoded_value = encode_path_param_value(&value.to_string_value()?);
            path = replace_path_param(&path, name, &encoded_value);
        }

        if missings.is_empty() {
            Ok(path)
        } else {
            Err(RequestError::PathUnresolved {
                path: self.path.clone(),
                missings,
            })
        }
    }
}

impl From<&str> for UriTemplate {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for UriTemplate {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}
