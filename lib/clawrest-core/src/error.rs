use crate::parameters::ParamKind;

/// Errors that can occur while classifying parameters or assembling a [`Request`](crate::Request).
///
/// Every error is raised synchronously at construction or resolution time.
/// Nothing here is transient, so none of these errors should be retried.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum RequestError {
    /// More positional path values were supplied than the template declares.
    #[display(
        "Excess path parameters supplied. Path '{path}' contains {expected} parameters, but {supplied} were supplied"
    )]
    #[from(skip)]
    ExcessParameters {
        /// The path template.
        path: String,
        /// Number of variables in the template.
        expected: usize,
        /// Number of values supplied.
        supplied: usize,
    },

    /// A field of an object used for object-derived construction carries no tag.
    ///
    /// Signals a misconfigured data object.
    #[display(
        "Field '{type_name}::{field}' must be tagged with one of path, query, header or body"
    )]
    #[from(skip)]
    UnrecognizedField {
        /// The type owning the field.
        type_name: &'static str,
        /// The untagged field.
        field: &'static str,
    },

    /// Two fields, or two arguments, declare the same parameter name.
    #[display("Parameter '{name}' is declared more than once as {kind} in '{owner}'")]
    #[from(skip)]
    DuplicateParameter {
        /// The type or method declaring the parameters.
        owner: &'static str,
        /// The kind of the parameter.
        kind: ParamKind,
        /// The duplicated tag name.
        name: String,
    },

    /// A client method description cannot be turned into a request.
    ///
    /// Occurs with more than one untagged argument, a missing route,
    /// an argument count mismatch, or a missing HTTP verb on resolution.
    #[display("Invalid method signature '{method}': {message}")]
    #[from(skip)]
    InvalidMethodSignature {
        /// Name of the method.
        method: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// A field value could not be read from an annotated object.
    #[display("Cannot read field #{index} of '{type_name}'")]
    #[from(skip)]
    UnreadableField {
        /// The type owning the field.
        type_name: &'static str,
        /// Position of the field in the type metadata.
        index: usize,
    },

    /// Parameter value cannot be converted to its string form.
    #[display("Unsupported parameter value: {message}. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// Specific error message describing the conversion failure.
        message: String,
        /// The value that failed to convert.
        value: serde_json::Value,
    },

    /// The request has no HTTP method but one is required by the transport.
    #[display("Request '{path}' has no HTTP method")]
    #[from(skip)]
    MissingMethod {
        /// The path template of the request.
        path: String,
    },

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// JSON serialization error, for bodies and parameter values.
    JsonValueError(serde_json::Error),

    /// Query string serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// The materialized URI is not valid.
    InvalidUri(http::uri::InvalidUri),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// URL parsing error when configuring an endpoint from a base URL.
    UrlError(url::ParseError),
}

impl RequestError {
    pub(crate) fn invalid_signature(method: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidMethodSignature {
            method,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<RequestError>();
        assert_sync::<RequestError>();
    }

    #[test]
    fn should_display_excess_parameters() {
        let error = RequestError::ExcessParameters {
            path: "/repos/{owner}/{repo}".to_string(),
            expected: 2,
            supplied: 3,
        };

        insta::assert_snapshot!(error, @"Excess path parameters supplied. Path '/repos/{owner}/{repo}' contains 2 parameters, but 3 were supplied");
    }

    #[test]
    fn should_display_unrecognized_field() {
        let error = RequestError::UnrecognizedField {
            type_name: "Orange",
            field: "color",
        };

        insta::assert_snapshot!(error, @"Field 'Orange::color' must be tagged with one of path, query, header or body");
    }
}
