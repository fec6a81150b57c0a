use serde::Serialize;

use crate::error::RequestError;

/// A parameter value, kept in its serialized JSON form.
///
/// Path, query and header parameters of a [`Request`](crate::Request) are stored as
/// `ParamValue`, so a request owns its data and never borrows from the object it was
/// built from.
///
/// # Examples
///
/// ```rust
/// use clawrest_core::ParamValue;
///
/// let owner = ParamValue::from("tomitribe");
/// let page = ParamValue::from(2);
/// let tags = ParamValue::new(&vec!["rust", "web"])?;
///
/// assert_eq!(owner.to_string_value()?, "tomitribe");
/// assert_eq!(page.to_string_value()?, "2");
/// assert_eq!(tags.to_string_value()?, "rust,web");
/// # Ok::<(), clawrest_core::RequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct ParamValue(serde_json::Value);

impl ParamValue {
    /// Serializes any value into a parameter value.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be represented as JSON.
    pub fn new<T>(value: &T) -> Result<Self, RequestError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value)?;
        Ok(Self(value))
    }

    /// The underlying JSON value.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Returns `true` if the value is JSON `null`.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    fn json_value_to_string(value: &serde_json::Value) -> Result<String, RequestError> {
        match value {
            serde_json::Value::String(s) => Ok(s.clone()),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            serde_json::Value::Bool(b) => Ok(b.to_string()),
            serde_json::Value::Null => Ok(String::new()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(RequestError::UnsupportedParameterValue {
                    message: "nested complex values not supported in parameters".to_string(),
                    value: value.clone(),
                })
            }
        }
    }

    /// Converts the value to its string form, as used in paths and headers.
    ///
    /// Arrays of scalars are joined with a comma.
    ///
    /// # Errors
    ///
    /// Objects and nested arrays are not supported.
    pub fn to_string_value(&self) -> Result<String, RequestError> {
        match &self.0 {
            serde_json::Value::Array(arr) => {
                let values = arr
                    .iter()
                    .map(Self::json_value_to_string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(values.join(","))
            }
            serde_json::Value::Object(_) => Err(RequestError::UnsupportedParameterValue {
                message: "object values not supported in parameters".to_string(),
                value: self.0.clone(),
            }),
            value => Self::json_value_to_string(value),
        }
    }

    /// Converts the value to the list of strings used in a query string.
    ///
    /// Arrays are repeated, one entry per item: `?tag=rust&tag=web`.
    ///
    /// # Errors
    ///
    /// Objects and nested arrays are not supported.
    pub fn to_query_values(&self) -> Result<Vec<String>, RequestError> {
        match &self.0 {
            serde_json::Value::Array(arr) => arr.iter().map(Self::json_value_to_string).collect(),
            _ => self.to_string_value().map(|s| vec![s]),
        }
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<ParamValue> for serde_json::Value {
    fn from(value: ParamValue) -> Self {
        value.0
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self(serde_json::Value::String(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self(serde_json::Value::Bool(value))
    }
}

macro_rules! param_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self(serde_json::Value::from(value))
                }
            }
        )*
    };
}

param_value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
