//! Flexible constructor inputs.
//!
//! Entity constructors accept either a literal number, a live reference to
//! another cell, or nothing at all (falling back to a documented default).
//! [`Input`] captures the three cases and converts them into a [`Reactive`].

use super::Reactive;
use crate::types::ReactiveError;
use serde_json::Value;

/// A constructor argument that becomes a reactive cell.
///
/// # Examples
///
/// ```
/// use quant_core::reactive::{Input, Reactive};
///
/// let spot = Reactive::constant(100.0);
/// let linked = Input::from(&spot).into_reactive("price", None).unwrap();
/// spot.rebind_constant(101.0);
/// assert_eq!(linked.get(), 101.0);
///
/// let fallback = Input::Default.into_reactive("ytm", Some(0.05)).unwrap();
/// assert_eq!(fallback.get(), 0.05);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Input {
    /// A literal number.
    Value(f64),
    /// A live reference; upstream changes propagate.
    Linked(Reactive),
    /// Use the parameter's default.
    #[default]
    Default,
}

impl Input {
    /// Converts the input into a cell.
    ///
    /// # Errors
    ///
    /// Returns [`ReactiveError::MissingInput`] for [`Input::Default`] when the
    /// parameter has no default.
    pub fn into_reactive(
        self,
        parameter: &str,
        default: Option<f64>,
    ) -> Result<Reactive, ReactiveError> {
        match self {
            Input::Value(v) => Ok(Reactive::constant(v)),
            Input::Linked(source) => Ok(Reactive::bind(&source)),
            Input::Default => default
                .map(Reactive::constant)
                .ok_or_else(|| ReactiveError::MissingInput {
                    parameter: parameter.to_string(),
                }),
        }
    }

    /// Coerces a dynamically typed value, as loaded from configuration.
    ///
    /// Numbers become [`Input::Value`] and `null` becomes [`Input::Default`].
    ///
    /// # Errors
    ///
    /// Any other JSON type yields [`ReactiveError::TypeMismatch`].
    pub fn from_json(parameter: &str, value: &Value) -> Result<Self, ReactiveError> {
        match value {
            Value::Null => Ok(Input::Default),
            Value::Number(n) => n.as_f64().map(Input::Value).ok_or_else(|| {
                ReactiveError::TypeMismatch {
                    parameter: parameter.to_string(),
                    found: format!("unrepresentable number {}", n),
                }
            }),
            other => Err(ReactiveError::TypeMismatch {
                parameter: parameter.to_string(),
                found: json_type_name(other).to_string(),
            }),
        }
    }

    /// Returns true if this input is [`Input::Default`].
    pub fn is_default(&self) -> bool {
        matches!(self, Input::Default)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Value(value)
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Input::Value(f64::from(value))
    }
}

impl From<u32> for Input {
    fn from(value: u32) -> Self {
        Input::Value(f64::from(value))
    }
}

impl From<Reactive> for Input {
    fn from(value: Reactive) -> Self {
        Input::Linked(value)
    }
}

impl From<&Reactive> for Input {
    fn from(value: &Reactive) -> Self {
        Input::Linked(value.clone())
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Default, Into::into)
    }
}
