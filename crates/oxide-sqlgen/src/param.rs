//! Bound parameters and the collaborator that creates them.

use serde::{Deserialize, Serialize};

use crate::value::SqlValue;

/// A parameter produced by parameterized rendering.
///
/// The name carries the dialect's placeholder marker (`@p0`, `:p0`, ...) and
/// appears verbatim in the rendered SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Placeholder name, including the dialect marker.
    pub name: String,
    /// Bound value.
    pub value: SqlValue,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: SqlValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::new(String::new(), SqlValue::Null)
    }
}

/// Creates the parameter objects handed back to the caller.
///
/// The renderer calls [`create`](Self::create) once per bound value and then
/// sets both the name and the value, so implementations only decide which
/// object is returned (for example a driver-specific wrapper pre-configured
/// by the caller).
pub trait ParameterCreator {
    /// Returns a fresh parameter.
    fn create(&mut self) -> Parameter;
}

impl<F> ParameterCreator for F
where
    F: FnMut() -> Parameter,
{
    fn create(&mut self) -> Parameter {
        self()
    }
}

/// A creator returning default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultParameterCreator;

impl ParameterCreator for DefaultParameterCreator {
    fn create(&mut self) -> Parameter {
        Parameter::default()
    }
}
