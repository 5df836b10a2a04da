use std::fmt;
use std::rc::Rc;

use tern_outcome::errors::invalid_argument;
use tern_outcome::Failure;

use super::{Arguments, ParamType, Parameter};
use crate::value::{FromValue, TypedValue};

type Transform<T> = Rc<dyn Fn(&TypedValue) -> Option<T>>;

/// A parameter together with how to read its argument as a Rust `T`.
pub struct ParamSpec<T> {
    parameter: Parameter,
    transform: Transform<T>,
}

impl<T: FromValue + 'static> ParamSpec<T> {
    /// A mandatory parameter typed and read by `T`'s [`FromValue`] impl.
    pub fn of(name: impl Into<Rc<str>>) -> Self {
        ParamSpec {
            parameter: Parameter::mandatory(name, T::type_info()),
            transform: Rc::new(T::from_value),
        }
    }

    /// `parameter`, read by `T`'s [`FromValue`] impl.
    pub fn from_parameter(parameter: Parameter) -> Self {
        ParamSpec {
            parameter,
            transform: Rc::new(T::from_value),
        }
    }
}

impl<T> ParamSpec<T> {
    /// A mandatory parameter with a custom transformation.
    pub fn with(
        name: impl Into<Rc<str>>,
        ty: impl Into<ParamType>,
        transform: impl Fn(&TypedValue) -> Option<T> + 'static,
    ) -> Self {
        ParamSpec {
            parameter: Parameter::mandatory(name, ty),
            transform: Rc::new(transform),
        }
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    /// Read this parameter's bound argument.
    pub fn extract(&self, arguments: &Arguments) -> Result<T, Failure> {
        arguments
            .get(self.parameter.name())
            .and_then(|value| (self.transform)(value))
            .ok_or_else(|| invalid_argument(self.parameter.name(), self.parameter.ty().type_name()))
    }
}

impl<T> Clone for ParamSpec<T> {
    fn clone(&self) -> Self {
        ParamSpec {
            parameter: self.parameter.clone(),
            transform: Rc::clone(&self.transform),
        }
    }
}

impl<T> fmt::Debug for ParamSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}
