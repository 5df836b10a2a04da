//! `FunctionBuilder` for declaring functions.

use std::future::Future;
use std::rc::Rc;

use tern_outcome::errors::missing_body;
use tern_outcome::{Failure, Outcome};

use super::{Arguments, Function, FunctionBody, NativeBody, Parameter};
use crate::action::Block;
use crate::context::ContextRef;
use crate::value::TypedValue;
use crate::LocalBoxFuture;

/// Builder for [`Function`].
///
/// A body is required; everything else is optional.
///
/// ```
/// use tern_runtime::{Function, Parameter, TypeInfo, TypedValue};
/// use tern_outcome::Outcome;
///
/// let len = Function::builder("len")
///     .parameter(Parameter::mandatory("s", TypeInfo::string()))
///     .native(|_context, arguments| async move {
///         match arguments.get("s") {
///             Some(TypedValue::String(s)) => Outcome::Success(TypedValue::Int(s.len() as i64)),
///             _ => Outcome::Empty,
///         }
///     })
///     .build();
/// assert!(len.is_ok());
/// ```
pub struct FunctionBuilder {
    name: Rc<str>,
    parameters: Vec<Parameter>,
    variadic: bool,
    body: Option<FunctionBody>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        FunctionBuilder {
            name: name.into(),
            parameters: Vec::new(),
            variadic: false,
            body: None,
        }
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Accept arguments beyond the declared parameters.
    #[must_use]
    pub fn variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }

    /// Use an async closure as the body.
    #[must_use]
    pub fn native<F, Fut>(mut self, body: F) -> Self
    where
        F: Fn(ContextRef, Arguments) -> Fut + 'static,
        Fut: Future<Output = Outcome<TypedValue>> + 'static,
    {
        let native: NativeBody = Rc::new(
            move |context: ContextRef, arguments: Arguments| -> LocalBoxFuture<'static, Outcome<TypedValue>> {
                Box::pin(body(context, arguments))
            },
        );
        self.body = Some(FunctionBody::Native(native));
        self
    }

    /// Use a synchronous closure over the bound arguments as the body.
    #[must_use]
    pub fn native_sync<F>(mut self, body: F) -> Self
    where
        F: Fn(&Arguments) -> Outcome<TypedValue> + 'static,
    {
        let native: NativeBody = Rc::new(
            move |_context: ContextRef, arguments: Arguments| -> LocalBoxFuture<'static, Outcome<TypedValue>> {
                Box::pin(std::future::ready(body(&arguments)))
            },
        );
        self.body = Some(FunctionBody::Native(native));
        self
    }

    /// Use a script block as the body.
    #[must_use]
    pub fn script(mut self, block: Block) -> Self {
        self.body = Some(FunctionBody::Script(block));
        self
    }

    pub fn build(self) -> Result<Rc<Function>, Failure> {
        let Some(body) = self.body else {
            return Err(missing_body(&self.name));
        };
        Ok(Rc::new(Function {
            name: self.name,
            parameters: self.parameters,
            variadic: self.variadic,
            body,
        }))
    }
}
