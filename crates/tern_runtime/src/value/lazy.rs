//! Lazily evaluated values.

use std::fmt;
use std::rc::Rc;

use tern_outcome::errors::undeclared_function;
use tern_outcome::Outcome;

use super::TypedValue;
use crate::context::ContextRef;
use crate::function::Argument;

/// A variable read, resolved at evaluation time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableReference {
    name: Rc<str>,
}

impl VariableReference {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        VariableReference { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn evaluate(&self, context: &ContextRef) -> Outcome<TypedValue> {
        context.require(&self.name)
    }
}

/// `receiver.name`, dispatched through the property-getter protocol.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyReference {
    receiver: TypedValue,
    name: Rc<str>,
}

impl PropertyReference {
    pub fn new(receiver: TypedValue, name: impl Into<Rc<str>>) -> Self {
        PropertyReference {
            receiver,
            name: name.into(),
        }
    }

    pub fn receiver(&self) -> &TypedValue {
        &self.receiver
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) async fn evaluate(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let receiver = match self.receiver.resolve(context).await {
            Outcome::Success(receiver) => receiver,
            Outcome::Empty => TypedValue::Undefined,
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        };
        context
            .invoke_property_getter(&receiver, &self.name)
            .await
            .switch_if_empty(|| {
                let qualified = format!("{}.{}", receiver.type_info(), self.name);
                Outcome::Failure(undeclared_function(&qualified))
            })
    }
}

impl fmt::Display for PropertyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.receiver, self.name)
    }
}

/// A function invocation, with or without a receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    receiver: Option<TypedValue>,
    name: Rc<str>,
    arguments: Vec<Argument>,
}

impl FunctionCall {
    pub fn new(name: impl Into<Rc<str>>, arguments: Vec<Argument>) -> Self {
        FunctionCall {
            receiver: None,
            name: name.into(),
            arguments,
        }
    }

    /// A member call on `receiver`.
    pub fn on(receiver: TypedValue, name: impl Into<Rc<str>>, arguments: Vec<Argument>) -> Self {
        FunctionCall {
            receiver: Some(receiver),
            name: name.into(),
            arguments,
        }
    }

    pub fn receiver(&self) -> Option<&TypedValue> {
        self.receiver.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Evaluate arguments left to right, then dispatch.
    pub(crate) async fn evaluate(&self, context: &ContextRef) -> Outcome<TypedValue> {
        let mut arguments = Vec::with_capacity(self.arguments.len());
        for argument in &self.arguments {
            let value = match argument.value().resolve(context).await {
                Outcome::Success(value) => value,
                Outcome::Empty => TypedValue::Undefined,
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            };
            arguments.push(argument.with_value(value));
        }

        let outcome = match &self.receiver {
            Some(receiver) => {
                let receiver = match receiver.resolve(context).await {
                    Outcome::Success(receiver) => receiver,
                    Outcome::Empty => TypedValue::Undefined,
                    Outcome::Failure(failure) => return Outcome::Failure(failure),
                };
                context
                    .invoke_member_function(&receiver, &self.name, arguments)
                    .await
            }
            None => context.invoke_function(&self.name, &arguments).await,
        };
        outcome.switch_if_empty(|| Outcome::Failure(undeclared_function(&self.name)))
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.receiver {
            write!(f, "{receiver}.")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ")")
    }
}
