//! Function declarations.
//!
//! A [`Function`] is a display name, an ordered parameter list, a variadic
//! flag and a body. Bodies are either native async closures or script
//! [`Block`]s. Functions are shared as `Rc<Function>`, and that pointer is
//! the identity recursion limits count.
//!
//! Declaring functions from Rust usually goes through [`FunctionBuilder`] or,
//! for typed closures, the [`Registrar`].

mod builder;
mod param_spec;
mod registrar;

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

use tern_outcome::errors::invalid_parameter_default;
use tern_outcome::{Failure, Outcome};

use crate::action::Block;
use crate::context::ContextRef;
use crate::types::TypeInfo;
use crate::value::TypedValue;
use crate::LocalBoxFuture;

pub use builder::FunctionBuilder;
pub use param_spec::ParamSpec;
pub use registrar::Registrar;

/// Native function body.
///
/// Receives the call context and the bound arguments.
pub type NativeBody = Rc<dyn Fn(ContextRef, Arguments) -> LocalBoxFuture<'static, Outcome<TypedValue>>>;

/// Variable a script body sees its unmatched variadic arguments under.
pub const REST_VARIABLE: &str = "rest";

/// What a parameter accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamType {
    /// A concrete type known at declaration.
    Declared(TypeInfo),
    /// A type referred to by name, for types declared after the function.
    LateBound(Rc<str>),
}

impl ParamType {
    pub fn late_bound(name: impl Into<Rc<str>>) -> Self {
        ParamType::LateBound(name.into())
    }

    pub fn type_name(&self) -> &str {
        match self {
            ParamType::Declared(info) => info.name(),
            ParamType::LateBound(name) => name,
        }
    }

    /// Whether `value`'s hierarchy contains this type.
    pub fn accepts(&self, value: &TypedValue) -> bool {
        value.type_info().is(self.type_name())
    }
}

impl From<TypeInfo> for ParamType {
    fn from(info: TypeInfo) -> Self {
        ParamType::Declared(info)
    }
}

/// What happens when no argument binds to a parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum MissingValue {
    /// The overload is disqualified.
    Mandatory,
    /// The parameter is left out of the bound arguments.
    Optional,
    /// The given default is bound instead.
    Substitute(TypedValue),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: Rc<str>,
    ty: ParamType,
    missing: MissingValue,
}

impl Parameter {
    pub fn mandatory(name: impl Into<Rc<str>>, ty: impl Into<ParamType>) -> Self {
        Parameter {
            name: name.into(),
            ty: ty.into(),
            missing: MissingValue::Mandatory,
        }
    }

    pub fn optional(name: impl Into<Rc<str>>, ty: impl Into<ParamType>) -> Self {
        Parameter {
            name: name.into(),
            ty: ty.into(),
            missing: MissingValue::Optional,
        }
    }

    /// A parameter defaulting to `default`, which must satisfy `ty`.
    pub fn substitute(
        name: impl Into<Rc<str>>,
        ty: impl Into<ParamType>,
        default: TypedValue,
    ) -> Result<Self, Failure> {
        let name = name.into();
        let ty = ty.into();
        if !ty.accepts(&default) {
            return Err(invalid_parameter_default(
                &name,
                ty.type_name(),
                default.type_info().name(),
            ));
        }
        Ok(Parameter {
            name,
            ty,
            missing: MissingValue::Substitute(default),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    #[inline]
    pub fn missing(&self) -> &MissingValue {
        &self.missing
    }

    #[inline]
    pub fn accepts(&self, value: &TypedValue) -> bool {
        self.ty.accepts(value)
    }

    /// Whether `argument` may bind here positionally: it is unnamed or named
    /// after this parameter, and its value has the right type.
    pub fn fits(&self, argument: &Argument) -> bool {
        argument.name().map_or(true, |name| name == &*self.name) && self.accepts(argument.value())
    }

    pub(crate) fn shared_name(&self) -> Rc<str> {
        Rc::clone(&self.name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty.type_name())?;
        match &self.missing {
            MissingValue::Mandatory => Ok(()),
            MissingValue::Optional => f.write_str("?"),
            MissingValue::Substitute(default) => write!(f, " = {default}"),
        }
    }
}

/// A call-site argument, optionally named.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    name: Option<Rc<str>>,
    value: TypedValue,
}

impl Argument {
    pub fn positional(value: TypedValue) -> Self {
        Argument { name: None, value }
    }

    pub fn named(name: impl Into<Rc<str>>, value: TypedValue) -> Self {
        Argument {
            name: Some(name.into()),
            value,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }

    /// Same name, different value.
    #[must_use]
    pub fn with_value(&self, value: TypedValue) -> Self {
        Argument {
            name: self.name.clone(),
            value,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Arguments bound to a chosen overload, keyed by parameter name.
///
/// Unmatched arguments of a variadic function are kept in call order in
/// [`rest`](Self::rest).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: FxHashMap<Rc<str>, TypedValue>,
    rest: Vec<TypedValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<Rc<str>>, value: TypedValue) {
        self.values.insert(name.into(), value);
    }

    pub fn push_rest(&mut self, value: TypedValue) {
        self.rest.push(value);
    }

    pub fn rest(&self) -> &[TypedValue] {
        &self.rest
    }

    /// Number of named bindings, not counting `rest`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.rest.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.values.iter().map(|(name, value)| (&**name, value))
    }
}

impl<K: Into<Rc<str>>> FromIterator<(K, TypedValue)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, TypedValue)>>(iter: I) -> Self {
        Arguments {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            rest: Vec::new(),
        }
    }
}

/// A function body.
#[derive(Clone)]
pub enum FunctionBody {
    Native(NativeBody),
    Script(Block),
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Native(_) => f.write_str("Native(..)"),
            FunctionBody::Script(block) => f.debug_tuple("Script").field(block).finish(),
        }
    }
}

/// A declared function. Build with [`Function::builder`].
#[derive(Debug)]
pub struct Function {
    name: Rc<str>,
    parameters: Vec<Parameter>,
    variadic: bool,
    body: FunctionBody,
}

impl Function {
    pub fn builder(name: impl Into<Rc<str>>) -> FunctionBuilder {
        FunctionBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[inline]
    pub fn body(&self) -> &FunctionBody {
        &self.body
    }

    /// Run the body in `context`, the fresh call context.
    ///
    /// Script bodies see their arguments as local variables.
    pub(crate) async fn call(&self, context: &ContextRef, arguments: Arguments) -> Outcome<TypedValue> {
        match &self.body {
            FunctionBody::Native(body) => body(context.clone(), arguments).await,
            FunctionBody::Script(block) => {
                for (name, value) in arguments.iter() {
                    if let Outcome::Failure(failure) = context.set(name, false, value.clone()) {
                        return Outcome::Failure(failure);
                    }
                }
                if self.variadic {
                    let rest = TypedValue::array(arguments.rest().to_vec());
                    if let Outcome::Failure(failure) = context.set(REST_VARIABLE, false, rest) {
                        return Outcome::Failure(failure);
                    }
                }
                block.run_in(context).await
            }
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}")?;
        }
        if self.variadic {
            if !self.parameters.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}
