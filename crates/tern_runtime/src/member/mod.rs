//! Member, property, operator and cast protocol.
//!
//! Members are ordinary registered functions with mangled names:
//!
//! | Kind     | Registered name               | Implicit arguments |
//! |----------|-------------------------------|--------------------|
//! | Function | `MemberFunction_<Type>_<name>` | `self`             |
//! | Property | `MemberProperty_<Type>_<name>` | `self`             |
//! | Operator | `MemberOperator_<Type>_<op>`   | `a`, `b`           |
//! | Cast     | `MemberCast_<Type>_<Target>`   | `self`             |
//!
//! Lookup walks the receiver's type hierarchy from most to least specific,
//! so a member on `Number` serves both `Int` and `Double` unless a more
//! specific one exists.

use std::fmt;

use tern_outcome::errors::access_denied;
use tern_outcome::{Failure, Outcome};

use crate::context::ContextRef;
use crate::function::Argument;
use crate::types::TypeInfo;
use crate::value::TypedValue;

/// Implicit receiver argument of member functions, properties and casts.
pub const SELF_ARGUMENT: &str = "self";
/// Left operand of an operator function.
pub const LEFT_OPERAND: &str = "a";
/// Right operand of an operator function.
pub const RIGHT_OPERAND: &str = "b";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Function,
    Property,
    Operator,
    Cast,
}

impl MemberKind {
    pub fn prefix(self) -> &'static str {
        match self {
            MemberKind::Function => "MemberFunction",
            MemberKind::Property => "MemberProperty",
            MemberKind::Operator => "MemberOperator",
            MemberKind::Cast => "MemberCast",
        }
    }
}

/// Registry name of a member of a type.
///
/// Displays as `<prefix>_<type>_<member>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemberKey<'a> {
    pub kind: MemberKind,
    /// The type name (e.g. "Int", "Point")
    pub type_name: &'a str,
    /// The member name, operator symbol, or cast target
    pub member: &'a str,
}

impl<'a> MemberKey<'a> {
    #[inline]
    pub const fn new(kind: MemberKind, type_name: &'a str, member: &'a str) -> Self {
        MemberKey {
            kind,
            type_name,
            member,
        }
    }

    #[inline]
    pub const fn function(type_name: &'a str, name: &'a str) -> Self {
        Self::new(MemberKind::Function, type_name, name)
    }

    #[inline]
    pub const fn property(type_name: &'a str, name: &'a str) -> Self {
        Self::new(MemberKind::Property, type_name, name)
    }

    #[inline]
    pub const fn operator(type_name: &'a str, operator: &'a str) -> Self {
        Self::new(MemberKind::Operator, type_name, operator)
    }

    #[inline]
    pub const fn cast(type_name: &'a str, target: &'a str) -> Self {
        Self::new(MemberKind::Cast, type_name, target)
    }
}

impl fmt::Display for MemberKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.kind.prefix(), self.type_name, self.member)
    }
}

impl ContextRef {
    /// `receiver.name(arguments...)`
    #[tracing::instrument(level = "debug", skip_all, fields(name))]
    pub async fn invoke_member_function(
        &self,
        receiver: &TypedValue,
        name: &str,
        arguments: Vec<Argument>,
    ) -> Outcome<TypedValue> {
        let receiver = match receiver.resolve(self).await {
            Outcome::Success(receiver) => receiver,
            other => return other,
        };
        let type_info = receiver.type_info();
        if let Outcome::Failure(denial) =
            self.restriction()
                .can_ask_for_member_function(self, &type_info, name)
        {
            tracing::debug!(receiver = %type_info, "member function lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask for member function '{type_info}.{name}'"))
                    .caused_by(denial),
            );
        }

        let mut full = Vec::with_capacity(arguments.len() + 1);
        full.push(Argument::named(SELF_ARGUMENT, receiver));
        full.extend(arguments);
        self.invoke_by_hierarchy(MemberKind::Function, &type_info, name, &full)
            .await
    }

    /// `receiver.name`
    #[tracing::instrument(level = "debug", skip_all, fields(name))]
    pub async fn invoke_property_getter(&self, receiver: &TypedValue, name: &str) -> Outcome<TypedValue> {
        let receiver = match receiver.resolve(self).await {
            Outcome::Success(receiver) => receiver,
            other => return other,
        };
        let type_info = receiver.type_info();
        if let Outcome::Failure(denial) =
            self.restriction()
                .can_ask_for_property_getter(self, &type_info, name)
        {
            tracing::debug!(receiver = %type_info, "property lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask for property '{type_info}.{name}'")).caused_by(denial),
            );
        }

        let arguments = [Argument::named(SELF_ARGUMENT, receiver)];
        self.invoke_by_hierarchy(MemberKind::Property, &type_info, name, &arguments)
            .await
    }

    /// `left <operator> right`, dispatched on the left operand's type.
    #[tracing::instrument(level = "debug", skip_all, fields(operator))]
    pub async fn invoke_binary_operator(
        &self,
        left: &TypedValue,
        operator: &str,
        right: &TypedValue,
    ) -> Outcome<TypedValue> {
        let left = match left.resolve(self).await {
            Outcome::Success(left) => left,
            other => return other,
        };
        let right = match right.resolve(self).await {
            Outcome::Success(right) => right,
            other => return other,
        };
        let type_info = left.type_info();
        if let Outcome::Failure(denial) =
            self.restriction()
                .can_ask_for_operator(self, &type_info, operator)
        {
            tracing::debug!(left = %type_info, "operator lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask for operator '{type_info} {operator}'"))
                    .caused_by(denial),
            );
        }

        let arguments = [
            Argument::named(LEFT_OPERAND, left),
            Argument::named(RIGHT_OPERAND, right),
        ];
        self.invoke_by_hierarchy(MemberKind::Operator, &type_info, operator, &arguments)
            .await
    }

    /// Convert `value` to `target` with a host-registered cast.
    #[tracing::instrument(level = "debug", skip_all, fields(to = %target))]
    pub async fn invoke_casting_operator(&self, value: &TypedValue, target: &TypeInfo) -> Outcome<TypedValue> {
        let value = match value.resolve(self).await {
            Outcome::Success(value) => value,
            other => return other,
        };
        let type_info = value.type_info();
        if let Outcome::Failure(denial) =
            self.restriction()
                .can_ask_for_casting_operator(self, &type_info, target)
        {
            tracing::debug!(from = %type_info, "cast lookup denied");
            return Outcome::Failure(
                access_denied(&format!("ask for cast '{type_info}' to '{target}'"))
                    .caused_by(denial),
            );
        }

        let arguments = [Argument::named(SELF_ARGUMENT, value)];
        self.invoke_by_hierarchy(MemberKind::Cast, &type_info, target.name(), &arguments)
            .await
    }

    /// Try the member on each type of the hierarchy, most specific first.
    ///
    /// Stops at the first success; otherwise reports the first failure, or
    /// `Empty` if no type had a matching member.
    async fn invoke_by_hierarchy(
        &self,
        kind: MemberKind,
        type_info: &TypeInfo,
        member: &str,
        arguments: &[Argument],
    ) -> Outcome<TypedValue> {
        let mut first_failure: Option<Failure> = None;
        for type_name in type_info.hierarchy() {
            let key = MemberKey::new(kind, type_name, member).to_string();
            tracing::trace!(candidate = %key, "trying member");
            match self.invoke_function(&key, arguments).await {
                Outcome::Success(value) => return Outcome::Success(value),
                Outcome::Empty => {}
                Outcome::Failure(failure) => {
                    first_failure.get_or_insert(failure);
                }
            }
        }
        first_failure.map_or(Outcome::Empty, Outcome::Failure)
    }
}
