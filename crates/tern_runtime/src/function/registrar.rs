//! Typed registration of native closures.
//!
//! The `functionN`/`procedureN` families register free functions of
//! arity N; `memberN`/`member_procedureN` register member functions of a
//! type, whose receiver is passed as an implicit `self` argument before the
//! N explicit ones. Procedures return `Undefined`.

use std::rc::Rc;

use tern_outcome::{Failure, Outcome};

use super::{Arguments, Function, ParamSpec, ParamType, Parameter};
use crate::context::ContextRef;
use crate::member::{MemberKey, SELF_ARGUMENT};
use crate::value::{FromValue, IntoValue, TypedValue};

/// Registers native functions into a context.
///
/// Registrations are local unless [`global`](Self::global) is set.
#[derive(Clone, Copy, Debug)]
pub struct Registrar<'a> {
    context: &'a ContextRef,
    global: bool,
}

impl<'a> Registrar<'a> {
    pub fn new(context: &'a ContextRef) -> Self {
        Registrar {
            context,
            global: false,
        }
    }

    #[must_use]
    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Register an already built function under its own name.
    pub fn register(&self, function: Rc<Function>) -> Outcome<()> {
        let name = function.name().to_owned();
        self.context.register(&name, function, self.global)
    }

    fn install<F>(&self, name: &str, parameters: Vec<Parameter>, body: F) -> Outcome<()>
    where
        F: Fn(&Arguments) -> Result<TypedValue, Failure> + 'static,
    {
        let built = Function::builder(name)
            .parameters(parameters)
            .native_sync(move |arguments| Outcome::from(body(arguments)))
            .build();
        match built {
            Ok(function) => self.register(function),
            Err(failure) => Outcome::Failure(failure),
        }
    }

    fn receiver<S: FromValue + 'static>(type_name: &str) -> ParamSpec<S> {
        ParamSpec::from_parameter(Parameter::mandatory(
            SELF_ARGUMENT,
            ParamType::late_bound(type_name),
        ))
    }
}

macro_rules! registrar_arity {
    ($function:ident, $procedure:ident, $member:ident, $member_procedure:ident; $($arg:ident: $ty:ident),*) => {
        impl Registrar<'_> {
            pub fn $function<$($ty,)* R>(
                &self,
                name: &str,
                $($arg: ParamSpec<$ty>,)*
                f: impl Fn($($ty),*) -> R + 'static,
            ) -> Outcome<()>
            where
                $($ty: 'static,)*
                R: IntoValue,
            {
                let parameters = vec![$($arg.parameter().clone()),*];
                self.install(name, parameters, move |_arguments| {
                    Ok(f($($arg.extract(_arguments)?),*).into_value())
                })
            }

            pub fn $procedure<$($ty),*>(
                &self,
                name: &str,
                $($arg: ParamSpec<$ty>,)*
                f: impl Fn($($ty),*) + 'static,
            ) -> Outcome<()>
            where
                $($ty: 'static,)*
            {
                self.$function(name, $($arg,)* f)
            }

            pub fn $member<S, $($ty,)* R>(
                &self,
                type_name: &str,
                name: &str,
                $($arg: ParamSpec<$ty>,)*
                f: impl Fn(S, $($ty),*) -> R + 'static,
            ) -> Outcome<()>
            where
                S: FromValue + 'static,
                $($ty: 'static,)*
                R: IntoValue,
            {
                let receiver = Self::receiver::<S>(type_name);
                let parameters = vec![receiver.parameter().clone() $(, $arg.parameter().clone())*];
                let key = MemberKey::function(type_name, name).to_string();
                self.install(&key, parameters, move |arguments| {
                    Ok(f(receiver.extract(arguments)? $(, $arg.extract(arguments)?)*).into_value())
                })
            }

            pub fn $member_procedure<S, $($ty),*>(
                &self,
                type_name: &str,
                name: &str,
                $($arg: ParamSpec<$ty>,)*
                f: impl Fn(S, $($ty),*) + 'static,
            ) -> Outcome<()>
            where
                S: FromValue + 'static,
                $($ty: 'static,)*
            {
                self.$member(type_name, name, $($arg,)* f)
            }
        }
    };
}

registrar_arity!(function0, procedure0, member0, member_procedure0;);
registrar_arity!(function1, procedure1, member1, member_procedure1; a: A);
registrar_arity!(function2, procedure2, member2, member_procedure2; a: A, b: B);
registrar_arity!(function3, procedure3, member3, member_procedure3; a: A, b: B, c: C);
