use std::fmt;
use std::rc::Rc;

use tern_outcome::errors::access_denied;
use tern_outcome::Outcome;

use super::Restriction;
use crate::context::Context;
use crate::function::Function;
use crate::types::TypeInfo;
use crate::value::TypedValue;

/// Seed of the fold, consulted before any child.
pub type StartingValue<R> = Rc<dyn Fn() -> Outcome<R>>;

/// Decision taken when every child abstained.
pub type EmptyResultFinisher<R> = Rc<dyn Fn() -> Outcome<R>>;

/// Ordered composition of policies: the first child with an opinion decides.
pub struct CompoundRestriction<R: 'static = super::Grant> {
    children: Vec<Rc<dyn Restriction<R>>>,
    starting: StartingValue<R>,
    finisher: EmptyResultFinisher<R>,
}

impl<R: Clone + 'static> CompoundRestriction<R> {
    pub fn new(
        children: Vec<Rc<dyn Restriction<R>>>,
        starting: StartingValue<R>,
        finisher: EmptyResultFinisher<R>,
    ) -> Self {
        CompoundRestriction {
            children,
            starting,
            finisher,
        }
    }

    /// Grants with `grant` when no child has an opinion.
    pub fn permissive(children: Vec<Rc<dyn Restriction<R>>>, grant: R) -> Self {
        Self::new(
            children,
            Rc::new(|| Outcome::Empty),
            Rc::new(move || Outcome::Success(grant.clone())),
        )
    }

    /// Denies when no child has an opinion.
    pub fn restrictive(children: Vec<Rc<dyn Restriction<R>>>) -> Self {
        Self::new(
            children,
            Rc::new(|| Outcome::Empty),
            Rc::new(|| Outcome::Failure(access_denied("no policy granted the operation"))),
        )
    }

    pub fn children(&self) -> &[Rc<dyn Restriction<R>>] {
        &self.children
    }

    fn decide(&self, check: impl Fn(&dyn Restriction<R>) -> Outcome<R>) -> Outcome<R> {
        self.children
            .iter()
            .fold((self.starting)(), |decision, child| {
                decision.switch_if_empty(|| check(&**child))
            })
            .switch_if_empty(|| (self.finisher)())
    }
}

impl<R: Clone + 'static> Restriction<R> for CompoundRestriction<R> {
    fn can_get_variable(&self, context: &Context, key: &str) -> Outcome<R> {
        self.decide(|child| child.can_get_variable(context, key))
    }

    fn can_set_variable(
        &self,
        context: &Context,
        key: &str,
        global: bool,
        value: &TypedValue,
        parent_attempt: Option<&Outcome<()>>,
    ) -> Outcome<R> {
        self.decide(|child| child.can_set_variable(context, key, global, value, parent_attempt))
    }

    fn can_ask_parent_for_variable(&self, context: &Context, key: &str) -> Outcome<R> {
        self.decide(|child| child.can_ask_parent_for_variable(context, key))
    }

    fn can_register_function(
        &self,
        context: &Context,
        name: &str,
        function: &Function,
        global: bool,
    ) -> Outcome<R> {
        self.decide(|child| child.can_register_function(context, name, function, global))
    }

    fn can_ask_parent_to_register_function(
        &self,
        context: &Context,
        name: &str,
        function: &Function,
    ) -> Outcome<R> {
        self.decide(|child| child.can_ask_parent_to_register_function(context, name, function))
    }

    fn can_ask_for_function(&self, context: &Context, name: &str) -> Outcome<R> {
        self.decide(|child| child.can_ask_for_function(context, name))
    }

    fn can_ask_parent_for_function(&self, context: &Context, name: &str) -> Outcome<R> {
        self.decide(|child| child.can_ask_parent_for_function(context, name))
    }

    fn can_try_function(&self, context: &Context, name: &str, function: &Function) -> Outcome<R> {
        self.decide(|child| child.can_try_function(context, name, function))
    }

    fn can_run_function(&self, context: &Context, function: &Rc<Function>) -> Outcome<R> {
        self.decide(|child| child.can_run_function(context, function))
    }

    fn can_ask_for_member_function(
        &self,
        context: &Context,
        receiver: &TypeInfo,
        name: &str,
    ) -> Outcome<R> {
        self.decide(|child| child.can_ask_for_member_function(context, receiver, name))
    }

    fn can_ask_for_property_getter(
        &self,
        context: &Context,
        receiver: &TypeInfo,
        name: &str,
    ) -> Outcome<R> {
        self.decide(|child| child.can_ask_for_property_getter(context, receiver, name))
    }

    fn can_ask_for_operator(&self, context: &Context, left: &TypeInfo, operator: &str) -> Outcome<R> {
        self.decide(|child| child.can_ask_for_operator(context, left, operator))
    }

    fn can_ask_for_casting_operator(
        &self,
        context: &Context,
        from: &TypeInfo,
        to: &TypeInfo,
    ) -> Outcome<R> {
        self.decide(|child| child.can_ask_for_casting_operator(context, from, to))
    }

    /// Derives each child in turn; a child without an opinion is kept as is.
    fn create_subroutine_restrictions(
        &self,
        context: &Context,
        function: &Rc<Function>,
    ) -> Outcome<Rc<dyn Restriction<R>>> {
        let mut derived = Vec::with_capacity(self.children.len());
        for child in &self.children {
            match child.create_subroutine_restrictions(context, function) {
                Outcome::Success(restriction) => derived.push(restriction),
                Outcome::Empty => derived.push(Rc::clone(child)),
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            }
        }
        Outcome::Success(Rc::new(CompoundRestriction {
            children: derived,
            starting: Rc::clone(&self.starting),
            finisher: Rc::clone(&self.finisher),
        }))
    }
}

impl<R: 'static> fmt::Debug for CompoundRestriction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundRestriction")
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
