use std::rc::Rc;

use rustc_hash::FxHashSet;
use tern_outcome::errors::access_denied;
use tern_outcome::Outcome;

use super::Restriction;
use crate::context::{sanitize_name, Context};
use crate::function::Function;

/// Hides functions by name.
///
/// Names are sanitized on insertion so they match registry keys.
#[derive(Clone, Debug, Default)]
pub struct FunctionDenyList {
    names: FxHashSet<Rc<str>>,
}

impl FunctionDenyList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FunctionDenyList {
            names: names
                .into_iter()
                .map(|name| Rc::from(sanitize_name(name.as_ref())))
                .collect(),
        }
    }

    pub fn denies(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn check<R>(&self, name: &str) -> Outcome<R> {
        if self.denies(name) {
            tracing::debug!(function = name, "function is deny-listed");
            Outcome::Failure(access_denied(&format!("function '{name}' is not available")))
        } else {
            Outcome::Empty
        }
    }
}

impl<R: 'static> Restriction<R> for FunctionDenyList {
    fn can_ask_for_function(&self, _context: &Context, name: &str) -> Outcome<R> {
        self.check(name)
    }

    fn can_try_function(&self, _context: &Context, name: &str, _function: &Function) -> Outcome<R> {
        self.check(name)
    }
}
