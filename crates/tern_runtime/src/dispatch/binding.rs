//! Argument-to-parameter binding.

use smallvec::SmallVec;

use crate::function::{Argument, Arguments, Function, MissingValue};

/// Bind `arguments` to `function`'s parameters, or `None` if the overload
/// does not apply.
///
/// Named arguments are matched to their parameter first. Remaining arguments
/// then take, in call order, the first free parameter they fit. Leftovers
/// disqualify the overload unless it is variadic. Parameters still unbound
/// fall back to their [`MissingValue`] policy.
///
/// No coercion happens here: an argument fits a parameter only if its type
/// hierarchy already contains the parameter type.
pub(crate) fn bind_arguments(function: &Function, arguments: &[Argument]) -> Option<Arguments> {
    let parameters = function.parameters();
    let mut taken: SmallVec<[bool; 8]> = SmallVec::from_elem(false, parameters.len());
    let mut used: SmallVec<[bool; 8]> = SmallVec::from_elem(false, arguments.len());
    let mut bound = Arguments::new();

    // Exact: named and well-typed
    for (index, argument) in arguments.iter().enumerate() {
        let Some(name) = argument.name() else {
            continue;
        };
        let slot = (0..parameters.len()).find(|&slot| {
            !taken[slot] && parameters[slot].name() == name && parameters[slot].accepts(argument.value())
        });
        if let Some(slot) = slot {
            taken[slot] = true;
            used[index] = true;
            bound.insert(parameters[slot].shared_name(), argument.value().clone());
        }
    }

    // Fits: first free parameter in declaration order
    for (index, argument) in arguments.iter().enumerate() {
        if used[index] {
            continue;
        }
        let slot = (0..parameters.len()).find(|&slot| !taken[slot] && parameters[slot].fits(argument));
        match slot {
            Some(slot) => {
                taken[slot] = true;
                bound.insert(parameters[slot].shared_name(), argument.value().clone());
            }
            None if function.is_variadic() => bound.push_rest(argument.value().clone()),
            None => return None,
        }
    }

    for (slot, parameter) in parameters.iter().enumerate() {
        if taken[slot] {
            continue;
        }
        match parameter.missing() {
            MissingValue::Mandatory => return None,
            MissingValue::Optional => {}
            MissingValue::Substitute(default) => {
                bound.insert(parameter.shared_name(), default.clone());
            }
        }
    }

    Some(bound)
}
