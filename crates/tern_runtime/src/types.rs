//! Runtime type descriptors.
//!
//! A [`TypeInfo`] is the ordered ancestry of a value's type, most specific
//! first and `Object` last. Member dispatch walks it in order, and parameter
//! checks accept a value when the declared type name appears anywhere in it.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// A type name: borrowed for built-ins, owned for host-declared types.
pub type TypeName = Cow<'static, str>;

/// Ordered type hierarchy, most specific first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    hierarchy: SmallVec<[TypeName; 4]>,
}

impl TypeInfo {
    pub const OBJECT: &'static str = "Object";
    pub const NUMBER: &'static str = "Number";
    pub const INT: &'static str = "Int";
    pub const DOUBLE: &'static str = "Double";
    pub const CHAR: &'static str = "Char";
    pub const STRING: &'static str = "String";
    pub const BOOLEAN: &'static str = "Boolean";
    pub const ARRAY: &'static str = "Array";
    pub const NULL: &'static str = "Null";
    pub const UNDEFINED: &'static str = "Undefined";
    /// Placeholder for values whose type is only known after evaluation.
    pub const RUNTIME: &'static str = "Runtime";

    /// Build a hierarchy from most specific to least specific.
    ///
    /// `Object` is appended when the chain does not already end with it.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        let mut hierarchy: SmallVec<[TypeName; 4]> = names.into_iter().map(Into::into).collect();
        if hierarchy.last().map(|name| &**name) != Some(Self::OBJECT) {
            hierarchy.push(Cow::Borrowed(Self::OBJECT));
        }
        TypeInfo { hierarchy }
    }

    fn builtin(names: &[&'static str]) -> Self {
        TypeInfo::new(names.iter().copied())
    }

    pub fn object() -> Self {
        Self::builtin(&[Self::OBJECT])
    }

    pub fn number() -> Self {
        Self::builtin(&[Self::NUMBER])
    }

    pub fn int() -> Self {
        Self::builtin(&[Self::INT, Self::NUMBER])
    }

    pub fn double() -> Self {
        Self::builtin(&[Self::DOUBLE, Self::NUMBER])
    }

    pub fn char() -> Self {
        Self::builtin(&[Self::CHAR])
    }

    pub fn string() -> Self {
        Self::builtin(&[Self::STRING])
    }

    pub fn boolean() -> Self {
        Self::builtin(&[Self::BOOLEAN])
    }

    pub fn array() -> Self {
        Self::builtin(&[Self::ARRAY])
    }

    pub fn null() -> Self {
        Self::builtin(&[Self::NULL])
    }

    pub fn undefined() -> Self {
        Self::builtin(&[Self::UNDEFINED])
    }

    pub fn runtime() -> Self {
        Self::builtin(&[Self::RUNTIME])
    }

    /// A subtype of `self` named `name`.
    #[must_use]
    pub fn derive(&self, name: impl Into<TypeName>) -> Self {
        let mut hierarchy = SmallVec::with_capacity(self.hierarchy.len() + 1);
        hierarchy.push(name.into());
        hierarchy.extend(self.hierarchy.iter().cloned());
        TypeInfo { hierarchy }
    }

    /// The most specific name.
    pub fn name(&self) -> &str {
        self.hierarchy.first().map_or(Self::OBJECT, |name| &**name)
    }

    /// Names from most to least specific.
    pub fn hierarchy(&self) -> impl Iterator<Item = &str> + '_ {
        self.hierarchy.iter().map(|name| &**name)
    }

    /// Whether `name` appears anywhere in the hierarchy.
    pub fn is(&self, name: &str) -> bool {
        self.hierarchy().any(|candidate| candidate == name)
    }

    /// Whether every value of `self` is also a value of `other`.
    pub fn is_subtype_of(&self, other: &TypeInfo) -> bool {
        self.is(other.name())
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_hierarchies_end_with_object() {
        let int: Vec<_> = TypeInfo::int().hierarchy().map(str::to_owned).collect();
        assert_eq!(int, vec!["Int", "Number", "Object"]);
        let string: Vec<_> = TypeInfo::string().hierarchy().map(str::to_owned).collect();
        assert_eq!(string, vec!["String", "Object"]);
        assert_eq!(TypeInfo::object().hierarchy().count(), 1);
    }

    #[test]
    fn test_derive_prepends() {
        let point = TypeInfo::object().derive("Point");
        let point3 = point.derive("Point3");
        assert_eq!(point3.name(), "Point3");
        assert!(point3.is("Point"));
        assert!(point3.is_subtype_of(&point));
        assert!(!point.is_subtype_of(&point3));
    }

    #[test]
    fn test_new_does_not_duplicate_object() {
        let info = TypeInfo::new(["Shape", "Object"]);
        assert_eq!(info.hierarchy().count(), 2);
        assert_eq!(info.to_string(), "Shape");
    }
}
