//! Type-parameter substitution.
//!
//! Maps a class's type parameters to the concrete types given at a usage site.

use crate::inference::core::types::TypeParameter;
use grail_api::models::TypeRef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A map from type variables to concrete types.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution {
    map: IndexMap<String, TypeRef>,
}

impl Substitution {
    /// Create a new empty substitution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `params` positionally to `args`.
    ///
    /// Missing arguments (raw use, `new ArrayList()`) leave the parameter
    /// unbound; extra arguments are ignored.
    pub fn for_type_parameters(params: &[TypeParameter], args: &[TypeRef]) -> Self {
        let mut subst = Self::new();
        for (param, arg) in params.iter().zip(args) {
            subst.insert(param.name.clone(), arg.clone());
        }
        subst
    }

    /// Add a mapping.
    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn get(&self, var: &str) -> Option<&TypeRef> {
        self.map.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeRef)> {
        self.map.iter()
    }

    /// Apply this substitution to a type.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Id(name) | TypeRef::Raw(name) => {
                self.map.get(name).cloned().unwrap_or_else(|| ty.clone())
            }
            TypeRef::Array {
                element,
                dimensions,
            } => match self.apply(element) {
                // T[] with T := String[] becomes String[][]
                TypeRef::Array {
                    element,
                    dimensions: inner,
                } => TypeRef::Array {
                    element,
                    dimensions: dimensions + inner,
                },
                element => TypeRef::Array {
                    element: Box::new(element),
                    dimensions: *dimensions,
                },
            },
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: Box::new(self.apply(base)),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|b| Box::new(self.apply(b))),
                is_upper_bound: *is_upper_bound,
            },
            TypeRef::Map { entries } => TypeRef::Map {
                entries: entries
                    .iter()
                    .map(|(label, ty)| (label.clone(), self.apply(ty)))
                    .collect(),
            },
            TypeRef::Unknown => TypeRef::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_params(names: &[&str]) -> Vec<TypeParameter> {
        names
            .iter()
            .map(|name| TypeParameter {
                name: name.to_string(),
                bounds: vec![],
            })
            .collect()
    }

    #[test]
    fn test_apply_nested() {
        let subst = Substitution::for_type_parameters(
            &type_params(&["K", "V"]),
            &[TypeRef::id("java.lang.String"), TypeRef::id("java.lang.Integer")],
        );
        let ty = TypeRef::generic(
            TypeRef::id("java.util.Map"),
            vec![TypeRef::id("K"), TypeRef::array_of(TypeRef::id("V"))],
        );

        assert_eq!(
            subst.apply(&ty).to_string(),
            "java.util.Map<java.lang.String, java.lang.Integer[]>"
        );
    }

    #[test]
    fn test_raw_use_leaves_parameters_unbound() {
        let subst = Substitution::for_type_parameters(&type_params(&["E"]), &[]);
        assert!(subst.is_empty());
        assert_eq!(subst.apply(&TypeRef::id("E")), TypeRef::id("E"));
    }

    #[test]
    fn test_array_of_array_binding() {
        let mut subst = Substitution::new();
        subst.insert("T".into(), TypeRef::array_of(TypeRef::raw("int")));
        let applied = subst.apply(&TypeRef::array_of(TypeRef::id("T")));
        assert_eq!(
            applied,
            TypeRef::Array {
                element: Box::new(TypeRef::raw("int")),
                dimensions: 2
            }
        );
    }
}
