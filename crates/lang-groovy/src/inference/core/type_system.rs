//! Core trait definitions for the type system abstraction.
//!
//! These traits abstract away the data source, allowing the inference
//! engine and the constructor resolver to work with an index, a fixture or
//! mock implementations.

use super::types::{MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeResolutionContext};
use grail_api::models::TypeRef;
use std::collections::{HashSet, VecDeque};

/// Provides type information by FQN.
///
/// This is the primary way to look up type metadata.
pub trait TypeProvider: Send + Sync {
    /// Get type info for a fully qualified name.
    ///
    /// Returns `None` if the type is not found.
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo>;

    /// Resolve a simple or partially qualified type name to its FQN.
    ///
    /// Uses the provided context (imports, package) to resolve the name.
    fn resolve_type_name(&self, name: &str, context: &TypeResolutionContext) -> Option<String>;

    /// Every FQN `name` may denote in `context`, in resolution order.
    ///
    /// More than one entry means the name is ambiguous, e.g. two on-demand
    /// imports exporting the same simple name.
    fn resolve_type_candidates(&self, name: &str, context: &TypeResolutionContext) -> Vec<String> {
        self.resolve_type_name(name, context).into_iter().collect()
    }

    /// True when `name` denotes a known package.
    fn is_package(&self, _name: &str) -> bool {
        false
    }
}

/// Provides inheritance relationship information.
///
/// This is used to traverse the type hierarchy for subtype checks.
pub trait InheritanceProvider: Send + Sync {
    /// Get the direct superclass of a type.
    ///
    /// Returns `None` for `java.lang.Object` or interfaces.
    fn get_superclass(&self, fqn: &str) -> Option<String>;

    /// Get the interfaces directly implemented by a type.
    fn get_interfaces(&self, fqn: &str) -> Vec<String>;

    /// Walk all ancestor types (superclasses and interfaces) in BFS order.
    fn walk_ancestors(&self, fqn: &str) -> Box<dyn Iterator<Item = String> + '_> {
        let mut queue: VecDeque<String> = VecDeque::from([fqn.to_string()]);
        let mut visited: HashSet<String> = HashSet::from([fqn.to_string()]);
        let mut out = Vec::new();

        while let Some(current) = queue.pop_front() {
            let parents = self
                .get_superclass(&current)
                .into_iter()
                .chain(self.get_interfaces(&current));
            for parent in parents {
                if visited.insert(parent.clone()) {
                    out.push(parent.clone());
                    queue.push_back(parent);
                }
            }
        }

        Box::new(out.into_iter())
    }
}

/// Provides member lookup.
///
/// This is used to find members within a single type (not walking inheritance).
pub trait MemberProvider: Send + Sync {
    /// Get all members directly declared in the given type, in declaration order.
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo>;

    /// Constructors declared in the given type, in declaration order.
    fn get_constructors(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.get_all_members(type_fqn)
            .into_iter()
            .filter(|m| m.kind == MemberKind::Constructor)
            .collect()
    }
}

/// The combined type system interface.
///
/// Provides a unified facade for type inference and resolution.
pub trait GroovyTypeSystem: TypeProvider + InheritanceProvider + MemberProvider {
    /// Check if sub is a subtype of super_type.
    ///
    /// Delegates to `subtyping::is_subtype` logic.
    fn is_subtype(&self, sub: &TypeRef, super_type: &TypeRef) -> bool {
        crate::inference::core::subtyping::is_subtype(sub, super_type, self)
    }

    /// Method-invocation conversion: subtyping plus boxing and unboxing.
    fn is_assignable(&self, arg: &TypeRef, param: &TypeRef) -> bool {
        crate::inference::core::subtyping::is_assignable(arg, param, self)
    }

    /// True when `fqn` is `base` or one of its subclasses/implementors.
    fn is_inheritor(&self, fqn: &str, base: &str) -> bool {
        crate::inference::core::subtyping::is_class_subtype(fqn, base, self)
    }
}

// Blanket implementation: any type implementing all three traits gets GroovyTypeSystem
impl<T: TypeProvider + InheritanceProvider + MemberProvider> GroovyTypeSystem for T {}

/// Filter `candidates` down to those applicable to `arg_types`.
///
/// Fixed-arity candidates are tried first; the variable-arity phase runs
/// only when no fixed-arity candidate applies. Declaration order is kept.
pub fn select_applicable<T, C, F>(ts: &T, candidates: &[C], arg_types: &[TypeRef], params_of: F) -> Vec<C>
where
    T: GroovyTypeSystem + ?Sized,
    C: Clone,
    F: Fn(&C) -> &[ParameterInfo],
{
    let fixed = collect_matching_candidates(candidates, &params_of, |params| {
        matches_fixed_arity(params, arg_types, |arg, expected| {
            ts.is_assignable(arg, expected)
        })
    });
    if !fixed.is_empty() {
        return fixed;
    }

    collect_matching_candidates(candidates, &params_of, |params| {
        matches_varargs_arity(params, arg_types, |arg, expected| {
            ts.is_assignable(arg, expected)
        })
    })
}

fn matches_fixed_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    if params.len() != arg_types.len() {
        return false;
    }

    params
        .iter()
        .zip(arg_types.iter())
        .all(|(p, a)| matches(a, &p.type_ref))
}

fn matches_varargs_arity<F>(params: &[ParameterInfo], arg_types: &[TypeRef], mut matches: F) -> bool
where
    F: FnMut(&TypeRef, &TypeRef) -> bool,
{
    let Some(last_param) = params.last() else {
        return false;
    };

    if !last_param.is_varargs {
        return false;
    }

    let Some(element) = varargs_element(&last_param.type_ref) else {
        return false;
    };

    let fixed_count = params.len() - 1;
    if arg_types.len() < fixed_count {
        return false;
    }

    // Prefix arguments (before varargs tail)
    if !params[..fixed_count]
        .iter()
        .zip(arg_types[..fixed_count].iter())
        .all(|(p, a)| matches(a, &p.type_ref))
    {
        return false;
    }

    // No varargs arguments provided
    if arg_types.len() == fixed_count {
        return true;
    }

    // Direct array pass-through: Foo(String[]) called with one String[] argument.
    if arg_types.len() == params.len() && matches(&arg_types[fixed_count], &last_param.type_ref) {
        return true;
    }

    // Expanded varargs: Foo(String...) called with N String arguments.
    arg_types[fixed_count..]
        .iter()
        .all(|a| matches(a, &element))
}

/// `T` for a `T[]` varargs parameter, `T[]` for `T[][]`.
fn varargs_element(ty: &TypeRef) -> Option<TypeRef> {
    let TypeRef::Array {
        element,
        dimensions,
    } = ty
    else {
        return None;
    };
    Some(if *dimensions > 1 {
        TypeRef::Array {
            element: element.clone(),
            dimensions: dimensions - 1,
        }
    } else {
        element.as_ref().clone()
    })
}

fn collect_matching_candidates<C, P, F>(candidates: &[C], params_of: &P, mut matches: F) -> Vec<C>
where
    C: Clone,
    P: Fn(&C) -> &[ParameterInfo],
    F: FnMut(&[ParameterInfo]) -> bool,
{
    candidates
        .iter()
        .filter(|cand| matches(params_of(cand)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::NoOpTypeSystem;

    fn params(types: &[TypeRef]) -> Vec<ParameterInfo> {
        types
            .iter()
            .enumerate()
            .map(|(i, t)| ParameterInfo::new(format!("arg{}", i), t.clone()))
            .collect()
    }

    #[test]
    fn test_fixed_arity_wins_over_varargs() {
        let int = TypeRef::raw("int");
        let fixed = params(&[int.clone()]);
        let varargs = vec![ParameterInfo::varargs("xs", int.clone())];
        let candidates = vec![varargs.clone(), fixed.clone()];

        let picked = select_applicable(&NoOpTypeSystem, &candidates, &[int.clone()], |c| c.as_slice());
        assert_eq!(picked, vec![fixed]);

        let picked = select_applicable(&NoOpTypeSystem, &candidates, &[int.clone(), int], |c| {
            c.as_slice()
        });
        assert_eq!(picked, vec![varargs]);
    }

    #[test]
    fn test_varargs_accepts_empty_tail_and_array() {
        let string = TypeRef::id("java.lang.String");
        let candidates = vec![vec![ParameterInfo::varargs("xs", string.clone())]];

        assert_eq!(select_applicable(&NoOpTypeSystem, &candidates, &[], |c| c.as_slice()).len(), 1);
        assert_eq!(
            select_applicable(&NoOpTypeSystem, &candidates, &[TypeRef::array_of(string)], |c| {
                c.as_slice()
            })
            .len(),
            1
        );
    }

    #[test]
    fn test_unknown_argument_matches_any_parameter() {
        let candidates = vec![params(&[TypeRef::id("com.example.Widget")])];
        let picked = select_applicable(&NoOpTypeSystem, &candidates, &[TypeRef::Unknown], |c| {
            c.as_slice()
        });
        assert_eq!(picked.len(), 1);
    }
}
