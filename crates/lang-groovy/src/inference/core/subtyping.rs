//! Subtyping rules implementation.
//!
//! Determines if one type is a subtype of another.
//! Supports:
//! - Identity
//! - Unknown types (compatible both ways)
//! - Primitives (widening)
//! - Classes and interfaces (extends / implements, well-known JDK fallbacks)
//! - Generics (by erasure)
//! - Arrays (covariant for references)
//! - Map literals (as `java.util.LinkedHashMap`)

use crate::inference::builtins;
use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::TypeRefExt;
use grail_api::models::{JAVA_LANG_OBJECT, TypeRef};

/// Check if `sub` is a subtype of `super_type`.
pub fn is_subtype<T: GroovyTypeSystem + ?Sized>(sub: &TypeRef, super_type: &TypeRef, ts: &T) -> bool {
    // 1. Reflexivity
    if sub == super_type {
        return true;
    }

    // 2. An unknown type never excludes a match
    if sub.is_unknown() || super_type.is_unknown() {
        return true;
    }

    // 3. java.lang.Object is supertype of all reference types
    if matches!(super_type, TypeRef::Id(id) if id == JAVA_LANG_OBJECT) {
        return !matches!(sub, TypeRef::Raw(_));
    }

    match (sub, super_type) {
        // Primitive widening
        (TypeRef::Raw(s1), TypeRef::Raw(s2)) => is_primitive_subtype(s1, s2),

        (_, TypeRef::Wildcard { bound, is_upper_bound }) => match bound {
            Some(bound) if *is_upper_bound => is_subtype(sub, bound, ts),
            Some(bound) => is_subtype(bound, sub, ts),
            None => true,
        },

        (
            TypeRef::Array {
                element: e1,
                dimensions: d1,
            },
            TypeRef::Array {
                element: e2,
                dimensions: d2,
            },
        ) => {
            if d1 == d2 {
                if e1.is_primitive() || e2.is_primitive() {
                    e1 == e2
                } else {
                    is_subtype(e1, e2, ts)
                }
            } else {
                // int[][] is an Object[]; int[] is not.
                d1 > d2 && matches!(e2.as_ref(), TypeRef::Id(id) if is_array_supertype(id))
            }
        }
        (TypeRef::Array { .. }, TypeRef::Id(id)) => is_array_supertype(id),

        // Class/Interface hierarchy, generics by erasure, map literals as LinkedHashMap
        _ => match (sub.as_fqn(), super_type.as_fqn()) {
            (Some(sub_fqn), Some(super_fqn)) => is_class_subtype(&sub_fqn, &super_fqn, ts),
            _ => false,
        },
    }
}

/// Method-invocation conversion: subtyping, then boxing or unboxing.
pub fn is_assignable<T: GroovyTypeSystem + ?Sized>(arg: &TypeRef, param: &TypeRef, ts: &T) -> bool {
    if is_subtype(arg, param, ts) {
        return true;
    }

    match arg {
        TypeRef::Raw(primitive) => builtins::boxed(primitive)
            .is_some_and(|boxed| is_subtype(&TypeRef::id(boxed), param, ts)),
        TypeRef::Id(fqn) => builtins::unboxed(fqn)
            .is_some_and(|primitive| is_subtype(&TypeRef::raw(primitive), param, ts)),
        _ => false,
    }
}

fn is_primitive_subtype(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

fn is_array_supertype(fqn: &str) -> bool {
    matches!(
        fqn,
        JAVA_LANG_OBJECT | "java.lang.Cloneable" | "java.io.Serializable"
    )
}

/// True when `sub_fqn` is `super_fqn` or inherits from it.
pub fn is_class_subtype<T: GroovyTypeSystem + ?Sized>(sub_fqn: &str, super_fqn: &str, ts: &T) -> bool {
    if sub_fqn == super_fqn || super_fqn == JAVA_LANG_OBJECT {
        return true;
    }

    // Walk the indexed hierarchy; at each step also consult the well-known
    // table, since JDK types are usually not indexed.
    std::iter::once(sub_fqn.to_string())
        .chain(ts.walk_ancestors(sub_fqn))
        .any(|ancestor| ancestor == super_fqn || builtins::ancestors(&ancestor).contains(&super_fqn))
}
