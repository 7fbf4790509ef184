//! Mock implementation of GroovyTypeSystem for testing.

#![allow(dead_code)]

use grail_api::models::TypeRef;
use grail_groovy::inference::{
    InheritanceProvider, MemberInfo, MemberKind, MemberProvider, ParameterInfo, TypeInfo,
    TypeKind, TypeParameter, TypeProvider, TypeResolutionContext,
};
use grail_groovy::syntax::{ArgumentList, CodeReference, Expr, NamedArgument, NewExpr};
use std::collections::HashMap;

/// A mock type system for testing.
///
/// Can be built using a fluent API. Simple names resolve to every declared
/// class with that simple name, in declaration order.
#[derive(Default)]
pub struct MockTypeSystem {
    order: Vec<String>,
    types: HashMap<String, TypeInfo>,
    inheritance: HashMap<String, (Option<String>, Vec<String>)>, // (superclass, interfaces)
    members: HashMap<String, Vec<MemberInfo>>,
    packages: Vec<String>,
}

impl MockTypeSystem {
    /// Create a new empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_type(mut self, info: TypeInfo, super_class: Option<&str>) -> Self {
        self.order.push(info.fqn.clone());
        self.inheritance
            .insert(info.fqn.clone(), (super_class.map(|s| s.to_string()), vec![]));
        self.types.insert(info.fqn.clone(), info);
        self
    }

    /// Add a class to the mock.
    pub fn add_class(self, fqn: &str, super_class: Option<&str>) -> Self {
        self.insert_type(TypeInfo::new(fqn, TypeKind::Class), super_class)
    }

    /// Add a class with generic type parameters.
    pub fn add_class_with_type_params(self, fqn: &str, type_parameters: Vec<&str>) -> Self {
        let mut info = TypeInfo::new(fqn, TypeKind::Class);
        info.type_parameters = type_parameters
            .into_iter()
            .map(|name| TypeParameter {
                name: name.to_string(),
                bounds: vec![],
            })
            .collect();
        self.insert_type(info, None)
    }

    /// Add a non-static inner class of `outer`.
    pub fn add_inner_class(self, fqn: &str, outer: &str) -> Self {
        let mut info = TypeInfo::new(fqn, TypeKind::Class);
        info.outer = Some(outer.to_string());
        self.insert_type(info, None)
    }

    /// Add a static nested class of `outer`.
    pub fn add_static_nested_class(self, fqn: &str, outer: &str) -> Self {
        let mut info = TypeInfo::new(fqn, TypeKind::Class);
        info.outer = Some(outer.to_string());
        info.modifiers.push("static".to_string());
        self.insert_type(info, None)
    }

    /// Add an interface to the mock.
    pub fn add_interface(self, fqn: &str) -> Self {
        self.insert_type(TypeInfo::new(fqn, TypeKind::Interface), None)
    }

    /// Add interface implementation to a class.
    pub fn implements(mut self, class_fqn: &str, interface_fqn: &str) -> Self {
        if let Some((_super_class, interfaces)) = self.inheritance.get_mut(class_fqn) {
            interfaces.push(interface_fqn.to_string());
        } else {
            self.inheritance.insert(
                class_fqn.to_string(),
                (None, vec![interface_fqn.to_string()]),
            );
        }
        self
    }

    pub fn add_package(mut self, name: &str) -> Self {
        self.packages.push(name.to_string());
        self
    }

    /// Add a constructor with the given `(name, type)` parameters.
    pub fn add_constructor(self, class_fqn: &str, params: Vec<(&str, TypeRef)>) -> Self {
        let params = params
            .into_iter()
            .map(|(name, ty)| ParameterInfo::new(name, ty))
            .collect();
        self.add_constructor_with(class_fqn, params)
    }

    /// Add a constructor whose last parameter is `T... name`.
    pub fn add_varargs_constructor(self, class_fqn: &str, name: &str, element: TypeRef) -> Self {
        self.add_constructor_with(class_fqn, vec![ParameterInfo::varargs(name, element)])
    }

    fn add_constructor_with(mut self, class_fqn: &str, params: Vec<ParameterInfo>) -> Self {
        let simple = class_fqn.rsplit('.').next().unwrap().to_string();
        let signature = params
            .iter()
            .map(|p| p.type_ref.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.members
            .entry(class_fqn.to_string())
            .or_default()
            .push(MemberInfo {
                fqn: format!("{}#{}({})", class_fqn, simple, signature),
                name: simple,
                kind: MemberKind::Constructor,
                declaring_type: class_fqn.to_string(),
                type_ref: TypeRef::id(class_fqn),
                parameters: Some(params),
                modifiers: vec!["public".to_string()],
            });
        self
    }
}

impl TypeProvider for MockTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }

    fn resolve_type_name(&self, name: &str, context: &TypeResolutionContext) -> Option<String> {
        self.resolve_type_candidates(name, context).into_iter().next()
    }

    fn resolve_type_candidates(&self, name: &str, _context: &TypeResolutionContext) -> Vec<String> {
        if self.types.contains_key(name) {
            return vec![name.to_string()];
        }
        let suffix = format!(".{}", name);
        self.order
            .iter()
            .filter(|fqn| fqn.ends_with(&suffix))
            .cloned()
            .collect()
    }

    fn is_package(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p == name)
    }
}

impl InheritanceProvider for MockTypeSystem {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        self.inheritance.get(fqn).and_then(|(s, _)| s.clone())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.inheritance
            .get(fqn)
            .map(|(_, i)| i.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for MockTypeSystem {
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.members.get(type_fqn).cloned().unwrap_or_default()
    }
}

pub fn int() -> TypeRef {
    TypeRef::raw("int")
}

pub fn class(fqn: &str) -> TypeRef {
    TypeRef::id(fqn)
}

/// `new <name>(<positional>)`
pub fn new_call(name: &str, positional: Vec<Expr>) -> NewExpr {
    NewExpr::of(CodeReference::new(name)).with_arguments(ArgumentList::positional(positional))
}

/// `new <name>(<label: value, ...>)`
pub fn new_named(name: &str, named: Vec<(&str, Expr)>) -> NewExpr {
    let named = named
        .into_iter()
        .map(|(label, value)| NamedArgument::new(label, value))
        .collect();
    NewExpr::of(CodeReference::new(name)).with_arguments(ArgumentList::named(named))
}

/// Declared parameter types of each constructor in `results`, rendered.
pub fn signatures(results: &[grail_groovy::resolve::ResolveResult]) -> Vec<String> {
    results
        .iter()
        .map(|r| match &r.constructor {
            Some(c) => c.signature(),
            None => format!("<class {}>", r.class_fqn),
        })
        .collect()
}
