//! In-memory class index built from serialized declarations.
//!
//! JDK and Groovy types that are not declared fall back to the well-known
//! table in [`crate::inference::builtins`].

use crate::inference::builtins;
use crate::inference::core::normalization::normalize_type;
use crate::inference::core::type_system::{InheritanceProvider, MemberProvider, TypeProvider};
use crate::inference::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter,
    TypeResolutionContext,
};
use grail_api::models::TypeRef;
use grail_api::{ApiError, ApiResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_kind() -> TypeKind {
    TypeKind::Class
}

/// A class declaration as stored in a workspace fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub fqn: String,
    #[serde(default = "default_kind")]
    pub kind: TypeKind,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Declaring class of a nested class.
    #[serde(default)]
    pub outer: Option<String>,
    /// Declared constructors. Empty means the implicit default constructor.
    #[serde(default)]
    pub constructors: Vec<ConstructorDecl>,
}

impl ClassDecl {
    pub fn class(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            kind: TypeKind::Class,
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            outer: None,
            constructors: Vec::new(),
        }
    }

    pub fn interface(fqn: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(fqn)
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        self.outer = Some(outer.into());
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_type_parameters(mut self, names: &[&str]) -> Self {
        self.type_parameters = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl ConstructorDecl {
    pub fn new(parameters: Vec<ParameterDecl>) -> Self {
        Self {
            parameters,
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    /// Declared type as source text, e.g. `Map<String, Object>`.
    #[serde(rename = "type")]
    pub type_text: String,
    /// `T... name`; `type` names the element type `T`.
    #[serde(default)]
    pub varargs: bool,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            varargs: false,
        }
    }

    pub fn varargs(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            varargs: true,
            ..Self::new(name, type_text)
        }
    }
}

#[derive(Debug, Clone)]
struct IndexedClass {
    info: TypeInfo,
    superclass: Option<String>,
    interfaces: Vec<String>,
    constructors: Vec<MemberInfo>,
}

/// A [`GroovyTypeSystem`](crate::inference::GroovyTypeSystem) over an
/// in-memory set of class declarations.
#[derive(Debug, Default, Clone)]
pub struct IndexTypeSystem {
    classes: IndexMap<String, IndexedClass>,
}

impl IndexTypeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `decls`. Parameter types are resolved against each class's
    /// package, enclosing classes and the default imports.
    pub fn from_decls(decls: Vec<ClassDecl>) -> ApiResult<Self> {
        let mut ts = Self::new();
        for decl in &decls {
            if ts.classes.contains_key(&decl.fqn) {
                return Err(ApiError::InvalidArgument(format!(
                    "class `{}` is declared twice",
                    decl.fqn
                )));
            }
            let info = TypeInfo {
                fqn: decl.fqn.clone(),
                kind: decl.kind,
                modifiers: decl.modifiers.clone(),
                type_parameters: decl
                    .type_parameters
                    .iter()
                    .map(|name| TypeParameter {
                        name: name.clone(),
                        bounds: vec![],
                    })
                    .collect(),
                outer: decl.outer.clone(),
            };
            ts.classes.insert(
                decl.fqn.clone(),
                IndexedClass {
                    info,
                    superclass: decl.superclass.clone(),
                    interfaces: decl.interfaces.clone(),
                    constructors: Vec::new(),
                },
            );
        }

        // Constructors second: parameter types may mention any indexed class.
        for decl in &decls {
            let constructors = decl
                .constructors
                .iter()
                .map(|ctor| ts.constructor_member(decl, ctor))
                .collect::<ApiResult<Vec<_>>>()?;
            if let Some(class) = ts.classes.get_mut(&decl.fqn) {
                class.constructors = constructors;
            }
        }

        Ok(ts)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Indexed class FQNs in declaration order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    fn is_known(&self, fqn: &str) -> bool {
        self.classes.contains_key(fqn) || builtins::is_well_known(fqn)
    }

    fn package_of(&self, fqn: &str) -> Option<String> {
        let mut top = fqn;
        while let Some(outer) = self
            .classes
            .get(top)
            .and_then(|class| class.info.outer.as_deref())
        {
            top = outer;
        }
        top.rsplit_once('.').map(|(pkg, _)| pkg.to_string())
    }

    fn constructor_member(&self, decl: &ClassDecl, ctor: &ConstructorDecl) -> ApiResult<MemberInfo> {
        let context = TypeResolutionContext {
            package: self.package_of(&decl.fqn),
            enclosing_class: Some(decl.fqn.clone()),
            type_parameters: decl.type_parameters.clone(),
            ..Default::default()
        };

        let parameters = ctor
            .parameters
            .iter()
            .map(|param| -> ApiResult<ParameterInfo> {
                let parsed: TypeRef = param.type_text.parse()?;
                let ty = normalize_type(parsed, self, &context);
                Ok(if param.varargs {
                    ParameterInfo::varargs(param.name.clone(), ty)
                } else {
                    ParameterInfo::new(param.name.clone(), ty)
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        let simple_name = decl.fqn.rsplit('.').next().unwrap_or(&decl.fqn).to_string();
        let signature = parameters
            .iter()
            .map(|p| p.type_ref.to_string())
            .collect::<Vec<_>>()
            .join(",");

        Ok(MemberInfo {
            fqn: format!("{}#{}({})", decl.fqn, simple_name, signature),
            name: simple_name,
            kind: MemberKind::Constructor,
            declaring_type: decl.fqn.clone(),
            type_ref: TypeRef::Id(decl.fqn.clone()),
            parameters: Some(parameters),
            modifiers: ctor.modifiers.clone(),
        })
    }

    /// Member types of the enclosing class and of each of its outers.
    fn resolve_member_type(&self, name: &str, context: &TypeResolutionContext) -> Option<String> {
        let mut current = context.enclosing_class.as_deref();
        while let Some(class) = current {
            if class.rsplit('.').next() == Some(name) {
                return Some(class.to_string());
            }
            let candidate = format!("{}.{}", class, name);
            if self.classes.contains_key(&candidate) {
                return Some(candidate);
            }
            current = self
                .classes
                .get(class)
                .and_then(|c| c.info.outer.as_deref());
        }
        None
    }

    fn resolve_simple_candidates(&self, name: &str, ctx: &TypeResolutionContext) -> Vec<String> {
        // 0. Types defined in the current file
        for fqn in &ctx.known_fqns {
            if fqn.ends_with(&format!(".{}", name)) {
                return vec![fqn.clone()];
            }
        }

        // 1. Member types of the enclosing classes
        if let Some(fqn) = self.resolve_member_type(name, ctx) {
            return vec![fqn];
        }

        // 2. Single-type imports
        for imp in &ctx.imports {
            if imp.ends_with(&format!(".{}", name)) {
                return vec![imp.clone()];
            }
        }

        // 3. Same package
        if let Some(pkg) = &ctx.package {
            let candidate = format!("{}.{}", pkg, name);
            if self.is_known(&candidate) {
                return vec![candidate];
            }
        }

        // 4. On-demand imports; several hits make the name ambiguous
        let mut hits: Vec<String> = Vec::new();
        for imp in &ctx.imports {
            if let Some(prefix) = imp.strip_suffix(".*") {
                let candidate = format!("{}.{}", prefix, name);
                if self.is_known(&candidate) && !hits.contains(&candidate) {
                    hits.push(candidate);
                }
            }
        }
        if !hits.is_empty() {
            return hits;
        }

        // 5. Default imports
        for class in builtins::DEFAULT_IMPORT_CLASSES {
            if class.rsplit('.').next() == Some(name) {
                return vec![class.to_string()];
            }
        }
        for pkg in builtins::DEFAULT_IMPORT_PACKAGES {
            let candidate = format!("{}.{}", pkg, name);
            if self.is_known(&candidate) {
                return vec![candidate];
            }
        }

        // 6. Default package
        if self.is_known(name) {
            return vec![name.to_string()];
        }

        vec![]
    }
}

impl TypeProvider for IndexTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.classes
            .get(fqn)
            .map(|class| class.info.clone())
            .or_else(|| builtins::type_info(fqn))
    }

    fn resolve_type_name(&self, name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        self.resolve_type_candidates(name, ctx).into_iter().next()
    }

    fn resolve_type_candidates(&self, name: &str, ctx: &TypeResolutionContext) -> Vec<String> {
        let Some((head, rest)) = name.split_once('.') else {
            return self.resolve_simple_candidates(name, ctx);
        };

        // Fully qualified
        if self.is_known(name) {
            return vec![name.to_string()];
        }

        // `Outer.Inner` where `Outer` resolves in scope
        self.resolve_simple_candidates(head, ctx)
            .into_iter()
            .map(|outer| format!("{}.{}", outer, rest))
            .filter(|fqn| self.is_known(fqn))
            .collect()
    }

    fn is_package(&self, name: &str) -> bool {
        if self.is_known(name) {
            return false;
        }
        let prefix = format!("{}.", name);
        self.classes.keys().any(|fqn| fqn.starts_with(&prefix))
            || builtins::types_in_package(name).next().is_some()
    }
}

impl InheritanceProvider for IndexTypeSystem {
    fn get_superclass(&self, fqn: &str) -> Option<String> {
        self.classes.get(fqn).and_then(|class| class.superclass.clone())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<String> {
        self.classes
            .get(fqn)
            .map(|class| class.interfaces.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for IndexTypeSystem {
    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.classes
            .get(type_fqn)
            .map(|class| class.constructors.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::GroovyTypeSystem;

    fn index() -> IndexTypeSystem {
        IndexTypeSystem::from_decls(vec![
            ClassDecl::class("com.example.Point").with_constructor(ConstructorDecl::new(vec![
                ParameterDecl::new("x", "int"),
                ParameterDecl::new("y", "int"),
            ])),
            ClassDecl::class("com.example.Config")
                .with_constructor(ConstructorDecl::new(vec![ParameterDecl::new(
                    "values",
                    "Map<String, Object>",
                )])),
            ClassDecl::class("com.example.Outer"),
            ClassDecl::class("com.example.Outer.Inner").nested_in("com.example.Outer"),
            ClassDecl::class("org.a.Widget"),
            ClassDecl::class("org.b.Widget"),
            ClassDecl::class("com.example.Settings").extends("java.util.HashMap"),
        ])
        .unwrap()
    }

    fn ctx(package: &str, imports: &[&str]) -> TypeResolutionContext {
        TypeResolutionContext {
            package: Some(package.to_string()),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parameter_types_are_resolved() {
        let ts = index();
        let ctors = ts.get_constructors("com.example.Config");
        assert_eq!(ctors.len(), 1);
        let params = ctors[0].parameters.as_ref().unwrap();
        assert_eq!(
            params[0].type_ref.to_string(),
            "java.util.Map<java.lang.String, java.lang.Object>"
        );
        assert_eq!(
            ctors[0].fqn,
            "com.example.Config#Config(java.util.Map<java.lang.String, java.lang.Object>)"
        );
    }

    #[test]
    fn test_name_resolution_order() {
        let ts = index();
        let c = ctx("com.example", &[]);
        assert_eq!(ts.resolve_type_name("Point", &c).as_deref(), Some("com.example.Point"));
        assert_eq!(ts.resolve_type_name("String", &c).as_deref(), Some("java.lang.String"));
        assert_eq!(
            ts.resolve_type_name("BigDecimal", &c).as_deref(),
            Some("java.math.BigDecimal")
        );
        assert_eq!(
            ts.resolve_type_name("Outer.Inner", &c).as_deref(),
            Some("com.example.Outer.Inner")
        );
        assert_eq!(ts.resolve_type_name("Nope", &c), None);
    }

    #[test]
    fn test_star_imports_can_be_ambiguous() {
        let ts = index();
        let c = ctx("com.example", &["org.a.*", "org.b.*"]);
        assert_eq!(
            ts.resolve_type_candidates("Widget", &c),
            vec!["org.a.Widget".to_string(), "org.b.Widget".to_string()]
        );

        let single = ctx("com.example", &["org.b.Widget", "org.a.*"]);
        assert_eq!(
            ts.resolve_type_candidates("Widget", &single),
            vec!["org.b.Widget".to_string()]
        );
    }

    #[test]
    fn test_member_types_of_enclosing_class() {
        let ts = index();
        let c = TypeResolutionContext {
            enclosing_class: Some("com.example.Outer".into()),
            ..Default::default()
        };
        assert_eq!(
            ts.resolve_type_name("Inner", &c).as_deref(),
            Some("com.example.Outer.Inner")
        );
        assert!(ts.get_type_info("com.example.Outer.Inner").unwrap().is_inner());
    }

    #[test]
    fn test_packages_and_hierarchy() {
        let ts = index();
        assert!(ts.is_package("com.example"));
        assert!(ts.is_package("java.util"));
        assert!(!ts.is_package("com.example.Point"));
        assert!(ts.is_inheritor("com.example.Settings", "java.util.Map"));
        assert!(!ts.is_inheritor("com.example.Point", "java.util.Map"));
    }

    #[test]
    fn test_duplicate_declaration_is_rejected() {
        let result = IndexTypeSystem::from_decls(vec![
            ClassDecl::class("com.example.A"),
            ClassDecl::class("com.example.A"),
        ]);
        assert!(matches!(result, Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_decl_json_shape() {
        let decl: ClassDecl = serde_json::from_str(
            r#"{
                "fqn": "com.example.Bag",
                "type_parameters": ["E"],
                "constructors": [{"parameters": [{"name": "items", "type": "E", "varargs": true}]}]
            }"#,
        )
        .unwrap();
        let ts = IndexTypeSystem::from_decls(vec![decl]).unwrap();
        let params = ts.get_constructors("com.example.Bag")[0].parameters.clone().unwrap();
        assert!(params[0].is_varargs);
        assert_eq!(params[0].type_ref, TypeRef::array_of(TypeRef::id("E")));
    }
}
