//! Values produced by constructor resolution.
//!
//! All of these are derived and immutable once built.

use crate::inference::{MemberInfo, ParameterInfo, Substitution, TypeInfo};
use grail_api::models::TypeRef;
use serde::Serialize;

/// One class a type reference may denote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassCandidate {
    pub info: TypeInfo,
    /// Type parameters bound by the reference's explicit type arguments.
    pub substitutor: Substitution,
}

impl ClassCandidate {
    pub fn new(info: TypeInfo, substitutor: Substitution) -> Self {
        Self { info, substitutor }
    }

    pub fn fqn(&self) -> &str {
        &self.info.fqn
    }

    /// The class type as written at the use site: `Box<String>` for
    /// `new Box<String>()`, plain `Box` for raw use.
    pub fn as_type(&self) -> TypeRef {
        let base = TypeRef::id(self.info.fqn.clone());
        if self.substitutor.is_empty() {
            return base;
        }
        let args = self
            .info
            .type_parameters
            .iter()
            .map(|param| {
                self.substitutor
                    .get(&param.name)
                    .cloned()
                    .unwrap_or(TypeRef::Unknown)
            })
            .collect();
        TypeRef::generic(base, args)
    }
}

/// What a type reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceResult {
    Class(ClassCandidate),
    Package { name: String },
}

impl ReferenceResult {
    pub fn as_class(&self) -> Option<&ClassCandidate> {
        match self {
            ReferenceResult::Class(class) => Some(class),
            ReferenceResult::Package { .. } => None,
        }
    }
}

/// A declared constructor seen through a class candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorCandidate {
    pub member: MemberInfo,
    /// Synthetic first parameter of a non-static inner class constructor.
    pub enclosing: Option<TypeRef>,
    /// Formal parameters after substitution, enclosing instance first.
    parameters: Vec<ParameterInfo>,
}

impl ConstructorCandidate {
    pub fn new(member: MemberInfo, substitutor: &Substitution, enclosing: Option<TypeRef>) -> Self {
        let declared = member.parameters.iter().flatten().map(|param| ParameterInfo {
            type_ref: substitutor.apply(&param.type_ref),
            ..param.clone()
        });
        let parameters = enclosing
            .iter()
            .map(|outer| ParameterInfo::new("this$0", outer.clone()))
            .chain(declared)
            .collect();
        Self {
            member,
            enclosing,
            parameters,
        }
    }

    /// Parameters matched against the call's argument types.
    pub fn effective_parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Parameters as declared in source, after substitution.
    pub fn declared_parameters(&self) -> &[ParameterInfo] {
        let skip = usize::from(self.enclosing.is_some());
        &self.parameters[skip..]
    }

    /// `Point(int x, int y)`
    pub fn signature(&self) -> String {
        let params = self
            .declared_parameters()
            .iter()
            .map(|p| {
                if p.is_varargs {
                    let element = match &p.type_ref {
                        TypeRef::Array {
                            element,
                            dimensions: 1,
                        } => element.to_string(),
                        TypeRef::Array {
                            element,
                            dimensions,
                        } => format!("{}{}", element, "[]".repeat(dimensions - 1)),
                        other => other.to_string(),
                    };
                    format!("{}... {}", element, p.name)
                } else {
                    format!("{} {}", p.type_ref, p.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.member.name, params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    /// Argument types were checked against the parameters.
    Applicable,
    /// Nothing was checked; the call site is incomplete.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveResult {
    pub class_fqn: String,
    /// `None` for a class without declared constructors.
    pub constructor: Option<ConstructorCandidate>,
    pub applicability: Applicability,
    pub substitutor: Substitution,
}

impl ResolveResult {
    pub fn is_valid(&self) -> bool {
        self.applicability == Applicability::Applicable
    }

    pub fn is_class_only(&self) -> bool {
        self.constructor.is_none()
    }
}
