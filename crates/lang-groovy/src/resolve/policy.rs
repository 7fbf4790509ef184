use super::model::{ClassCandidate, ReferenceResult};
use serde::{Deserialize, Serialize};

/// How the resolver picks one class when a reference is ambiguous.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassPickPolicy {
    /// The first reference result that is a class; packages are skipped.
    #[default]
    First,
    /// Only a reference that denotes exactly one class.
    Unique,
}

impl ClassPickPolicy {
    pub fn pick<'r>(&self, results: &'r [ReferenceResult]) -> Option<&'r ClassCandidate> {
        let mut classes = results.iter().filter_map(ReferenceResult::as_class);
        match self {
            ClassPickPolicy::First => classes.next(),
            ClassPickPolicy::Unique => {
                let first = classes.next()?;
                classes.next().is_none().then_some(first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{Substitution, TypeInfo, TypeKind};

    fn class(fqn: &str) -> ReferenceResult {
        ReferenceResult::Class(ClassCandidate::new(
            TypeInfo::new(fqn, TypeKind::Class),
            Substitution::new(),
        ))
    }

    #[test]
    fn test_first_skips_packages() {
        let results = vec![
            ReferenceResult::Package {
                name: "org.a".into(),
            },
            class("org.a.Widget"),
            class("org.b.Widget"),
        ];
        assert_eq!(
            ClassPickPolicy::First.pick(&results).map(ClassCandidate::fqn),
            Some("org.a.Widget")
        );
        assert!(ClassPickPolicy::Unique.pick(&results).is_none());
        assert_eq!(
            ClassPickPolicy::Unique
                .pick(&results[..2])
                .map(ClassCandidate::fqn),
            Some("org.a.Widget")
        );
    }

    #[test]
    fn test_policy_from_config_text() {
        let policy: ClassPickPolicy = serde_json::from_str(r#""unique""#).unwrap();
        assert_eq!(policy, ClassPickPolicy::Unique);
        assert_eq!(ClassPickPolicy::default(), ClassPickPolicy::First);
    }
}
