//! JSON workspace fixtures: class declarations plus source files with
//! `new` call sites.

use crate::config::ResolveConfig;
use crate::error::{Result, RuntimeError};
use grail_groovy::ResolveError;
use grail_groovy::inference::{GroovyTypeSystem, TypeProvider};
use grail_groovy::inference::adapters::{ClassDecl, IndexTypeSystem};
use grail_groovy::resolve::{ConstructorResolver, NewCall, ResolveSession};
use grail_groovy::syntax::{CallSite, CallSiteId, ModificationTracker, NewExpr, SourceFile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl Workspace {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let workspace = Self::from_json(&text)?;
        info!(
            "Loaded workspace {}: {} classes, {} files",
            path.display(),
            workspace.classes.len(),
            workspace.files.len()
        );
        Ok(workspace)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Index the classes and attach every file to one shared tracker.
    /// Call-site ids must be unique across all files.
    pub fn into_loaded(self, config: &ResolveConfig) -> Result<LoadedWorkspace> {
        let ts: Arc<dyn GroovyTypeSystem> = Arc::new(IndexTypeSystem::from_decls(self.classes)?);
        let tracker = Arc::new(ModificationTracker::new());

        let mut files = self.files;
        let mut seen = HashSet::new();
        for file in &mut files {
            file.attach_tracker(tracker.clone());
            for site in &file.call_sites {
                // Ids key the shared cache across every file.
                if !seen.insert(site.id()) {
                    return Err(RuntimeError::DuplicateCallSite {
                        id: site.id(),
                        path: file.path.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                    });
                }
                if let Some(class) = &site.enclosing_class
                    && ts.get_type_info(class).is_none()
                {
                    warn!("Call site {} is enclosed by unknown class {}", site.id(), class);
                }
            }
        }

        let resolver = ConstructorResolver::default().with_policy(config.class_pick);
        let session = if config.cache {
            ResolveSession::new(ts, tracker.clone())
        } else {
            ResolveSession::uncached(ts)
        }
        .with_resolver(resolver);

        Ok(LoadedWorkspace {
            session,
            files,
            tracker,
        })
    }
}

/// Outcome of resolving one call site, as reported by `grail check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Diagnosis {
    /// Exactly one declared constructor.
    Resolved(String),
    /// A class with no declared constructors.
    DefaultConstructor(String),
    Ambiguous(usize),
    NoApplicableConstructor,
    UnresolvedReference,
    ArrayCreation,
}

impl Diagnosis {
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            Diagnosis::Ambiguous(_)
                | Diagnosis::NoApplicableConstructor
                | Diagnosis::UnresolvedReference
        )
    }
}

pub struct LoadedWorkspace {
    session: ResolveSession,
    files: Vec<SourceFile>,
    tracker: Arc<ModificationTracker>,
}

impl LoadedWorkspace {
    pub fn session(&self) -> &ResolveSession {
        &self.session
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn tracker(&self) -> &Arc<ModificationTracker> {
        &self.tracker
    }

    pub fn call_sites(&self) -> impl Iterator<Item = (&SourceFile, &CallSite)> {
        self.files
            .iter()
            .flat_map(|file| file.call_sites.iter().map(move |site| (file, site)))
    }

    pub fn call(&self, id: CallSiteId) -> Result<NewCall<'_>> {
        let file = self
            .files
            .iter()
            .find(|file| file.call_site(id).is_some())
            .ok_or(ResolveError::UnknownCallSite(id))?;
        Ok(self.session.call_by_id(file, id)?)
    }

    /// Edit one call site. Bumps the shared stamp, so cached results for
    /// every file are recomputed.
    pub fn edit<R>(&mut self, id: CallSiteId, f: impl FnOnce(&mut NewExpr) -> R) -> Option<R> {
        self.files
            .iter_mut()
            .find(|file| file.call_site(id).is_some())?
            .edit(id, f)
    }

    pub fn diagnose(&self, file: &SourceFile, site: &CallSite) -> Diagnosis {
        let call = self.session.call(file, site);
        if call.array_count() > 0 {
            return Diagnosis::ArrayCreation;
        }
        if !call
            .multi_resolve_class()
            .iter()
            .any(|result| result.as_class().is_some())
        {
            return Diagnosis::UnresolvedReference;
        }
        match &*call.multi_resolve(false) {
            [] => Diagnosis::NoApplicableConstructor,
            [only] => match &only.constructor {
                Some(constructor) => Diagnosis::Resolved(constructor.signature()),
                None => Diagnosis::DefaultConstructor(only.class_fqn.clone()),
            },
            many => Diagnosis::Ambiguous(many.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grail_groovy::resolve::ClassPickPolicy;
    use grail_groovy::syntax::{ArgumentList, Expr, NewChild};
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "classes": [
            {
                "fqn": "com.example.Point",
                "constructors": [
                    {"parameters": [{"name": "x", "type": "int"}, {"name": "y", "type": "int"}]},
                    {"parameters": [{"name": "label", "type": "String"}]},
                    {"parameters": [{"name": "other", "type": "Point"}]}
                ]
            },
            {"fqn": "com.example.Plain"},
            {"fqn": "com.example.Outer"},
            {
                "fqn": "com.example.Outer.Inner",
                "outer": "com.example.Outer",
                "constructors": [{"parameters": [{"name": "x", "type": "int"}]}]
            }
        ],
        "files": [
            {
                "path": "src/App.groovy",
                "package": "com.example",
                "call_sites": [
                    {"expr": {"id": 1, "children": ["keyword", {"reference": "Point"},
                        {"arguments": {"positional": [{"literal": {"integer": "1"}}, {"literal": {"integer": "2"}}]}}]}},
                    {"expr": {"id": 2, "children": ["keyword", {"reference": "Plain"}, {"arguments": {}}]}},
                    {"expr": {"id": 3, "children": ["keyword", {"reference": "Missing"}, {"arguments": {}}]}},
                    {"expr": {"id": 4, "children": ["keyword", {"reference": "Point"},
                        {"arguments": {"positional": [{"opaque": "f()"}]}}]}},
                    {
                        "expr": {"id": 5, "children": ["keyword", {"reference": "Inner"},
                            {"arguments": {"positional": [{"literal": {"integer": "5"}}]}}]},
                        "enclosing_class": "com.example.Outer"
                    },
                    {"expr": {"id": 6, "children": ["keyword", {"builtin_type": "int"}, {"array_declaration": {"dimensions": 1}}]}}
                ]
            }
        ]
    }"#;

    fn loaded() -> LoadedWorkspace {
        Workspace::from_json(FIXTURE)
            .unwrap()
            .into_loaded(&ResolveConfig::default())
            .unwrap()
    }

    fn diagnosis(ws: &LoadedWorkspace, id: u32) -> Diagnosis {
        let (file, site) = ws
            .call_sites()
            .find(|(_, site)| site.id() == CallSiteId(id))
            .unwrap();
        ws.diagnose(file, site)
    }

    #[test]
    fn test_diagnoses() {
        let ws = loaded();
        assert_eq!(diagnosis(&ws, 1), Diagnosis::Resolved("Point(int x, int y)".into()));
        assert_eq!(
            diagnosis(&ws, 2),
            Diagnosis::DefaultConstructor("com.example.Plain".into())
        );
        assert_eq!(diagnosis(&ws, 3), Diagnosis::UnresolvedReference);
        assert_eq!(diagnosis(&ws, 4), Diagnosis::Ambiguous(2));
        assert_eq!(diagnosis(&ws, 5), Diagnosis::Resolved("Inner(int x)".into()));
        assert_eq!(diagnosis(&ws, 6), Diagnosis::ArrayCreation);
        assert!(diagnosis(&ws, 4).is_problem());
        assert!(!diagnosis(&ws, 6).is_problem());
    }

    #[test]
    fn test_edit_invalidates_cached_results() {
        let mut ws = loaded();
        let before = ws.call(CallSiteId(1)).unwrap().multi_resolve(false);
        assert_eq!(before.len(), 1);

        ws.edit(CallSiteId(1), |expr| {
            for child in &mut expr.children {
                if let NewChild::Arguments(args) = child {
                    *args = ArgumentList::positional(vec![Expr::int("1")]);
                }
            }
        })
        .unwrap();

        assert_eq!(ws.tracker().stamp(), 1);
        assert!(ws.call(CallSiteId(1)).unwrap().multi_resolve(false).is_empty());
    }

    #[test]
    fn test_unknown_call_site() {
        let ws = loaded();
        assert!(matches!(
            ws.call(CallSiteId(99)),
            Err(crate::RuntimeError::Resolve(ResolveError::UnknownCallSite(_)))
        ));
        assert!(loaded().edit(CallSiteId(99), |_| ()).is_none());
    }

    #[test]
    fn test_config_selects_policy_and_cache() {
        let config = ResolveConfig {
            class_pick: ClassPickPolicy::Unique,
            cache: false,
        };
        let ws = Workspace::from_json(FIXTURE)
            .unwrap()
            .into_loaded(&config)
            .unwrap();
        assert!(ws.session().cache().is_none());
        assert_eq!(ws.session().resolver().policy(), ClassPickPolicy::Unique);
    }

    #[test]
    fn test_duplicate_class_is_rejected() {
        let text = r#"{"classes": [{"fqn": "a.A"}, {"fqn": "a.A"}]}"#;
        let result = Workspace::from_json(text)
            .unwrap()
            .into_loaded(&ResolveConfig::default());
        assert!(matches!(result, Err(crate::RuntimeError::Api(_))));
    }

    #[test]
    fn test_duplicate_call_site_across_files_is_rejected() {
        let text = r#"{
            "classes": [
                {"fqn": "a.Foo", "constructors": [{"parameters": []}]},
                {"fqn": "a.Bar", "constructors": [{"parameters": [{"name": "x", "type": "int"}]}]}
            ],
            "files": [
                {"path": "A.groovy", "package": "a", "call_sites": [
                    {"expr": {"id": 1, "children": ["keyword", {"reference": "Foo"}, {"arguments": {}}]}}
                ]},
                {"path": "B.groovy", "package": "a", "call_sites": [
                    {"expr": {"id": 1, "children": ["keyword", {"reference": "Bar"}, {"arguments": {}}]}}
                ]}
            ]
        }"#;
        let result = Workspace::from_json(text)
            .unwrap()
            .into_loaded(&ResolveConfig::default());
        match result {
            Err(RuntimeError::DuplicateCallSite { id, path }) => {
                assert_eq!(id, CallSiteId(1));
                assert_eq!(path, "B.groovy");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("duplicate call site accepted"),
        }

        // Distinct ids resolve independently through the shared cache.
        let distinct = text.replacen(r#""id": 1, "children": ["keyword", {"reference": "Bar"}"#, r#""id": 2, "children": ["keyword", {"reference": "Bar"}"#, 1);
        let ws = Workspace::from_json(&distinct)
            .unwrap()
            .into_loaded(&ResolveConfig::default())
            .unwrap();
        assert_eq!(diagnosis(&ws, 1), Diagnosis::Resolved("Foo()".into()));
        assert_eq!(diagnosis(&ws, 2), Diagnosis::NoApplicableConstructor);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();
        let ws = Workspace::load(file.path()).unwrap();
        assert_eq!(ws.classes.len(), 4);
        assert_eq!(ws.files[0].call_sites.len(), 6);
    }
}
