//! Well-known JDK and Groovy types.
//!
//! Type systems that do not index the JDK fall back to this table for
//! boxing, map/collection hierarchies and default imports.

use crate::inference::core::types::{TypeInfo, TypeKind};

/// Packages every Groovy file imports implicitly.
pub const DEFAULT_IMPORT_PACKAGES: &[&str] = &[
    "java.lang",
    "java.util",
    "java.io",
    "java.net",
    "groovy.lang",
    "groovy.util",
];

/// Classes every Groovy file imports implicitly.
pub const DEFAULT_IMPORT_CLASSES: &[&str] = &["java.math.BigDecimal", "java.math.BigInteger"];

const BOXES: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("short", "java.lang.Short"),
    ("char", "java.lang.Character"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
];

pub fn boxed(primitive: &str) -> Option<&'static str> {
    BOXES
        .iter()
        .find(|(p, _)| *p == primitive)
        .map(|(_, boxed)| *boxed)
}

pub fn unboxed(fqn: &str) -> Option<&'static str> {
    BOXES
        .iter()
        .find(|(_, boxed)| *boxed == fqn)
        .map(|(p, _)| *p)
}

struct WellKnown {
    fqn: &'static str,
    kind: TypeKind,
    /// All supertypes, transitively.
    ancestors: &'static [&'static str],
}

const OBJECT: &str = "java.lang.Object";
const SERIALIZABLE: &str = "java.io.Serializable";
const COMPARABLE: &str = "java.lang.Comparable";

const NUMBER_ANCESTORS: &[&str] = &["java.lang.Number", COMPARABLE, SERIALIZABLE, OBJECT];
const MAP_IMPL_ANCESTORS: &[&str] = &[
    "java.util.AbstractMap",
    "java.util.Map",
    "java.lang.Cloneable",
    SERIALIZABLE,
    OBJECT,
];
const LIST_IMPL_ANCESTORS: &[&str] = &[
    "java.util.AbstractList",
    "java.util.AbstractCollection",
    "java.util.List",
    "java.util.Collection",
    "java.lang.Iterable",
    "java.util.RandomAccess",
    "java.lang.Cloneable",
    SERIALIZABLE,
    OBJECT,
];

const WELL_KNOWN: &[WellKnown] = &[
    WellKnown { fqn: OBJECT, kind: TypeKind::Class, ancestors: &[] },
    WellKnown { fqn: SERIALIZABLE, kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown { fqn: "java.lang.Cloneable", kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown { fqn: COMPARABLE, kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown { fqn: "java.lang.CharSequence", kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown { fqn: "java.lang.Iterable", kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown {
        fqn: "java.lang.String",
        kind: TypeKind::Class,
        ancestors: &["java.lang.CharSequence", COMPARABLE, SERIALIZABLE, OBJECT],
    },
    WellKnown {
        fqn: "groovy.lang.GString",
        kind: TypeKind::Class,
        ancestors: &["java.lang.CharSequence", COMPARABLE, SERIALIZABLE, OBJECT],
    },
    WellKnown { fqn: "java.lang.Number", kind: TypeKind::Class, ancestors: &[SERIALIZABLE, OBJECT] },
    WellKnown { fqn: "java.lang.Boolean", kind: TypeKind::Class, ancestors: &[COMPARABLE, SERIALIZABLE, OBJECT] },
    WellKnown { fqn: "java.lang.Character", kind: TypeKind::Class, ancestors: &[COMPARABLE, SERIALIZABLE, OBJECT] },
    WellKnown { fqn: "java.lang.Byte", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.lang.Short", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.lang.Integer", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.lang.Long", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.lang.Float", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.lang.Double", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.math.BigInteger", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.math.BigDecimal", kind: TypeKind::Class, ancestors: NUMBER_ANCESTORS },
    WellKnown { fqn: "java.util.Map", kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown { fqn: "java.util.SortedMap", kind: TypeKind::Interface, ancestors: &["java.util.Map", OBJECT] },
    WellKnown {
        fqn: "java.util.NavigableMap",
        kind: TypeKind::Interface,
        ancestors: &["java.util.SortedMap", "java.util.Map", OBJECT],
    },
    WellKnown { fqn: "java.util.AbstractMap", kind: TypeKind::Class, ancestors: &["java.util.Map", OBJECT] },
    WellKnown { fqn: "java.util.HashMap", kind: TypeKind::Class, ancestors: MAP_IMPL_ANCESTORS },
    WellKnown {
        fqn: "java.util.LinkedHashMap",
        kind: TypeKind::Class,
        ancestors: &[
            "java.util.HashMap",
            "java.util.AbstractMap",
            "java.util.Map",
            "java.lang.Cloneable",
            SERIALIZABLE,
            OBJECT,
        ],
    },
    WellKnown {
        fqn: "java.util.TreeMap",
        kind: TypeKind::Class,
        ancestors: &[
            "java.util.AbstractMap",
            "java.util.NavigableMap",
            "java.util.SortedMap",
            "java.util.Map",
            "java.lang.Cloneable",
            SERIALIZABLE,
            OBJECT,
        ],
    },
    WellKnown { fqn: "java.util.Collection", kind: TypeKind::Interface, ancestors: &["java.lang.Iterable", OBJECT] },
    WellKnown {
        fqn: "java.util.List",
        kind: TypeKind::Interface,
        ancestors: &["java.util.Collection", "java.lang.Iterable", OBJECT],
    },
    WellKnown { fqn: "java.util.RandomAccess", kind: TypeKind::Interface, ancestors: &[OBJECT] },
    WellKnown {
        fqn: "java.util.AbstractCollection",
        kind: TypeKind::Class,
        ancestors: &["java.util.Collection", "java.lang.Iterable", OBJECT],
    },
    WellKnown {
        fqn: "java.util.AbstractList",
        kind: TypeKind::Class,
        ancestors: &[
            "java.util.AbstractCollection",
            "java.util.List",
            "java.util.Collection",
            "java.lang.Iterable",
            OBJECT,
        ],
    },
    WellKnown { fqn: "java.util.ArrayList", kind: TypeKind::Class, ancestors: LIST_IMPL_ANCESTORS },
];

fn lookup(fqn: &str) -> Option<&'static WellKnown> {
    WELL_KNOWN.iter().find(|entry| entry.fqn == fqn)
}

pub fn is_well_known(fqn: &str) -> bool {
    lookup(fqn).is_some()
}

pub fn type_info(fqn: &str) -> Option<TypeInfo> {
    lookup(fqn).map(|entry| TypeInfo::new(entry.fqn, entry.kind))
}

/// Transitive supertypes of a well-known type.
pub fn ancestors(fqn: &str) -> &'static [&'static str] {
    lookup(fqn).map_or(&[], |entry| entry.ancestors)
}

/// Well-known types declared directly in `package`.
pub fn types_in_package(package: &str) -> impl Iterator<Item = &'static str> + '_ {
    WELL_KNOWN.iter().map(|entry| entry.fqn).filter(move |fqn| {
        fqn.rsplit_once('.')
            .is_some_and(|(pkg, _)| pkg == package)
    })
}
