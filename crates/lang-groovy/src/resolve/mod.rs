//! Constructor resolution for `new` expressions.
//!
//! ```text
//! NewCall ──multi_resolve──▶ ResolveCache ──miss──▶ ConstructorResolver
//!                                                     │
//!                  TypeReferenceResolver ◀────────────┤ class candidates
//!                  ClassPickPolicy       ◀────────────┤ pick one
//!                  ConstructorProvider   ◀────────────┘ applicable constructors
//! ```

mod cache;
mod call;
mod constructors;
mod inner;
mod model;
mod new_expr;
mod policy;
mod reference;
mod session;

pub use cache::{CacheKey, ResolveCache};
pub use call::{NewCall, ResultSet};
pub use constructors::{ConstructorProvider, TypeSystemConstructors};
pub use inner::{add_enclosing_arg_if_needed, enclosing_argument_type, enclosing_instance_type};
pub use model::{
    Applicability, ClassCandidate, ConstructorCandidate, ReferenceResult, ResolveResult,
};
pub use new_expr::{ConstructorResolver, named_arguments_type};
pub use policy::ClassPickPolicy;
pub use reference::{TypeReferenceResolver, TypeSystemReferenceResolver};
pub use session::ResolveSession;
