pub mod normalization;
pub mod substitution;
pub mod subtyping;
pub mod type_system;
pub mod types;
