use super::InferStrategy;
use crate::inference::InferContext;
use crate::syntax::{Expr, Literal};
use grail_api::models::{JAVA_LANG_STRING, TypeRef};

pub struct LiteralInfer;

impl InferStrategy for LiteralInfer {
    fn infer(&self, expr: &Expr, _ctx: &InferContext) -> Option<TypeRef> {
        let Expr::Literal(literal) = expr else {
            return None;
        };

        match literal {
            Literal::Integer(text) => Some(integer_type(text)),
            Literal::Decimal(text) => Some(decimal_type(text)),
            Literal::Bool(_) => Some(TypeRef::raw("boolean")),
            Literal::Char(_) => Some(TypeRef::raw("char")),
            Literal::Str(_) => Some(TypeRef::id(JAVA_LANG_STRING)),
            // null converts to any reference type
            Literal::Null => Some(TypeRef::Unknown),
        }
    }
}

/// Groovy picks the narrowest of int, long and BigInteger that holds an
/// unsuffixed integer literal.
fn integer_type(text: &str) -> TypeRef {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    match digits.chars().last() {
        Some('l' | 'L') => return TypeRef::raw("long"),
        Some('g' | 'G') => return TypeRef::id("java.math.BigInteger"),
        Some('i' | 'I') => return TypeRef::raw("int"),
        _ => {}
    }

    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };

    match u128::from_str_radix(body, radix) {
        Ok(value) if value <= i32::MAX as u128 => TypeRef::raw("int"),
        Ok(value) if value <= i64::MAX as u128 => TypeRef::raw("long"),
        Ok(_) => TypeRef::id("java.math.BigInteger"),
        Err(_) => TypeRef::raw("int"),
    }
}

/// Unsuffixed decimal literals are BigDecimal in Groovy.
fn decimal_type(text: &str) -> TypeRef {
    match text.chars().last() {
        Some('d' | 'D') => TypeRef::raw("double"),
        Some('f' | 'F') => TypeRef::raw("float"),
        _ => TypeRef::id("java.math.BigDecimal"),
    }
}
