//! Parsing of Java-style type text (`java.util.Map<String, Object>[]`).
//!
//! Names are not resolved: primitives become [`TypeRef::Raw`], every other
//! name becomes [`TypeRef::Id`] exactly as written.

use super::types::{TypeRef, is_primitive_name};
use crate::error::{ApiError, ApiResult};
use std::str::FromStr;

impl FromStr for TypeRef {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        let mut parser = TypeTextParser::new(s);
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

struct TypeTextParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TypeTextParser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> ApiError {
        ApiError::InvalidArgument(format!(
            "{} at offset {} in type `{}`",
            message, self.pos, self.text
        ))
    }

    fn parse_type(&mut self) -> ApiResult<TypeRef> {
        if self.eat("?") {
            return self.parse_wildcard_tail();
        }

        let name = self.parse_name()?;
        let mut ty = if is_primitive_name(&name) || name == "void" {
            TypeRef::Raw(name)
        } else {
            TypeRef::Id(name)
        };

        if self.eat("<") {
            let mut args = vec![self.parse_type()?];
            while self.eat(",") {
                args.push(self.parse_type()?);
            }
            if !self.eat(">") {
                return Err(self.error("expected `>`"));
            }
            ty = TypeRef::generic(ty, args);
        }

        while self.eat("[") {
            if !self.eat("]") {
                return Err(self.error("expected `]`"));
            }
            ty = TypeRef::array_of(ty);
        }

        Ok(ty)
    }

    fn parse_wildcard_tail(&mut self) -> ApiResult<TypeRef> {
        let is_upper_bound = if self.eat_keyword("extends") {
            true
        } else if self.eat_keyword("super") {
            false
        } else {
            return Ok(TypeRef::Wildcard {
                bound: None,
                is_upper_bound: true,
            });
        };
        let bound = self.parse_type()?;
        Ok(TypeRef::Wildcard {
            bound: Some(Box::new(bound)),
            is_upper_bound,
        })
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_ws();
        let rest = self.rest();
        if !rest.starts_with(keyword) {
            return false;
        }
        let boundary = rest[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_char(c));
        if boundary {
            self.pos += keyword.len();
        }
        boundary
    }

    fn parse_name(&mut self) -> ApiResult<String> {
        let mut segments = vec![self.parse_ident()?];
        loop {
            let checkpoint = self.pos;
            if self.eat(".") {
                segments.push(self.parse_ident()?);
            } else {
                self.pos = checkpoint;
                break;
            }
        }
        Ok(segments.join("."))
    }

    fn parse_ident(&mut self) -> ApiResult<String> {
        self.skip_ws();
        let len: usize = self
            .rest()
            .chars()
            .take_while(|c| is_ident_char(*c))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            return Err(self.error("expected identifier"));
        }
        let ident = &self.rest()[..len];
        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("identifier cannot start with a digit"));
        }
        self.pos += len;
        Ok(ident.to_string())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitive_and_class() {
        assert_eq!("int".parse::<TypeRef>().unwrap(), TypeRef::raw("int"));
        assert_eq!(
            "java.lang.String".parse::<TypeRef>().unwrap(),
            TypeRef::id("java.lang.String")
        );
    }

    #[test]
    fn test_parse_nested_generics_and_arrays() {
        let ty: TypeRef = "java.util.Map<String, java.util.List<int[]>>[]"
            .parse()
            .unwrap();
        let expected = TypeRef::array_of(TypeRef::generic(
            TypeRef::id("java.util.Map"),
            vec![
                TypeRef::id("String"),
                TypeRef::generic(
                    TypeRef::id("java.util.List"),
                    vec![TypeRef::array_of(TypeRef::raw("int"))],
                ),
            ],
        ));
        assert_eq!(ty, expected);
    }

    #[test]
    fn test_parse_wildcards() {
        let ty: TypeRef = "List<? extends Number>".parse().unwrap();
        let TypeRef::Generic { args, .. } = ty else {
            panic!("expected generic");
        };
        assert_eq!(
            args[0],
            TypeRef::Wildcard {
                bound: Some(Box::new(TypeRef::id("Number"))),
                is_upper_bound: true,
            }
        );

        let bare: TypeRef = "?".parse().unwrap();
        assert!(matches!(bare, TypeRef::Wildcard { bound: None, .. }));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<TypeRef>().is_err());
        assert!("Map<String".parse::<TypeRef>().is_err());
        assert!("int[".parse::<TypeRef>().is_err());
        assert!("Foo Bar".parse::<TypeRef>().is_err());
        assert!("1Foo".parse::<TypeRef>().is_err());
    }
}
