//! Literal & Constant Evaluator
//!
//! Reduces every constant-value form to the same shape: a `{TYPE, VALUE}`
//! attribute pair. Consumers (enum item defaults, extended attributes)
//! treat a constant identically regardless of which literal form produced
//! it.
//!
//! Shifted integers are formatted, not computed: `1 << 4` yields the
//! verbatim string `"1 << 4"` because the grammar encodes an expression,
//! not a pre-evaluated constant.

use crate::ast::{AttrKey, Element, build_attribute, list_from_concat};

/// The matched value of a ConstValue production.
#[derive(Debug, Clone)]
pub enum ConstExpr<'a> {
    /// `ConstValue : integer`
    Integer(&'a str),
    /// `ConstValue : integer LSHIFT integer | integer RSHIFT integer`;
    /// `op` is the operator's literal source spelling (`<<` or `>>`)
    Shift {
        left: &'a str,
        op: &'a str,
        right: &'a str,
    },
    /// `ConstValue : string` (quotes already stripped)
    Str(&'a str),
    /// `ConstValue : FloatLiteral | BooleanLiteral` - these arrive as
    /// already-built attribute pairs from lower productions
    Literal(Vec<Element>),
}

/// Reduce a constant-value expression to its `{TYPE, VALUE}` pair.
pub fn reduce_const_value(expr: ConstExpr<'_>) -> Vec<Element> {
    match expr {
        ConstExpr::Integer(text) => typed_value("integer", text.to_string()),
        ConstExpr::Shift { left, op, right } => {
            typed_value("integer", format!("{left} {op} {right}"))
        }
        ConstExpr::Str(text) => typed_value("string", text.to_string()),
        ConstExpr::Literal(pair) => pair,
    }
}

/// `FloatLiteral : float` - lower production building the attribute pair
/// the ConstValue handler passes through.
pub fn reduce_float_literal(text: &str) -> Vec<Element> {
    typed_value("float", text.to_string())
}

/// `BooleanLiteral : TRUE | FALSE`
pub fn reduce_boolean_literal(value: bool) -> Vec<Element> {
    typed_value("boolean", if value { "true" } else { "false" }.to_string())
}

fn typed_value(type_tag: &str, value: String) -> Vec<Element> {
    list_from_concat([
        build_attribute(AttrKey::Type, type_tag).into(),
        build_attribute(AttrKey::Value, value).into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttrValue;
    use rstest::rstest;

    fn pair(elements: &[Element]) -> (String, String) {
        let mut type_tag = String::new();
        let mut value = String::new();
        for element in elements {
            if let Some(attr) = element.as_attribute() {
                match attr.key {
                    AttrKey::Type => type_tag = attr.value.as_text().to_string(),
                    AttrKey::Value => value = attr.value.as_text().to_string(),
                    _ => {}
                }
            }
        }
        (type_tag, value)
    }

    #[rstest]
    #[case(ConstExpr::Integer("42"), "integer", "42")]
    #[case(ConstExpr::Integer("0x1F"), "integer", "0x1F")]
    #[case(ConstExpr::Shift { left: "1", op: "<<", right: "4" }, "integer", "1 << 4")]
    #[case(ConstExpr::Shift { left: "256", op: ">>", right: "2" }, "integer", "256 >> 2")]
    #[case(ConstExpr::Str("abc"), "string", "abc")]
    fn test_const_value_forms(
        #[case] expr: ConstExpr<'_>,
        #[case] expected_type: &str,
        #[case] expected_value: &str,
    ) {
        let (type_tag, value) = pair(&reduce_const_value(expr));
        assert_eq!(type_tag, expected_type);
        assert_eq!(value, expected_value);
    }

    #[test]
    fn test_literal_passes_through_unchanged() {
        let built = reduce_float_literal("1.5");
        let out = reduce_const_value(ConstExpr::Literal(built.clone()));
        assert_eq!(out, built);
        assert_eq!(pair(&out), ("float".to_string(), "1.5".to_string()));
    }

    #[test]
    fn test_boolean_literal() {
        let (type_tag, value) = pair(&reduce_boolean_literal(true));
        assert_eq!(type_tag, "boolean");
        assert_eq!(value, "true");
    }

    #[test]
    fn test_pair_is_exactly_two_attributes() {
        let out = reduce_const_value(ConstExpr::Integer("7"));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.as_attribute().is_some()));
    }

    #[test]
    fn test_shift_value_is_text_not_computed() {
        let out = reduce_const_value(ConstExpr::Shift {
            left: "1",
            op: "<<",
            right: "4",
        });
        let value = out[1].as_attribute().map(|a| &a.value);
        assert_eq!(value.map(AttrValue::as_text), Some("1 << 4"));
        assert_ne!(value.map(AttrValue::as_text), Some("16"));
    }
}
