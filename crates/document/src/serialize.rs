//! Document nodes as JavaScript object literals.
//!
//! The output is compact JSON except that absent members are written as the
//! bare token `undefined`, which is what a JavaScript consumer of the node
//! would see for a missing optional property.

use crate::Result;
use serde::Serialize;
use std::io;

/// Compact JSON formatter that writes `null` as `undefined`.
///
/// Document nodes never contain a real GraphQL `null` as JSON null
/// (`NullValue` is an object), so every JSON null is an absent member.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedFormatter;

impl serde_json::ser::Formatter for UndefinedFormatter {
    fn write_null<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"undefined")
    }
}

/// Serialize any node into its JavaScript literal form
pub fn to_document_node_string<T: Serialize + ?Sized>(node: &T) -> Result<String> {
    let mut buffer = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, UndefinedFormatter);
    node.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, Name};
    use crate::parse_document;

    #[test]
    fn test_absent_members_are_undefined() {
        let field = Field {
            alias: None,
            name: Name::new("id"),
            arguments: Vec::new(),
            directives: Vec::new(),
            selection_set: None,
        };
        insta::assert_snapshot!(
            to_document_node_string(&field).unwrap(),
            @r#"{"kind":"Field","alias":undefined,"name":{"kind":"Name","value":"id"},"arguments":[],"directives":[],"selectionSet":undefined}"#
        );
    }

    #[test]
    fn test_string_contents_are_not_rewritten() {
        let document = parse_document(r#"{ a(x: "__undefined", y: "undefined") }"#).unwrap();
        let text = to_document_node_string(&document).unwrap();
        assert!(text.contains(r#""value":"__undefined""#));
        assert!(text.contains(r#""value":"undefined""#));
    }

    #[test]
    fn test_null_value_is_an_object() {
        let document = parse_document("{ a(x: null) }").unwrap();
        let text = to_document_node_string(&document).unwrap();
        assert!(text.contains(r#""value":{"kind":"NullValue"}"#));
    }

    #[test]
    fn test_document_loc_covers_whole_source() {
        let document = parse_document("query A { a }\n\n").unwrap();
        let text = to_document_node_string(&document).unwrap();
        assert!(text.ends_with(r#""loc":{"start":0,"end":15}}"#));
    }

    #[test]
    fn test_document_loc_includes_trailing_comment() {
        let source = "query A { a } # trailing";
        let document = parse_document(source).unwrap();
        assert_eq!(document.loc.unwrap().end, source.len());
    }

    #[test]
    fn test_document_loc_counts_utf16_units() {
        let source = "query A { a(s: \"\u{1F600}\") }";
        let document = parse_document(source).unwrap();
        assert_eq!(document.loc.unwrap().end, source.len() - 2);
    }
}
