use graphql_document::ast::{Definition, Document};
use graphql_document::{generate_module, parse_document, BoxError, DocumentError, DocumentTransform};

fn export_line<'a>(module: &'a str, name: &str) -> &'a str {
    let prefix = format!("export const {name} = ");
    module
        .lines()
        .find(|line| line.starts_with(&prefix))
        .unwrap_or_else(|| panic!("no export for {name} in:\n{module}"))
}

fn definition_kinds(literal: &str) -> Vec<(&'static str, String)> {
    // Pull `"kind":"XDefinition","name":{"kind":"Name","value":"..."}` pairs
    let mut found = Vec::new();
    for kind in ["OperationDefinition", "FragmentDefinition"] {
        let marker = format!("{{\"kind\":\"{kind}\"");
        for (offset, _) in literal.match_indices(&marker) {
            let rest = &literal[offset..];
            let value_at = rest.find("\"value\":\"").unwrap() + 9;
            let end = rest[value_at..].find('"').unwrap();
            found.push((offset, kind, rest[value_at..value_at + end].to_string()));
        }
    }
    found.sort_by_key(|(offset, _, _)| *offset);
    found.into_iter().map(|(_, kind, name)| (kind, name)).collect()
}

#[test]
fn test_imported_fragment_follows_operation() {
    // Assembled text for `a.graphql` importing `b.graphql`
    let source = "fragment Frag on T { id }\n\nquery A { ...Frag }";
    let module = generate_module(source, None).unwrap();

    let default = module.lines().next().unwrap();
    assert_eq!(
        definition_kinds(default),
        vec![
            ("FragmentDefinition", "Frag".to_string()),
            ("OperationDefinition", "A".to_string()),
        ]
    );
    assert_eq!(
        definition_kinds(export_line(&module, "A")),
        vec![
            ("OperationDefinition", "A".to_string()),
            ("FragmentDefinition", "Frag".to_string()),
        ]
    );
}

#[test]
fn test_operation_without_spreads_is_alone() {
    let source = "fragment Unused on T { id }\nquery A { a }";
    let module = generate_module(source, None).unwrap();
    assert_eq!(
        definition_kinds(export_line(&module, "A")),
        vec![("OperationDefinition", "A".to_string())]
    );
}

#[test]
fn test_nested_fragment_comes_first() {
    let source = r"
        query Q { user { ...F } }
        fragment F on User { ...G }
        fragment G on User { id }
    ";
    let module = generate_module(source, None).unwrap();
    let names: Vec<String> = definition_kinds(export_line(&module, "Q"))
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    assert_eq!(names, vec!["Q", "G", "F"]);
}

#[test]
fn test_every_named_operation_is_exported() {
    let source = "query One { a }\nmutation Two { b }\nsubscription Three { c }\n{ d }";
    let module = generate_module(source, None).unwrap();
    let exports: Vec<&str> = module
        .lines()
        .filter_map(|line| line.strip_prefix("export const "))
        .filter_map(|rest| rest.split(' ').next())
        .collect();
    assert_eq!(exports, vec!["One", "Two", "Three"]);
}

#[test]
fn test_small_operation_literal() {
    let module = generate_module("query A { a }", None).unwrap();
    insta::assert_snapshot!(export_line(&module, "A"), @r#"export const A = {"kind":"Document","definitions":[{"kind":"OperationDefinition","operation":"query","name":{"kind":"Name","value":"A"},"variableDefinitions":[],"directives":[],"selectionSet":{"kind":"SelectionSet","selections":[{"kind":"Field","alias":undefined,"name":{"kind":"Name","value":"a"},"arguments":[],"directives":[],"selectionSet":undefined}]}}]};"#);
}

#[test]
fn test_block_string_and_values() {
    let source = r#"
        query A($id: ID! = "x", $n: [Int]) {
            a(s: """block""", f: 1.5, e: RED, l: [1, 2], o: { k: true }, v: $id)
        }
    "#;
    let document = parse_document(source).unwrap();
    let module = generate_module(source, None).unwrap();
    assert!(module.contains(r#"{"kind":"StringValue","value":"block","block":true}"#));
    assert!(module.contains(r#"{"kind":"StringValue","value":"x","block":false}"#));
    assert!(module.contains(r#"{"kind":"FloatValue","value":"1.5"}"#));
    assert!(module.contains(r#"{"kind":"EnumValue","value":"RED"}"#));
    assert!(module.contains(
        r#""type":{"kind":"NonNullType","type":{"kind":"NamedType","name":{"kind":"Name","value":"ID"}}}"#
    ));
    assert!(module.contains(r#"{"kind":"ObjectField","name":{"kind":"Name","value":"k"},"value":{"kind":"BooleanValue","value":true}}"#));
    assert_eq!(document.operations().count(), 1);
}

#[test]
fn test_type_system_definitions() {
    let source = r#"
        """
        A user
        """
        type User implements Node @key(fields: "id") {
          "The id"
          id: ID!
        }
        directive @key(fields: String!) repeatable on OBJECT | INTERFACE
        extend type User { name: String }
    "#;
    let module = generate_module(source, None).unwrap();
    let default = module.lines().next().unwrap();
    assert!(default.contains(r#""description":{"kind":"StringValue","value":"A user","block":true}"#));
    assert!(default.contains(r#""description":{"kind":"StringValue","value":"The id","block":false}"#));
    assert!(default.contains(r#""repeatable":true,"locations":[{"kind":"Name","value":"OBJECT"},{"kind":"Name","value":"INTERFACE"}]"#));
    assert!(default.contains(r#"{"kind":"ObjectTypeExtension","name":{"kind":"Name","value":"User"}"#));
}

#[test]
fn test_transform_receives_each_document() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = AtomicUsize::new(0);
    let count = |document: Document| -> Result<Document, BoxError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(document)
    };
    generate_module("query A { a } query B { b }", Some(&count as &dyn DocumentTransform))
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_transform_can_drop_definitions() {
    let only_operations = |mut document: Document| -> Result<Document, BoxError> {
        document
            .definitions
            .retain(|definition| matches!(definition, Definition::OperationDefinition(_)));
        Ok(document)
    };
    let module = generate_module(
        "query A { ...F } fragment F on Query { id }",
        Some(&only_operations as &dyn DocumentTransform),
    )
    .unwrap();
    assert!(!module.contains("FragmentDefinition"));
}

#[test]
fn test_missing_fragment_error_names_it() {
    let err = generate_module("query A { ...Ghost }", None).unwrap_err();
    assert_eq!(err.to_string(), "Unknown fragment \"Ghost\"");
    assert!(matches!(err, DocumentError::MissingFragment { .. }));
}
