//! JavaScript module text for an assembled GraphQL document.

use crate::ast::{Definition, Document};
use crate::fragments::{fragments_for_operation, FragmentTable};
use crate::serialize::to_document_node_string;
use crate::{parse_document, BoxError, DocumentError, Result};

/// A rewrite applied to every document before it is serialized.
///
/// Closures `Fn(Document) -> Result<Document, BoxError>` implement this.
pub trait DocumentTransform: Send + Sync {
    fn transform(&self, document: Document) -> std::result::Result<Document, BoxError>;
}

impl<F> DocumentTransform for F
where
    F: Fn(Document) -> std::result::Result<Document, BoxError> + Send + Sync,
{
    fn transform(&self, document: Document) -> std::result::Result<Document, BoxError> {
        self(document)
    }
}

/// Generate the module for assembled GraphQL text.
///
/// The default export is the whole document. Every named operation also gets
/// a named export holding a document with just that operation and the
/// fragments it needs.
pub fn generate_module(graphql: &str, transform: Option<&dyn DocumentTransform>) -> Result<String> {
    let document = parse_document(graphql)?;
    let table = FragmentTable::from_document(&document);

    let mut lines = Vec::new();
    lines.push(format!(
        "const documentNode = {};",
        render(document.clone(), transform)?
    ));

    for operation in document.operations() {
        let Some(name) = &operation.name else {
            continue;
        };
        let mut definitions = vec![Definition::OperationDefinition(operation.clone())];
        definitions.extend(
            fragments_for_operation(operation, &table)?
                .into_iter()
                .map(Definition::FragmentDefinition),
        );
        lines.push(format!(
            "export const {} = {};",
            name.value,
            render(Document::new(definitions), transform)?
        ));
    }

    lines.push("export default documentNode;".to_string());

    tracing::info!(exports = lines.len() - 2, "Generated document module");
    Ok(lines.join("\n"))
}

fn render(document: Document, transform: Option<&dyn DocumentTransform>) -> Result<String> {
    let document = match transform {
        Some(transform) => transform
            .transform(document)
            .map_err(DocumentError::Transform)?,
        None => document,
    };
    to_document_node_string(&document)
}
