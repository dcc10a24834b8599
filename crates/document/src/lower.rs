//! Parsing GraphQL source into document nodes.
//!
//! `apollo-compiler` does the parsing; this module lowers its AST into the
//! [`crate::ast`] node shapes. The compiler AST drops a few lexical details
//! the node shapes keep, so block strings are recovered from source spans.

use crate::ast;
use crate::{DocumentError, Result};
use apollo_compiler::ast as compiler;
use apollo_compiler::Node;

/// Name given to the assembled source in parser diagnostics
const SOURCE_NAME: &str = "document.graphql";

/// Parse GraphQL source into a document node.
///
/// Any syntax error fails the whole parse; there is no partial document.
pub fn parse_document(source: &str) -> Result<ast::Document> {
    let parsed = compiler::Document::parse(source, SOURCE_NAME).map_err(|with_errors| {
        let messages: Vec<String> = with_errors
            .errors
            .iter()
            .map(|diagnostic| match diagnostic.line_column_range() {
                Some(range) => format!(
                    "{} ({}:{})",
                    diagnostic.error, range.start.line, range.start.column
                ),
                None => diagnostic.error.to_string(),
            })
            .collect();
        DocumentError::Parse {
            message: messages.join("; "),
        }
    })?;

    let lowering = Lowering { source };
    let definitions: Vec<ast::Definition> = parsed
        .definitions
        .iter()
        .map(|definition| lowering.definition(definition))
        .collect();

    tracing::debug!(definitions = definitions.len(), "Parsed GraphQL document");

    Ok(ast::Document {
        definitions,
        loc: Some(ast::Location {
            start: 0,
            end: source.encode_utf16().count(),
        }),
    })
}

struct Lowering<'a> {
    source: &'a str,
}

impl Lowering<'_> {
    fn definition(&self, definition: &compiler::Definition) -> ast::Definition {
        use compiler::Definition as D;

        match definition {
            D::OperationDefinition(op) => ast::Definition::OperationDefinition(self.operation(op)),
            D::FragmentDefinition(frag) => ast::Definition::FragmentDefinition(self.fragment(frag)),
            D::SchemaDefinition(schema) => {
                ast::Definition::SchemaDefinition(ast::SchemaDefinition {
                    description: self.description(schema.description.as_ref()),
                    directives: self.directives(&schema.directives),
                    operation_types: schema
                        .root_operations
                        .iter()
                        .map(Self::operation_type_definition)
                        .collect(),
                })
            }
            D::ScalarTypeDefinition(scalar) => {
                ast::Definition::ScalarTypeDefinition(ast::ScalarTypeDefinition {
                    description: self.description(scalar.description.as_ref()),
                    name: name(&scalar.name),
                    directives: self.directives(&scalar.directives),
                })
            }
            D::ObjectTypeDefinition(obj) => {
                ast::Definition::ObjectTypeDefinition(ast::ObjectTypeDefinition {
                    description: self.description(obj.description.as_ref()),
                    name: name(&obj.name),
                    interfaces: named_types(&obj.implements_interfaces),
                    directives: self.directives(&obj.directives),
                    fields: self.field_definitions(&obj.fields),
                })
            }
            D::InterfaceTypeDefinition(iface) => {
                ast::Definition::InterfaceTypeDefinition(ast::InterfaceTypeDefinition {
                    description: self.description(iface.description.as_ref()),
                    name: name(&iface.name),
                    interfaces: named_types(&iface.implements_interfaces),
                    directives: self.directives(&iface.directives),
                    fields: self.field_definitions(&iface.fields),
                })
            }
            D::UnionTypeDefinition(union_def) => {
                ast::Definition::UnionTypeDefinition(ast::UnionTypeDefinition {
                    description: self.description(union_def.description.as_ref()),
                    name: name(&union_def.name),
                    directives: self.directives(&union_def.directives),
                    types: named_types(&union_def.members),
                })
            }
            D::EnumTypeDefinition(enum_def) => {
                ast::Definition::EnumTypeDefinition(ast::EnumTypeDefinition {
                    description: self.description(enum_def.description.as_ref()),
                    name: name(&enum_def.name),
                    directives: self.directives(&enum_def.directives),
                    values: self.enum_values(&enum_def.values),
                })
            }
            D::InputObjectTypeDefinition(input) => {
                ast::Definition::InputObjectTypeDefinition(ast::InputObjectTypeDefinition {
                    description: self.description(input.description.as_ref()),
                    name: name(&input.name),
                    directives: self.directives(&input.directives),
                    fields: self.input_values(&input.fields),
                })
            }
            D::DirectiveDefinition(dir) => {
                ast::Definition::DirectiveDefinition(ast::DirectiveDefinition {
                    description: self.description(dir.description.as_ref()),
                    name: name(&dir.name),
                    arguments: self.input_values(&dir.arguments),
                    repeatable: dir.repeatable,
                    locations: dir
                        .locations
                        .iter()
                        .map(|location| ast::Name::new(location.name()))
                        .collect(),
                })
            }
            D::SchemaExtension(ext) => ast::Definition::SchemaExtension(ast::SchemaExtension {
                directives: self.directives(&ext.directives),
                operation_types: ext
                    .root_operations
                    .iter()
                    .map(Self::operation_type_definition)
                    .collect(),
            }),
            D::ScalarTypeExtension(ext) => {
                ast::Definition::ScalarTypeExtension(ast::ScalarTypeExtension {
                    name: name(&ext.name),
                    directives: self.directives(&ext.directives),
                })
            }
            D::ObjectTypeExtension(ext) => {
                ast::Definition::ObjectTypeExtension(ast::ObjectTypeExtension {
                    name: name(&ext.name),
                    interfaces: named_types(&ext.implements_interfaces),
                    directives: self.directives(&ext.directives),
                    fields: self.field_definitions(&ext.fields),
                })
            }
            D::InterfaceTypeExtension(ext) => {
                ast::Definition::InterfaceTypeExtension(ast::InterfaceTypeExtension {
                    name: name(&ext.name),
                    interfaces: named_types(&ext.implements_interfaces),
                    directives: self.directives(&ext.directives),
                    fields: self.field_definitions(&ext.fields),
                })
            }
            D::UnionTypeExtension(ext) => {
                ast::Definition::UnionTypeExtension(ast::UnionTypeExtension {
                    name: name(&ext.name),
                    directives: self.directives(&ext.directives),
                    types: named_types(&ext.members),
                })
            }
            D::EnumTypeExtension(ext) => ast::Definition::EnumTypeExtension(ast::EnumTypeExtension {
                name: name(&ext.name),
                directives: self.directives(&ext.directives),
                values: self.enum_values(&ext.values),
            }),
            D::InputObjectTypeExtension(ext) => {
                ast::Definition::InputObjectTypeExtension(ast::InputObjectTypeExtension {
                    name: name(&ext.name),
                    directives: self.directives(&ext.directives),
                    fields: self.input_values(&ext.fields),
                })
            }
        }
    }

    // =========================================================================
    // Executable definitions
    // =========================================================================

    fn operation(&self, op: &compiler::OperationDefinition) -> ast::OperationDefinition {
        ast::OperationDefinition {
            operation: operation_type(op.operation_type),
            name: op.name.as_ref().map(name),
            variable_definitions: op
                .variables
                .iter()
                .map(|var| ast::VariableDefinition {
                    variable: ast::Variable {
                        name: name(&var.name),
                    },
                    ty: lower_type(&var.ty),
                    default_value: var.default_value.as_ref().map(|value| self.value(value)),
                    directives: self.directives(&var.directives),
                })
                .collect(),
            directives: self.directives(&op.directives),
            selection_set: self.selection_set(&op.selection_set),
        }
    }

    fn fragment(&self, frag: &compiler::FragmentDefinition) -> ast::FragmentDefinition {
        ast::FragmentDefinition {
            name: name(&frag.name),
            type_condition: named_type(&frag.type_condition),
            directives: self.directives(&frag.directives),
            selection_set: self.selection_set(&frag.selection_set),
        }
    }

    fn selection_set(&self, selections: &[compiler::Selection]) -> ast::SelectionSet {
        ast::SelectionSet {
            selections: selections
                .iter()
                .map(|selection| self.selection(selection))
                .collect(),
        }
    }

    fn selection(&self, selection: &compiler::Selection) -> ast::Selection {
        match selection {
            compiler::Selection::Field(field) => ast::Selection::Field(ast::Field {
                alias: field.alias.as_ref().map(name),
                name: name(&field.name),
                arguments: self.arguments(&field.arguments),
                directives: self.directives(&field.directives),
                // Leaf fields have no selection set at all, not an empty one
                selection_set: (!field.selection_set.is_empty())
                    .then(|| self.selection_set(&field.selection_set)),
            }),
            compiler::Selection::FragmentSpread(spread) => {
                ast::Selection::FragmentSpread(ast::FragmentSpread {
                    name: name(&spread.fragment_name),
                    directives: self.directives(&spread.directives),
                })
            }
            compiler::Selection::InlineFragment(inline) => {
                ast::Selection::InlineFragment(ast::InlineFragment {
                    type_condition: inline.type_condition.as_ref().map(named_type),
                    directives: self.directives(&inline.directives),
                    selection_set: self.selection_set(&inline.selection_set),
                })
            }
        }
    }

    fn directives(&self, directives: &compiler::DirectiveList) -> Vec<ast::Directive> {
        directives
            .iter()
            .map(|directive| ast::Directive {
                name: name(&directive.name),
                arguments: self.arguments(&directive.arguments),
            })
            .collect()
    }

    fn arguments(&self, arguments: &[Node<compiler::Argument>]) -> Vec<ast::Argument> {
        arguments
            .iter()
            .map(|arg| ast::Argument {
                name: name(&arg.name),
                value: self.value(&arg.value),
            })
            .collect()
    }

    fn value(&self, value: &Node<compiler::Value>) -> ast::Value {
        match value.as_ref() {
            compiler::Value::Null => ast::Value::NullValue(ast::NullValue {}),
            compiler::Value::Enum(enum_value) => ast::Value::EnumValue(ast::EnumValue {
                value: enum_value.to_string(),
            }),
            compiler::Value::Variable(var) => {
                ast::Value::Variable(ast::Variable { name: name(var) })
            }
            compiler::Value::String(s) => ast::Value::StringValue(ast::StringValue {
                value: s.to_string(),
                block: self.is_block_string(value.location()),
            }),
            compiler::Value::Float(f) => ast::Value::FloatValue(ast::FloatValue {
                value: f.as_str().to_string(),
            }),
            compiler::Value::Int(i) => ast::Value::IntValue(ast::IntValue {
                value: i.as_str().to_string(),
            }),
            compiler::Value::Boolean(b) => ast::Value::BooleanValue(ast::BooleanValue { value: *b }),
            compiler::Value::List(items) => ast::Value::ListValue(ast::ListValue {
                values: items.iter().map(|item| self.value(item)).collect(),
            }),
            compiler::Value::Object(fields) => ast::Value::ObjectValue(ast::ObjectValue {
                fields: fields
                    .iter()
                    .map(|(field_name, field_value)| ast::ObjectField {
                        name: name(field_name),
                        value: self.value(field_value),
                    })
                    .collect(),
            }),
        }
    }

    // =========================================================================
    // Type system members
    // =========================================================================

    fn description(&self, description: Option<&Node<str>>) -> Option<ast::StringValue> {
        description.map(|text| ast::StringValue {
            value: text.to_string(),
            block: self.is_block_string(text.location()),
        })
    }

    fn field_definitions(
        &self,
        fields: &[Node<compiler::FieldDefinition>],
    ) -> Vec<ast::FieldDefinition> {
        fields
            .iter()
            .map(|field| ast::FieldDefinition {
                description: self.description(field.description.as_ref()),
                name: name(&field.name),
                arguments: self.input_values(&field.arguments),
                ty: lower_type(&field.ty),
                directives: self.directives(&field.directives),
            })
            .collect()
    }

    fn input_values(
        &self,
        values: &[Node<compiler::InputValueDefinition>],
    ) -> Vec<ast::InputValueDefinition> {
        values
            .iter()
            .map(|input| ast::InputValueDefinition {
                description: self.description(input.description.as_ref()),
                name: name(&input.name),
                ty: lower_type(&input.ty),
                default_value: input.default_value.as_ref().map(|value| self.value(value)),
                directives: self.directives(&input.directives),
            })
            .collect()
    }

    fn enum_values(
        &self,
        values: &[Node<compiler::EnumValueDefinition>],
    ) -> Vec<ast::EnumValueDefinition> {
        values
            .iter()
            .map(|value| ast::EnumValueDefinition {
                description: self.description(value.description.as_ref()),
                name: name(&value.value),
                directives: self.directives(&value.directives),
            })
            .collect()
    }

    fn operation_type_definition(
        root: &Node<(compiler::OperationType, compiler::NamedType)>,
    ) -> ast::OperationTypeDefinition {
        let (operation, ty) = root.as_ref();
        ast::OperationTypeDefinition {
            operation: operation_type(*operation),
            ty: named_type(ty),
        }
    }

    fn is_block_string(&self, span: Option<apollo_compiler::parser::SourceSpan>) -> bool {
        span.and_then(|span| self.source.get(span.offset()..))
            .is_some_and(|text| text.starts_with("\"\"\""))
    }
}

fn name(name: &apollo_compiler::Name) -> ast::Name {
    ast::Name::new(name.as_str())
}

fn named_type(name: &compiler::NamedType) -> ast::NamedType {
    ast::NamedType {
        name: ast::Name::new(name.as_str()),
    }
}

fn named_types(names: &[compiler::NamedType]) -> Vec<ast::NamedType> {
    names.iter().map(named_type).collect()
}

const fn operation_type(operation_type: compiler::OperationType) -> ast::OperationType {
    match operation_type {
        compiler::OperationType::Query => ast::OperationType::Query,
        compiler::OperationType::Mutation => ast::OperationType::Mutation,
        compiler::OperationType::Subscription => ast::OperationType::Subscription,
    }
}

fn lower_type(ty: &compiler::Type) -> ast::Type {
    match ty {
        compiler::Type::Named(named) => ast::Type::NamedType(named_type(named)),
        compiler::Type::NonNullNamed(named) => ast::Type::NonNullType(ast::NonNullType {
            ty: Box::new(ast::Type::NamedType(named_type(named))),
        }),
        compiler::Type::List(inner) => ast::Type::ListType(ast::ListType {
            ty: Box::new(lower_type(inner)),
        }),
        compiler::Type::NonNullList(inner) => ast::Type::NonNullType(ast::NonNullType {
            ty: Box::new(ast::Type::ListType(ast::ListType {
                ty: Box::new(lower_type(inner)),
            })),
        }),
    }
}
