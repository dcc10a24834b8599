//! Minimal fragment closure for an operation.

use crate::ast::{Definition, Document, FragmentDefinition, OperationDefinition, Selection};
use crate::{DocumentError, Result};
use std::collections::HashMap;

/// Fragment definitions of a document, by name.
///
/// When a name is declared twice the later declaration wins.
#[derive(Debug, Default)]
pub struct FragmentTable<'a> {
    fragments: HashMap<&'a str, &'a FragmentDefinition>,
}

impl<'a> FragmentTable<'a> {
    #[must_use]
    pub fn from_document(document: &'a Document) -> Self {
        let fragments = document
            .fragments()
            .map(|fragment| (fragment.name.value.as_str(), fragment))
            .collect();
        Self { fragments }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a FragmentDefinition> {
        self.fragments.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Names of the fragments `definition` needs, dependencies first.
///
/// A name is listed once per spread that reaches it, so shared fragments
/// repeat. Only shallow spreads are followed: for an operation, spreads at
/// its top level and directly under its top-level fields; for a fragment,
/// spreads directly in its selection set.
pub fn collect_fragment_references(
    table: &FragmentTable<'_>,
    definition: &Definition,
) -> Result<Vec<String>> {
    let mut collector = Collector {
        table,
        expanding: Vec::new(),
        names: Vec::new(),
    };
    match definition {
        Definition::OperationDefinition(operation) => collector.operation(operation)?,
        Definition::FragmentDefinition(fragment) => {
            collector.expanding.push(fragment.name.value.clone());
            collector.fragment(fragment)?;
        }
        _ => {}
    }
    Ok(collector.names)
}

/// Fragment definitions to ship alongside `operation`, in dependency order.
pub fn fragments_for_operation(
    operation: &OperationDefinition,
    table: &FragmentTable<'_>,
) -> Result<Vec<FragmentDefinition>> {
    let mut collector = Collector {
        table,
        expanding: Vec::new(),
        names: Vec::new(),
    };
    collector.operation(operation)?;

    collector
        .names
        .iter()
        .map(|name| {
            table
                .get(name)
                .cloned()
                .ok_or_else(|| DocumentError::MissingFragment { name: name.clone() })
        })
        .collect()
}

struct Collector<'t, 'a> {
    table: &'t FragmentTable<'a>,
    /// Fragments on the current expansion path
    expanding: Vec<String>,
    names: Vec<String>,
}

impl Collector<'_, '_> {
    fn operation(&mut self, operation: &OperationDefinition) -> Result<()> {
        for selection in &operation.selection_set.selections {
            match selection {
                Selection::FragmentSpread(spread) => self.spread(&spread.name.value)?,
                Selection::Field(field) => {
                    let Some(selection_set) = &field.selection_set else {
                        continue;
                    };
                    for nested in &selection_set.selections {
                        if let Selection::FragmentSpread(spread) = nested {
                            self.spread(&spread.name.value)?;
                        }
                    }
                }
                Selection::InlineFragment(_) => {}
            }
        }
        Ok(())
    }

    fn fragment(&mut self, fragment: &FragmentDefinition) -> Result<()> {
        for selection in &fragment.selection_set.selections {
            if let Selection::FragmentSpread(spread) = selection {
                self.spread(&spread.name.value)?;
            }
        }
        Ok(())
    }

    fn spread(&mut self, name: &str) -> Result<()> {
        let fragment = self
            .table
            .get(name)
            .ok_or_else(|| DocumentError::MissingFragment {
                name: name.to_string(),
            })?;

        if self.expanding.iter().any(|open| open == name) {
            return Err(DocumentError::FragmentCycle {
                name: name.to_string(),
            });
        }

        self.expanding.push(name.to_string());
        self.fragment(fragment)?;
        self.expanding.pop();

        self.names.push(name.to_string());
        Ok(())
    }
}
