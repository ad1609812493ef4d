//! Documentation tree built from a config's annotations

use crate::field::{Config, FieldDescriptor, FieldInfo, TagNames};

/// One level of config documentation.
///
/// The root has an empty title; each nested config field becomes a child
/// group titled from its title annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTree {
    pub title: String,
    /// Keyed leaf fields, in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Nested groups, in declaration order
    pub groups: Vec<DocTree>,
}

impl DocTree {
    /// Create an empty root node
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty child group and return it.
    pub fn add_group(&mut self, title: impl Into<String>) -> &mut DocTree {
        self.groups.push(DocTree {
            title: title.into(),
            ..DocTree::default()
        });
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    /// Append a field to this node.
    pub fn add_field(&mut self, field: FieldDescriptor) -> &mut FieldDescriptor {
        self.fields.push(field);
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }
}

/// Walks a config's fields into a [`DocTree`] node.
///
/// Handed to [`Config::describe_fields`] by
/// [`Loader::build_doc`](crate::Loader::build_doc).
pub struct DocBuilder<'a> {
    names: &'a TagNames,
    node: &'a mut DocTree,
}

impl<'a> DocBuilder<'a> {
    pub(crate) fn new(names: &'a TagNames, node: &'a mut DocTree) -> Self {
        Self { names, node }
    }

    /// Record a leaf field. Fields without a key are not documented.
    pub fn field(&mut self, info: &FieldInfo) {
        let descriptor = FieldDescriptor::from_field(info, self.names);
        if !descriptor.key.is_empty() {
            self.node.add_field(descriptor);
        }
    }

    /// Record a nested config as a child group and describe its fields.
    pub fn group<T: Config>(&mut self, info: &FieldInfo) {
        let title = info.tag(&self.names.title).unwrap_or_default();
        let node = self.node.add_group(title);
        T::describe_fields(&mut DocBuilder::new(self.names, node));
    }
}
