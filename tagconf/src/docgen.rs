//! Rendering a [`DocTree`] as a commented `.env` template

use std::io::{self, Write};

use crate::doc::DocTree;
use crate::field::FieldDescriptor;

const BANNER: &str = "#############################";

/// Consumes a documentation tree, typically writing it somewhere.
pub trait DocGenerator {
    /// Render the whole tree. The tree is not modified.
    fn generate(&mut self, doc: &DocTree) -> io::Result<()>;
}

/// Writes a `.env` template: one `KEY=value` line per field, preceded by
/// comments for the description, the default and the allow-empty flag, and
/// a banner per titled group.
///
/// The value on each line is the example value when one is annotated, the
/// default otherwise. The root node's title is not rendered.
///
/// ```
/// use tagconf::{DocGenerator, DocTree, EnvDocGenerator, FieldDescriptor};
///
/// let mut doc = DocTree::new();
/// doc.add_field(FieldDescriptor {
///     key: "PORT".into(),
///     default_value: "8080".into(),
///     ..FieldDescriptor::default()
/// });
///
/// let mut generator = EnvDocGenerator::new(Vec::new());
/// generator.generate(&doc).unwrap();
/// let output = String::from_utf8(generator.into_inner()).unwrap();
/// assert_eq!(output, "# Auto-generated config\n\n# Default: `8080`\nPORT=8080\n");
/// ```
#[derive(Debug)]
pub struct EnvDocGenerator<W> {
    writer: W,
}

impl<W: Write> EnvDocGenerator<W> {
    /// Render into the given writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_group(&mut self, group: &DocTree) -> io::Result<()> {
        writeln!(self.writer)?;

        if !group.title.is_empty() {
            write!(self.writer, "{}", banner(&group.title))?;
        }

        self.write_body(group)
    }

    fn write_body(&mut self, node: &DocTree) -> io::Result<()> {
        for field in &node.fields {
            self.write_field(field)?;
        }
        for group in &node.groups {
            self.write_group(group)?;
        }
        Ok(())
    }

    fn write_field(&mut self, field: &FieldDescriptor) -> io::Result<()> {
        writeln!(self.writer)?;

        if field.allow_empty {
            writeln!(self.writer, "# Allowed to be empty")?;
        }

        if !field.description.is_empty() {
            writeln!(self.writer, "# Description:")?;
            for line in field.description.split('\n') {
                writeln!(self.writer, "#  {line}")?;
            }
        }

        if !field.default_value.is_empty() {
            if !field.description.is_empty() {
                writeln!(self.writer, "#")?;
            }
            writeln!(self.writer, "# Default: `{}`", field.default_value)?;
        }

        if !field.key.is_empty() {
            let value = if field.example_value.is_empty() {
                &field.default_value
            } else {
                &field.example_value
            };
            writeln!(self.writer, "{}={}", field.key, value)?;
        }

        Ok(())
    }
}

impl<W: Write> DocGenerator for EnvDocGenerator<W> {
    fn generate(&mut self, doc: &DocTree) -> io::Result<()> {
        writeln!(self.writer, "# Auto-generated config")?;
        self.write_body(doc)?;
        self.writer.flush()
    }
}

fn banner(title: &str) -> String {
    format!("{BANNER}\n# {title}\n{BANNER}\n")
}
