//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! A field's annotations are an ordered table of `name = "value"` pairs, the
//! same shape as a struct tag. The derive does not interpret the names: which
//! one holds the lookup key, the default, or the documentation text is decided
//! at runtime by the loader's tag configuration.

use syn::{Field, LitStr};

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Annotation pairs in declaration order, across all `#[conf]` attributes.
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    /// Extract `#[conf(...)]` annotations from a struct field.
    ///
    /// Attributes with other paths are left for other macros. A repeated name
    /// keeps its first value, matching how the runtime looks tags up.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let name = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.to_string())
                    .ok_or_else(|| meta.error("expected a plain annotation name"))?;

                let value: LitStr = meta
                    .value()
                    .map_err(|_| meta.error(format!("`{name}` needs a string value")))?
                    .parse()?;

                if !attrs.tags.iter().any(|(existing, _)| *existing == name) {
                    attrs.tags.push((name, value.value()));
                }
                Ok(())
            })?;
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_key_annotation() {
        let field: Field = parse_quote! {
            #[conf(env = "DATABASE_URL")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.tags,
            vec![("env".to_string(), "DATABASE_URL".to_string())]
        );
    }

    #[test]
    fn test_parse_multiple_annotations_keep_order() {
        let field: Field = parse_quote! {
            #[conf(env = "PORT,omitempty", default = "8080", description = "Listen port")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        let names: Vec<_> = attrs.tags.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["env", "default", "description"]);
        assert_eq!(attrs.tags[0].1, "PORT,omitempty");
    }

    #[test]
    fn test_parse_split_across_attributes() {
        let field: Field = parse_quote! {
            #[conf(env = "TIMEOUT")]
            #[conf(default = "5s")]
            pub timeout: std::time::Duration
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tags.len(), 2);
        assert_eq!(attrs.tags[1], ("default".to_string(), "5s".to_string()));
    }

    #[test]
    fn test_repeated_name_keeps_first() {
        let field: Field = parse_quote! {
            #[conf(env = "FIRST", env = "SECOND")]
            pub value: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tags, vec![("env".to_string(), "FIRST".to_string())]);
    }

    #[test]
    fn test_custom_tag_name() {
        let field: Field = parse_quote! {
            #[conf(mapstructure = "BOOL_FIELD")]
            pub bool_field: bool
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tags[0].0, "mapstructure");
    }

    #[test]
    fn test_other_attributes_ignored() {
        let field: Field = parse_quote! {
            #[serde(rename = "x")]
            pub value: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.tags.is_empty());
    }

    #[test]
    fn test_non_string_value_is_error() {
        let field: Field = parse_quote! {
            #[conf(default = 42)]
            pub value: u32
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_flag_without_value_is_error() {
        let field: Field = parse_quote! {
            #[conf(omitempty)]
            pub value: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("omitempty"));
    }
}
