//! Owned XML element tree for decoded request bodies.

use crate::base::error::CodecError;

/// An XML element with its attributes, direct text, and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated direct text content (not including descendants).
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    ///
    /// DTDs are rejected, so entity expansion cannot be triggered by request
    /// bodies.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        let document =
            roxmltree::Document::parse(input).map_err(|e| CodecError::body_parse("xml", e))?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = XmlElement {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            ..XmlElement::default()
        };

        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    element.text.push_str(text);
                }
            }
        }

        element
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_elements() {
        let root = XmlElement::parse(
            "<books><book><id>1</id><author>Clive Cussler</author></book></books>",
        )
        .unwrap();
        assert_eq!(root.name, "books");
        let author = root.child("book").and_then(|b| b.child("author")).unwrap();
        assert_eq!(author.text(), "Clive Cussler");
    }

    #[test]
    fn test_attributes_and_repeated_children() {
        let root = XmlElement::parse(r#"<list kind="a"><item>1</item><item>2</item></list>"#).unwrap();
        assert_eq!(root.attribute("kind"), Some("a"));
        assert_eq!(root.children_named("item").count(), 2);
        assert!(root.attribute("missing").is_none());
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let result = XmlElement::parse("<books><book><id>1</id><author>Clive Cussler</book></books>");
        assert!(matches!(result, Err(CodecError::BodyParse { media_type: "xml", .. })));
    }

    #[test]
    fn test_dtd_rejected() {
        let input = r#"<?xml version="1.0"?><!DOCTYPE x [<!ENTITY e "boom">]><x>&e;</x>"#;
        assert!(XmlElement::parse(input).is_err());
    }
}
