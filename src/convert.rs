//! XML to container conversion engine

use indexmap::IndexMap;
use roxmltree::{Document, Node};

use crate::options::{ForceArray, Options};
use crate::value::{Container, Name, Value};

/// Key holding the text of an attribute-bearing, child-less element.
pub const CONTENT_KEY: &str = "content";

/// Convert a parsed XML document into its root value.
///
/// Total over well-formed trees: malformed input is rejected by the parser
/// before this runs, and any [`Options`] value is legal. The root element
/// converts like any other and is returned directly; only an explicit
/// [`ForceArray::Tags`] entry naming the root's own tag wraps the result in
/// a one-element sequence.
pub fn convert(doc: &Document<'_>, options: &Options) -> Value {
    let root = doc.root_element();
    let root_tag = root.tag_name().name().to_string();
    let value = element_to_value(root, options);

    match &options.force_array {
        ForceArray::Tags(_) if options.force_array.forces(&root_tag) => {
            Value::Sequence(vec![value].into())
        }
        _ => value,
    }
}

fn element_to_value(node: Node<'_, '_>, options: &Options) -> Value {
    let has_attributes = node.attributes().next().is_some();
    let child_elements: Vec<Node<'_, '_>> =
        node.children().filter(|child| child.is_element()).collect();
    let text = element_text(node);

    // Leaf shortcut: an element with no attributes and no child elements is
    // just its text. Attributes win over the shortcut even under no_attr.
    if !has_attributes && child_elements.is_empty() {
        return Value::Text(text.unwrap_or_default());
    }

    let mut container = Container::new();

    if !options.no_attr {
        for attribute in node.attributes() {
            container.insert(attribute.name(), Value::Text(attribute.value().to_string()));
            if options.attr_prefix {
                container.insert_alias(format!("@{}", attribute.name()), attribute.name());
            }
        }
    }

    if child_elements.is_empty() {
        if let Some(text) = text {
            container.insert(CONTENT_KEY, Value::Text(text));
        }
        return Value::Container(container);
    }

    // Group direct children by tag, case-insensitively, keeping first-seen
    // order of distinct tags and document order within each group. Text
    // mixed between child elements is dropped.
    let mut groups: IndexMap<Name, Vec<Value>> = IndexMap::new();
    for child in child_elements {
        groups
            .entry(Name::new(child.tag_name().name()))
            .or_default()
            .push(element_to_value(child, options));
    }

    for (name, mut values) in groups {
        let tag = name.into_string();
        let value = if values.len() > 1 || options.force_array.forces(&tag) {
            Value::Sequence(values.into())
        } else {
            match values.pop() {
                Some(single) => single,
                None => continue,
            }
        };
        container.insert(tag, value);
    }

    Value::Container(container)
}

/// Concatenated direct text of `node`, trimmed; `None` when absent or
/// whitespace-only.
fn element_text(node: Node<'_, '_>) -> Option<String> {
    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            if let Some(chunk) = child.text() {
                text.push_str(chunk);
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn convert_str(xml: &str, options: &Options) -> Result<Value> {
        let doc = Document::parse(xml)?;
        Ok(convert(&doc, options))
    }

    #[test]
    fn test_text_only_element_is_a_string() -> Result<()> {
        let value = convert_str("<Street>27100 164th Ave. S.E.</Street>", &Options::default())?;
        assert_eq!(value.as_text(), Some("27100 164th Ave. S.E."));
        Ok(())
    }

    #[test]
    fn test_empty_element_is_empty_text() -> Result<()> {
        let value = convert_str("<Empty/>", &Options::default())?;
        assert_eq!(value.as_text(), Some(""));
        Ok(())
    }

    #[test]
    fn test_attributes_become_keys() -> Result<()> {
        let value = convert_str(r#"<Book Title="T1" Author="A1"/>"#, &Options::default())?;
        assert_eq!(value["Title"].as_text(), Some("T1"));
        assert_eq!(value["author"].as_text(), Some("A1"));
        assert!(!value.contains_key("@Title"));
        Ok(())
    }

    #[test]
    fn test_attr_prefix_adds_alias_to_same_value() -> Result<()> {
        let options = Options {
            attr_prefix: true,
            ..Options::default()
        };
        let value = convert_str(r#"<Book Title="T1"/>"#, &options)?;
        assert_eq!(value["@Title"].as_text(), Some("T1"));
        assert!(std::ptr::eq(&value["Title"], &value["@title"]));
        Ok(())
    }

    #[test]
    fn test_no_attr_leaves_attributes_unreachable() -> Result<()> {
        let options = Options {
            no_attr: true,
            ..Options::default()
        };
        let value = convert_str(r#"<Book Title="T1"/>"#, &options)?;
        assert!(value.is_container());
        assert!(!value.contains_key("Title"));
        assert!(value.get("Title").is_err());
        Ok(())
    }

    #[test]
    fn test_text_with_attributes_uses_content_key() -> Result<()> {
        let value = convert_str(r#"<Note Lang="en">hello</Note>"#, &Options::default())?;
        assert_eq!(value["Lang"].as_text(), Some("en"));
        assert_eq!(value[CONTENT_KEY].as_text(), Some("hello"));
        Ok(())
    }

    #[test]
    fn test_single_child_stays_bare() -> Result<()> {
        let value = convert_str("<Root><Child>x</Child></Root>", &Options::default())?;
        assert_eq!(value["Child"].as_text(), Some("x"));
        Ok(())
    }

    #[test]
    fn test_repeated_children_fold_in_document_order() -> Result<()> {
        let value = convert_str("<Root><A>1</A><B>x</B><A>2</A></Root>", &Options::default())?;
        let container = value.as_container().ok_or_else(sanity)?;
        let keys: Vec<_> = container.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);

        let group = value["A"].as_sequence().ok_or_else(sanity)?;
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].as_text(), Some("1"));
        assert_eq!(group[1].as_text(), Some("2"));
        Ok(())
    }

    #[test]
    fn test_mixed_case_siblings_group_together() -> Result<()> {
        let value = convert_str("<Root><Book>a</Book><book>b</book></Root>", &Options::default())?;
        let container = value.as_container().ok_or_else(sanity)?;
        assert_eq!(container.len(), 1);
        assert_eq!(container.keys().collect::<Vec<_>>(), vec!["Book"]);

        let group = value["BOOK"].as_sequence().ok_or_else(sanity)?;
        assert_eq!(group.len(), 2);
        Ok(())
    }

    #[test]
    fn test_force_array_all_wraps_recursively() -> Result<()> {
        let options = Options {
            force_array: ForceArray::All,
            ..Options::default()
        };
        let value = convert_str("<Root><A><B>x</B></A></Root>", &options)?;
        assert!(value.is_container());
        assert!(value["A"].is_sequence());
        assert!(value["A"][0]["B"].is_sequence());
        assert_eq!(value["A"][0]["B"][0].as_text(), Some("x"));
        Ok(())
    }

    #[test]
    fn test_force_array_all_leaves_attributes_bare() -> Result<()> {
        let options = Options {
            force_array: ForceArray::All,
            ..Options::default()
        };
        let value = convert_str(r#"<Root Name="n"><A>x</A></Root>"#, &options)?;
        assert_eq!(value["Name"].as_text(), Some("n"));
        assert!(value["A"].is_sequence());
        Ok(())
    }

    #[test]
    fn test_force_array_tags_only_wraps_named() -> Result<()> {
        let options = Options {
            force_array: ForceArray::tags(["Zip"]),
            ..Options::default()
        };
        let value = convert_str("<Root><Street>s</Street><Zip>98042</Zip></Root>", &options)?;
        assert!(value["Street"].is_text());
        let zips = value["Zip"].as_sequence().ok_or_else(sanity)?;
        assert_eq!(zips[0].as_text(), Some("98042"));
        Ok(())
    }

    #[test]
    fn test_named_root_tag_wraps_root() -> Result<()> {
        let options = Options {
            force_array: ForceArray::tags(["Root"]),
            ..Options::default()
        };
        let value = convert_str("<Root><A>x</A></Root>", &options)?;
        let wrapped = value.as_sequence().ok_or_else(sanity)?;
        assert_eq!(wrapped.len(), 1);
        assert_eq!(wrapped[0]["A"].as_text(), Some("x"));
        Ok(())
    }

    #[test]
    fn test_all_does_not_wrap_root() -> Result<()> {
        let options = Options {
            force_array: ForceArray::All,
            ..Options::default()
        };
        let value = convert_str("<Root><A>x</A></Root>", &options)?;
        assert!(value.is_container());
        Ok(())
    }

    #[test]
    fn test_child_element_wins_attribute_collision() -> Result<()> {
        let value = convert_str(r#"<Root Name="attr"><name>child</name></Root>"#, &Options::default())?;
        let container = value.as_container().ok_or_else(sanity)?;
        assert_eq!(container.len(), 1);
        assert_eq!(value["NAME"].as_text(), Some("child"));
        Ok(())
    }

    #[test]
    fn test_whitespace_only_text_is_ignored() -> Result<()> {
        let value = convert_str("<Root>\n  <A>x</A>\n</Root>", &Options::default())?;
        assert!(value.is_container());
        assert_eq!(value["A"].as_text(), Some("x"));
        Ok(())
    }

    #[test]
    fn test_text_mixed_with_children_is_dropped() -> Result<()> {
        let value = convert_str("<Root>hi<A>x</A></Root>", &Options::default())?;
        let container = value.as_container().ok_or_else(sanity)?;
        assert_eq!(container.keys().collect::<Vec<_>>(), vec!["A"]);
        Ok(())
    }

    fn sanity() -> crate::error::Error {
        crate::error::Error::MissingMember("unexpected value shape".to_string())
    }
}
