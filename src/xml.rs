//! Tree helpers over a [`xot::Xot`] arena.
//!
//! Every accessor on [`crate::document::ConfigDocument`] goes through these
//! functions. They take the tree explicitly and only look at direct children,
//! which is all the descriptor layout needs.

use xot::output::xml::Parameters;
use xot::output::Indentation;
use xot::{NameId, Node, Xot};
use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::error::{Error, Result};

/// Whether `node` is an element called `name` (no namespace).
pub(crate) fn is_element_named(xot: &Xot, node: Node, name: &str) -> bool {
    match (xot.element(node), xot.name(name)) {
        (Some(element), Some(name_id)) => element.name() == name_id,
        _ => false,
    }
}

/// Direct child elements of `parent` called `name`, in document order.
pub(crate) fn children_named(xot: &Xot, parent: Node, name: &str) -> Vec<Node> {
    xot.children(parent)
        .filter(|&child| is_element_named(xot, child, name))
        .collect()
}

/// The last direct child element of `parent` called `name`.
pub(crate) fn last_child(xot: &Xot, parent: Node, name: &str) -> Option<Node> {
    children_named(xot, parent, name).pop()
}

/// The last child called `name`, appending a new empty one if none exists.
pub(crate) fn ensure_child(xot: &mut Xot, parent: Node, name: &str) -> Result<Node> {
    if let Some(node) = last_child(xot, parent, name) {
        return Ok(node);
    }
    append_element(xot, parent, name)
}

/// Append a new empty element called `name` to `parent`.
pub(crate) fn append_element(xot: &mut Xot, parent: Node, name: &str) -> Result<Node> {
    let name_id = xot.add_name(name);
    let node = xot.new_element(name_id);
    xot.append(parent, node).map_err(Error::xml)?;
    Ok(node)
}

/// The first direct child called `name` whose `attr` equals `value`.
pub(crate) fn child_with_attribute(
    xot: &Xot,
    parent: Node,
    name: &str,
    attr: &str,
    value: &str,
) -> Option<Node> {
    children_named(xot, parent, name)
        .into_iter()
        .find(|&child| attribute(xot, child, attr).as_deref() == Some(value))
}

pub(crate) fn attribute(xot: &Xot, node: Node, name: &str) -> Option<String> {
    let name_id = xot.name(name)?;
    xot.attributes(node).get(name_id).map(|value| value.to_string())
}

pub(crate) fn set_attribute(xot: &mut Xot, node: Node, name: &str, value: &str) {
    let name_id = xot.add_name(name);
    xot.attributes_mut(node).insert(name_id, value.to_string());
}

pub(crate) fn remove_attribute(xot: &mut Xot, node: Node, name: &str) {
    if let Some(name_id) = xot.name(name) {
        xot.attributes_mut(node).remove(name_id);
    }
}

/// Concatenated text of the direct text children of `node`.
pub(crate) fn text(xot: &Xot, node: Node) -> String {
    xot.children(node)
        .filter_map(|child| xot.text_str(child))
        .collect()
}

/// Replace all children of `node` with a single text node.
pub(crate) fn set_text(xot: &mut Xot, node: Node, value: &str) -> Result<()> {
    remove_children(xot, node)?;
    if !value.is_empty() {
        xot.append_text(node, value).map_err(Error::xml)?;
    }
    Ok(())
}

pub(crate) fn remove_children(xot: &mut Xot, node: Node) -> Result<()> {
    let children: Vec<Node> = xot.children(node).collect();
    for child in children {
        xot.remove(child).map_err(Error::xml)?;
    }
    Ok(())
}

/// Drop whitespace-only text nodes that sit between elements so the pretty
/// printer owns indentation. A blank value such as `<name> </name>` has no
/// element sibling and is kept.
pub(crate) fn strip_whitespace(xot: &mut Xot, node: Node) -> Result<()> {
    let blanks: Vec<Node> = xot
        .descendants(node)
        .filter(|&n| xot.text_str(n).is_some_and(|t| t.trim().is_empty()))
        .filter(|&n| has_element_sibling(xot, n))
        .collect();
    for blank in blanks {
        xot.remove(blank).map_err(Error::xml)?;
    }
    Ok(())
}

fn has_element_sibling(xot: &Xot, node: Node) -> bool {
    xot.parent(node)
        .is_some_and(|parent| xot.children(parent).any(|child| xot.is_element(child)))
}

/// Names of the elements in `xot` whose text was written as CDATA in
/// `source`.
///
/// The tree does not remember CDATA sections, so the source is tokenized
/// again. Elements are matched by local name.
pub(crate) fn cdata_elements(xot: &Xot, doc: Node, source: &str) -> Vec<NameId> {
    let mut stack: Vec<&str> = Vec::new();
    let mut locals: Vec<&str> = Vec::new();
    for token in Tokenizer::from(source) {
        let Ok(token) = token else { break };
        match token {
            Token::ElementStart { local, .. } => stack.push(local.as_str()),
            Token::ElementEnd {
                end: ElementEnd::Empty | ElementEnd::Close(..),
                ..
            } => {
                stack.pop();
            }
            Token::Cdata { .. } => {
                if let Some(&local) = stack.last() {
                    if !locals.contains(&local) {
                        locals.push(local);
                    }
                }
            }
            _ => {}
        }
    }
    if locals.is_empty() {
        return Vec::new();
    }

    let mut names = Vec::new();
    for node in xot.descendants(doc) {
        if let Some(element) = xot.element(node) {
            let name = element.name();
            if locals.contains(&xot.local_name_str(name)) && !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Serialize `node` with indentation, writing the text of `cdata` elements
/// as CDATA sections.
pub(crate) fn to_pretty_string(xot: &Xot, node: Node, cdata: &[NameId]) -> Result<String> {
    let parameters = Parameters {
        indentation: Some(Indentation::default()),
        cdata_section_elements: cdata.to_vec(),
        ..Default::default()
    };
    xot.serialize_xml_string(parameters, node)
        .map_err(Error::xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> (Xot, Node) {
        let mut xot = Xot::new();
        let doc = xot.parse(xml).unwrap();
        let root = xot.document_element(doc).unwrap();
        (xot, root)
    }

    #[test]
    fn test_last_child_picks_last_match() {
        let (xot, root) = parse("<ti:app xmlns:ti=\"urn:ti\"><id>a</id><id>b</id></ti:app>");
        let node = last_child(&xot, root, "id").unwrap();
        assert_eq!(text(&xot, node), "b");
        assert!(last_child(&xot, root, "name").is_none());
    }

    #[test]
    fn test_ensure_child_creates_once() {
        let (mut xot, root) = parse("<app/>");
        let first = ensure_child(&mut xot, root, "modules").unwrap();
        let second = ensure_child(&mut xot, root, "modules").unwrap();
        assert_eq!(first, second);
        assert_eq!(children_named(&xot, root, "modules").len(), 1);
    }

    #[test]
    fn test_child_with_attribute() {
        let (xot, root) = parse(
            r#"<app><target device="android">true</target><target device="ios">false</target></app>"#,
        );
        let ios = child_with_attribute(&xot, root, "target", "device", "ios").unwrap();
        assert_eq!(text(&xot, ios), "false");
        assert!(child_with_attribute(&xot, root, "target", "device", "web").is_none());
    }

    #[test]
    fn test_set_text_replaces_children() {
        let (mut xot, root) = parse("<app><name>old<!-- note --></name></app>");
        let name = last_child(&xot, root, "name").unwrap();
        set_text(&mut xot, name, "new").unwrap();
        assert_eq!(text(&xot, name), "new");
        assert_eq!(xot.children(name).count(), 1);
    }

    #[test]
    fn test_attribute_roundtrip() {
        let (mut xot, root) = parse("<app><module>foo</module></app>");
        let module = last_child(&xot, root, "module").unwrap();
        assert_eq!(attribute(&xot, module, "version"), None);
        set_attribute(&mut xot, module, "version", "1.0");
        assert_eq!(attribute(&xot, module, "version").as_deref(), Some("1.0"));
        remove_attribute(&mut xot, module, "version");
        assert_eq!(attribute(&xot, module, "version"), None);
    }

    #[test]
    fn test_strip_whitespace_keeps_content() {
        let (mut xot, root) = parse("<app>\n  <id> com.example </id>\n  <x/>\n</app>");
        strip_whitespace(&mut xot, root).unwrap();
        assert_eq!(xot.children(root).count(), 2);
        let id = last_child(&xot, root, "id").unwrap();
        assert_eq!(text(&xot, id), " com.example ");
    }

    #[test]
    fn test_strip_whitespace_keeps_blank_values() {
        let (mut xot, root) = parse("<app>\n  <name> </name>\n  <publisher>\n\t</publisher>\n</app>");
        strip_whitespace(&mut xot, root).unwrap();
        assert_eq!(xot.children(root).count(), 2);
        let name = last_child(&xot, root, "name").unwrap();
        assert_eq!(text(&xot, name), " ");
        let publisher = last_child(&xot, root, "publisher").unwrap();
        assert_eq!(text(&xot, publisher), "\n\t");
    }

    #[test]
    fn test_cdata_elements_found_by_local_name() {
        let source = "<app><plist><string><![CDATA[a < b]]></string></plist><name>x</name></app>";
        let mut xot = Xot::new();
        let doc = xot.parse(source).unwrap();
        let names = cdata_elements(&xot, doc, source);
        assert_eq!(names.len(), 1);
        assert_eq!(xot.local_name_str(names[0]), "string");
    }

    #[test]
    fn test_cdata_elements_empty_without_cdata() {
        let source = "<app><name>x</name></app>";
        let mut xot = Xot::new();
        let doc = xot.parse(source).unwrap();
        assert!(cdata_elements(&xot, doc, source).is_empty());
    }

    #[test]
    fn test_to_pretty_string_writes_cdata() {
        let source = "<app><string><![CDATA[a < b & c]]></string></app>";
        let mut xot = Xot::new();
        let doc = xot.parse(source).unwrap();
        let cdata = cdata_elements(&xot, doc, source);
        let out = to_pretty_string(&xot, doc, &cdata).unwrap();
        assert!(out.contains("<string><![CDATA[a < b & c]]></string>"));
    }
}
