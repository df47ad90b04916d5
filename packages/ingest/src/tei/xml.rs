//! Namespace-aware helpers for navigating TEI trees.
//!
//! Elements only match when their local name matches and they live in the
//! TEI namespace, so foreign markup embedded in a document is ignored.

use roxmltree::Node;

use crate::config::TEI_NAMESPACE;

/// Check if a node is a TEI element with the given local name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use refresher_ingest::tei::xml::is_tei;
///
/// let xml = r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><text/></TEI>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert!(is_tei(doc.root_element(), "TEI"));
/// assert!(!is_tei(doc.root_element(), "text"));
/// ```
pub fn is_tei(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == tag
        && node.tag_name().namespace() == Some(TEI_NAMESPACE)
}

/// Find the first TEI child element with the given name.
pub fn tei_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_tei(*child, tag))
}

/// Find all TEI child elements with the given name.
pub fn tei_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_tei(*child, tag))
}

/// Follow a slash-separated path of TEI child elements (e.g. "text/body").
pub fn find_tei_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for part in path.split('/') {
        current = tei_child(current, part)?;
    }
    Some(current)
}

/// Concatenate all descendant text, including text inside inline children.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use refresher_ingest::tei::xml::text_content;
///
/// let doc = Document::parse("<p>See <ref>Figure 1</ref> below.</p>").unwrap();
/// assert_eq!(text_content(doc.root_element()), "See Figure 1 below.");
/// ```
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Iterate over the text nodes directly below an element.
pub fn direct_texts<'a>(node: Node<'a, '_>) -> impl Iterator<Item = &'a str> {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
}
