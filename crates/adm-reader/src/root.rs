use adm_xml::XmlElementNode;

/// Strict locator: the document must be wrapped in the exact EBU-core chain
/// `ebuCoreMain` > `coreMetadata` > `format` > `audioFormatExtended`, with
/// exactly one matching child at every level. Any other count means "not
/// found", never an error by itself.
pub(crate) fn find_audio_format_extended_ebu_core(
    node: &XmlElementNode,
) -> Option<&XmlElementNode> {
    if node.name != "ebuCoreMain" {
        return None;
    }
    let core_metadata = exactly_one(node, "coreMetadata")?;
    let format = exactly_one(core_metadata, "format")?;
    exactly_one(format, "audioFormatExtended")
}

fn exactly_one<'a>(node: &'a XmlElementNode, name: &str) -> Option<&'a XmlElementNode> {
    let mut matches = node.find_elements(name);
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

/// Unrestricted locator: depth-first search for the first node named
/// `audioFormatExtended`, wherever it sits.
pub(crate) fn find_audio_format_extended_recursive(
    node: &XmlElementNode,
) -> Option<&XmlElementNode> {
    if node.name == "audioFormatExtended" {
        return Some(node);
    }
    node.element_children()
        .find_map(find_audio_format_extended_recursive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adm_xml::parse_xml_document;

    #[test]
    fn ebu_core_locator_walks_the_exact_wrapper_chain() {
        let source = r#"<ebuCoreMain>
  <coreMetadata>
    <format>
      <audioFormatExtended/>
    </format>
  </coreMetadata>
</ebuCoreMain>"#;
        let document = parse_xml_document(source).unwrap();
        let root = find_audio_format_extended_ebu_core(&document.root);
        assert_eq!(root.map(|node| node.name.as_str()), Some("audioFormatExtended"));
    }

    #[test]
    fn ebu_core_locator_rejects_wrong_top_node_and_counts() {
        let wrong_top = parse_xml_document(r#"<other><coreMetadata/></other>"#).unwrap();
        assert!(find_audio_format_extended_ebu_core(&wrong_top.root).is_none());

        let missing = parse_xml_document(r#"<ebuCoreMain/>"#).unwrap();
        assert!(find_audio_format_extended_ebu_core(&missing.root).is_none());

        let doubled = parse_xml_document(
            r#"<ebuCoreMain>
  <coreMetadata><format><audioFormatExtended/></format></coreMetadata>
  <coreMetadata><format><audioFormatExtended/></format></coreMetadata>
</ebuCoreMain>"#,
        )
        .unwrap();
        assert!(find_audio_format_extended_ebu_core(&doubled.root).is_none());

        let doubled_inner = parse_xml_document(
            r#"<ebuCoreMain>
  <coreMetadata><format><audioFormatExtended/><audioFormatExtended/></format></coreMetadata>
</ebuCoreMain>"#,
        )
        .unwrap();
        assert!(find_audio_format_extended_ebu_core(&doubled_inner.root).is_none());
    }

    #[test]
    fn recursive_locator_finds_the_first_match_anywhere() {
        let source = r#"<wrapper>
  <deeply><nested><audioFormatExtended id="first"/></nested></deeply>
  <audioFormatExtended id="second"/>
</wrapper>"#;
        let document = parse_xml_document(source).unwrap();
        let root = find_audio_format_extended_recursive(&document.root).unwrap();
        assert_eq!(root.attribute("id"), Some("first"));

        let absent = parse_xml_document(r#"<wrapper><other/></wrapper>"#).unwrap();
        assert!(find_audio_format_extended_recursive(&absent.root).is_none());
    }
}
