use adm_core::{invalid_value, parse_timecode, AdmError, SourceSpan, Time};
use adm_xml::XmlElementNode;

pub(crate) fn required_attr(node: &XmlElementNode, name: &str) -> Result<String, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(raw.to_string()),
        None => Err(AdmError::with_span(
            "XML_MISSING_ATTR",
            format!("Missing required attribute \"{}\" on <{}>.", name, node.name),
            node.location.clone(),
        )),
    }
}

pub(crate) fn optional_attr(node: &XmlElementNode, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

pub(crate) fn missing_element(node: &XmlElementNode, name: &str) -> AdmError {
    AdmError::with_span(
        "XML_MISSING_ELEMENT",
        format!("Missing required element <{}> under <{}>.", name, node.name),
        node.location.clone(),
    )
}

pub(crate) fn decode_bool(raw: &str, field: &str, span: &SourceSpan) -> Result<bool, AdmError> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(invalid_value(field, raw, span.clone())),
    }
}

pub(crate) fn decode_f64(raw: &str, field: &str, span: &SourceSpan) -> Result<f64, AdmError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid_value(field, raw, span.clone()))
}

pub(crate) fn decode_i32(raw: &str, field: &str, span: &SourceSpan) -> Result<i32, AdmError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid_value(field, raw, span.clone()))
}

pub(crate) fn decode_u16(raw: &str, field: &str, span: &SourceSpan) -> Result<u16, AdmError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid_value(field, raw, span.clone()))
}

pub(crate) fn decode_u32(raw: &str, field: &str, span: &SourceSpan) -> Result<u32, AdmError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid_value(field, raw, span.clone()))
}

pub(crate) fn optional_bool_attr(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<bool>, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(Some(decode_bool(raw, name, &node.location)?)),
        None => Ok(None),
    }
}

pub(crate) fn optional_f64_attr(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<f64>, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(Some(decode_f64(raw, name, &node.location)?)),
        None => Ok(None),
    }
}

pub(crate) fn optional_i32_attr(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<i32>, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(Some(decode_i32(raw, name, &node.location)?)),
        None => Ok(None),
    }
}

pub(crate) fn optional_u32_attr(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<u32>, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(Some(decode_u32(raw, name, &node.location)?)),
        None => Ok(None),
    }
}

pub(crate) fn optional_timecode_attr(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<Time>, AdmError> {
    match node.attribute(name) {
        Some(raw) => Ok(Some(
            parse_timecode(raw).map_err(|error| error.at(node.location.clone()))?,
        )),
        None => Ok(None),
    }
}

pub(crate) fn bool_content(node: &XmlElementNode) -> Result<bool, AdmError> {
    decode_bool(&node.text_content(), &node.name, &node.location)
}

pub(crate) fn f64_content(node: &XmlElementNode) -> Result<f64, AdmError> {
    decode_f64(&node.text_content(), &node.name, &node.location)
}

pub(crate) fn i32_content(node: &XmlElementNode) -> Result<i32, AdmError> {
    decode_i32(&node.text_content(), &node.name, &node.location)
}

pub(crate) fn optional_bool_element(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<bool>, AdmError> {
    node.find_element(name).map(bool_content).transpose()
}

pub(crate) fn optional_f64_element(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<f64>, AdmError> {
    node.find_element(name).map(f64_content).transpose()
}

pub(crate) fn optional_i32_element(
    node: &XmlElementNode,
    name: &str,
) -> Result<Option<i32>, AdmError> {
    node.find_element(name).map(i32_content).transpose()
}

pub(crate) fn optional_string_element(node: &XmlElementNode, name: &str) -> Option<String> {
    node.find_element(name)
        .map(|child| child.text_content().trim().to_string())
}
