pub mod tree;

pub use tree::{parse_xml_document, XmlDocument, XmlElementNode, XmlNode, XmlTextNode};
