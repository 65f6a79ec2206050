//! Body decoding shared by the body visitors and the fallback parser.

use quick_xml::{Reader, events::Event};
use serde_json::Value;
use wirecast_core::Response;

use crate::{Error, Fields, Result};

/// Key under which element attributes are stored.
pub const XML_ATTRIBUTES_KEY: &str = "@attributes";
/// Key under which the text of an element with children is stored.
pub const XML_TEXT_KEY: &str = "#text";

/// Decode a JSON body. An empty (or blank) body decodes to `None`.
pub(crate) fn json_body(response: &Response) -> Result<Option<Value>> {
    if response.body().iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(response.body())?))
}

/// Decode an XML body. An empty (or blank) body decodes to `None`.
pub(crate) fn xml_body(response: &Response) -> Result<Option<Value>> {
    let text = response.body_text();
    if text.trim().is_empty() {
        return Ok(None);
    }
    xml_document(&text).map(Some)
}

/// An element being read.
struct Element {
    name: String,
    attributes: Fields,
    children: Fields,
    text: String,
}

impl Element {
    fn finish(self) -> (String, Value) {
        if self.children.is_empty() && self.attributes.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut fields = self.children;
        if !self.attributes.is_empty() {
            fields.insert(
                XML_ATTRIBUTES_KEY.to_string(),
                Value::Object(self.attributes),
            );
        }
        if !self.text.is_empty() {
            fields.insert(XML_TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(fields))
    }
}

/// Convert an XML document into a JSON value describing its root element.
///
/// Elements without children or attributes become strings, other elements
/// become objects keyed by child name. Repeated children are collected into
/// a list.
pub(crate) fn xml_document(text: &str) -> Result<Value> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(open(&start)?),
            Event::Empty(start) => {
                let (name, value) = open(&start)?.finish();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| Error::Xml {
                    message: "unexpected closing tag".to_string(),
                })?;
                let (name, value) = element.finish();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Text(text) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(element) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = stack.last() {
        return Err(Error::Xml {
            message: format!("unclosed element '{}'", element.name),
        });
    }

    root.ok_or_else(|| Error::Xml {
        message: "document has no root element".to_string(),
    })
}

fn open(start: &quick_xml::events::BytesStart<'_>) -> Result<Element> {
    let mut attributes = Fields::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(key, Value::String(value));
    }

    Ok(Element {
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        children: Fields::new(),
        text: String::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Value>,
    name: String,
    value: Value,
) -> Result<()> {
    let Some(parent) = stack.last_mut() else {
        if root.is_some() {
            return Err(Error::Xml {
                message: format!("multiple root elements (second is '{name}')"),
            });
        }
        *root = Some(value);
        return Ok(());
    };

    match parent.children.get_mut(&name) {
        // Decoded elements are never lists themselves, so a list here means
        // the name was already repeated.
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.children.insert(name, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_xml_document_nested_and_repeated() {
        let value = xml_document(
            r#"<?xml version="1.0"?>
            <users total="2">
                <user><id>1</id><name>Ada</name></user>
                <user><id>2</id><name>Grace &amp; co</name></user>
            </users>"#,
        )
        .unwrap();

        assert_eq!(
            value,
            json!({
                "user": [
                    { "id": "1", "name": "Ada" },
                    { "id": "2", "name": "Grace & co" }
                ],
                "@attributes": { "total": "2" }
            })
        );
    }

    #[test]
    fn test_xml_document_text_and_empty_elements() {
        let value = xml_document("<a><b/><c><![CDATA[x<y]]></c>tail</a>").unwrap();
        assert_eq!(value, json!({ "b": "", "c": "x<y", "#text": "tail" }));
    }

    #[test]
    fn test_xml_document_scalar_root() {
        assert_eq!(xml_document("<ok>yes</ok>").unwrap(), json!("yes"));
    }

    #[test]
    fn test_xml_document_errors() {
        assert!(matches!(xml_document("<a><b></a>"), Err(Error::Xml { .. })));
        assert!(matches!(xml_document("<a>"), Err(Error::Xml { .. })));
        assert!(matches!(xml_document("just text"), Err(Error::Xml { .. })));
        assert!(matches!(xml_document("<a/><b/>"), Err(Error::Xml { .. })));

        match xml_document("<x><a>1</a></x><y><a>2</a></y>") {
            Err(Error::Xml { message }) => assert!(message.contains("multiple root elements")),
            other => panic!("expected an XML error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_bodies_decode_to_none() {
        let response = Response::new(StatusCode::OK).with_body("  \n");
        assert!(json_body(&response).unwrap().is_none());
        assert!(xml_body(&response).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_body() {
        let response = Response::new(StatusCode::OK).with_body("{nope");
        assert!(matches!(json_body(&response), Err(Error::Json(_))));
    }
}
