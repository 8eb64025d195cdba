use quick_xml::Reader;
use quick_xml::events::Event;

use super::Value;
use crate::error::{OdooSearchError, Result};

/// Outcome of a `methodResponse`: either the single returned value or a fault.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Fault { code: Value, message: String },
}

impl MethodResponse {
    pub fn into_result(self) -> Result<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Fault { code, message } => Err(OdooSearchError::Fault {
                code: match code {
                    Value::Int(n) => n.to_string(),
                    Value::String(s) => s,
                    other => other.kind().to_string(),
                },
                message,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn only_child(&self, name: &str) -> Result<&Self> {
        self.children
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| malformed(format!("<{}> has no <{name}>", self.name)))
    }
}

fn malformed(msg: impl Into<String>) -> OdooSearchError {
    OdooSearchError::Xml(msg.into())
}

fn parse_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Element {
                name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ..Element::default()
            }),
            Event::Empty(e) => {
                let element = Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ..Element::default()
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("unbalanced closing tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document"));
    }
    root.ok_or_else(|| malformed("empty document"))
}

/// Parses the body of an XML-RPC response.
pub fn decode_response(xml: &str) -> Result<MethodResponse> {
    let root = parse_tree(xml)?;
    if root.name != "methodResponse" {
        return Err(malformed(format!(
            "expected <methodResponse>, found <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.children.iter().find(|c| c.name == "fault") {
        let value = decode_value(fault.only_child("value")?)?;
        let code = value.member("faultCode").cloned().unwrap_or(Value::Nil);
        let message = match value.member("faultString") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };
        return Ok(MethodResponse::Fault { code, message });
    }

    let value = root
        .only_child("params")?
        .only_child("param")?
        .only_child("value")?;
    decode_value(value).map(MethodResponse::Success)
}

fn decode_value(value: &Element) -> Result<Value> {
    let Some(typed) = value.children.first() else {
        // an untyped <value> is a string
        return Ok(Value::String(value.text.clone()));
    };

    let text = typed.text.as_str();
    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| malformed(format!("invalid integer {text:?}"))),
        "boolean" => match text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(malformed(format!("invalid boolean {other:?}"))),
        },
        "string" => Ok(Value::String(text.to_string())),
        "double" => text
            .trim()
            .parse()
            .map(Value::Double)
            .map_err(|_| malformed(format!("invalid double {text:?}"))),
        "dateTime.iso8601" => Ok(Value::DateTime(text.trim().to_string())),
        "base64" => Ok(Value::Base64(text.trim().to_string())),
        "nil" => Ok(Value::Nil),
        "array" => typed
            .only_child("data")?
            .children
            .iter()
            .filter(|c| c.name == "value")
            .map(decode_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        "struct" => typed
            .children
            .iter()
            .filter(|c| c.name == "member")
            .map(|member| -> Result<(String, Value)> {
                let name = member.only_child("name")?.text.clone();
                let value = decode_value(member.only_child("value")?)?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Struct),
        other => Err(malformed(format!("unknown value type <{other}>"))),
    }
}
