use quick_xml::escape::escape;

use super::Value;

/// Renders a complete `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from(r#"<?xml version="1.0"?><methodCall><methodName>"#);
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

fn push_tagged(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(n) => {
            let tag = if i32::try_from(*n).is_ok() { "int" } else { "i8" };
            push_tagged(out, tag, &n.to_string());
        }
        Value::Bool(b) => push_tagged(out, "boolean", if *b { "1" } else { "0" }),
        Value::String(s) => push_tagged(out, "string", &escape(s.as_str())),
        Value::Double(f) => push_tagged(out, "double", &f.to_string()),
        Value::DateTime(s) => push_tagged(out, "dateTime.iso8601", &escape(s.as_str())),
        Value::Base64(s) => push_tagged(out, "base64", &escape(s.as_str())),
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member>");
                push_tagged(out, "name", &escape(name.as_str()));
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}
