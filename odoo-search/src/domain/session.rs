use std::fmt;

use crate::xmlrpc::Value;

/// The opaque identifier `authenticate` hands back (Odoo's `uid`).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionId(Value);

impl SessionId {
    /// Odoo answers rejected credentials with `false` instead of a fault.
    pub fn from_response(value: Value) -> Option<Self> {
        match value {
            Value::Bool(false) | Value::Nil | Value::Array(_) | Value::Struct(_) => None,
            scalar => Some(Self(scalar)),
        }
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Int(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other:?}"),
        }
    }
}
