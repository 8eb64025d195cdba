//! Minimal XML-RPC codec covering the value types Odoo exchanges.

pub mod decode;
pub mod encode;
pub mod value;

pub use decode::{MethodResponse, decode_response};
pub use encode::encode_call;
pub use value::Value;
