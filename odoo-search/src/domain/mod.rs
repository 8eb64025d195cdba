pub mod filter;
pub mod query;
pub mod service;
pub mod session;

pub use filter::Domain;
pub use query::{DEFAULT_DATABASE, DEFAULT_URL, QueryConfig};
pub use service::Service;
pub use session::SessionId;
