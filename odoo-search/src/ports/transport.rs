use async_trait::async_trait;

use crate::domain::Service;
use crate::error::Result;
use crate::xmlrpc::Value;

#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invokes `method` on `service` and returns the decoded result.
    /// XML-RPC faults surface as `OdooSearchError::Fault`.
    async fn call(&self, service: Service, method: &str, params: Vec<Value>) -> Result<Value>;
}
