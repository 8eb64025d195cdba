use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::domain::Service;
use crate::error::Result;
use crate::ports::RpcTransport;
use crate::xmlrpc::{self, Value};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// XML-RPC over HTTP POST.
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, service: Service, method: &str, params: Vec<Value>) -> Result<Value> {
        let endpoint = service.endpoint(&self.base)?;
        let body = xmlrpc::encode_call(method, &params);
        tracing::debug!(%endpoint, method, "sending XML-RPC request");

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        xmlrpc::decode_response(&text)?.into_result()
    }
}
