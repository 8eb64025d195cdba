use std::sync::Arc;

use serde_json::Value as Json;

use crate::domain::{QueryConfig, Service, SessionId};
use crate::error::{OdooSearchError, Result};
use crate::ports::RpcTransport;
use crate::xmlrpc::Value;

pub struct SearchService<T: RpcTransport> {
    transport: Arc<T>,
}

impl<T: RpcTransport> SearchService<T> {
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Authenticates, then runs `search_read`. The query is never sent if
    /// authentication fails.
    pub async fn run(&self, config: &QueryConfig) -> Result<Json> {
        let session = self.authenticate(config).await?;
        self.search_read(config, &session).await
    }

    pub async fn authenticate(&self, config: &QueryConfig) -> Result<SessionId> {
        tracing::debug!(
            database = %config.database,
            username = %config.username,
            "authenticating"
        );

        let params = vec![
            Value::string(&config.database),
            Value::string(&config.username),
            Value::string(config.password()),
            Value::empty_struct(),
        ];
        let uid = self
            .transport
            .call(Service::Common, "authenticate", params)
            .await?;

        let session =
            SessionId::from_response(uid).ok_or_else(|| OdooSearchError::AuthenticationFailed {
                username: config.username.clone(),
                database: config.database.clone(),
            })?;
        tracing::debug!(uid = %session, "authenticated");
        Ok(session)
    }

    pub async fn search_read(&self, config: &QueryConfig, session: &SessionId) -> Result<Json> {
        let mut options = Vec::new();
        if let Some(fields) = &config.fields {
            options.push((
                "fields".to_string(),
                Value::Array(fields.iter().map(Value::string).collect()),
            ));
        }

        let params = vec![
            Value::string(&config.database),
            session.as_value().clone(),
            Value::string(config.password()),
            Value::string(&config.object),
            Value::string("search_read"),
            Value::Array(vec![config.domain.to_value()]),
            Value::Struct(options),
        ];

        tracing::debug!(
            object = %config.object,
            clauses = config.domain.clauses().len(),
            "running search_read"
        );
        let records = self
            .transport
            .call(Service::Object, "execute_kw", params)
            .await?;

        if let Some(items) = records.as_array() {
            tracing::info!(object = %config.object, count = items.len(), "records fetched");
        }
        Ok(Json::from(records))
    }
}
