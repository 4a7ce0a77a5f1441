//! Sui JSON-RPC client.
//!
//! Raw JSON-RPC 2.0 over HTTP with `reqwest`. Only the three read methods
//! the read model needs are implemented.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use suitter_core::domain::ObjectId;
use suitter_core::pagination::{Cursor, Page};
use suitter_core::ports::{
    DynamicFieldInfo, DynamicFieldName, LedgerError, LedgerObject, LedgerReader,
};

use super::wire::{DynamicFieldPage, ObjectResponse, RpcEnvelope};

/// Sui network endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiNetwork {
    #[default]
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
}

impl SuiNetwork {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            SuiNetwork::Devnet => "https://fullnode.devnet.sui.io:443",
            SuiNetwork::Testnet => "https://fullnode.testnet.sui.io:443",
            SuiNetwork::Mainnet => "https://fullnode.mainnet.sui.io:443",
            SuiNetwork::Localnet => "http://127.0.0.1:9000",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SuiNetwork::Devnet => "devnet",
            SuiNetwork::Testnet => "testnet",
            SuiNetwork::Mainnet => "mainnet",
            SuiNetwork::Localnet => "localnet",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "devnet" => Some(SuiNetwork::Devnet),
            "testnet" => Some(SuiNetwork::Testnet),
            "mainnet" => Some(SuiNetwork::Mainnet),
            "localnet" | "local" => Some(SuiNetwork::Localnet),
            _ => None,
        }
    }
}

/// Fullnode connection settings.
#[derive(Debug, Clone)]
pub struct SuiRpcConfig {
    pub network: SuiNetwork,
    pub url: String,
    pub timeout: Duration,
}

impl Default for SuiRpcConfig {
    fn default() -> Self {
        Self::for_network(SuiNetwork::default())
    }
}

impl SuiRpcConfig {
    pub fn for_network(network: SuiNetwork) -> Self {
        Self {
            network,
            url: network.rpc_url().to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// `SUI_NETWORK` picks the endpoint, `SUI_RPC_URL` overrides it.
    pub fn from_env() -> Self {
        let network = match std::env::var("SUI_NETWORK") {
            Ok(name) => SuiNetwork::from_name(&name).unwrap_or_else(|| {
                tracing::warn!(network = %name, "Unknown SUI_NETWORK, using devnet");
                SuiNetwork::default()
            }),
            Err(_) => SuiNetwork::default(),
        };

        let mut config = Self::for_network(network);
        if let Some(url) = std::env::var("SUI_RPC_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
        {
            config.url = url.trim().to_string();
        }
        if let Some(secs) = std::env::var("SUI_RPC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// Sui JSON-RPC client
pub struct SuiRpcClient {
    config: SuiRpcConfig,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(config: SuiRpcConfig) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        tracing::info!(network = config.network.name(), url = %config.url, "Sui RPC client ready");
        Ok(Self {
            config,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn network(&self) -> SuiNetwork {
        self.config.network
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Raw JSON-RPC call
    async fn call<P, R>(&self, method: &str, params: P) -> Result<RpcEnvelope<R>, LedgerError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::trace!(method, id, "RPC call");

        let response = self
            .http
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, %status, "RPC endpoint returned HTTP error");
            return Err(LedgerError::Transport(format!("HTTP {status} from {method}")));
        }

        response
            .json::<RpcEnvelope<R>>()
            .await
            .map_err(|e| LedgerError::Decode(format!("{method}: {e}")))
    }

    /// Object-returning call where a missing object is `Ok(None)`.
    async fn object_call<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Option<LedgerObject>, LedgerError> {
        let envelope = self.call::<_, ObjectResponse>(method, params).await?;
        if envelope.error.as_ref().is_some_and(|e| e.is_absent()) {
            return Ok(None);
        }
        envelope.into_result()?.into_object()
    }
}

#[async_trait]
impl LedgerReader for SuiRpcClient {
    async fn get_object(&self, id: &ObjectId) -> Result<Option<LedgerObject>, LedgerError> {
        self.object_call(
            "sui_getObject",
            json!([id.to_hex(), { "showContent": true, "showType": true }]),
        )
        .await
    }

    async fn list_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Page<DynamicFieldInfo>, LedgerError> {
        let page: DynamicFieldPage = self
            .call(
                "suix_getDynamicFields",
                json!([parent.to_hex(), cursor.map(Cursor::as_str), limit]),
            )
            .await?
            .into_result()?;
        Ok(page.into())
    }

    async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: &DynamicFieldName,
    ) -> Result<Option<LedgerObject>, LedgerError> {
        self.object_call("suix_getDynamicFieldObject", json!([parent.to_hex(), name]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_urls() {
        assert!(SuiNetwork::Devnet.rpc_url().contains("devnet"));
        assert!(SuiNetwork::Testnet.rpc_url().contains("testnet"));
        assert!(SuiNetwork::Mainnet.rpc_url().contains("mainnet"));
        assert_eq!(SuiNetwork::from_name(" Mainnet "), Some(SuiNetwork::Mainnet));
        assert_eq!(SuiNetwork::from_name("moonnet"), None);
    }

    #[test]
    fn test_client_creation() {
        let client = SuiRpcClient::new(SuiRpcConfig::for_network(SuiNetwork::Testnet)).unwrap();
        assert_eq!(client.network(), SuiNetwork::Testnet);
        assert_eq!(client.url(), SuiNetwork::Testnet.rpc_url());
    }

    #[test]
    fn test_dynamic_field_name_params() {
        let params = json!([
            ObjectId::from_low_u64(1).to_hex(),
            DynamicFieldName::u64(3)
        ]);
        assert_eq!(params[1], json!({ "type": "u64", "value": "3" }));
    }
}
