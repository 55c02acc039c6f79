// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A [`LedgerTransport`] backed by a wallet's node service.

use async_trait::async_trait;
use counter_ledger::CounterOperation;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{
    error::ShellError,
    session::Handle,
    transport::{ConfirmationStatus, LedgerTransport},
};

/// GraphQL response envelope returned by the node service.
#[derive(Debug, Deserialize)]
struct NodeServiceOutput {
    #[serde(default)]
    data: serde_json::Value,
    errors: Option<Vec<serde_json::Value>>,
}

/// A client for a counter ledger hosted behind a wallet's node service.
///
/// Application reads and mutations are GraphQL posts to
/// `{url}/chains/{chain_id}/applications/{application_id}`; connection
/// requests and block lookups go to the node service root.
pub struct NodeServiceClient {
    http: Client,
    url: Url,
    chain_id: String,
    application_id: String,
}

impl NodeServiceClient {
    pub fn new(url: Url, chain_id: String, application_id: String) -> Self {
        NodeServiceClient {
            http: Client::new(),
            url,
            chain_id,
            application_id,
        }
    }

    fn application_url(&self) -> Result<Url, ShellError> {
        let url = format!(
            "{}/chains/{}/applications/{}",
            self.url.as_str().trim_end_matches('/'),
            self.chain_id,
            self.application_id,
        );
        Url::parse(&url).map_err(|error| ShellError::Transport(error.to_string()))
    }

    async fn graphql(&self, url: Url, query: &str) -> Result<serde_json::Value, ShellError> {
        let response = self
            .http
            .post(url)
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|error| ShellError::Transport(error.to_string()))?;
        let output: NodeServiceOutput = response
            .json()
            .await
            .map_err(|error| ShellError::Transport(error.to_string()))?;
        match output.errors {
            Some(errors) if !errors.is_empty() => {
                Err(ShellError::from_node_message(error_message(&errors)))
            }
            _ => Ok(output.data),
        }
    }

    /// The certificate hash of the latest block on the ledger's chain.
    async fn latest_block_hash(&self) -> Result<Handle, ShellError> {
        let query = format!(r#"query {{ block(chainId: "{}") {{ hash }} }}"#, self.chain_id);
        let data = self.graphql(self.url.clone(), &query).await?;
        data["block"]["hash"]
            .as_str()
            .map(Handle::new)
            .ok_or_else(|| {
                ShellError::Transport("node service returned no block for the chain".to_owned())
            })
    }
}

/// Flattens the `errors` array of a GraphQL response into one message.
fn error_message(errors: &[serde_json::Value]) -> String {
    errors
        .iter()
        .filter_map(|error| error["message"].as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl LedgerTransport for NodeServiceClient {
    async fn request_connection(&self) -> Result<String, ShellError> {
        // The wallet's default chain doubles as the account address.
        let data = self
            .graphql(self.url.clone(), "query { chains { default } }")
            .await?;
        data["chains"]["default"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ShellError::Transport("wallet has no default chain".to_owned()))
    }

    async fn read_count(&self) -> Result<u64, ShellError> {
        let data = self
            .graphql(self.application_url()?, "query { count }")
            .await?;
        data["count"]
            .as_u64()
            .ok_or_else(|| ShellError::Transport("malformed count response".to_owned()))
    }

    async fn submit(&self, operation: CounterOperation) -> Result<Handle, ShellError> {
        let mutation = match operation {
            CounterOperation::Increment => "mutation { increment }",
            CounterOperation::Decrement => "mutation { decrement }",
        };
        self.graphql(self.application_url()?, mutation).await?;
        // The node service proposes a block for the scheduled operation
        // right away; that block's certificate hash is the handle. This
        // assumes this shell is the only writer on the chain: a block
        // committed by someone else between the mutation and the tip read
        // would be mistaken for ours.
        self.latest_block_hash().await
    }

    async fn confirmation(&self, handle: &Handle) -> Result<ConfirmationStatus, ShellError> {
        let query = format!(
            r#"query {{ block(hash: "{}", chainId: "{}") {{ hash }} }}"#,
            handle, self.chain_id,
        );
        let data = self.graphql(self.url.clone(), &query).await?;
        if data["block"]["hash"].as_str() == Some(handle.as_str()) {
            Ok(ConfirmationStatus::Confirmed)
        } else {
            Ok(ConfirmationStatus::Pending)
        }
    }
}
