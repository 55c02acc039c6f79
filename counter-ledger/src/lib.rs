// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! ABI of the Counter Ledger application. */

use async_graphql::{Request, Response};
use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

/// Name of the event stream that records one [`CountChange`] per successful
/// mutation.
pub const COUNT_CHANGES_STREAM_NAME: &[u8] = b"count_changes";

/// The reason a decrement is rejected while the count is zero.
///
/// Clients match node errors against this string to tell a guard rejection
/// apart from an ordinary transport failure.
pub const GUARD_MESSAGE: &str = "Count cannot be negative";

pub struct CounterLedgerAbi;

impl ContractAbi for CounterLedgerAbi {
    type Operation = CounterOperation;
    type Response = u64;
}

impl ServiceAbi for CounterLedgerAbi {
    type Query = Request;
    type QueryResponse = Response;
}

/// The two mutating calls the ledger accepts.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CounterOperation {
    /// Increases the count by one. Always succeeds.
    Increment,
    /// Decreases the count by one. Rejected with [`GUARD_MESSAGE`] at zero.
    Decrement,
}

/// Event recorded on the [`COUNT_CHANGES_STREAM_NAME`] stream after every
/// successful mutation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CountChange {
    /// The count after the mutation was applied.
    pub new_count: u64,
}
