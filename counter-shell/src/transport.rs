// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use counter_ledger::CounterOperation;

use crate::{error::ShellError, session::Handle};

/// Where a submitted mutation stands from the network's point of view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Failed(String),
}

/// The wallet and network boundary the shell drives the ledger through.
///
/// The shell does not control this side of the system; every method may
/// fail, and failures surface to the user as notifications.
#[async_trait]
pub trait LedgerTransport {
    /// Requests account access from the wallet, returning the account
    /// address on success.
    async fn request_connection(&self) -> Result<String, ShellError>;

    /// Reads the ledger's current count. No side effects.
    async fn read_count(&self) -> Result<u64, ShellError>;

    /// Submits a mutating call and returns the handle to track it by.
    async fn submit(&self, operation: CounterOperation) -> Result<Handle, ShellError>;

    /// Queries the confirmation status of a previously submitted call.
    async fn confirmation(&self, handle: &Handle) -> Result<ConfirmationStatus, ShellError>;
}
