// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use counter_ledger::GUARD_MESSAGE;
use thiserror::Error;

use crate::session::TransitionError;

/// Fallback shown when the transport reports a failure without a message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Transaction failed.";

/// An error surfaced to the user. None of these are fatal: the shell stays
/// usable and retry is a manual re-submit.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ShellError {
    /// The ledger refused the operation; the state is unchanged.
    #[error("operation rejected by the ledger: {0}")]
    GuardRejection(String),

    /// The wallet or network failed during connect, read, or submit.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The requested action is not available in the current session state.
    #[error("action unavailable: {0}")]
    Unavailable(#[from] TransitionError),
}

impl ShellError {
    /// Classifies an error message reported by the node service.
    ///
    /// A message carrying the ledger's guard reason is a rejection of the
    /// operation itself; everything else is a transport failure, with a
    /// generic fallback when the node provided no message at all.
    pub fn from_node_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(GUARD_MESSAGE) {
            ShellError::GuardRejection(message)
        } else if message.is_empty() {
            ShellError::Transport(GENERIC_FAILURE_MESSAGE.to_owned())
        } else {
            ShellError::Transport(message)
        }
    }
}
