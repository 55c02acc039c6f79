// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The controller driving a [`Session`] against a [`LedgerTransport`].

use std::time::Duration;

use counter_ledger::CounterOperation;

use crate::{
    error::ShellError,
    notification::{Notification, NotificationSink, CONFIRMED_MESSAGE},
    session::{Handle, Outcome, Session, TransitionError, BUSY_INDICATOR},
    transport::{ConfirmationStatus, LedgerTransport},
};

pub struct Shell<T, N> {
    session: Session,
    transport: T,
    notifier: N,
    count: Option<u64>,
    poll_interval: Duration,
    poll_budget: u32,
}

impl<T, N> Shell<T, N>
where
    T: LedgerTransport,
    N: NotificationSink,
{
    pub fn new(transport: T, notifier: N) -> Self {
        Shell {
            session: Session::new(),
            transport,
            notifier,
            count: None,
            poll_interval: Duration::from_millis(500),
            poll_budget: 120,
        }
    }

    /// Overrides how often and how long confirmation is polled for.
    pub fn with_polling(mut self, interval: Duration, budget: u32) -> Self {
        self.poll_interval = interval;
        self.poll_budget = budget;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The last successfully read count, if any.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// What the count display shows: a placeholder until the first
    /// successful read, the literal value afterwards.
    pub fn displayed_count(&self) -> String {
        match self.count {
            Some(count) => count.to_string(),
            None => BUSY_INDICATOR.to_owned(),
        }
    }

    /// Requests account access through the wallet.
    ///
    /// A transport failure is notified and leaves the session disconnected.
    pub async fn connect(&mut self) -> Result<(), TransitionError> {
        if self.session.is_connected() {
            return Err(TransitionError::AlreadyConnected);
        }
        match self.transport.request_connection().await {
            Ok(address) => {
                tracing::info!(%address, "wallet connected");
                self.session.connect(address)
            }
            Err(error) => {
                self.notifier.notify(Notification::Failure(error.to_string()));
                Ok(())
            }
        }
    }

    /// Clears the connection locally; there is no on-chain effect.
    pub fn disconnect(&mut self) {
        self.session.disconnect();
    }

    /// Re-reads the ledger's count. On failure the previous value is kept
    /// and the failure is notified.
    pub async fn refresh_count(&mut self) {
        match self.transport.read_count().await {
            Ok(count) => self.count = Some(count),
            Err(error) => {
                self.notifier.notify(Notification::Failure(error.to_string()));
            }
        }
    }

    /// Submits a mutation and tracks it until it settles.
    ///
    /// Refused while disconnected or while another submission is in
    /// flight — the states in which the mutation buttons are disabled.
    pub async fn submit(&mut self, operation: CounterOperation) -> Result<(), TransitionError> {
        self.session.submit(operation)?;
        tracing::debug!(?operation, "submitting mutation");
        match self.transport.submit(operation).await {
            Ok(handle) => {
                self.session
                    .confirming(handle.clone())
                    .expect("a submission is in flight");
                self.track(handle).await;
            }
            Err(error) => self.settle_failed(error.to_string()),
        }
        Ok(())
    }

    /// Polls the handle until the network confirms or rejects it, or the
    /// poll budget runs out.
    async fn track(&mut self, handle: Handle) {
        for _ in 0..self.poll_budget {
            match self.transport.confirmation(&handle).await {
                Ok(ConfirmationStatus::Pending) => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                Ok(ConfirmationStatus::Confirmed) => {
                    tracing::debug!(%handle, "submission confirmed");
                    self.session
                        .settle(Outcome::Confirmed)
                        .expect("a submission is in flight");
                    self.notifier
                        .notify(Notification::Success(CONFIRMED_MESSAGE.to_owned()));
                    self.refresh_count().await;
                    return;
                }
                Ok(ConfirmationStatus::Failed(reason)) => {
                    let error = ShellError::from_node_message(reason);
                    self.settle_failed(error.to_string());
                    return;
                }
                Err(error) => {
                    self.settle_failed(error.to_string());
                    return;
                }
            }
        }
        self.settle_failed(format!("confirmation of {handle} timed out"));
    }

    fn settle_failed(&mut self, reason: String) {
        tracing::debug!(%reason, "submission failed");
        self.session
            .settle(Outcome::Failed(reason.clone()))
            .expect("a submission is in flight");
        self.notifier.notify(Notification::Failure(reason));
    }
}
