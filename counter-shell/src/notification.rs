// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/// Success message shown when a submission is confirmed.
pub const CONFIRMED_MESSAGE: &str = "Transaction confirmed!";

/// A transient message for the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// Where the shell sends its transient messages.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}
