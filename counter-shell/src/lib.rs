// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Client interaction shell for the Counter Ledger application.
//!
//! The shell connects a wallet, reads the ledger's count, submits increment
//! and decrement operations, and tracks each submission to confirmation. The
//! user-visible state machine lives in [`session`]; [`shell::Shell`] drives
//! it against a [`transport::LedgerTransport`].

pub mod client;
pub mod error;
pub mod notification;
pub mod provider;
pub mod session;
pub mod shell;
pub mod transport;

pub use self::{
    error::ShellError,
    session::{Session, SessionState},
    shell::Shell,
};
