// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The session state machine behind the user interface.
//!
//! Every piece of interface state (which actions are enabled, what the
//! mutation buttons display) is derived from [`SessionState`], so the
//! disable/busy logic is testable without a rendering harness.

use std::{fmt, mem};

use counter_ledger::CounterOperation;
use thiserror::Error;

/// What mutation buttons display while a submission is in flight, and what
/// the count display shows before the first successful read.
pub const BUSY_INDICATOR: &str = "...";

/// Opaque identifier of a submitted mutation, used to track its confirmation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Handle(String);

impl Handle {
    pub fn new(id: impl Into<String>) -> Self {
        Handle(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// The label a mutation button shows when it is not busy.
pub fn operation_label(operation: CounterOperation) -> &'static str {
    match operation {
        CounterOperation::Increment => "+",
        CounterOperation::Decrement => "-",
    }
}

/// How the most recent submission resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Confirmed,
    Failed(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    /// No wallet connection; mutation buttons are disabled.
    Disconnected,
    /// Connected and idle.
    Connected { address: String },
    /// A mutation was handed to the wallet but has no handle yet.
    Submitting {
        address: String,
        operation: CounterOperation,
    },
    /// A submitted mutation is awaiting confirmation by the network.
    Confirming {
        address: String,
        operation: CounterOperation,
        handle: Handle,
    },
    /// The most recent submission resolved; new submissions are allowed.
    Settled { address: String, outcome: Outcome },
}

/// A transition that the current state does not allow.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransitionError {
    #[error("already connected")]
    AlreadyConnected,
    #[error("not connected")]
    NotConnected,
    #[error("a submission is already in flight")]
    OperationInFlight,
    #[error("no submission is in flight")]
    NoPendingSubmission,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            state: SessionState::Disconnected,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The connected account address, if any.
    pub fn address(&self) -> Option<&str> {
        match &self.state {
            SessionState::Disconnected => None,
            SessionState::Connected { address }
            | SessionState::Submitting { address, .. }
            | SessionState::Confirming { address, .. }
            | SessionState::Settled { address, .. } => Some(address),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    /// Whether a submission is pending or awaiting confirmation.
    pub fn busy(&self) -> bool {
        matches!(
            self.state,
            SessionState::Submitting { .. } | SessionState::Confirming { .. }
        )
    }

    /// Whether the mutation buttons are enabled: connected, and no
    /// submission in flight.
    pub fn mutations_enabled(&self) -> bool {
        self.is_connected() && !self.busy()
    }

    /// The label a mutation button shows in the current state.
    pub fn mutation_label(&self, operation: CounterOperation) -> &'static str {
        if self.busy() {
            BUSY_INDICATOR
        } else {
            operation_label(operation)
        }
    }

    /// The outcome of the most recent submission, if it has settled.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SessionState::Settled { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn connect(&mut self, address: String) -> Result<(), TransitionError> {
        match self.state {
            SessionState::Disconnected => {
                self.state = SessionState::Connected { address };
                Ok(())
            }
            _ => Err(TransitionError::AlreadyConnected),
        }
    }

    /// Clears the connection locally. An in-flight submission is simply no
    /// longer tracked; there is no on-chain cancellation.
    pub fn disconnect(&mut self) {
        self.state = SessionState::Disconnected;
    }

    pub fn submit(&mut self, operation: CounterOperation) -> Result<(), TransitionError> {
        match mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Disconnected => Err(TransitionError::NotConnected),
            state @ (SessionState::Submitting { .. } | SessionState::Confirming { .. }) => {
                self.state = state;
                Err(TransitionError::OperationInFlight)
            }
            SessionState::Connected { address } | SessionState::Settled { address, .. } => {
                self.state = SessionState::Submitting { address, operation };
                Ok(())
            }
        }
    }

    pub fn confirming(&mut self, handle: Handle) -> Result<(), TransitionError> {
        match mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Submitting { address, operation } => {
                self.state = SessionState::Confirming {
                    address,
                    operation,
                    handle,
                };
                Ok(())
            }
            state => {
                self.state = state;
                Err(TransitionError::NoPendingSubmission)
            }
        }
    }

    pub fn settle(&mut self, outcome: Outcome) -> Result<(), TransitionError> {
        match mem::replace(&mut self.state, SessionState::Disconnected) {
            SessionState::Submitting { address, .. }
            | SessionState::Confirming { address, .. } => {
                self.state = SessionState::Settled { address, outcome };
                Ok(())
            }
            state => {
                self.state = state;
                Err(TransitionError::NoPendingSubmission)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use counter_ledger::CounterOperation;

    use super::{Handle, Outcome, Session, SessionState, TransitionError, BUSY_INDICATOR};

    #[test]
    fn disconnected_session_has_disabled_buttons_with_default_labels() {
        let session = Session::new();

        assert!(!session.is_connected());
        assert!(!session.mutations_enabled());
        assert!(!session.busy());
        assert_eq!(session.mutation_label(CounterOperation::Increment), "+");
        assert_eq!(session.mutation_label(CounterOperation::Decrement), "-");
    }

    #[test]
    fn connecting_enables_mutations() {
        let mut session = Session::new();

        session.connect("chain-0".to_owned()).unwrap();

        assert_eq!(session.address(), Some("chain-0"));
        assert!(session.mutations_enabled());
    }

    #[test]
    fn connecting_twice_is_rejected() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();

        assert_eq!(
            session.connect("chain-1".to_owned()),
            Err(TransitionError::AlreadyConnected)
        );
        assert_eq!(session.address(), Some("chain-0"));
    }

    #[test]
    fn submitting_shows_busy_indicator_and_disables_buttons() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();

        session.submit(CounterOperation::Increment).unwrap();

        assert!(session.busy());
        assert!(!session.mutations_enabled());
        assert_eq!(
            session.mutation_label(CounterOperation::Increment),
            BUSY_INDICATOR
        );
        assert_eq!(
            session.mutation_label(CounterOperation::Decrement),
            BUSY_INDICATOR
        );
    }

    #[test]
    fn submit_requires_a_connection() {
        let mut session = Session::new();

        assert_eq!(
            session.submit(CounterOperation::Increment),
            Err(TransitionError::NotConnected)
        );
    }

    #[test]
    fn only_one_submission_may_be_in_flight() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();
        session.submit(CounterOperation::Increment).unwrap();

        assert_eq!(
            session.submit(CounterOperation::Decrement),
            Err(TransitionError::OperationInFlight)
        );

        session.confirming(Handle::new("cert")).unwrap();

        assert_eq!(
            session.submit(CounterOperation::Decrement),
            Err(TransitionError::OperationInFlight)
        );
    }

    #[test]
    fn confirming_records_the_handle() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();
        session.submit(CounterOperation::Decrement).unwrap();

        session.confirming(Handle::new("cert")).unwrap();

        assert!(session.busy());
        assert_eq!(
            session.state(),
            &SessionState::Confirming {
                address: "chain-0".to_owned(),
                operation: CounterOperation::Decrement,
                handle: Handle::new("cert"),
            }
        );
    }

    #[test]
    fn confirming_without_a_submission_is_rejected() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();

        assert_eq!(
            session.confirming(Handle::new("cert")),
            Err(TransitionError::NoPendingSubmission)
        );
        assert!(session.mutations_enabled());
    }

    #[test]
    fn settling_re_enables_mutations() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();
        session.submit(CounterOperation::Increment).unwrap();
        session.confirming(Handle::new("cert")).unwrap();

        session.settle(Outcome::Confirmed).unwrap();

        assert!(session.mutations_enabled());
        assert!(!session.busy());
        assert_eq!(session.last_outcome(), Some(&Outcome::Confirmed));
        assert!(session.submit(CounterOperation::Decrement).is_ok());
    }

    #[test]
    fn a_submission_may_settle_as_failed_before_confirmation() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();
        session.submit(CounterOperation::Decrement).unwrap();

        session
            .settle(Outcome::Failed("Count cannot be negative".to_owned()))
            .unwrap();

        assert!(session.mutations_enabled());
        assert_eq!(
            session.last_outcome(),
            Some(&Outcome::Failed("Count cannot be negative".to_owned()))
        );
    }

    #[test]
    fn settling_while_idle_is_rejected() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();

        assert_eq!(
            session.settle(Outcome::Confirmed),
            Err(TransitionError::NoPendingSubmission)
        );
    }

    #[test]
    fn disconnecting_abandons_an_in_flight_submission() {
        let mut session = Session::new();
        session.connect("chain-0".to_owned()).unwrap();
        session.submit(CounterOperation::Increment).unwrap();
        session.confirming(Handle::new("cert")).unwrap();

        session.disconnect();

        assert!(!session.is_connected());
        assert!(!session.busy());
        assert_eq!(
            session.submit(CounterOperation::Increment),
            Err(TransitionError::NotConnected)
        );
    }
}
