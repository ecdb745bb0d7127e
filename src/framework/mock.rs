//! # Mock Mailboxes
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_address`] to get an [`Address`] and the receiver behind it,
//! then [`expect_message`] to pull the next request off the mailbox, assert on it,
//! and answer through its reply channel. No component is spawned.

use crate::framework::Address;
use tokio::sync::mpsc;

/// Creates an address and the receiver for asserting requests.
///
/// # Testing Strategy
/// When testing a *client* (e.g. `OrchestratorClient`) we don't want a real
/// component behind it. The receiver stands in for the component: the test
/// inspects what arrives and decides what to answer, including dropping the
/// reply channel to simulate a component that went away mid-request.
pub fn create_mock_address<M: Send + 'static>(
    buffer_size: usize,
) -> (Address<M>, mpsc::Receiver<M>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Address::new(sender), receiver)
}

/// Waits for the next message, if any.
pub async fn expect_message<M>(receiver: &mut mpsc::Receiver<M>) -> Option<M> {
    receiver.recv().await
}
