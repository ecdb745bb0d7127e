//! # Core Actor Framework
//!
//! This module defines the generic building blocks every try-on component is made of.
//!
//! ## Key Types
//!
//! - [`Actor`]: The trait that all components (orchestrator, history, favorites) implement.
//! - [`ActorRunner`]: Owns a component and drives its mailbox loop.
//! - [`Address`]: The cloneable sending half used by typed clients.
//! - [`Myself`]: A weak handle a component uses to post background completions to itself.
//! - [`FrameworkError`]: Plumbing errors (mailbox closed, reply dropped).

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any component must implement to be driven by an [`ActorRunner`].
///
/// # Architecture Note
/// Each component owns its state exclusively and sees one message at a time, so
/// handlers mutate `&mut self` without locks. Anything slow (a remote call) must
/// not be awaited inside `handle`; hand it to [`Myself::pipe`] instead and react
/// to the completion message when it comes back.
///
/// # Async & Context
/// Dependencies are injected through `Context` when the runner starts
/// ("late binding"), not when the component is constructed. Awaiting *other*
/// components from inside `handle` is fine as long as the dependency graph is
/// acyclic.
#[async_trait]
pub trait Actor: Send + 'static {
    /// The mailbox message type.
    type Message: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the runner.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// Short label used as the `actor` field in logs.
    fn name() -> &'static str;

    /// Handle one message. State changes made here are observed atomically by callers.
    async fn handle(
        &mut self,
        msg: Self::Message,
        ctx: &Self::Context,
        myself: &Myself<Self::Message>,
    );
}

// =============================================================================
// 2. ERRORS & REPLY CHANNELS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// Type alias for the one-shot reply channel carried inside request messages.
pub type Response<T> = oneshot::Sender<T>;

// =============================================================================
// 3. THE RUNNER
// =============================================================================

/// Drives a single [`Actor`]: receives messages and hands them to `handle` in order.
///
/// The runner only holds a *weak* sender to its own mailbox, so the loop ends as
/// soon as every [`Address`] is dropped and no background work is still pending.
pub struct ActorRunner<A: Actor> {
    actor: A,
    receiver: mpsc::Receiver<A::Message>,
    myself: Myself<A::Message>,
}

impl<A: Actor> ActorRunner<A> {
    /// Creates the runner and the address used to talk to it.
    ///
    /// * `buffer_size` - mailbox capacity; senders wait when it is full.
    pub fn new(actor: A, buffer_size: usize) -> (Self, Address<A::Message>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let myself = Myself {
            sender: sender.downgrade(),
        };
        let runner = Self {
            actor,
            receiver,
            myself,
        };
        (runner, Address::new(sender))
    }

    /// Runs the event loop until the mailbox closes.
    pub async fn run(mut self, context: A::Context) {
        let actor = A::name();
        info!(actor, "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            debug!(actor, ?msg, "Message");
            self.actor.handle(msg, &context, &self.myself).await;
            handled += 1;
        }

        info!(actor, handled, "Shutdown");
    }
}

/// Weak handle to a component's own mailbox.
pub struct Myself<M> {
    sender: mpsc::WeakSender<M>,
}

impl<M: Send + 'static> Myself<M> {
    /// Runs `work` on its own task and posts the message it yields back into the mailbox.
    ///
    /// The pending work keeps the mailbox open, so a shutdown waits for it to settle.
    pub fn pipe<F>(&self, work: F)
    where
        F: Future<Output = M> + Send + 'static,
    {
        let Some(sender) = self.sender.upgrade() else {
            warn!("Mailbox already closed, dropping background work");
            return;
        };
        tokio::spawn(async move {
            let msg = work.await;
            if sender.send(msg).await.is_err() {
                warn!("Mailbox closed before completion was delivered");
            }
        });
    }
}

// =============================================================================
// 4. THE ADDRESS
// =============================================================================

/// The sending half of a component's mailbox. Cheap to clone.
pub struct Address<M> {
    sender: mpsc::Sender<M>,
}

impl<M> Clone for Address<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M: Send + 'static> Address<M> {
    pub fn new(sender: mpsc::Sender<M>) -> Self {
        Self { sender }
    }

    /// Sends a message built around a fresh reply channel and waits for the reply.
    pub async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> M,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// Sends a message without waiting for any reply.
    pub async fn send(&self, msg: M) -> Result<(), FrameworkError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
