//! # ComponentClient Trait
//!
//! Provides a common interface for component-specific clients, adding default
//! request helpers built on top of a generic [`Address`].

use crate::framework::{Address, FrameworkError, Response};
use async_trait::async_trait;

/// Trait for component-specific clients to share request plumbing.
///
/// A client wraps an [`Address`] and maps [`FrameworkError`]s into its own error
/// type, so callers only ever match on one error enum per component.
#[async_trait]
pub trait ComponentClient: Send + Sync {
    /// The component's mailbox message type.
    type Message: Send + 'static;

    /// The component-specific error type.
    type Error: Send + 'static;

    /// Access the inner mailbox address.
    fn address(&self) -> &Address<Self::Message>;

    /// Map framework errors to the component error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a request whose reply already carries the component's result type.
    async fn ask<T, F>(&self, build: F) -> Result<T, Self::Error>
    where
        T: Send + 'static,
        F: FnOnce(Response<Result<T, Self::Error>>) -> Self::Message + Send,
    {
        tracing::trace!("Sending request");
        self.address().request(build).await.map_err(Self::map_error)?
    }

    /// Send a request whose reply cannot fail at the component level.
    async fn query<T, F>(&self, build: F) -> Result<T, Self::Error>
    where
        T: Send + 'static,
        F: FnOnce(Response<T>) -> Self::Message + Send,
    {
        tracing::trace!("Sending query");
        self.address().request(build).await.map_err(Self::map_error)
    }

    /// Send a message without waiting for a reply.
    async fn tell(&self, msg: Self::Message) -> Result<(), Self::Error> {
        self.address().send(msg).await.map_err(Self::map_error)
    }
}
