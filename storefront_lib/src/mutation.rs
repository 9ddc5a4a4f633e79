//! One-shot write dispatch with an explicit lifecycle.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_api::types::Envelope;
use storefront_api::{Endpoint, Method, Transport};

use crate::error::StorefrontError;

/// Outcome of a mutation dispatched with a prepare step.
///
/// Callers branch on this exhaustively: `Failed` carries exactly the context
/// the prepare closure returned, for rolling back optimistic edits. Settled
/// work (such as cache invalidation) runs after the match, covering both
/// arms.
#[must_use]
pub enum MutationOutcome<T, C> {
    /// The write succeeded; the server envelope is returned unmodified.
    Completed { envelope: Envelope<T>, context: C },
    /// The write failed; the error is the transport error unchanged.
    Failed { error: StorefrontError, context: C },
}

impl<T, C> MutationOutcome<T, C> {
    /// The envelope on success, discarding the context.
    pub fn into_result(self) -> Result<Envelope<T>, StorefrontError> {
        match self {
            MutationOutcome::Completed { envelope, .. } => Ok(envelope),
            MutationOutcome::Failed { error, .. } => Err(error),
        }
    }
}

/// A write operation with verb, target, and transport fixed at construction.
///
/// `V` is the variables type sent as the JSON body (DELETE included, per the
/// transport's delete-with-body convention); `T` is the payload type of the
/// response envelope.
pub struct Mutation<V, T> {
    method: Method,
    endpoint: Endpoint<V>,
    transport: Arc<Transport>,
    _response: PhantomData<fn() -> T>,
}

impl<V: Serialize, T: DeserializeOwned> Mutation<V, T> {
    pub(crate) fn bind(method: Method, endpoint: Endpoint<V>, transport: Arc<Transport>) -> Self {
        Self {
            method,
            endpoint,
            transport,
            _response: PhantomData,
        }
    }

    /// The verb bound at construction.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Resolves the target path for the given variables.
    pub fn resolve_endpoint(&self, variables: &V) -> String {
        self.endpoint.resolve(variables)
    }

    /// Issues the bound verb against the resolved endpoint with `variables`
    /// as the JSON body, and returns the unwrapped envelope. Transport
    /// failures propagate unchanged.
    pub async fn dispatch(&self, variables: &V) -> Result<Envelope<T>, StorefrontError> {
        let path = self.endpoint.resolve(variables);
        let envelope = match self.method {
            Method::Post => self.transport.post(&path, variables).await?,
            Method::Put => self.transport.put(&path, variables).await?,
            Method::Patch => self.transport.patch(&path, variables).await?,
            Method::Delete => self.transport.delete(&path, variables).await?,
            // Excluded at construction; see ApiClient::mutation.
            Method::Get => {
                return Err(StorefrontError::Api(storefront_api::Error::UnsupportedMethod(
                    Method::Get,
                )))
            }
        };
        Ok(envelope)
    }

    /// Dispatches with an explicit lifecycle: `prepare` runs to completion
    /// before the network call, and its return value is carried into the
    /// outcome so failures can roll back whatever `prepare` changed.
    pub async fn dispatch_with<C, F>(&self, variables: &V, prepare: F) -> MutationOutcome<T, C>
    where
        F: FnOnce(&V) -> C,
    {
        let context = prepare(variables);
        match self.dispatch(variables).await {
            Ok(envelope) => MutationOutcome::Completed { envelope, context },
            Err(error) => MutationOutcome::Failed { error, context },
        }
    }
}
