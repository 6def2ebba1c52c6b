//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then script the
//! backend with helpers like [`expect_get`] or [`expect_create`].

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test owns, so each request can be
/// inspected and answered (or refused) deterministically without a running
/// `ResourceActor`.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Filter, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Count request
pub async fn expect_count<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<usize>> {
    match receiver.recv().await {
        Some(ResourceRequest::Count { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Answers the next request of any kind as if the backend were unreachable.
pub async fn fail_next<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>, error: FrameworkError) -> bool {
    let Some(request) = receiver.recv().await else {
        return false;
    };
    match request {
        ResourceRequest::Create { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::CreateBatch { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::Get { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::List { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::Count { respond_to } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::Update { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
        ResourceRequest::Delete { respond_to, .. } => respond_to.send(Err(error)).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            client.create(UserCreate::student("Test", "test@example.com")).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.full_name, "Test");
        responder.send(Ok("user_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("user_1".to_string()));
    }

    #[tokio::test]
    async fn test_fail_next_surfaces_error() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let count_task = tokio::spawn(async move { client.count().await });
        assert!(fail_next(&mut receiver, FrameworkError::ActorClosed).await);

        assert_eq!(count_task.await.unwrap(), Err(FrameworkError::ActorClosed));
    }
}
