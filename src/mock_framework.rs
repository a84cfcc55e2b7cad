//! # Mock Framework
//!
//! Utilities for testing editors and list view models without a backend actor.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`assert_no_request`] to assert behavior.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

/// Creates a mock client and a receiver for asserting requests.
///
/// The receiver stands in for the backend: tests pull each request off it,
/// inspect the payload and answer through the bundled responder, which lets
/// them pick success, failure or an indefinitely pending reply.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Payload, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Payload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, payload, respond_to }) => Some((id, payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Asserts that nothing has been sent to the backend.
pub fn assert_no_request<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) {
    match receiver.try_recv() {
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {}
        Ok(request) => panic!("Unexpected backend request: {:?}", request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductPayload, Status};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        assert_no_request(&mut receiver);

        let create_task = tokio::spawn(async move {
            let product = ProductPayload {
                name: "Arroz".to_string(),
                description: "Bolsa de 1 kg".to_string(),
                unit: "kg".to_string(),
                status: Status::Active,
            };
            client.create(product).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Arroz");
        responder.send(Ok("producto_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("producto_1".to_string()));
    }
}
