use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::{Entity, ResourceClient};
use crate::error::RemoteError;

use super::UseCase;

/// Declares a use case struct wrapping a [`ResourceClient`].
macro_rules! crud_use_case {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T: Entity> {
            client: ResourceClient<T>,
        }

        impl<T: Entity> $name<T> {
            pub fn new(client: ResourceClient<T>) -> Self {
                Self { client }
            }
        }

        impl<T: Entity> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self { client: self.client.clone() }
            }
        }
    };
}

crud_use_case!(
    /// Fetches one record; a missing record is a `NotFound` error.
    GetUseCase
);
crud_use_case!(ListUseCase);
crud_use_case!(CreateUseCase);
crud_use_case!(UpdateUseCase);
crud_use_case!(DeleteUseCase);
crud_use_case!(
    /// Runs an entity specific action, e.g. a status toggle.
    ActionUseCase
);

#[async_trait]
impl<T: Entity> UseCase for GetUseCase<T> {
    type Request = T::Id;
    type Response = T;

    #[instrument(name = "get_use_case", skip(self), fields(kind = T::KIND))]
    async fn execute(&self, id: T::Id) -> Result<T, RemoteError> {
        debug!("Sending request");
        self.client
            .get(id.clone())
            .await?
            .ok_or_else(|| RemoteError::NotFound(format!("{} {}", T::KIND, id)))
    }
}

#[async_trait]
impl<T: Entity> UseCase for ListUseCase<T> {
    type Request = ();
    type Response = Vec<T>;

    #[instrument(name = "list_use_case", skip(self, _request), fields(kind = T::KIND))]
    async fn execute(&self, _request: ()) -> Result<Vec<T>, RemoteError> {
        debug!("Sending request");
        self.client.list().await
    }
}

#[async_trait]
impl<T: Entity> UseCase for CreateUseCase<T> {
    type Request = T::Payload;
    type Response = T::Id;

    #[instrument(name = "create_use_case", skip(self, payload), fields(kind = T::KIND))]
    async fn execute(&self, payload: T::Payload) -> Result<T::Id, RemoteError> {
        debug!("Sending request");
        self.client.create(payload).await
    }
}

#[async_trait]
impl<T: Entity> UseCase for UpdateUseCase<T> {
    type Request = (T::Id, T::Payload);
    type Response = T;

    #[instrument(name = "update_use_case", skip(self, request), fields(kind = T::KIND, id = %request.0))]
    async fn execute(&self, request: (T::Id, T::Payload)) -> Result<T, RemoteError> {
        debug!("Sending request");
        let (id, payload) = request;
        self.client.update(id, payload).await
    }
}

#[async_trait]
impl<T: Entity> UseCase for DeleteUseCase<T> {
    type Request = T::Id;
    type Response = ();

    #[instrument(name = "delete_use_case", skip(self), fields(kind = T::KIND))]
    async fn execute(&self, id: T::Id) -> Result<(), RemoteError> {
        debug!("Sending request");
        self.client.delete(id).await
    }
}

#[async_trait]
impl<T: Entity> UseCase for ActionUseCase<T> {
    type Request = (T::Id, T::Action);
    type Response = T::ActionResult;

    #[instrument(name = "action_use_case", skip(self), fields(kind = T::KIND))]
    async fn execute(&self, request: (T::Id, T::Action)) -> Result<T::ActionResult, RemoteError> {
        debug!("Sending request");
        let (id, action) = request;
        self.client.perform_action(id, action).await
    }
}
