//! Form-backed entity editors.
//!
//! One [`EditorService`] per open screen owns an [`EditorState`], runs backend
//! calls in background tasks and publishes an [`EditorSnapshot`] after every
//! change. Screens drive it through a cloneable [`EditorClient`].

mod client;
mod service;
mod state;

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::actor_framework::{Entity, ResourceClient};
use crate::config::EditorConfig;
use crate::forms::EntityForm;
use crate::use_case::{CreateUseCase, GetUseCase, SharedUseCase, UpdateUseCase};

pub use client::*;
pub use service::*;
pub use state::*;

pub type IdOf<F> = <<F as EntityForm>::Entity as Entity>::Id;

/// Backend operations an editor needs.
pub struct EditorUseCases<E: Entity> {
    pub get: SharedUseCase<E::Id, E>,
    pub create: SharedUseCase<E::Payload, E::Id>,
    pub update: SharedUseCase<(E::Id, E::Payload), E>,
}

impl<E: Entity> Clone for EditorUseCases<E> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            create: Arc::clone(&self.create),
            update: Arc::clone(&self.update),
        }
    }
}

impl<E: Entity> EditorUseCases<E> {
    pub fn from_client(client: ResourceClient<E>) -> Self {
        Self {
            get: Arc::new(GetUseCase::new(client.clone())),
            create: Arc::new(CreateUseCase::new(client.clone())),
            update: Arc::new(UpdateUseCase::new(client)),
        }
    }
}

/// Starts an editor for one screen; dropping every client stops it.
pub fn spawn_editor<F: EntityForm>(use_cases: EditorUseCases<F::Entity>, config: EditorConfig) -> (EditorClient<F>, JoinHandle<()>) {
    let (service, client) = EditorService::new(use_cases, config);
    let handle = tokio::spawn(service.run());
    (client, handle)
}
