//! Generic resource actor standing in for the remote administrative API.
//!
//! Each entity kind gets one [`ResourceActor`] owning an in-memory store and a
//! cloneable [`ResourceClient`] that sends typed requests over an mpsc channel
//! and awaits a oneshot reply.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::RemoteError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any backend record must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + Debug + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;
    /// Flat record sent verbatim on create and update.
    type Payload: Clone + Send + Sync + Debug + 'static;
    type Action: Send + Sync + Debug + 'static;
    type ActionResult: Send + Sync + Debug + 'static;

    /// Human readable kind, used in log fields and not-found messages.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from the assigned ID and payload.
    fn from_create(id: Self::Id, payload: Self::Payload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, payload: Self::Payload) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Handle a domain-specific action such as a status toggle.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, RemoteError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::Payload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        payload: T::Payload,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(kind = T::KIND))]
    pub async fn run(mut self) {
        info!("Backend actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { id, payload, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, payload));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(count = items.len(), "Listed records");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::Shutdown => {
                    info!("Backend actor shutting down");
                    break;
                }
            }
        }

        info!("Backend actor stopped");
    }

    fn handle_create(&mut self, payload: T::Payload) -> Result<T::Id, RemoteError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(RemoteError::Rejected)?;
        item.on_create().map_err(RemoteError::Rejected)?;
        self.store.insert(id.clone(), item);
        self.order.push(id.clone());
        info!(id = %id, "Record created");
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, payload: T::Payload) -> Result<T, RemoteError> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_update(payload).map_err(RemoteError::Rejected)?;
        info!(id = %id, "Record updated");
        Ok(item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), RemoteError> {
        let item = self.store.get(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_delete().map_err(RemoteError::Rejected)?;
        self.store.remove(&id);
        self.order.retain(|existing| existing != &id);
        info!(id = %id, "Record deleted");
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, RemoteError> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.handle_action(action).map_err(|e| {
            warn!(id = %id, error = %e, "Action rejected");
            RemoteError::Rejected(e)
        })
    }
}

fn not_found<T: Entity>(id: &T::Id) -> RemoteError {
    RemoteError::NotFound(format!("{} {}", T::KIND, id))
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| RemoteError::Unavailable(format!("{} backend closed", T::KIND)))?;
        response
            .await
            .map_err(|_| RemoteError::Unavailable(format!("{} backend dropped the request", T::KIND)))?
    }

    pub async fn create(&self, payload: T::Payload) -> Result<T::Id, RemoteError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, RemoteError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, payload: T::Payload) -> Result<T, RemoteError> {
        self.request(|respond_to| ResourceRequest::Update { id, payload, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), RemoteError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, RemoteError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, RemoteError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    /// Asks the actor to stop. Requests queued behind the shutdown are dropped.
    pub async fn shutdown(&self) -> Result<(), RemoteError> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| RemoteError::Unavailable(format!("{} backend closed", T::KIND)))
    }
}
