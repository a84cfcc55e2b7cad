use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::actor_framework::{Entity, ResourceClient};
use crate::domain::{Searchable, Status};
use crate::error::RemoteError;
use crate::use_case::{observe, DeleteUseCase, ListUseCase, Resource, SharedUseCase};

use super::ListFilter;

pub const EMPTY_LIST_MESSAGE: &str = "No records yet";
pub const NO_MATCHES_MESSAGE: &str = "No results match the search";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub is_loading: bool,
    pub error: Option<String>,
}

/// State behind a list screen: fetch, filter and delete.
pub struct ListViewModel<T: Entity + Searchable> {
    list: SharedUseCase<(), Vec<T>>,
    delete: SharedUseCase<T::Id, ()>,
    filter: ListFilter<T>,
    state: ListState,
    timeout: Option<Duration>,
}

impl<T: Entity + Searchable> ListViewModel<T> {
    pub fn new(list: SharedUseCase<(), Vec<T>>, delete: SharedUseCase<T::Id, ()>) -> Self {
        Self {
            list,
            delete,
            filter: ListFilter::default(),
            state: ListState::default(),
            timeout: None,
        }
    }

    pub fn from_client(client: ResourceClient<T>) -> Self {
        Self::new(Arc::new(ListUseCase::new(client.clone())), Arc::new(DeleteUseCase::new(client)))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the list with a fresh fetch. On failure the previous items stay.
    #[instrument(name = "list_refresh", skip(self), fields(kind = T::KIND))]
    pub async fn refresh(&mut self) {
        let mut call = observe(Arc::clone(&self.list), ()).with_timeout(self.timeout);
        while let Some(item) = call.next().await {
            match item {
                Resource::Loading => {
                    self.state.is_loading = true;
                    self.state.error = None;
                }
                Resource::Success(items) => {
                    info!(count = items.len(), "List loaded");
                    self.state.is_loading = false;
                    self.filter.set_items(items);
                }
                Resource::Error(error) => {
                    warn!(error = %error, "List failed to load");
                    self.state.is_loading = false;
                    self.state.error = Some(error.user_message());
                }
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        self.filter.set_status(status);
    }

    /// Deletes the record remotely, then drops it from the local list.
    #[instrument(name = "list_remove", skip_all, fields(kind = T::KIND, id = %id))]
    pub async fn remove(&mut self, id: T::Id) -> Result<(), RemoteError> {
        let result = observe(Arc::clone(&self.delete), id.clone())
            .with_timeout(self.timeout)
            .outcome()
            .await;
        match result {
            Ok(()) => {
                self.filter.retain(|item| item.id() != &id);
                info!("Record removed");
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "Delete failed");
                self.state.error = Some(error.user_message());
                Err(error)
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    pub fn items(&self) -> &[T] {
        self.filter.items()
    }

    pub fn visible(&self) -> &[T] {
        self.filter.visible()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Text for an empty screen. `None` while loading, on error, or when rows are visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.state.is_loading || self.state.error.is_some() || !self.filter.visible().is_empty() {
            return None;
        }
        if self.filter.items().is_empty() {
            Some(EMPTY_LIST_MESSAGE)
        } else {
            Some(NO_MATCHES_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductPayload};
    use crate::mock_framework::{create_mock_client, expect_delete, expect_list};

    fn product(id: &str, name: &str, status: Status) -> Product {
        Product {
            id: id.to_string(),
            payload: ProductPayload {
                name: name.to_string(),
                description: String::new(),
                unit: "pieza".to_string(),
                status,
            },
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Pañales adulto", Status::Active),
            product("p2", "Pañales infantiles", Status::Inactive),
            product("p3", "Leche en polvo", Status::Active),
        ]
    }

    #[tokio::test]
    async fn test_refresh_then_filter() {
        let (client, mut backend) = create_mock_client::<Product>(4);
        let mut view_model = ListViewModel::from_client(client);

        let backend_task = tokio::spawn(async move {
            let responder = expect_list(&mut backend).await.expect("Expected List request");
            responder.send(Ok(catalog())).unwrap();
        });
        view_model.refresh().await;
        backend_task.await.unwrap();

        assert_eq!(view_model.state(), &ListState::default());
        assert_eq!(view_model.visible().len(), 3);

        view_model.set_query("PAÑALES");
        let ids: Vec<&str> = view_model.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);

        view_model.set_status(Some(Status::Active));
        let ids: Vec<&str> = view_model.visible().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);

        view_model.set_query("jabón");
        assert_eq!(view_model.empty_message(), Some(NO_MATCHES_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_items_and_reports() {
        let (client, mut backend) = create_mock_client::<Product>(4);
        let mut view_model = ListViewModel::from_client(client);

        let backend_task = tokio::spawn(async move {
            let responder = expect_list(&mut backend).await.expect("Expected List request");
            responder.send(Ok(catalog())).unwrap();
            let responder = expect_list(&mut backend).await.expect("Expected List request");
            responder
                .send(Err(RemoteError::Unavailable("sin conexión".into())))
                .unwrap();
        });
        view_model.refresh().await;
        view_model.refresh().await;
        backend_task.await.unwrap();

        assert_eq!(view_model.items().len(), 3);
        assert_eq!(
            view_model.state().error.as_deref(),
            Some("Service unavailable: sin conexión")
        );
        assert!(!view_model.state().is_loading);
        assert_eq!(view_model.empty_message(), None);
    }

    #[tokio::test]
    async fn test_remove_drops_row_after_backend_confirms() {
        let (client, mut backend) = create_mock_client::<Product>(4);
        let mut view_model = ListViewModel::from_client(client);

        let backend_task = tokio::spawn(async move {
            let responder = expect_list(&mut backend).await.expect("Expected List request");
            responder.send(Ok(vec![product("p1", "Arroz", Status::Active)])).unwrap();

            let (id, responder) = expect_delete(&mut backend).await.expect("Expected Delete request");
            assert_eq!(id, "p1");
            responder.send(Ok(())).unwrap();

            let (_, responder) = expect_delete(&mut backend).await.expect("Expected Delete request");
            responder.send(Err(RemoteError::NotFound("product p1".into()))).unwrap();
        });

        view_model.refresh().await;
        view_model.remove("p1".to_string()).await.unwrap();
        assert!(view_model.items().is_empty());
        assert_eq!(view_model.empty_message(), Some(EMPTY_LIST_MESSAGE));

        let again = view_model.remove("p1".to_string()).await;
        assert_eq!(again, Err(RemoteError::NotFound("product p1".into())));
        assert_eq!(view_model.state().error.as_deref(), Some("Not found: product p1"));
        backend_task.await.unwrap();
    }
}
