use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::beneficiary::BeneficiaryForm;
use crate::config::EditorConfig;
use crate::domain::{Beneficiary, Product, SupplyBatch, User, Workshop};
use crate::editor::{spawn_editor, EditorClient, EditorUseCases};
use crate::listing::ListViewModel;
use crate::product::ProductForm;
use crate::supply::SupplyBatchForm;
use crate::use_case::{ActionUseCase, SharedUseCase};
use crate::user::UserForm;
use crate::workshop::WorkshopForm;

use super::SystemError;

/// The running administrative core.
///
/// Owns one backend actor per entity kind and hands out editors and list view
/// models wired to them. Editors opened here are stopped on [`shutdown`](Self::shutdown).
pub struct AdminSystem {
    pub beneficiaries: ResourceClient<Beneficiary>,
    pub workshops: ResourceClient<Workshop>,
    pub supply_batches: ResourceClient<SupplyBatch>,
    pub users: ResourceClient<User>,
    pub products: ResourceClient<Product>,
    config: EditorConfig,
    backends: Vec<JoinHandle<()>>,
    editors: Vec<JoinHandle<()>>,
}

fn start_backend<T: Entity<Id = String>>(prefix: &'static str, buffer_size: usize, handles: &mut Vec<JoinHandle<()>>) -> ResourceClient<T> {
    let counter = Arc::new(AtomicU64::new(1));
    let next_id = move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst));
    let (actor, client) = ResourceActor::<T>::new(buffer_size, next_id);
    handles.push(tokio::spawn(actor.run()));
    client
}

impl AdminSystem {
    pub fn new(config: EditorConfig) -> Self {
        info!("Starting admin system");
        let mut backends = Vec::new();
        let size = config.buffer_size;

        Self {
            beneficiaries: start_backend("ben", size, &mut backends),
            workshops: start_backend("taller", size, &mut backends),
            supply_batches: start_backend("lote", size, &mut backends),
            users: start_backend("user", size, &mut backends),
            products: start_backend("insumo", size, &mut backends),
            config,
            backends,
            editors: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Editors started here that have not stopped yet.
    pub fn running_editors(&self) -> usize {
        self.editors.iter().filter(|editor| !editor.is_finished()).count()
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down admin system...");

        for editor in &self.editors {
            editor.abort();
        }
        for editor in self.editors {
            if let Err(e) = editor.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "Editor task failed");
                }
            }
        }

        let stops = [
            self.beneficiaries.shutdown().await,
            self.workshops.shutdown().await,
            self.supply_batches.shutdown().await,
            self.users.shutdown().await,
            self.products.shutdown().await,
        ];
        for stop in stops {
            if let Err(e) = stop {
                debug!(error = %e, "Backend already stopped");
            }
        }

        for handle in self.backends {
            handle.await?;
        }

        info!("Admin system shutdown complete.");
        Ok(())
    }
}

/// Generates `<entity>_editor`, `<entity>_list` and `<entity>_actions` for each entity.
macro_rules! impl_entity_surfaces {
    ($($snake:ident: $entity:ty, $form:ty, $client:ident;)*) => {
        paste::paste! {
            impl AdminSystem {
                $(
                    pub fn [<$snake _editor>](&mut self) -> EditorClient<$form> {
                        let use_cases = EditorUseCases::from_client(self.$client.clone());
                        let (editor, handle) = spawn_editor::<$form>(use_cases, self.config.clone());
                        self.editors.retain(|task| !task.is_finished());
                        self.editors.push(handle);
                        editor
                    }

                    pub fn [<$snake _list>](&self) -> ListViewModel<$entity> {
                        ListViewModel::from_client(self.$client.clone()).with_timeout(self.config.request_timeout)
                    }

                    pub fn [<$snake _actions>](&self) -> SharedUseCase<(String, <$entity as Entity>::Action), <$entity as Entity>::ActionResult> {
                        Arc::new(ActionUseCase::new(self.$client.clone()))
                    }
                )*
            }
        }
    };
}

impl_entity_surfaces! {
    beneficiary: Beneficiary, BeneficiaryForm, beneficiaries;
    workshop: Workshop, WorkshopForm, workshops;
    supply_batch: SupplyBatch, SupplyBatchForm, supply_batches;
    user: User, UserForm, users;
    product: Product, ProductForm, products;
}
