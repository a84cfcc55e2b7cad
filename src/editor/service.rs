use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::Entity;
use crate::config::EditorConfig;
use crate::forms::EntityForm;
use crate::use_case::{observe, Resource, ResourceCall};

use super::{EditorClient, EditorSnapshot, EditorState, EditorUseCases, IdOf, LoadOutcome, Saved, Submission, SubmitOutcome, Ticket};

/// Typed messages a screen sends to its editor.
#[derive(Debug)]
pub enum EditorRequest<F: EntityForm> {
    Edit {
        edit: F::Edit,
        respond_to: oneshot::Sender<()>,
    },
    Load {
        id: IdOf<F>,
        respond_to: oneshot::Sender<LoadOutcome>,
    },
    Submit {
        respond_to: oneshot::Sender<SubmitOutcome<F::Field>>,
    },
    Reset {
        respond_to: oneshot::Sender<()>,
    },
    Dismiss {
        respond_to: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Result stream items forwarded from background calls.
enum Progress<E: Entity> {
    Load(Ticket, Resource<E>),
    Submit(Ticket, Resource<Saved<E>>),
}

/// Per-screen editor actor.
///
/// Requests are handled one at a time; backend calls run in a spawned task
/// whose result stream is fed back through an internal channel, so the
/// screen stays responsive (edits, reset) while a call is pending.
pub struct EditorService<F: EntityForm> {
    receiver: mpsc::Receiver<EditorRequest<F>>,
    progress_tx: mpsc::Sender<Progress<F::Entity>>,
    progress_rx: mpsc::Receiver<Progress<F::Entity>>,
    state: EditorState<F>,
    use_cases: EditorUseCases<F::Entity>,
    publisher: watch::Sender<EditorSnapshot<F>>,
    in_flight: Option<JoinHandle<()>>,
    config: EditorConfig,
}

impl<F: EntityForm> EditorService<F> {
    pub fn new(use_cases: EditorUseCases<F::Entity>, config: EditorConfig) -> (Self, EditorClient<F>) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (progress_tx, progress_rx) = mpsc::channel(config.buffer_size);
        let state = EditorState::new(config.clear_errors_on_edit);
        let (publisher, snapshots) = watch::channel(state.snapshot());
        let service = Self {
            receiver,
            progress_tx,
            progress_rx,
            state,
            use_cases,
            publisher,
            in_flight: None,
            config,
        };
        (service, EditorClient::new(sender, snapshots))
    }

    #[instrument(name = "editor_service", skip(self), fields(form = F::NAME))]
    pub async fn run(mut self) {
        info!("Editor starting");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => {
                        if !self.handle_request(request) {
                            break;
                        }
                    }
                    None => break,
                },
                Some(progress) = self.progress_rx.recv() => self.handle_progress(progress),
            }
        }

        self.abort_in_flight();
        info!("Editor stopped");
    }

    /// Returns `false` once the editor should stop.
    fn handle_request(&mut self, request: EditorRequest<F>) -> bool {
        match request {
            EditorRequest::Edit { edit, respond_to } => {
                debug!(?edit, "Applying edit");
                self.state.edit(edit);
                self.publish();
                let _ = respond_to.send(());
            }
            EditorRequest::Load { id, respond_to } => {
                let _ = respond_to.send(self.handle_load(id));
            }
            EditorRequest::Submit { respond_to } => {
                let _ = respond_to.send(self.handle_submit());
            }
            EditorRequest::Reset { respond_to } => {
                self.abort_in_flight();
                self.state.reset();
                self.publish();
                debug!("Editor reset");
                let _ = respond_to.send(());
            }
            EditorRequest::Dismiss { respond_to } => {
                self.state.dismiss();
                self.publish();
                let _ = respond_to.send(());
            }
            EditorRequest::Shutdown => {
                info!("Editor shutting down");
                return false;
            }
        }
        true
    }

    #[instrument(skip_all, fields(id = %id))]
    fn handle_load(&mut self, id: IdOf<F>) -> LoadOutcome {
        let Some(ticket) = self.state.begin_load() else {
            warn!("Load ignored, a request is already in flight");
            return LoadOutcome::AlreadyInFlight;
        };
        self.publish();

        let call = observe(self.use_cases.get.clone(), id).with_timeout(self.config.request_timeout);
        self.spawn_forward(call, move |item| Progress::Load(ticket, item));
        LoadOutcome::Started
    }

    #[instrument(skip(self))]
    fn handle_submit(&mut self) -> SubmitOutcome<F::Field> {
        let (ticket, submission) = match self.state.begin_submit() {
            Ok(started) => started,
            Err(outcome) => {
                match &outcome {
                    SubmitOutcome::Invalid(errors) => info!(invalid_fields = errors.len(), "Submission blocked by validation"),
                    _ => warn!("Submission ignored, a request is already in flight"),
                }
                self.publish();
                return outcome;
            }
        };
        self.publish();

        let timeout = self.config.request_timeout;
        match submission {
            Submission::Create(payload) => {
                info!("Creating record");
                let call = observe(self.use_cases.create.clone(), payload).with_timeout(timeout);
                self.spawn_forward(call, move |item| Progress::Submit(ticket, item.map(Saved::Created)));
            }
            Submission::Update(id, payload) => {
                info!(id = %id, "Updating record");
                let call = observe(self.use_cases.update.clone(), (id, payload)).with_timeout(timeout);
                self.spawn_forward(call, move |item| Progress::Submit(ticket, item.map(Saved::Updated)));
            }
        }
        SubmitOutcome::Started
    }

    fn handle_progress(&mut self, progress: Progress<F::Entity>) {
        let applied = match progress {
            Progress::Load(ticket, Resource::Loading) | Progress::Submit(ticket, Resource::Loading) => {
                self.state.mark_loading(ticket);
                true
            }
            Progress::Load(ticket, Resource::Success(entity)) => self.state.finish_load(ticket, Ok(entity)),
            Progress::Load(ticket, Resource::Error(error)) => {
                warn!(error = %error, "Load failed");
                self.state.finish_load(ticket, Err(error))
            }
            Progress::Submit(ticket, Resource::Success(saved)) => {
                info!("Record saved");
                self.state.finish_submit(ticket, Ok(saved))
            }
            Progress::Submit(ticket, Resource::Error(error)) => {
                warn!(error = %error, "Submission failed");
                self.state.finish_submit(ticket, Err(error))
            }
        };
        if applied {
            self.publish();
        } else {
            debug!("Dropped result of a superseded request");
        }
    }

    /// Background handler: the task owns the result stream and reports each item back.
    fn spawn_forward<T: Send + 'static>(
        &mut self,
        mut call: ResourceCall<T>,
        wrap: impl Fn(Resource<T>) -> Progress<F::Entity> + Send + 'static,
    ) {
        let progress = self.progress_tx.clone();
        let task = tokio::spawn(async move {
            while let Some(item) = call.next().await {
                if progress.send(wrap(item)).await.is_err() {
                    break;
                }
            }
        });
        self.abort_in_flight();
        self.in_flight = Some(task);
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.snapshot());
    }
}
