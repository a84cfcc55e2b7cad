use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::error::EditorError;
use crate::forms::EntityForm;

use super::{EditorRequest, EditorSnapshot, IdOf, LoadOutcome, SubmitOutcome};

/// Generates a request/response method on [`EditorClient`].
macro_rules! editor_method {
    ($name:ident ( $($arg:ident : $ty:ty),* ) -> $ret:ty, $variant:ident) => {
        #[instrument(skip_all, fields(form = F::NAME))]
        pub async fn $name(&self, $($arg: $ty),*) -> Result<$ret, EditorError> {
            debug!("Sending request");
            let (respond_to, response) = oneshot::channel();
            self.sender
                .send(EditorRequest::$variant { $($arg,)* respond_to })
                .await
                .map_err(|_| EditorError::Closed)?;
            response.await.map_err(|_| EditorError::Dropped)
        }
    };
}

/// Handle a screen uses to drive its editor and watch its state.
#[derive(Debug)]
pub struct EditorClient<F: EntityForm> {
    sender: mpsc::Sender<EditorRequest<F>>,
    snapshots: watch::Receiver<EditorSnapshot<F>>,
}

impl<F: EntityForm> Clone for EditorClient<F> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<F: EntityForm> EditorClient<F> {
    pub fn new(sender: mpsc::Sender<EditorRequest<F>>, snapshots: watch::Receiver<EditorSnapshot<F>>) -> Self {
        Self { sender, snapshots }
    }

    editor_method!(edit(edit: F::Edit) -> (), Edit);
    editor_method!(load(id: IdOf<F>) -> LoadOutcome, Load);
    editor_method!(submit() -> SubmitOutcome<F::Field>, Submit);
    editor_method!(reset() -> (), Reset);
    editor_method!(dismiss() -> (), Dismiss);

    /// Latest published state.
    pub fn snapshot(&self) -> EditorSnapshot<F> {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver that sees every later change.
    pub fn subscribe(&self) -> watch::Receiver<EditorSnapshot<F>> {
        self.snapshots.clone()
    }

    /// Waits until no load or submission is in flight and returns that state.
    pub async fn settled(&self) -> Result<EditorSnapshot<F>, EditorError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|snapshot| !snapshot.ui.is_loading)
            .await
            .map_err(|_| EditorError::Closed)?;
        Ok(snapshot.clone())
    }

    pub async fn shutdown(&self) -> Result<(), EditorError> {
        self.sender
            .send(EditorRequest::Shutdown)
            .await
            .map_err(|_| EditorError::Closed)
    }
}
