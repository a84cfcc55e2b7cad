use crate::actor_framework::Entity;
use crate::domain::{Status, StatusAction, Workshop, WorkshopPayload};

impl Entity for Workshop {
    type Id = String;
    type Payload = WorkshopPayload;
    type Action = StatusAction;
    type ActionResult = Status;

    const KIND: &'static str = "workshop";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: WorkshopPayload) -> Result<Self, String> {
        Ok(Self { id, payload })
    }

    fn on_update(&mut self, payload: WorkshopPayload) -> Result<(), String> {
        self.payload = payload;
        Ok(())
    }

    fn handle_action(&mut self, action: StatusAction) -> Result<Status, String> {
        Ok(action.apply(&mut self.payload.status))
    }
}
