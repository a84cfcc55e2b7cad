use crate::actor_framework::Entity;
use crate::domain::{Product, ProductPayload, Status, StatusAction};

impl Entity for Product {
    type Id = String;
    type Payload = ProductPayload;
    type Action = StatusAction;
    type ActionResult = Status;

    const KIND: &'static str = "product";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: ProductPayload) -> Result<Self, String> {
        Ok(Self { id, payload })
    }

    fn on_update(&mut self, payload: ProductPayload) -> Result<(), String> {
        self.payload = payload;
        Ok(())
    }

    fn handle_action(&mut self, action: StatusAction) -> Result<Status, String> {
        Ok(action.apply(&mut self.payload.status))
    }
}
