use crate::actor_framework::Entity;
use crate::domain::{Status, StatusAction, User, UserPayload};

impl Entity for User {
    type Id = String;
    type Payload = UserPayload;
    type Action = StatusAction;
    type ActionResult = Status;

    const KIND: &'static str = "user";

    fn id(&self) -> &String {
        &self.id
    }

    /// New accounts must come with a password; it is never stored in the clear record.
    fn from_create(id: String, mut payload: UserPayload) -> Result<Self, String> {
        if payload.password.take().is_none() {
            return Err("A password is required for new users".to_string());
        }
        Ok(Self { id, payload })
    }

    /// An update without a password keeps the current one.
    fn on_update(&mut self, mut payload: UserPayload) -> Result<(), String> {
        payload.password = None;
        self.payload = payload;
        Ok(())
    }

    fn handle_action(&mut self, action: StatusAction) -> Result<Status, String> {
        Ok(action.apply(&mut self.payload.status))
    }
}
