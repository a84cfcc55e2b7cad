use tracing::debug;

use crate::actor_framework::Entity;
use crate::domain::{Status, SupplyBatch, SupplyBatchPayload};

use super::actions::{SupplyAction, SupplyActionResult};

impl Entity for SupplyBatch {
    type Id = String;
    type Payload = SupplyBatchPayload;
    type Action = SupplyAction;
    type ActionResult = SupplyActionResult;

    const KIND: &'static str = "supply batch";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: SupplyBatchPayload) -> Result<Self, String> {
        if payload.quantity == 0 {
            return Err("A batch needs at least one unit".to_string());
        }
        Ok(Self { id, payload })
    }

    fn on_update(&mut self, payload: SupplyBatchPayload) -> Result<(), String> {
        self.payload = payload;
        Ok(())
    }

    fn handle_action(&mut self, action: SupplyAction) -> Result<SupplyActionResult, String> {
        match action {
            SupplyAction::CheckStock => Ok(SupplyActionResult::Remaining(self.payload.quantity)),
            SupplyAction::Withdraw(amount) => {
                if self.payload.status == Status::Inactive {
                    return Err(format!("Batch {} is inactive", self.id));
                }
                if self.payload.quantity < amount {
                    return Err(format!(
                        "Insufficient stock: {} available, {} requested",
                        self.payload.quantity, amount
                    ));
                }
                self.payload.quantity -= amount;
                debug!(id = %self.id, remaining = self.payload.quantity, "Stock withdrawn");
                Ok(SupplyActionResult::Remaining(self.payload.quantity))
            }
        }
    }
}
