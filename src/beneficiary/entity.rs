use crate::actor_framework::Entity;
use crate::domain::{Beneficiary, BeneficiaryPayload, Status, StatusAction};

impl Entity for Beneficiary {
    type Id = String;
    type Payload = BeneficiaryPayload;
    type Action = StatusAction;
    type ActionResult = Status;

    const KIND: &'static str = "beneficiary";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: BeneficiaryPayload) -> Result<Self, String> {
        check_dates(&payload)?;
        Ok(Self { id, payload })
    }

    fn on_update(&mut self, payload: BeneficiaryPayload) -> Result<(), String> {
        check_dates(&payload)?;
        self.payload = payload;
        Ok(())
    }

    fn handle_action(&mut self, action: StatusAction) -> Result<Status, String> {
        Ok(action.apply(&mut self.payload.status))
    }
}

fn check_dates(payload: &BeneficiaryPayload) -> Result<(), String> {
    if payload.admission_date < payload.birth_date {
        return Err("Admission date is before the birth date".to_string());
    }
    Ok(())
}
