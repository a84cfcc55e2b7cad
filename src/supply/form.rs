use std::fmt;

use crate::domain::{AcquisitionType, Status, SupplyBatch, SupplyBatchPayload};
use crate::forms::dates::to_display;
use crate::forms::{parsed_optional_date, parsed_quantity, EntityForm, FieldError, FieldErrors, Validation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyBatchForm {
    pub supply_id: String,
    pub supply_name: String,
    pub quantity: String,
    /// Blank for non-perishable supplies.
    pub expiration_date: String,
    pub acquisition: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupplyBatchField {
    Supply,
    Quantity,
    ExpirationDate,
    Acquisition,
}

impl fmt::Display for SupplyBatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SupplyBatchField::Supply => "idInsumo",
            SupplyBatchField::Quantity => "cantidad",
            SupplyBatchField::ExpirationDate => "fechaCaducidad",
            SupplyBatchField::Acquisition => "tipoAdquisicion",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyBatchEdit {
    /// Picking a supply from the dropdown sets both id and label.
    Supply { id: String, name: String },
    Quantity(String),
    ExpirationDate(String),
    Acquisition(String),
    Status(Status),
}

impl EntityForm for SupplyBatchForm {
    type Entity = SupplyBatch;
    type Field = SupplyBatchField;
    type Edit = SupplyBatchEdit;

    const NAME: &'static str = "supply_batch";

    fn apply(mut self, edit: SupplyBatchEdit) -> Self {
        match edit {
            SupplyBatchEdit::Supply { id, name } => {
                self.supply_id = id;
                self.supply_name = name;
            }
            SupplyBatchEdit::Quantity(v) => self.quantity = v,
            SupplyBatchEdit::ExpirationDate(v) => self.expiration_date = v,
            SupplyBatchEdit::Acquisition(v) => self.acquisition = v,
            SupplyBatchEdit::Status(v) => self.status = v,
        }
        self
    }

    fn validate(&self) -> FieldErrors<SupplyBatchField> {
        Validation::new()
            .required(SupplyBatchField::Supply, &self.supply_id)
            .positive_integer(SupplyBatchField::Quantity, &self.quantity)
            .optional_date(SupplyBatchField::ExpirationDate, &self.expiration_date)
            .required(SupplyBatchField::Acquisition, &self.acquisition)
            .check(
                SupplyBatchField::Acquisition,
                AcquisitionType::parse(&self.acquisition).is_some(),
                FieldError::EmptySelection,
            )
            .finish()
    }

    fn from_entity(entity: &SupplyBatch) -> Self {
        let p = &entity.payload;
        Self {
            supply_id: p.supply_id.clone(),
            supply_name: p.supply_name.clone(),
            quantity: p.quantity.to_string(),
            expiration_date: p.expiration_date.map(to_display).unwrap_or_default(),
            acquisition: p.acquisition.to_string(),
            status: p.status,
        }
    }

    fn to_payload(&self) -> Result<SupplyBatchPayload, FieldErrors<SupplyBatchField>> {
        let acquisition = AcquisitionType::parse(&self.acquisition)
            .ok_or_else(|| [(SupplyBatchField::Acquisition, FieldError::EmptySelection)].into_iter().collect::<FieldErrors<_>>())?;
        Ok(SupplyBatchPayload {
            supply_id: self.supply_id.trim().to_string(),
            supply_name: self.supply_name.clone(),
            quantity: parsed_quantity(SupplyBatchField::Quantity, &self.quantity)?,
            expiration_date: parsed_optional_date(SupplyBatchField::ExpirationDate, &self.expiration_date)?,
            acquisition,
            status: self.status,
        })
    }
}
