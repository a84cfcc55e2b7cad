use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Searchable, Status};

/// A person served by the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(rename = "idBeneficiario")]
    pub id: String,
    #[serde(flatten)]
    pub payload: BeneficiaryPayload,
}

/// Record sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: String,
    #[serde(rename = "fechaNacimiento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "numeroEmergencia")]
    pub emergency_phone: String,
    #[serde(rename = "nombreContactoEmergencia")]
    pub emergency_contact_name: String,
    #[serde(rename = "relacionContactoEmergencia")]
    pub emergency_contact_relation: String,
    #[serde(rename = "tipoSangre")]
    pub blood_type: String,
    #[serde(rename = "fechaIngreso")]
    pub admission_date: NaiveDate,
    #[serde(rename = "discapacidades")]
    pub disability_ids: Vec<String>,
    #[serde(rename = "descripcion", default)]
    pub notes: String,
    #[serde(rename = "estatus")]
    pub status: Status,
}

impl Beneficiary {
    pub fn full_name(&self) -> String {
        let p = &self.payload;
        format!("{} {} {}", p.name, p.paternal_surname, p.maternal_surname)
    }
}

impl Searchable for Beneficiary {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.full_name())
    }

    fn status(&self) -> Option<Status> {
        Some(self.payload.status)
    }
}
