use std::fmt;

use crate::domain::{Beneficiary, BeneficiaryPayload, Status};
use crate::forms::dates::to_display;
use crate::forms::{parsed_date, EntityForm, FieldErrors, Validation};

/// Raw values of the beneficiary registration screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeneficiaryForm {
    pub name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub birth_date: String,
    pub emergency_phone: String,
    pub emergency_contact_name: String,
    pub emergency_contact_relation: String,
    pub blood_type: String,
    pub admission_date: String,
    pub disability_ids: Vec<String>,
    pub notes: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeneficiaryField {
    Name,
    PaternalSurname,
    MaternalSurname,
    BirthDate,
    EmergencyPhone,
    EmergencyContactName,
    EmergencyContactRelation,
    BloodType,
    AdmissionDate,
    Disabilities,
}

impl fmt::Display for BeneficiaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            BeneficiaryField::Name => "nombre",
            BeneficiaryField::PaternalSurname => "apellidoPaterno",
            BeneficiaryField::MaternalSurname => "apellidoMaterno",
            BeneficiaryField::BirthDate => "fechaNacimiento",
            BeneficiaryField::EmergencyPhone => "numeroEmergencia",
            BeneficiaryField::EmergencyContactName => "nombreContactoEmergencia",
            BeneficiaryField::EmergencyContactRelation => "relacionContactoEmergencia",
            BeneficiaryField::BloodType => "tipoSangre",
            BeneficiaryField::AdmissionDate => "fechaIngreso",
            BeneficiaryField::Disabilities => "discapacidades",
        };
        f.write_str(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeneficiaryEdit {
    Name(String),
    PaternalSurname(String),
    MaternalSurname(String),
    BirthDate(String),
    EmergencyPhone(String),
    EmergencyContactName(String),
    EmergencyContactRelation(String),
    BloodType(String),
    AdmissionDate(String),
    /// Adds the disability if absent, removes it otherwise.
    ToggleDisability(String),
    Notes(String),
    Status(Status),
}

impl EntityForm for BeneficiaryForm {
    type Entity = Beneficiary;
    type Field = BeneficiaryField;
    type Edit = BeneficiaryEdit;

    const NAME: &'static str = "beneficiary";

    fn apply(mut self, edit: BeneficiaryEdit) -> Self {
        match edit {
            BeneficiaryEdit::Name(v) => self.name = v,
            BeneficiaryEdit::PaternalSurname(v) => self.paternal_surname = v,
            BeneficiaryEdit::MaternalSurname(v) => self.maternal_surname = v,
            BeneficiaryEdit::BirthDate(v) => self.birth_date = v,
            BeneficiaryEdit::EmergencyPhone(v) => self.emergency_phone = v,
            BeneficiaryEdit::EmergencyContactName(v) => self.emergency_contact_name = v,
            BeneficiaryEdit::EmergencyContactRelation(v) => self.emergency_contact_relation = v,
            BeneficiaryEdit::BloodType(v) => self.blood_type = v,
            BeneficiaryEdit::AdmissionDate(v) => self.admission_date = v,
            BeneficiaryEdit::ToggleDisability(id) => {
                if let Some(pos) = self.disability_ids.iter().position(|d| *d == id) {
                    self.disability_ids.remove(pos);
                } else {
                    self.disability_ids.push(id);
                }
            }
            BeneficiaryEdit::Notes(v) => self.notes = v,
            BeneficiaryEdit::Status(v) => self.status = v,
        }
        self
    }

    fn validate(&self) -> FieldErrors<BeneficiaryField> {
        use BeneficiaryField::*;
        Validation::new()
            .required(Name, &self.name)
            .required(PaternalSurname, &self.paternal_surname)
            .required(MaternalSurname, &self.maternal_surname)
            .date(BirthDate, &self.birth_date)
            .phone(EmergencyPhone, &self.emergency_phone)
            .required(EmergencyContactName, &self.emergency_contact_name)
            .required(EmergencyContactRelation, &self.emergency_contact_relation)
            .required(BloodType, &self.blood_type)
            .date(AdmissionDate, &self.admission_date)
            .selection(Disabilities, &self.disability_ids)
            .finish()
    }

    fn from_entity(entity: &Beneficiary) -> Self {
        let p = &entity.payload;
        Self {
            name: p.name.clone(),
            paternal_surname: p.paternal_surname.clone(),
            maternal_surname: p.maternal_surname.clone(),
            birth_date: to_display(p.birth_date),
            emergency_phone: p.emergency_phone.clone(),
            emergency_contact_name: p.emergency_contact_name.clone(),
            emergency_contact_relation: p.emergency_contact_relation.clone(),
            blood_type: p.blood_type.clone(),
            admission_date: to_display(p.admission_date),
            disability_ids: p.disability_ids.clone(),
            notes: p.notes.clone(),
            status: p.status,
        }
    }

    fn to_payload(&self) -> Result<BeneficiaryPayload, FieldErrors<BeneficiaryField>> {
        Ok(BeneficiaryPayload {
            name: self.name.trim().to_string(),
            paternal_surname: self.paternal_surname.trim().to_string(),
            maternal_surname: self.maternal_surname.trim().to_string(),
            birth_date: parsed_date(BeneficiaryField::BirthDate, &self.birth_date)?,
            emergency_phone: self.emergency_phone.clone(),
            emergency_contact_name: self.emergency_contact_name.trim().to_string(),
            emergency_contact_relation: self.emergency_contact_relation.trim().to_string(),
            blood_type: self.blood_type.trim().to_string(),
            admission_date: parsed_date(BeneficiaryField::AdmissionDate, &self.admission_date)?,
            disability_ids: self.disability_ids.clone(),
            notes: self.notes.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::forms::FieldError;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    pub(crate) fn juan() -> BeneficiaryForm {
        BeneficiaryForm {
            name: "Juan".into(),
            paternal_surname: "Garcia".into(),
            maternal_surname: "Lopez".into(),
            birth_date: "2000-01-15".into(),
            emergency_phone: "4421234567".into(),
            emergency_contact_name: "Maria Lopez".into(),
            emergency_contact_relation: "Madre".into(),
            blood_type: "O+".into(),
            admission_date: "03/02/2024".into(),
            disability_ids: vec!["disc_1".into()],
            notes: String::new(),
            status: Status::Active,
        }
    }

    #[test]
    fn test_blank_form_flags_every_required_field() {
        let errors = BeneficiaryForm::default().validate();
        use BeneficiaryField::*;
        for field in [
            Name,
            PaternalSurname,
            MaternalSurname,
            BirthDate,
            EmergencyPhone,
            EmergencyContactName,
            EmergencyContactRelation,
            BloodType,
            AdmissionDate,
            Disabilities,
        ] {
            assert!(errors.contains(field), "{field} should be flagged");
        }
        assert_eq!(errors.get(Disabilities), Some(FieldError::EmptySelection));
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(juan().validate().is_valid());
    }

    #[test]
    fn test_bad_date_and_phone() {
        let form = juan()
            .apply(BeneficiaryEdit::BirthDate("15-01-2000".into()))
            .apply(BeneficiaryEdit::EmergencyPhone("442 123 45".into()));
        let errors = form.validate();
        assert_eq!(errors.get(BeneficiaryField::BirthDate), Some(FieldError::InvalidDate));
        assert_eq!(errors.get(BeneficiaryField::EmergencyPhone), Some(FieldError::InvalidPhone));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_payload_carries_wire_dates() {
        let form = juan().apply(BeneficiaryEdit::BirthDate("15/01/2000".into()));
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.birth_date, NaiveDate::from_ymd_opt(2000, 1, 15).unwrap());

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fechaNacimiento"], "2000-01-15");
        assert_eq!(json["fechaIngreso"], "2024-02-03");
        assert_eq!(json["estatus"], 1);
    }

    #[test]
    fn test_toggle_disability() {
        let form = BeneficiaryForm::default()
            .apply(BeneficiaryEdit::ToggleDisability("disc_1".into()))
            .apply(BeneficiaryEdit::ToggleDisability("disc_2".into()))
            .apply(BeneficiaryEdit::ToggleDisability("disc_1".into()));
        assert_eq!(form.disability_ids, vec!["disc_2".to_string()]);
    }

    #[test]
    fn test_from_entity_uses_display_dates() {
        let payload = juan().to_payload().unwrap();
        let entity = Beneficiary { id: "ben_1".into(), payload };
        let form = BeneficiaryForm::from_entity(&entity);
        assert_eq!(form.birth_date, "15/01/2000");
        assert_eq!(form.admission_date, "03/02/2024");
        assert!(form.validate().is_valid());
    }

    fn blanked(index: usize, blank: String) -> (BeneficiaryEdit, BeneficiaryField) {
        match index {
            0 => (BeneficiaryEdit::Name(blank), BeneficiaryField::Name),
            1 => (BeneficiaryEdit::PaternalSurname(blank), BeneficiaryField::PaternalSurname),
            2 => (BeneficiaryEdit::MaternalSurname(blank), BeneficiaryField::MaternalSurname),
            3 => (BeneficiaryEdit::BirthDate(blank), BeneficiaryField::BirthDate),
            4 => (BeneficiaryEdit::EmergencyPhone(blank), BeneficiaryField::EmergencyPhone),
            5 => (BeneficiaryEdit::EmergencyContactName(blank), BeneficiaryField::EmergencyContactName),
            6 => (BeneficiaryEdit::EmergencyContactRelation(blank), BeneficiaryField::EmergencyContactRelation),
            7 => (BeneficiaryEdit::BloodType(blank), BeneficiaryField::BloodType),
            8 => (BeneficiaryEdit::AdmissionDate(blank), BeneficiaryField::AdmissionDate),
            _ => (BeneficiaryEdit::ToggleDisability("disc_1".into()), BeneficiaryField::Disabilities),
        }
    }

    proptest! {
        #[test]
        fn blank_required_fields_are_always_flagged(
            indices in prop::collection::btree_set(0usize..10, 1..=6),
            blank in "[ \t\n]{0,4}"
        ) {
            let mut form = juan();
            let mut blanked_fields = Vec::new();
            for index in indices {
                let (edit, field) = blanked(index, blank.clone());
                form = form.apply(edit);
                blanked_fields.push(field);
            }

            let errors = form.validate();
            for field in &blanked_fields {
                prop_assert!(errors.contains(*field), "{} not flagged", field);
            }
            prop_assert_eq!(errors.len(), blanked_fields.len());
        }
    }
}
