use std::fmt;

use crate::domain::{Status, Workshop, WorkshopPayload};
use crate::forms::dates::{time_to_display, to_display};
use crate::forms::{parsed_date, parsed_time, EntityForm, FieldErrors, Validation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkshopForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkshopField {
    Name,
    Date,
    StartTime,
    EndTime,
}

impl fmt::Display for WorkshopField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkshopField::Name => "nombreTaller",
            WorkshopField::Date => "fecha",
            WorkshopField::StartTime => "horaEntrada",
            WorkshopField::EndTime => "horaSalida",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkshopEdit {
    Name(String),
    Description(String),
    Date(String),
    StartTime(String),
    EndTime(String),
    Status(Status),
}

impl EntityForm for WorkshopForm {
    type Entity = Workshop;
    type Field = WorkshopField;
    type Edit = WorkshopEdit;

    const NAME: &'static str = "workshop";

    fn apply(mut self, edit: WorkshopEdit) -> Self {
        match edit {
            WorkshopEdit::Name(v) => self.name = v,
            WorkshopEdit::Description(v) => self.description = v,
            WorkshopEdit::Date(v) => self.date = v,
            WorkshopEdit::StartTime(v) => self.start_time = v,
            WorkshopEdit::EndTime(v) => self.end_time = v,
            WorkshopEdit::Status(v) => self.status = v,
        }
        self
    }

    fn validate(&self) -> FieldErrors<WorkshopField> {
        Validation::new()
            .required(WorkshopField::Name, &self.name)
            .date(WorkshopField::Date, &self.date)
            .time(WorkshopField::StartTime, &self.start_time)
            .time(WorkshopField::EndTime, &self.end_time)
            .time_order(WorkshopField::EndTime, &self.start_time, &self.end_time)
            .finish()
    }

    fn from_entity(entity: &Workshop) -> Self {
        let p = &entity.payload;
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            date: to_display(p.date),
            start_time: time_to_display(p.start_time),
            end_time: time_to_display(p.end_time),
            status: p.status,
        }
    }

    fn to_payload(&self) -> Result<WorkshopPayload, FieldErrors<WorkshopField>> {
        Ok(WorkshopPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            date: parsed_date(WorkshopField::Date, &self.date)?,
            start_time: parsed_time(WorkshopField::StartTime, &self.start_time)?,
            end_time: parsed_time(WorkshopField::EndTime, &self.end_time)?,
            status: self.status,
        })
    }
}
