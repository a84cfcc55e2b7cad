use std::mem;

use crate::actor_framework::Entity;
use crate::error::RemoteError;
use crate::forms::{EntityForm, FieldErrors, PayloadOf};

use super::IdOf;

/// Observable request status of an editor screen.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState<E> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_success: bool,
    /// Last record fetched or saved, kept for display and re-edit.
    pub loaded: Option<E>,
}

impl<E> Default for UiState<E> {
    fn default() -> Self {
        Self { is_loading: false, error: None, is_success: false, loaded: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

impl<E> UiState<E> {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.is_success {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

/// Whether submit creates a record or updates the loaded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode<Id> {
    Create,
    Modify(Id),
}

/// Identifies one load or submission; results carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub enum Submission<E: Entity> {
    Create(E::Payload),
    Update(E::Id, E::Payload),
}

#[derive(Debug, Clone)]
pub enum Saved<E: Entity> {
    Created(E::Id),
    Updated(E),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<K: Ord> {
    /// Validation passed and the backend call is running.
    Started,
    /// Nothing was sent; the errors are also published on the editor.
    Invalid(FieldErrors<K>),
    AlreadyInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Started,
    AlreadyInFlight,
}

/// Everything a screen renders, published after every change.
#[derive(Debug, Clone)]
pub struct EditorSnapshot<F: EntityForm> {
    pub form: F,
    pub errors: FieldErrors<F::Field>,
    pub ui: UiState<F::Entity>,
    pub mode: EditorMode<IdOf<F>>,
}

/// Synchronous core of an entity editor.
///
/// Transitions are `Idle -> Loading -> (Success | Error)`; `reset` returns to
/// `Idle` from anywhere. At most one load or submission is in flight.
#[derive(Debug)]
pub struct EditorState<F: EntityForm> {
    form: F,
    errors: FieldErrors<F::Field>,
    ui: UiState<F::Entity>,
    mode: EditorMode<IdOf<F>>,
    generation: u64,
    clear_errors_on_edit: bool,
}

impl<F: EntityForm> EditorState<F> {
    pub fn new(clear_errors_on_edit: bool) -> Self {
        Self {
            form: F::default(),
            errors: FieldErrors::new(),
            ui: UiState::default(),
            mode: EditorMode::Create,
            generation: 0,
            clear_errors_on_edit,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors<F::Field> {
        &self.errors
    }

    pub fn ui(&self) -> &UiState<F::Entity> {
        &self.ui
    }

    pub fn mode(&self) -> &EditorMode<IdOf<F>> {
        &self.mode
    }

    pub fn snapshot(&self) -> EditorSnapshot<F> {
        EditorSnapshot {
            form: self.form.clone(),
            errors: self.errors.clone(),
            ui: self.ui.clone(),
            mode: self.mode.clone(),
        }
    }

    pub fn edit(&mut self, edit: F::Edit) {
        self.form = mem::take(&mut self.form).apply(edit);
        if self.clear_errors_on_edit {
            self.errors.clear();
        }
    }

    pub fn begin_load(&mut self) -> Option<Ticket> {
        if self.ui.is_loading {
            return None;
        }
        Some(self.start_request())
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<F::Entity, RemoteError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.ui.is_loading = false;
        match result {
            Ok(entity) => {
                self.form = F::from_entity(&entity);
                self.errors.clear();
                self.mode = EditorMode::Modify(entity.id().clone());
                self.ui.loaded = Some(entity);
            }
            Err(error) => self.ui.error = Some(error.user_message()),
        }
        true
    }

    /// Validates and, when clean, moves to `Loading` with the call to make.
    pub fn begin_submit(&mut self) -> Result<(Ticket, Submission<F::Entity>), SubmitOutcome<F::Field>> {
        if self.ui.is_loading {
            return Err(SubmitOutcome::AlreadyInFlight);
        }
        self.errors = match self.mode {
            EditorMode::Create => self.form.validate_new(),
            EditorMode::Modify(_) => self.form.validate(),
        };
        if !self.errors.is_valid() {
            // A stale success or failure banner must not outlive the new field errors.
            self.dismiss();
            return Err(SubmitOutcome::Invalid(self.errors.clone()));
        }
        let payload: PayloadOf<F> = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors.clone();
                self.dismiss();
                return Err(SubmitOutcome::Invalid(errors));
            }
        };
        let submission = match &self.mode {
            EditorMode::Create => Submission::Create(payload),
            EditorMode::Modify(id) => Submission::Update(id.clone(), payload),
        };
        Ok((self.start_request(), submission))
    }

    /// A `Loading` item from the result stream; the state is already loading.
    pub fn mark_loading(&mut self, ticket: Ticket) {
        if self.is_current(ticket) {
            self.ui.is_loading = true;
        }
    }

    pub fn finish_submit(&mut self, ticket: Ticket, result: Result<Saved<F::Entity>, RemoteError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.ui.is_loading = false;
        match result {
            Ok(saved) => {
                self.ui.is_success = true;
                self.ui.error = None;
                match saved {
                    // Later submits update the new record instead of creating a duplicate.
                    Saved::Created(id) => self.mode = EditorMode::Modify(id),
                    Saved::Updated(entity) => {
                        self.mode = EditorMode::Modify(entity.id().clone());
                        self.ui.loaded = Some(entity);
                    }
                }
            }
            Err(error) => {
                self.ui.is_success = false;
                self.ui.error = Some(error.user_message());
            }
        }
        true
    }

    /// Back to a blank `Create` form. Results of earlier requests are ignored.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.form = F::default();
        self.errors.clear();
        self.ui = UiState::default();
        self.mode = EditorMode::Create;
    }

    /// Acknowledges a shown success or error without touching the form.
    pub fn dismiss(&mut self) {
        self.ui.error = None;
        self.ui.is_success = false;
    }

    fn start_request(&mut self) -> Ticket {
        self.generation += 1;
        self.ui.is_loading = true;
        self.ui.error = None;
        self.ui.is_success = false;
        Ticket(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beneficiary::{sample_form, BeneficiaryEdit, BeneficiaryField, BeneficiaryForm};
    use crate::domain::Beneficiary;
    use crate::forms::FieldError;

    fn filled(state: &mut EditorState<BeneficiaryForm>) {
        state.form = sample_form();
    }

    #[test]
    fn test_blank_submit_is_blocked() {
        let mut state = EditorState::<BeneficiaryForm>::new(true);
        match state.begin_submit() {
            Err(SubmitOutcome::Invalid(errors)) => assert!(errors.contains(BeneficiaryField::Name)),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.ui().phase(), Phase::Idle);
        assert_eq!(state.errors().get(BeneficiaryField::BirthDate), Some(FieldError::Blank));
    }

    #[test]
    fn test_edit_clears_errors_only_under_policy() {
        let mut clearing = EditorState::<BeneficiaryForm>::new(true);
        let _ = clearing.begin_submit();
        clearing.edit(BeneficiaryEdit::Name("Juan".into()));
        assert!(clearing.errors().is_valid());

        let mut keeping = EditorState::<BeneficiaryForm>::new(false);
        let _ = keeping.begin_submit();
        keeping.edit(BeneficiaryEdit::Name("Juan".into()));
        assert!(keeping.errors().contains(BeneficiaryField::Name));
        assert_eq!(keeping.form().name, "Juan");
    }

    #[test]
    fn test_second_submit_while_loading_is_rejected() {
        let mut state = EditorState::<BeneficiaryForm>::new(true);
        filled(&mut state);
        let (ticket, submission) = state.begin_submit().unwrap();
        assert!(matches!(submission, Submission::Create(_)));
        assert_eq!(state.ui().phase(), Phase::Loading);
        assert!(matches!(state.begin_submit(), Err(SubmitOutcome::AlreadyInFlight)));
        assert_eq!(state.begin_load(), None);

        assert!(state.finish_submit(ticket, Ok(Saved::Created("ben_1".into()))));
        assert_eq!(state.ui().phase(), Phase::Success);
        assert_eq!(state.mode(), &EditorMode::Modify("ben_1".to_string()));
    }

    #[test]
    fn test_failure_sets_message() {
        let mut state = EditorState::<BeneficiaryForm>::new(true);
        filled(&mut state);
        let (ticket, _) = state.begin_submit().unwrap();
        state.finish_submit(ticket, Err(RemoteError::Rejected(String::new())));
        assert_eq!(state.ui().phase(), Phase::Error);
        assert_eq!(state.ui().error.as_deref(), Some(crate::error::FALLBACK_ERROR_MESSAGE));
        assert!(!state.ui().is_success);

        state.dismiss();
        assert_eq!(state.ui().phase(), Phase::Idle);
        assert_eq!(state.form(), &sample_form());
    }

    #[test]
    fn test_reset_from_any_state_discards_late_results() {
        let mut state = EditorState::<BeneficiaryForm>::new(false);
        filled(&mut state);
        let (ticket, _) = state.begin_submit().unwrap();
        state.reset();

        assert_eq!(state.form(), &BeneficiaryForm::default());
        assert!(state.errors().is_empty());
        assert_eq!(state.ui(), &UiState::default());

        assert!(!state.finish_submit(ticket, Ok(Saved::Created("ben_9".into()))));
        assert_eq!(state.ui().phase(), Phase::Idle);
        assert_eq!(state.mode(), &EditorMode::Create);
    }

    #[test]
    fn test_load_populates_form_and_switches_to_modify() {
        let mut state = EditorState::<BeneficiaryForm>::new(true);
        let ticket = state.begin_load().unwrap();
        let entity = Beneficiary { id: "ben_4".into(), payload: sample_form().to_payload().unwrap() };
        state.finish_load(ticket, Ok(entity.clone()));

        assert_eq!(state.form().birth_date, "15/01/2000");
        assert_eq!(state.ui().loaded.as_ref(), Some(&entity));
        assert_eq!(state.ui().phase(), Phase::Idle);

        let (_, submission) = state.begin_submit().unwrap();
        match submission {
            Submission::Update(id, payload) => {
                assert_eq!(id, "ben_4");
                assert_eq!(payload, entity.payload);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_failed_load_keeps_create_mode() {
        let mut state = EditorState::<BeneficiaryForm>::new(true);
        let ticket = state.begin_load().unwrap();
        state.finish_load(ticket, Err(RemoteError::NotFound("beneficiary ben_0".into())));
        assert_eq!(state.ui().error.as_deref(), Some("Not found: beneficiary ben_0"));
        assert!(!state.ui().is_loading);
        assert_eq!(state.mode(), &EditorMode::Create);
    }

    fn assert_pristine(state: &EditorState<BeneficiaryForm>) {
        assert_eq!(state.form(), &BeneficiaryForm::default());
        assert!(state.errors().is_empty());
        assert_eq!(state.ui(), &UiState::default());
        assert_eq!(state.mode(), &EditorMode::Create);
    }

    #[test]
    fn test_reset_from_error() {
        let mut state = EditorState::<BeneficiaryForm>::new(false);
        filled(&mut state);
        let (ticket, _) = state.begin_submit().unwrap();
        state.finish_submit(ticket, Err(RemoteError::Unavailable("sin red".into())));
        assert_eq!(state.ui().phase(), Phase::Error);

        state.reset();
        assert_pristine(&state);
    }

    #[test]
    fn test_reset_from_success() {
        let mut state = EditorState::<BeneficiaryForm>::new(false);
        filled(&mut state);
        let (ticket, _) = state.begin_submit().unwrap();
        state.finish_submit(ticket, Ok(Saved::Created("ben_2".into())));
        assert_eq!(state.ui().phase(), Phase::Success);

        state.reset();
        assert_pristine(&state);
    }

    #[test]
    fn test_reset_from_loaded_record_with_field_errors() {
        let mut state = EditorState::<BeneficiaryForm>::new(false);
        let ticket = state.begin_load().unwrap();
        let entity = Beneficiary { id: "ben_3".into(), payload: sample_form().to_payload().unwrap() };
        state.finish_load(ticket, Ok(entity));
        state.edit(BeneficiaryEdit::EmergencyPhone("442".into()));
        assert!(state.begin_submit().is_err());
        assert!(!state.errors().is_empty());
        assert!(state.ui().loaded.is_some());

        state.reset();
        assert_pristine(&state);
    }

    #[test]
    fn test_invalid_submit_clears_previous_outcome() {
        let mut state = EditorState::<BeneficiaryForm>::new(false);
        filled(&mut state);
        let (ticket, _) = state.begin_submit().unwrap();
        state.finish_submit(ticket, Ok(Saved::Created("ben_5".into())));
        state.edit(BeneficiaryEdit::Name(String::new()));
        assert!(matches!(state.begin_submit(), Err(SubmitOutcome::Invalid(_))));
        assert_eq!(state.ui().phase(), Phase::Idle);

        state.edit(BeneficiaryEdit::Name("Juan".into()));
        let (ticket, _) = state.begin_submit().unwrap();
        state.finish_submit(ticket, Err(RemoteError::Rejected("Duplicado".into())));
        state.edit(BeneficiaryEdit::BirthDate("2000/01/15".into()));
        assert!(matches!(state.begin_submit(), Err(SubmitOutcome::Invalid(_))));
        assert_eq!(state.ui().phase(), Phase::Idle);
        assert_eq!(state.ui().error, None);
    }

    #[test]
    fn test_creation_only_rules_apply_in_create_mode() {
        use crate::domain::{User, UserPayload};
        use crate::user::{UserEdit, UserField, UserForm};

        let fill = |state: &mut EditorState<UserForm>| {
            for edit in [
                UserEdit::Name("Ana".into()),
                UserEdit::PaternalSurname("Ruiz".into()),
                UserEdit::MaternalSurname("Mora".into()),
                UserEdit::Email("ana@arca.org".into()),
                UserEdit::Phone("4427654321".into()),
                UserEdit::Role("rol_admin".into()),
            ] {
                state.edit(edit);
            }
        };

        let mut creating = EditorState::<UserForm>::new(true);
        fill(&mut creating);
        match creating.begin_submit() {
            Err(SubmitOutcome::Invalid(errors)) => {
                assert_eq!(errors.get(UserField::Password), Some(FieldError::Blank))
            }
            other => panic!("unexpected {other:?}"),
        }

        let mut editing = EditorState::<UserForm>::new(true);
        let ticket = editing.begin_load().unwrap();
        let user = User {
            id: "user_1".into(),
            payload: UserPayload {
                name: "Ana".into(),
                paternal_surname: "Ruiz".into(),
                maternal_surname: "Mora".into(),
                email: "ana@arca.org".into(),
                phone: "4427654321".into(),
                role_id: "rol_admin".into(),
                password: None,
                status: crate::domain::Status::Active,
            },
        };
        editing.finish_load(ticket, Ok(user));
        assert!(matches!(editing.begin_submit(), Ok((_, Submission::Update(_, _)))));
    }
}
