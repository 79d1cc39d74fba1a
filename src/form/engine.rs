use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use compact_str::{CompactString, format_compact};

use crate::feedback::{self, ErrorReport, ErrorReporter, ReportKind};

use super::validation::{FormModel, ValidationError};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey(&'static str);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMeta<E> {
    pub dirty: bool,
    pub touched: bool,
    pub error: Option<E>,
}

impl<E> Default for FieldMeta<E> {
    fn default() -> Self {
        Self {
            dirty: false,
            touched: false,
            error: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub is_dirty: bool,
    pub is_valid: bool,
    pub first_error: Option<FieldKey>,
    pub field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T, E> FormSnapshot<T, E>
where
    E: ValidationError,
{
    pub fn error_messages(&self) -> BTreeMap<FieldKey, CompactString> {
        self.field_meta
            .iter()
            .filter_map(|(key, meta)| meta.error.as_ref().map(|error| (*key, error.message())))
            .collect()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    AlreadySubmitting,
    MissingSubmitHandler,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid submit state transition: {from:?} -> {to:?}")
            }
            FormError::AlreadySubmitting => f.write_str("form submit is already in progress"),
            FormError::MissingSubmitHandler => {
                f.write_str("form has no registered submit handler")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub type SubmitFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

pub(super) type SyncFieldValidatorFn<T, E> = Arc<dyn Fn(&T) -> Result<(), E> + Send + Sync>;
pub(super) type SubmitHandlerFn<T> = Arc<
    dyn Fn(T) -> Pin<Box<dyn Future<Output = Result<(), SubmitFailure>> + Send + 'static>>
        + Send
        + Sync,
>;

pub(super) struct FormState<T, E> {
    pub(super) id: FormId,
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) declared_fields: BTreeSet<FieldKey>,
    pub(super) dirty_fields: BTreeSet<FieldKey>,
    pub(super) field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
    pub(super) first_error: Option<FieldKey>,
}

impl<T, E> FormState<T, E> {
    pub(super) fn ensure_meta(&mut self, key: FieldKey) -> &mut FieldMeta<E> {
        self.field_meta.entry(key).or_default()
    }
}

#[derive(Clone)]
pub struct FormEngine<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub(super) state: Arc<RwLock<FormState<T, E>>>,
    pub(super) field_validators: Arc<RwLock<BTreeMap<FieldKey, Vec<SyncFieldValidatorFn<T, E>>>>>,
    pub(super) dependencies: Arc<RwLock<BTreeMap<FieldKey, BTreeSet<FieldKey>>>>,
    pub(super) submit_handler: Arc<RwLock<Option<SubmitHandlerFn<T>>>>,
    pub(super) reporter: Arc<RwLock<Option<Arc<dyn ErrorReporter>>>>,
}

impl<T, E> FormEngine<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn new(initial: T) -> Self {
        let declared = initial.field_keys();
        let field_meta = declared
            .iter()
            .map(|key| (*key, FieldMeta::default()))
            .collect();
        Self {
            state: Arc::new(RwLock::new(FormState {
                id: FormId::next(),
                initial_model: initial.clone(),
                model: initial,
                submit_state: SubmitState::Idle,
                submit_count: 0,
                declared_fields: declared.into_iter().collect(),
                dirty_fields: BTreeSet::new(),
                field_meta,
                first_error: None,
            })),
            field_validators: Arc::new(RwLock::new(BTreeMap::new())),
            dependencies: Arc::new(RwLock::new(BTreeMap::new())),
            submit_handler: Arc::new(RwLock::new(None)),
            reporter: Arc::new(RwLock::new(None)),
        }
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn declared_fields(&self) -> FormResult<BTreeSet<FieldKey>> {
        Ok(read_lock(&self.state, "reading declared fields")?
            .declared_fields
            .clone())
    }

    pub fn on_submit<F, Fut>(&self, handler: F) -> FormResult<()>
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SubmitFailure>> + Send + 'static,
    {
        let wrapped: SubmitHandlerFn<T> = Arc::new(move |model| Box::pin(handler(model)));
        *write_lock(&self.submit_handler, "registering submit handler")? = Some(wrapped);
        Ok(())
    }

    pub fn set_error_reporter(&self, reporter: impl ErrorReporter + 'static) -> FormResult<()> {
        *write_lock(&self.reporter, "setting error reporter")? = Some(Arc::new(reporter));
        Ok(())
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading submit state")?.submit_state == SubmitState::Submitting)
    }

    pub async fn handle_submit(&self) -> FormResult<()> {
        let handler = read_lock(&self.submit_handler, "reading submit handler")?.clone();
        let Some(handler) = handler else {
            return Err(FormError::MissingSubmitHandler);
        };

        {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if state.submit_state == SubmitState::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
            for meta in state.field_meta.values_mut() {
                meta.touched = true;
            }
        }

        let is_valid = self.validate_form()?;
        if !is_valid {
            let mut state = write_lock(&self.state, "handling submit validation failure")?;
            transition_submit_state(&mut state, SubmitState::Failed)?;
            return Ok(());
        }

        let (form_id, model) = {
            let mut state = write_lock(&self.state, "moving submit state to submitting")?;
            transition_submit_state(&mut state, SubmitState::Submitting)?;
            (state.id, state.model.clone())
        };

        let submit_result = handler(model).await;

        {
            let mut state = write_lock(&self.state, "completing submit")?;
            match &submit_result {
                Ok(()) => transition_submit_state(&mut state, SubmitState::Succeeded)?,
                Err(_) => transition_submit_state(&mut state, SubmitState::Failed)?,
            }
        }

        if let Err(cause) = submit_result {
            self.report_submit_failure(form_id, cause)?;
        }
        Ok(())
    }

    pub fn reset_form(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.model = state.initial_model.clone();
        state.submit_state = SubmitState::Idle;
        state.dirty_fields.clear();
        state.first_error = None;
        let fresh: BTreeMap<FieldKey, FieldMeta<E>> = state
            .declared_fields
            .iter()
            .map(|key| (*key, FieldMeta::default()))
            .collect();
        state.field_meta = fresh;
        Ok(())
    }

    pub fn reset_field<L>(&self, lens: L) -> FormResult<()>
    where
        L: super::validation::FieldLens<T>,
    {
        let key = lens.key();
        let mut state = write_lock(&self.state, "resetting field")?;
        let initial_value = lens.get(&state.initial_model).clone();
        lens.set(&mut state.model, initial_value);
        state.dirty_fields.remove(&key);
        let meta = state.ensure_meta(key);
        meta.dirty = false;
        meta.touched = false;
        meta.error = None;
        state.first_error = first_error_key(&state.field_meta);
        Ok(())
    }

    pub fn clear_errors(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "clearing all field errors")?;
        for meta in state.field_meta.values_mut() {
            meta.error = None;
        }
        state.first_error = None;
        Ok(())
    }

    pub fn clear_field_errors<L>(&self, lens: L) -> FormResult<()>
    where
        L: super::validation::FieldLens<T>,
    {
        let key = lens.key();
        let mut state = write_lock(&self.state, "clearing field errors")?;
        if let Some(meta) = state.field_meta.get_mut(&key) {
            meta.error = None;
        }
        state.first_error = first_error_key(&state.field_meta);
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<T, E>> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        let is_valid = state.field_meta.values().all(|meta| meta.error.is_none());
        Ok(FormSnapshot {
            model: state.model.clone(),
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            is_dirty: !state.dirty_fields.is_empty(),
            is_valid,
            first_error: state.first_error,
            field_meta: state.field_meta.clone(),
        })
    }

    pub fn field_meta<L>(&self, lens: L) -> FormResult<Option<FieldMeta<E>>>
    where
        L: super::validation::FieldLens<T>,
    {
        Ok(read_lock(&self.state, "reading field meta")?
            .field_meta
            .get(&lens.key())
            .cloned())
    }

    fn report_submit_failure(&self, form_id: FormId, cause: SubmitFailure) -> FormResult<()> {
        let report = ErrorReport::new(ReportKind::App, "form submission failed")
            .source("FormEngine::handle_submit")
            .context(format_compact!("form {}", form_id.0))
            .cause(cause);
        let reporter = read_lock(&self.reporter, "reading error reporter")?.clone();
        match reporter {
            Some(reporter) => reporter.report(&report),
            None => feedback::report(report),
        }
        Ok(())
    }
}

pub(super) fn transition_submit_state<T, E>(
    state: &mut FormState<T, E>,
    next: SubmitState,
) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Validating)
            | (SubmitState::Validating, SubmitState::Submitting)
            | (SubmitState::Validating, SubmitState::Failed)
            | (SubmitState::Submitting, SubmitState::Succeeded)
            | (SubmitState::Submitting, SubmitState::Failed)
            | (SubmitState::Succeeded, SubmitState::Validating)
            | (SubmitState::Failed, SubmitState::Validating)
            | (_, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn first_error_key<E>(
    field_meta: &BTreeMap<FieldKey, FieldMeta<E>>,
) -> Option<FieldKey> {
    field_meta
        .iter()
        .find_map(|(key, meta)| meta.error.is_some().then_some(*key))
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
