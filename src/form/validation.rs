use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use compact_str::CompactString;

use super::engine::{
    FieldKey, FormEngine, FormResult, FormState, SyncFieldValidatorFn, first_error_key, read_lock,
    write_lock,
};

pub trait ValidationError: Clone + Send + Sync + 'static {
    fn message(&self) -> CompactString;
}

impl ValidationError for CompactString {
    fn message(&self) -> CompactString {
        self.clone()
    }
}

impl ValidationError for String {
    fn message(&self) -> CompactString {
        self.as_str().into()
    }
}

impl ValidationError for &'static str {
    fn message(&self) -> CompactString {
        (*self).into()
    }
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: Clone + PartialEq + Send + Sync + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;
    fn field_keys(&self) -> Vec<FieldKey>;
}

pub trait FieldValidator<T, L, E>: Send + Sync
where
    L: FieldLens<T>,
    E: ValidationError,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E>;
}

impl<T, L, E, F> FieldValidator<T, L, E> for F
where
    L: FieldLens<T>,
    E: ValidationError,
    F: for<'a> Fn(&'a T, &'a L::Value) -> Result<(), E> + Send + Sync,
{
    fn validate(&self, model: &T, value: &L::Value) -> Result<(), E> {
        (self)(model, value)
    }
}

pub struct BatchWriter<'a, T, E> {
    state: &'a mut FormState<T, E>,
    changed: Vec<FieldKey>,
}

impl<T, E> BatchWriter<'_, T, E> {
    pub fn set<L>(&mut self, lens: L, value: L::Value)
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        lens.set(&mut self.state.model, value);
        let is_dirty = lens.get(&self.state.model) != lens.get(&self.state.initial_model);
        if is_dirty {
            self.state.dirty_fields.insert(key);
        } else {
            self.state.dirty_fields.remove(&key);
        }
        self.state.ensure_meta(key).dirty = is_dirty;
        if !self.changed.contains(&key) {
            self.changed.push(key);
        }
    }
}

impl<T, E> FormEngine<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn register_field_validator<L, V>(&self, lens: L, validator: V) -> FormResult<()>
    where
        L: FieldLens<T>,
        V: FieldValidator<T, L, E> + 'static,
    {
        let key = lens.key();
        let validator = Arc::new(validator);
        let wrapped: SyncFieldValidatorFn<T, E> =
            Arc::new(move |model: &T| validator.validate(model, lens.get(model)));
        let mut validators =
            write_lock(&self.field_validators, "registering field validator")?;
        validators.entry(key).or_default().push(wrapped);
        Ok(())
    }

    pub fn register_dependency<S, D>(&self, source: S, dependent: D) -> FormResult<()>
    where
        S: FieldLens<T>,
        D: FieldLens<T>,
    {
        let mut dependencies = write_lock(&self.dependencies, "registering dependency")?;
        dependencies
            .entry(source.key())
            .or_default()
            .insert(dependent.key());
        Ok(())
    }

    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        let touched = {
            let mut state = write_lock(&self.state, "writing field value")?;
            lens.set(&mut state.model, value);
            let is_dirty = lens.get(&state.model) != lens.get(&state.initial_model);
            if is_dirty {
                state.dirty_fields.insert(key);
            } else {
                state.dirty_fields.remove(&key);
            }
            let meta = state.ensure_meta(key);
            meta.dirty = is_dirty;
            meta.touched
        };

        if touched {
            let _ = self.validate_field_by_key(key)?;
        }
        self.revalidate_dependents(key)?;
        Ok(())
    }

    pub fn set_many(&self, apply: impl FnOnce(&mut BatchWriter<'_, T, E>)) -> FormResult<()> {
        let changed = {
            let mut state = write_lock(&self.state, "writing batched field values")?;
            let mut writer = BatchWriter {
                state: &mut *state,
                changed: Vec::new(),
            };
            apply(&mut writer);
            writer.changed
        };

        for key in changed {
            let touched = read_lock(&self.state, "reading touched state after batch")?
                .field_meta
                .get(&key)
                .is_some_and(|meta| meta.touched);
            if touched {
                let _ = self.validate_field_by_key(key)?;
            }
            self.revalidate_dependents(key)?;
        }
        Ok(())
    }

    pub fn set_touched<L>(&self, lens: L, is_touched: bool) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "touching field")?;
            state.ensure_meta(key).touched = is_touched;
        }

        if is_touched {
            let _ = self.validate_field_by_key(key)?;
        }
        Ok(())
    }

    pub fn touch<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        self.set_touched(lens, true)
    }

    pub fn validate_field<L>(&self, lens: L) -> FormResult<bool>
    where
        L: FieldLens<T>,
    {
        self.validate_field_by_key(lens.key())
    }

    pub fn validate_form(&self) -> FormResult<bool> {
        let model = {
            read_lock(&self.state, "reading model for form validation")?
                .model
                .clone()
        };
        let field_validators = read_lock(
            &self.field_validators,
            "reading field validators for form validation",
        )?
        .clone();

        let mut computed = BTreeMap::<FieldKey, Option<E>>::new();
        for (key, validators) in field_validators {
            let mut error = None;
            for validator in validators {
                if let Err(failure) = validator(&model) {
                    error = Some(failure);
                    break;
                }
            }
            computed.insert(key, error);
        }

        {
            let mut state = write_lock(&self.state, "applying form validation result")?;
            let mut keys = state
                .field_meta
                .keys()
                .copied()
                .collect::<BTreeSet<FieldKey>>();
            keys.extend(computed.keys().copied());
            for key in keys {
                let error = computed.remove(&key).flatten();
                state.ensure_meta(key).error = error;
            }
            state.first_error = first_error_key(&state.field_meta);
        }

        Ok(self.snapshot()?.is_valid)
    }

    pub(super) fn validate_field_by_key(&self, key: FieldKey) -> FormResult<bool> {
        let model = {
            read_lock(&self.state, "reading model for field validation")?
                .model
                .clone()
        };
        let validators = {
            read_lock(
                &self.field_validators,
                "reading field validators for key validation",
            )?
            .get(&key)
            .cloned()
            .unwrap_or_default()
        };

        let mut error = None;
        for validator in validators {
            if let Err(failure) = validator(&model) {
                error = Some(failure);
                break;
            }
        }

        let mut state = write_lock(&self.state, "writing field validation result")?;
        state.ensure_meta(key).error = error;
        state.first_error = first_error_key(&state.field_meta);
        Ok(state
            .field_meta
            .get(&key)
            .is_none_or(|meta| meta.error.is_none()))
    }

    pub(super) fn revalidate_dependents(&self, source: FieldKey) -> FormResult<()> {
        let dependents = read_lock(&self.dependencies, "reading field dependencies")?
            .get(&source)
            .cloned()
            .unwrap_or_default();
        for dependent in dependents {
            let touched = read_lock(&self.state, "reading dependent touched state")?
                .field_meta
                .get(&dependent)
                .is_some_and(|meta| meta.touched);
            if touched {
                let _ = self.validate_field_by_key(dependent)?;
            }
        }
        Ok(())
    }
}
