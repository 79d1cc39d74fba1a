use compact_str::CompactString;

use super::engine::{FieldKey, FormEngine, FormResult, read_lock};
use super::validation::{FieldLens, FormModel, ValidationError};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Textarea,
    Select,
    Checkbox,
    Switch,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyboardKind {
    Default,
    EmailAddress,
    Numeric,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputTraits {
    pub keyboard: KeyboardKind,
    pub secure_entry: bool,
    pub multiline: bool,
}

impl FieldType {
    pub const fn input_traits(self) -> InputTraits {
        match self {
            FieldType::Email => InputTraits {
                keyboard: KeyboardKind::EmailAddress,
                secure_entry: false,
                multiline: false,
            },
            FieldType::Password => InputTraits {
                keyboard: KeyboardKind::Default,
                secure_entry: true,
                multiline: false,
            },
            FieldType::Number => InputTraits {
                keyboard: KeyboardKind::Numeric,
                secure_entry: false,
                multiline: false,
            },
            FieldType::Textarea => InputTraits {
                keyboard: KeyboardKind::Default,
                secure_entry: false,
                multiline: true,
            },
            FieldType::Text | FieldType::Select | FieldType::Checkbox | FieldType::Switch => {
                InputTraits {
                    keyboard: KeyboardKind::Default,
                    secure_entry: false,
                    multiline: false,
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPresentation {
    pub label: Option<CompactString>,
    pub placeholder: Option<CompactString>,
    pub icon: Option<CompactString>,
    pub required: bool,
    pub disabled: bool,
}

#[derive(Clone)]
pub struct FieldBinding<T, E, L>
where
    T: FormModel,
    E: ValidationError,
    L: FieldLens<T>,
{
    engine: FormEngine<T, E>,
    lens: L,
    field_type: FieldType,
    presentation: FieldPresentation,
}

impl<T, E, L> FieldBinding<T, E, L>
where
    T: FormModel,
    E: ValidationError,
    L: FieldLens<T>,
{
    pub fn new(engine: &FormEngine<T, E>, lens: L) -> Self {
        Self {
            engine: engine.clone(),
            lens,
            field_type: FieldType::Text,
            presentation: FieldPresentation::default(),
        }
    }

    pub fn field_type(mut self, value: FieldType) -> Self {
        self.field_type = value;
        self
    }

    pub fn label(mut self, value: impl Into<CompactString>) -> Self {
        self.presentation.label = Some(value.into());
        self
    }

    pub fn placeholder(mut self, value: impl Into<CompactString>) -> Self {
        self.presentation.placeholder = Some(value.into());
        self
    }

    pub fn icon(mut self, value: impl Into<CompactString>) -> Self {
        self.presentation.icon = Some(value.into());
        self
    }

    pub fn required(mut self, value: bool) -> Self {
        self.presentation.required = value;
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.presentation.disabled = value;
        self
    }

    pub fn key(&self) -> FieldKey {
        self.lens.key()
    }

    pub fn input_traits(&self) -> InputTraits {
        self.field_type.input_traits()
    }

    pub fn presentation(&self) -> &FieldPresentation {
        &self.presentation
    }

    pub fn value(&self) -> FormResult<L::Value> {
        self.engine.value(self.lens)
    }

    pub fn touched(&self) -> FormResult<bool> {
        Ok(self
            .engine
            .field_meta(self.lens)?
            .is_some_and(|meta| meta.touched))
    }

    pub fn error(&self) -> FormResult<Option<E>> {
        Ok(self.engine.field_meta(self.lens)?.and_then(|meta| meta.error))
    }

    pub fn visible_error(&self) -> FormResult<Option<CompactString>> {
        self.engine.field_error_for_display(self.lens)
    }

    pub fn handle_change(&self, value: L::Value) -> FormResult<()> {
        self.engine.set(self.lens, value)?;
        self.engine.set_touched(self.lens, true)
    }

    pub fn handle_blur(&self) -> FormResult<()> {
        self.engine.set_touched(self.lens, true)
    }

    pub fn set_touched(&self, is_touched: bool) -> FormResult<()> {
        self.engine.set_touched(self.lens, is_touched)
    }
}

impl<T, E> FormEngine<T, E>
where
    T: FormModel,
    E: ValidationError,
{
    pub fn bind<L>(&self, lens: L) -> FieldBinding<T, E, L>
    where
        L: FieldLens<T>,
    {
        FieldBinding::new(self, lens)
    }

    pub fn value<L>(&self, lens: L) -> FormResult<L::Value>
    where
        L: FieldLens<T>,
    {
        Ok(lens
            .get(&read_lock(&self.state, "reading field value")?.model)
            .clone())
    }

    pub fn field_error_for_display<L>(&self, lens: L) -> FormResult<Option<CompactString>>
    where
        L: FieldLens<T>,
    {
        self.display_error_message(lens.key())
    }

    pub(super) fn display_error_message(
        &self,
        key: FieldKey,
    ) -> FormResult<Option<CompactString>> {
        let state = read_lock(&self.state, "reading display error message")?;
        let Some(meta) = state.field_meta.get(&key) else {
            return Ok(None);
        };
        if !meta.touched {
            return Ok(None);
        }
        Ok(meta.error.as_ref().map(ValidationError::message))
    }
}
