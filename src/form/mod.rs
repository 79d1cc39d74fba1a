mod binding;
mod dynamic;
mod engine;
mod rules;
mod validation;


pub use formwork_derive::FormModel;

pub use binding::{FieldBinding, FieldPresentation, FieldType, InputTraits, KeyboardKind};
pub use dynamic::{FieldValue, ValueLens, ValueMap};
pub use engine::{
    FieldKey, FieldMeta, FormEngine, FormError, FormId, FormResult, FormSnapshot, SubmitFailure,
    SubmitState,
};
pub use rules::{
    Presence, TextValue, email_format, matches_field, min_length, phone_format, required,
    strong_password, username_format,
};
pub use validation::{BatchWriter, FieldLens, FieldValidator, FormModel, ValidationError};
