pub use crate::feedback::{ErrorReport, ErrorReporter, LogReporter, ReportKind, install_reporter};
pub use crate::form::{
    FieldBinding, FieldKey, FieldLens, FieldMeta, FieldType, FieldValidator, FieldValue,
    FormEngine, FormError, FormId, FormModel, FormResult, FormSnapshot, InputTraits, KeyboardKind,
    SubmitFailure, SubmitState, ValidationError, ValueLens, ValueMap, email_format, matches_field,
    min_length, phone_format, required, strong_password, username_format,
};
