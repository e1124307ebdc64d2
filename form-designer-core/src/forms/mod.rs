//! Form fields created alongside widget annotations

mod field;
mod name;

pub use field::{FieldKind, FormField};
pub use name::{
    is_generated_name, FormFieldNameGenerator, FORM_FIELD_NAME_PREFIX,
    FORM_FIELD_NAME_SUFFIX_LEN,
};
