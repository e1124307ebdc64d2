//! Generated form-field names
//!
//! A widget and its form field are linked through a shared name, so every
//! insertion needs a fresh one. Names are a fixed prefix plus five base-36
//! characters; collisions are possible but not checked here.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix of every generated form-field name
pub const FORM_FIELD_NAME_PREFIX: &str = "form-field-";

/// Number of random characters after the prefix
pub const FORM_FIELD_NAME_SUFFIX_LEN: usize = 5;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of form-field names
#[derive(Debug)]
pub struct FormFieldNameGenerator {
    prefix: String,
    rng: StdRng,
}

impl FormFieldNameGenerator {
    /// Generator seeded from OS entropy
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator
    pub fn with_seed(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            prefix: prefix.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the next name
    pub fn next_name(&mut self) -> String {
        let mut name = String::with_capacity(self.prefix.len() + FORM_FIELD_NAME_SUFFIX_LEN);
        name.push_str(&self.prefix);
        for _ in 0..FORM_FIELD_NAME_SUFFIX_LEN {
            let digit = self.rng.gen_range(0..BASE36.len());
            name.push(char::from(BASE36[digit]));
        }
        name
    }
}

impl Default for FormFieldNameGenerator {
    fn default() -> Self {
        Self::new(FORM_FIELD_NAME_PREFIX)
    }
}

/// Whether `name` has the shape of a generated form-field name
pub fn is_generated_name(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix).is_some_and(|suffix| {
        suffix.len() == FORM_FIELD_NAME_SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    })
}
