// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::field::Field;

/// Duplicated form controls representing one logical value.
///
/// Older page layouts render the permission and reason fields once per sub-form. Writing to one
/// copy has to be published to all of them before anything reads the value.
#[derive(Debug)]
pub struct Mirrors<F> {
    fields: Vec<F>,
}

impl<F: Field> Mirrors<F> {
    pub fn new(fields: Vec<F>) -> Self {
        Self { fields }
    }

    /// Writes the literal value to every registered copy.
    pub fn publish(&self, value: &str) {
        for field in &self.fields {
            if field.value() != value {
                field.set_value(value);
            }
        }
    }

    /// Value of the first copy, empty when no copy is registered.
    pub fn value(&self) -> String {
        self.fields.first().map(Field::value).unwrap_or_default()
    }

    pub fn first(&self) -> Option<&F> {
        self.fields.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
