//! Spellbook creation form handling.
//!
//! Validates submitted create-form data, collects the selected classes in
//! submission order and derives the lookup index from the spellbook name.

use crate::models::{ClassTag, NewSpellbook};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Most classes a spellbook can be tied to.
pub const MAX_CLASSES: usize = 3;

/// Raw create-spellbook form submission.
///
/// Every field deserializes leniently so that validation, not extraction,
/// decides what is wrong with a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpellbookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Character name must be at most 100 characters"))]
    pub character_name: String,
    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
    #[serde(default)]
    #[validate(required(message = "A class is required"))]
    pub class1: Option<String>,
    #[serde(default)]
    pub class2: Option<String>,
    #[serde(default)]
    pub class3: Option<String>,
}

impl CreateSpellbookForm {
    /// Blank select boxes arrive as empty strings; treat them as unset.
    pub fn normalized(mut self) -> Self {
        for field in [&mut self.class1, &mut self.class2, &mut self.class3] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// Form state handed back to the renderer, mirroring what was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub valid: bool,
    pub posted: bool,
    pub data: CreateSpellbookForm,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormState {
    /// An untouched form for the create page.
    pub fn empty() -> Self {
        Self {
            valid: false,
            posted: false,
            data: CreateSpellbookForm::default(),
            errors: BTreeMap::new(),
        }
    }

    /// A submission whose body could not be decoded into form fields.
    pub fn malformed(message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert("form".to_string(), vec![message.into()]);
        Self::rejected(CreateSpellbookForm::default(), errors)
    }

    fn rejected(data: CreateSpellbookForm, errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            valid: false,
            posted: true,
            data,
            errors,
        }
    }
}

/// A create-form submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpellbook {
    pub name: String,
    pub character_name: String,
    pub description: String,
    pub classes: Vec<ClassTag>,
}

impl ValidatedSpellbook {
    /// Attach the owner and derived index, producing the insert parameters.
    pub fn into_new_spellbook(self, user_id: Uuid) -> NewSpellbook {
        NewSpellbook {
            index: string_to_index(&self.name),
            spellbook_name: self.name,
            character_name: self.character_name,
            description: self.description,
            classes: self.classes,
            user_id,
        }
    }
}

/// Validate a create-form submission.
///
/// On failure the returned `FormState` carries field-level errors keyed by
/// the form field name.
pub fn validate_create_form(form: CreateSpellbookForm) -> Result<ValidatedSpellbook, FormState> {
    let form = form.normalized();
    let mut errors = match form.validate() {
        Ok(()) => BTreeMap::new(),
        Err(e) => field_errors(&e),
    };

    // The length check sees the raw value; the index needs real content.
    if !errors.contains_key("name") {
        if form.name.trim().is_empty() {
            errors
                .entry("name".to_string())
                .or_default()
                .push("Name is required".to_string());
        } else if string_to_index(&form.name).is_empty() {
            errors
                .entry("name".to_string())
                .or_default()
                .push("Name must contain a letter or digit".to_string());
        }
    }

    let mut classes: Vec<ClassTag> = Vec::with_capacity(MAX_CLASSES);
    for (field, value) in [
        ("class1", &form.class1),
        ("class2", &form.class2),
        ("class3", &form.class3),
    ] {
        let Some(raw) = value else { continue };
        match raw.parse::<ClassTag>() {
            Ok(tag) if classes.contains(&tag) => errors
                .entry(field.to_string())
                .or_default()
                .push(format!("{} is already selected", tag)),
            Ok(tag) => classes.push(tag),
            Err(msg) => errors.entry(field.to_string()).or_default().push(msg),
        }
    }

    if !errors.is_empty() {
        return Err(FormState::rejected(form, errors));
    }

    Ok(ValidatedSpellbook {
        name: form.name.trim().to_string(),
        character_name: form.character_name.trim().to_string(),
        description: form.description,
        classes,
    })
}

fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, errs) in errors.field_errors() {
        let messages = out.entry(form_field_name(&field)).or_default();
        for err in errs.iter() {
            messages.push(
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            );
        }
    }
    out
}

fn form_field_name(field: &str) -> String {
    match field {
        "character_name" => "characterName".to_string(),
        other => other.to_string(),
    }
}

/// Derive a URL-friendly lookup index from a display name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-` and strips leading/trailing dashes.
pub fn string_to_index(name: &str) -> String {
    let mut index = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !index.is_empty() {
                index.push('-');
            }
            pending_dash = false;
            index.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    index
}
