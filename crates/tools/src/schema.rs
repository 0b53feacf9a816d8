//! Declarative input rules for the tools.
//!
//! A [`Schema`] is an ordered list of rules. Rules are checked in order and
//! the first one that fails decides the error message, so the same input
//! always produces the same message.

use cleanslate_core::{EMPTY_UPDATE_MESSAGE, Error};
use serde_json::Value;

const OBJECT_MESSAGE: &str = "Tool arguments must be a JSON object";

/// A single check on one field. Every check except [`Check::Required`] is
/// skipped when the field is absent or `null`.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Required(&'static str),
    Text(&'static str),
    MinChars(usize, &'static str),
    MaxChars(usize, &'static str),
    Number(&'static str),
    Whole(&'static str),
    AtLeast(f64, &'static str),
    AtMost(f64, &'static str),
    Uuid(&'static str),
}

impl Check {
    fn message(&self) -> &'static str {
        match *self {
            Self::Required(m)
            | Self::Text(m)
            | Self::MinChars(_, m)
            | Self::MaxChars(_, m)
            | Self::Number(m)
            | Self::Whole(m)
            | Self::AtLeast(_, m)
            | Self::AtMost(_, m)
            | Self::Uuid(m) => m,
        }
    }

    /// Whether a present value passes. Checks that don't apply to the
    /// value's JSON type pass; the type itself is checked by `Text`/`Number`.
    fn passes(&self, value: &Value) -> bool {
        match *self {
            Self::Required(_) => true,
            Self::Text(_) => value.is_string(),
            Self::MinChars(min, _) => value.as_str().is_none_or(|s| s.chars().count() >= min),
            Self::MaxChars(max, _) => value.as_str().is_none_or(|s| s.chars().count() <= max),
            Self::Number(_) => value.is_number(),
            Self::Whole(_) => value.as_f64().is_none_or(|n| n.fract() == 0.0),
            Self::AtLeast(min, _) => value.as_f64().is_none_or(|n| n >= min),
            Self::AtMost(max, _) => value.as_f64().is_none_or(|n| n <= max),
            Self::Uuid(_) => value.as_str().is_none_or(is_hyphenated_uuid),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Field {
        field: &'static str,
        check: Check,
    },
    /// At least one of `fields` must be present.
    AnyOf {
        fields: &'static [&'static str],
        message: &'static str,
    },
}

impl Rule {
    pub const fn field(field: &'static str, check: Check) -> Self {
        Self::Field { field, check }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    rules: &'static [Rule],
}

impl Schema {
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Check `input`, failing with the message of the first violated rule.
    /// Missing arguments (`null`) are treated as an empty object.
    pub fn validate(&self, input: &Value) -> Result<(), Error> {
        if !(input.is_object() || input.is_null()) {
            return Err(Error::validation(OBJECT_MESSAGE));
        }

        for rule in self.rules {
            match *rule {
                Rule::Field { field, check } => match present(input, field) {
                    None if matches!(check, Check::Required(_)) => {
                        return Err(Error::validation(check.message()));
                    }
                    None => {}
                    Some(value) if !check.passes(value) => {
                        return Err(Error::validation(check.message()));
                    }
                    Some(_) => {}
                },
                Rule::AnyOf { fields, message } => {
                    if fields.iter().all(|field| present(input, field).is_none()) {
                        return Err(Error::validation(message));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Only the 8-4-4-4-12 form; braced, URN and bare-hex spellings are refused.
fn is_hyphenated_uuid(s: &str) -> bool {
    s.len() == 36 && uuid::Uuid::try_parse(s).is_ok()
}

fn present<'a>(input: &'a Value, field: &str) -> Option<&'a Value> {
    input.get(field).filter(|value| !value.is_null())
}

pub(crate) fn text(input: &Value, field: &str) -> Option<String> {
    present(input, field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// A whole number already bounded by the schema.
pub(crate) fn whole(input: &Value, field: &str) -> Option<u32> {
    present(input, field)
        .and_then(Value::as_f64)
        .map(|n| n as u32)
}

pub(crate) fn number(input: &Value, field: &str) -> Option<f64> {
    present(input, field).and_then(Value::as_f64)
}

const LOG_FOOD_RULES: &[Rule] = &[
    Rule::field("name", Check::Required("Food name is required")),
    Rule::field("name", Check::Text("Food name must be text")),
    Rule::field("name", Check::MinChars(1, "Food name is required")),
    Rule::field("name", Check::MaxChars(200, "Food name must be 200 characters or less")),
    Rule::field("calories", Check::Required("Calories are required")),
    Rule::field("calories", Check::Number("Calories must be a number")),
    Rule::field("calories", Check::Whole("Calories must be a whole number")),
    Rule::field("calories", Check::AtLeast(0.0, "Calories must be at least 0")),
    Rule::field("calories", Check::AtMost(10_000.0, "Calories must be 10,000 or less")),
    Rule::field("protein", Check::Required("Protein is required")),
    Rule::field("protein", Check::Number("Protein must be a number")),
    Rule::field("protein", Check::AtLeast(0.0, "Protein must be at least 0 grams")),
    Rule::field("protein", Check::AtMost(500.0, "Protein must be 500 grams or less")),
];

const DELETE_FOOD_ENTRY_RULES: &[Rule] = &[
    Rule::field("entryId", Check::Required("Entry ID is required")),
    Rule::field("entryId", Check::Text("Entry ID must be a valid identifier")),
    Rule::field("entryId", Check::Uuid("Entry ID must be a valid identifier")),
];

const EDIT_FOOD_ENTRY_RULES: &[Rule] = &[
    Rule::field("entryId", Check::Required("Entry ID is required")),
    Rule::field("entryId", Check::Text("Entry ID must be a valid identifier")),
    Rule::field("entryId", Check::Uuid("Entry ID must be a valid identifier")),
    Rule::field("name", Check::Text("Food name must be text")),
    Rule::field("name", Check::MinChars(1, "Food name can't be empty")),
    Rule::field("name", Check::MaxChars(200, "Food name must be 200 characters or less")),
    Rule::field("calories", Check::Number("Calories must be a number")),
    Rule::field("calories", Check::Whole("Calories must be a whole number")),
    Rule::field("calories", Check::AtLeast(0.0, "Calories must be at least 0")),
    Rule::field("calories", Check::AtMost(10_000.0, "Calories must be 10,000 or less")),
    Rule::field("protein", Check::Number("Protein must be a number")),
    Rule::field("protein", Check::AtLeast(0.0, "Protein must be at least 0 grams")),
    Rule::field("protein", Check::AtMost(500.0, "Protein must be 500 grams or less")),
    Rule::AnyOf {
        fields: &["name", "calories", "protein"],
        message: EMPTY_UPDATE_MESSAGE,
    },
];

pub const LOG_FOOD: Schema = Schema::new(LOG_FOOD_RULES);

pub const DELETE_FOOD_ENTRY: Schema = Schema::new(DELETE_FOOD_ENTRY_RULES);

pub const EDIT_FOOD_ENTRY: Schema = Schema::new(EDIT_FOOD_ENTRY_RULES);

/// Tools without arguments accept any object.
pub const NO_ARGUMENTS: Schema = Schema::new(&[]);
