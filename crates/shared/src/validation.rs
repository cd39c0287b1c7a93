//! Rule-table validation for recipe submissions.
//!
//! Each field owns an ordered list of constraints. Rules for one field stop at
//! the first failure; fields are evaluated independently of one another, so a
//! submission reports every failing field at once.

use crate::{
    domain::{Recipe, RecipeField, RecipeForm},
    error::ValidationError,
};

pub const MAX_INSTRUCTIONS_CHARS: usize = 1000;
pub const SERVINGS_RANGE: (i32, i32) = (1, 10);
pub const COOK_TIME_MINUTES_RANGE: (i32, i32) = (1, 300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Required,
    MaxLength(usize),
    Range { min: i32, max: i32 },
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: &'static str,
}

const fn rule(constraint: Constraint, message: &'static str) -> Rule {
    Rule {
        constraint,
        message,
    }
}

/// A field's bound value as seen by the rule interpreter.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<i32>),
}

impl Constraint {
    pub fn check(self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::Required, FieldValue::Text(text)) => !text.trim().is_empty(),
            (Constraint::Required, FieldValue::Number(number)) => number.is_some(),
            (Constraint::MaxLength(max), FieldValue::Text(text)) => text.chars().count() <= max,
            (Constraint::Range { min, max }, FieldValue::Number(Some(number))) => {
                (min..=max).contains(&number)
            }
            // Absent optional values are not range-checked.
            (Constraint::Range { .. }, FieldValue::Number(None)) => true,
            (Constraint::MaxLength(_), FieldValue::Number(_))
            | (Constraint::Range { .. }, FieldValue::Text(_)) => true,
        }
    }
}

pub static RECIPE_RULES: &[(RecipeField, &[Rule])] = &[
    (RecipeField::Id, &[]),
    (
        RecipeField::Name,
        &[rule(Constraint::Required, "Please enter a recipe name.")],
    ),
    (
        RecipeField::MainIngredient,
        &[rule(Constraint::Required, "Please enter the main ingredient.")],
    ),
    (
        RecipeField::Instructions,
        &[
            rule(Constraint::Required, "Please enter instructions."),
            rule(
                Constraint::MaxLength(MAX_INSTRUCTIONS_CHARS),
                "Instructions must be under 1000 characters.",
            ),
        ],
    ),
    (
        RecipeField::Servings,
        &[rule(
            Constraint::Range {
                min: SERVINGS_RANGE.0,
                max: SERVINGS_RANGE.1,
            },
            "Servings must be between 1 and 10.",
        )],
    ),
    (
        RecipeField::CookTimeMinutes,
        &[rule(
            Constraint::Range {
                min: COOK_TIME_MINUTES_RANGE.0,
                max: COOK_TIME_MINUTES_RANGE.1,
            },
            "Cook time must be between 1 and 300 minutes.",
        )],
    ),
];

impl Recipe {
    pub fn value(&self, field: RecipeField) -> FieldValue<'_> {
        match field {
            RecipeField::Id => FieldValue::Number(self.id),
            RecipeField::Name => FieldValue::Text(&self.name),
            RecipeField::MainIngredient => FieldValue::Text(&self.main_ingredient),
            RecipeField::Instructions => FieldValue::Text(&self.instructions),
            RecipeField::Servings => FieldValue::Number(self.servings),
            RecipeField::CookTimeMinutes => FieldValue::Number(self.cook_time_minutes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn message_for(&self, field: RecipeField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field.key())
            .map(|error| error.message.as_str())
    }
}

/// Maps the raw form onto a [`Recipe`].
///
/// Empty numeric input binds as absent. Numeric input that does not parse is
/// reported as a binding error for that field and leaves the value absent.
pub fn bind(form: &RecipeForm) -> (Recipe, Vec<ValidationError>) {
    let mut binding_errors = Vec::new();
    let mut number = |field: RecipeField| {
        let raw = form.raw(field).map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i32>() {
            Ok(value) => Some(value),
            Err(_) => {
                binding_errors.push(ValidationError::new(
                    field.key(),
                    format!("The value '{raw}' is not valid for {}.", field.label()),
                ));
                None
            }
        }
    };

    let id = number(RecipeField::Id);
    let servings = number(RecipeField::Servings);
    let cook_time_minutes = number(RecipeField::CookTimeMinutes);
    let text = |field: RecipeField| form.raw(field).unwrap_or_default().to_string();

    let recipe = Recipe {
        id,
        name: text(RecipeField::Name),
        main_ingredient: text(RecipeField::MainIngredient),
        instructions: text(RecipeField::Instructions),
        servings,
        cook_time_minutes,
    };
    (recipe, binding_errors)
}

/// Runs the rule table over a bound recipe. A field that already failed
/// binding reports that error and skips its rules.
pub fn evaluate(recipe: &Recipe, binding_errors: &[ValidationError]) -> ValidationOutcome {
    let mut errors = Vec::new();
    for (field, rules) in RECIPE_RULES {
        if let Some(error) = binding_errors.iter().find(|e| e.field == field.key()) {
            errors.push(error.clone());
            continue;
        }
        let value = recipe.value(*field);
        if let Some(failed) = rules.iter().find(|rule| !rule.constraint.check(value)) {
            errors.push(ValidationError::new(field.key(), failed.message));
        }
    }
    ValidationOutcome { errors }
}

pub fn validate_form(form: &RecipeForm) -> Result<Recipe, ValidationOutcome> {
    let (recipe, binding_errors) = bind(form);
    let outcome = evaluate(&recipe, &binding_errors);
    if outcome.is_valid() {
        Ok(recipe)
    } else {
        Err(outcome)
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
