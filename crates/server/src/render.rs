//! HTML for the recipe page.

use std::fmt::Write as _;

use shared::{
    domain::{RecipeField, RecipeForm},
    validation::{ValidationOutcome, COOK_TIME_MINUTES_RANGE, SERVINGS_RANGE},
};

use crate::RECIPES_ROUTE;

/// Everything the page needs: the values to put back in the inputs, any
/// failed constraints, and a one-time notice.
#[derive(Debug, Default)]
pub struct RecipePage<'a> {
    pub form: Option<&'a RecipeForm>,
    pub outcome: Option<&'a ValidationOutcome>,
    pub message: Option<&'a str>,
}

impl RecipePage<'_> {
    fn value(&self, field: RecipeField) -> &str {
        self.form
            .and_then(|form| form.raw(field))
            .unwrap_or_default()
    }

    fn error(&self, field: RecipeField) -> Option<&str> {
        self.outcome.and_then(|outcome| outcome.message_for(field))
    }
}

pub fn render_recipe_page(page: &RecipePage<'_>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Add a Recipe</title>\n</head>\n<body>\n<h1>Add a Recipe</h1>\n",
    );

    if let Some(message) = page.message {
        let _ = writeln!(
            html,
            "<div class=\"alert alert-success\" role=\"status\">{}</div>",
            escape(message)
        );
    }

    if let Some(outcome) = page.outcome.filter(|outcome| !outcome.is_valid()) {
        html.push_str("<ul class=\"validation-summary-errors\">\n");
        for error in outcome.errors() {
            let _ = writeln!(html, "<li>{}</li>", escape(&error.message));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(html, "<form method=\"post\" action=\"{RECIPES_ROUTE}\">");
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        RecipeField::Id.key(),
        escape(page.value(RecipeField::Id))
    );
    for field in RecipeField::ALL {
        if field == RecipeField::Id {
            continue;
        }
        render_field(&mut html, page, field);
    }
    html.push_str("<button type=\"submit\">Add Recipe</button>\n</form>\n</body>\n</html>\n");
    html
}

fn render_field(html: &mut String, page: &RecipePage<'_>, field: RecipeField) {
    let key = field.key();
    let value = escape(page.value(field));

    html.push_str("<div class=\"form-group\">\n");
    let _ = writeln!(html, "<label for=\"{key}\">{}</label>", field.label());
    match field {
        RecipeField::Instructions => {
            let _ = writeln!(
                html,
                "<textarea id=\"{key}\" name=\"{key}\" rows=\"6\">{value}</textarea>"
            );
        }
        RecipeField::Servings | RecipeField::CookTimeMinutes => {
            let (min, max) = if field == RecipeField::Servings {
                SERVINGS_RANGE
            } else {
                COOK_TIME_MINUTES_RANGE
            };
            let _ = writeln!(
                html,
                "<input id=\"{key}\" name=\"{key}\" type=\"number\" min=\"{min}\" max=\"{max}\" value=\"{value}\">"
            );
        }
        _ => {
            let _ = writeln!(
                html,
                "<input id=\"{key}\" name=\"{key}\" type=\"text\" value=\"{value}\">"
            );
        }
    }
    if let Some(message) = page.error(field) {
        let _ = writeln!(
            html,
            "<span class=\"field-validation-error\" data-valmsg-for=\"{key}\">{}</span>",
            escape(message)
        );
    }
    html.push_str("</div>\n");
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
