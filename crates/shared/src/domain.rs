use serde::Deserialize;

/// Fields of the recipe form, in the order they are declared and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Id,
    Name,
    MainIngredient,
    Instructions,
    Servings,
    CookTimeMinutes,
}

impl RecipeField {
    pub const ALL: [RecipeField; 6] = [
        RecipeField::Id,
        RecipeField::Name,
        RecipeField::MainIngredient,
        RecipeField::Instructions,
        RecipeField::Servings,
        RecipeField::CookTimeMinutes,
    ];

    /// Key used in the form-encoded body and in validation errors.
    pub fn key(self) -> &'static str {
        match self {
            RecipeField::Id => "id",
            RecipeField::Name => "name",
            RecipeField::MainIngredient => "mainIngredient",
            RecipeField::Instructions => "instructions",
            RecipeField::Servings => "servings",
            RecipeField::CookTimeMinutes => "cookTimeMinutes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecipeField::Id => "Id",
            RecipeField::Name => "Name",
            RecipeField::MainIngredient => "Main Ingredient",
            RecipeField::Instructions => "Instructions",
            RecipeField::Servings => "Servings",
            RecipeField::CookTimeMinutes => "Cook Time Minutes",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            RecipeField::Id | RecipeField::Servings | RecipeField::CookTimeMinutes
        )
    }
}

/// Raw form body exactly as submitted. Numeric fields stay as text so a
/// redisplayed form can echo back whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub main_ingredient: Option<String>,
    pub instructions: Option<String>,
    pub servings: Option<String>,
    pub cook_time_minutes: Option<String>,
}

impl RecipeForm {
    pub fn raw(&self, field: RecipeField) -> Option<&str> {
        let value = match field {
            RecipeField::Id => &self.id,
            RecipeField::Name => &self.name,
            RecipeField::MainIngredient => &self.main_ingredient,
            RecipeField::Instructions => &self.instructions,
            RecipeField::Servings => &self.servings,
            RecipeField::CookTimeMinutes => &self.cook_time_minutes,
        };
        value.as_deref()
    }
}

/// A recipe bound from form input. Missing text fields bind as empty strings;
/// missing or unparsable numbers bind as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    pub id: Option<i32>,
    pub name: String,
    pub main_ingredient: String,
    pub instructions: String,
    pub servings: Option<i32>,
    pub cook_time_minutes: Option<i32>,
}

impl Recipe {
    pub fn success_message(&self) -> String {
        format!("Recipe '{}' added successfully!", self.name)
    }
}
