//! Recipe detail page.

use crate::api::RecipeApi;
use crate::interaction::Interaction;
use crate::list::DELETE_PROMPT;
use crate::route::{Navigation, Route};
use crate::types::{Ingredient, Recipe, RecipeId, Step};
use crate::view::ViewState;

#[derive(Debug)]
pub struct RecipeDetailView {
    pub id: RecipeId,
    pub recipe: ViewState<Recipe>,
}

impl RecipeDetailView {
    pub fn new(id: RecipeId) -> Self {
        Self {
            id,
            recipe: ViewState::Idle,
        }
    }

    /// Fetch the recipe for `id`. Called on mount and whenever the route id changes.
    pub async fn load(&mut self, api: &dyn RecipeApi, id: RecipeId) {
        self.id = id;
        self.recipe = ViewState::Loading;
        self.recipe = ViewState::settle(api.get_recipe(id).await, "get recipe");
    }

    pub fn edit_route(&self) -> Route {
        Route::EditRecipe(self.id)
    }

    /// Confirm and delete; on success the caller should go home.
    pub async fn delete(
        &mut self,
        api: &dyn RecipeApi,
        interaction: &dyn Interaction,
    ) -> Option<Navigation> {
        if !interaction.confirm(DELETE_PROMPT) {
            return None;
        }

        match api.delete_recipe(self.id).await {
            Ok(()) => Some(Navigation::To(Route::Home)),
            Err(e) => {
                interaction.alert(&e.to_string());
                None
            }
        }
    }
}

/// Steps in display order: ascending position, missing position as 0.
/// Equal positions keep their input order.
pub fn sorted_steps(steps: &[Step]) -> Vec<&Step> {
    let mut sorted: Vec<&Step> = steps.iter().collect();
    sorted.sort_by_key(|s| s.position.unwrap_or(0));
    sorted
}

/// "quantity unit name", skipping blank parts.
pub fn ingredient_line(ingredient: &Ingredient) -> String {
    [
        ingredient.quantity.as_deref(),
        ingredient.unit.as_deref(),
        Some(ingredient.name.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}
