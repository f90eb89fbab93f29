//! Recipe list page: tag filter, recipe cards, delete from the list.

use crate::api::RecipeApi;
use crate::interaction::Interaction;
use crate::types::{Recipe, RecipeId, Tag};
use crate::view::ViewState;

pub const DELETE_PROMPT: &str = "Delete this recipe?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RecipeListView {
    pub tags: ViewState<Vec<Tag>>,
    pub recipes: ViewState<Vec<Recipe>>,
    /// Tag name filter; `None` shows all recipes.
    pub selected_tag: Option<String>,
}

impl RecipeListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose first mount already filters by `tag`. An empty name means no filter.
    pub fn filtered(tag: Option<&str>) -> Self {
        Self {
            selected_tag: tag.filter(|t| !t.is_empty()).map(str::to_string),
            ..Self::default()
        }
    }

    /// Fetch the tag catalog, then the recipes for the current filter.
    pub async fn mount(&mut self, api: &dyn RecipeApi) {
        self.tags = ViewState::Loading;
        self.tags = ViewState::settle(api.list_tags().await, "list tags");
        self.load_recipes(api).await;
    }

    /// Change the tag filter and re-fetch. An empty name clears the filter.
    pub async fn select_tag(&mut self, api: &dyn RecipeApi, tag: Option<&str>) {
        self.selected_tag = tag.filter(|t| !t.is_empty()).map(str::to_string);
        self.load_recipes(api).await;
    }

    async fn load_recipes(&mut self, api: &dyn RecipeApi) {
        self.recipes = ViewState::Loading;
        let result = api.list_recipes(self.selected_tag.as_deref()).await;
        self.recipes = ViewState::settle(result, "list recipes");
    }

    /// Recipes currently shown; empty while loading or after a failed fetch.
    pub fn visible(&self) -> &[Recipe] {
        self.recipes.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Confirm, delete, then drop the recipe locally without re-fetching.
    pub async fn delete(
        &mut self,
        api: &dyn RecipeApi,
        id: RecipeId,
        interaction: &dyn Interaction,
    ) -> DeleteOutcome {
        if !interaction.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Cancelled;
        }

        match api.delete_recipe(id).await {
            Ok(()) => {
                if let Some(recipes) = self.recipes.loaded_mut() {
                    recipes.retain(|r| r.id != id);
                }
                tracing::debug!(id, "recipe deleted from list");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                let message = e.to_string();
                interaction.alert(&message);
                DeleteOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, FakeApi, FakeFailure};
    use crate::interaction::ScriptedInteraction;

    fn recipe(id: RecipeId, title: &str, tags: &[(i64, &str)]) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            description: None,
            servings: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            ingredients: vec![],
            steps: vec![],
            tags: tags
                .iter()
                .map(|(id, name)| Tag {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn api() -> FakeApi {
        FakeApi::new()
            .with_tag(1, "dinner")
            .with_tag(2, "dessert")
            .with_recipe(recipe(7, "Chili", &[(1, "dinner")]))
            .with_recipe(recipe(8, "Brownies", &[(2, "dessert")]))
            .with_recipe(recipe(9, "Curry", &[(1, "dinner")]))
    }

    fn titles(view: &RecipeListView) -> Vec<&str> {
        view.visible().iter().map(|r| r.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_mount_loads_tags_then_recipes() {
        let api = api();
        let mut view = RecipeListView::new();
        view.mount(&api).await;

        assert_eq!(view.tags.loaded().map(Vec::len), Some(2));
        assert_eq!(titles(&view), vec!["Chili", "Brownies", "Curry"]);
        assert_eq!(api.calls(), vec![ApiCall::ListTags, ApiCall::ListRecipes(None)]);
    }

    #[tokio::test]
    async fn test_tag_filter_refetches() {
        let api = api();
        let mut view = RecipeListView::new();
        view.mount(&api).await;

        view.select_tag(&api, Some("dinner")).await;
        assert_eq!(titles(&view), vec!["Chili", "Curry"]);

        view.select_tag(&api, Some("")).await;
        assert_eq!(view.selected_tag, None);
        assert_eq!(view.visible().len(), 3);

        assert_eq!(
            api.calls()[2..],
            [
                ApiCall::ListRecipes(Some("dinner".to_string())),
                ApiCall::ListRecipes(None)
            ]
        );
    }

    #[tokio::test]
    async fn test_filtered_mount_fetches_once() {
        let api = api();
        let mut view = RecipeListView::filtered(Some("dessert"));
        view.mount(&api).await;

        assert_eq!(titles(&view), vec!["Brownies"]);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ListTags,
                ApiCall::ListRecipes(Some("dessert".to_string()))
            ]
        );
        assert_eq!(RecipeListView::filtered(Some("")).selected_tag, None);
    }

    #[tokio::test]
    async fn test_delete_removes_locally_without_refetch() {
        let api = api();
        let mut view = RecipeListView::new();
        view.mount(&api).await;
        api.clear_calls();

        let interaction = ScriptedInteraction::accepting();
        let outcome = view.delete(&api, 7, &interaction).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(titles(&view), vec!["Brownies", "Curry"]);
        assert_eq!(api.calls(), vec![ApiCall::DeleteRecipe(7)]);
        assert_eq!(interaction.confirmations(), vec![DELETE_PROMPT]);
    }

    #[tokio::test]
    async fn test_declined_delete_does_nothing() {
        let api = api();
        let mut view = RecipeListView::new();
        view.mount(&api).await;
        api.clear_calls();

        let outcome = view
            .delete(&api, 7, &ScriptedInteraction::declining())
            .await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(view.visible().len(), 3);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_alerts_and_keeps_list() {
        let api = api();
        let mut view = RecipeListView::new();
        view.mount(&api).await;
        api.fail_next(ApiCall::DeleteRecipe(7), FakeFailure::Status(500));

        let interaction = ScriptedInteraction::accepting();
        let outcome = view.delete(&api, 7, &interaction).await;

        assert_eq!(
            outcome,
            DeleteOutcome::Failed("Failed to delete recipe".to_string())
        );
        assert_eq!(interaction.alerts(), vec!["Failed to delete recipe"]);
        assert_eq!(view.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_empty_list() {
        let api = api();
        api.fail_next(ApiCall::ListRecipes(None), FakeFailure::Status(503));

        let mut view = RecipeListView::new();
        view.mount(&api).await;

        assert_eq!(view.recipes.error(), Some("Failed to fetch recipes"));
        assert!(view.visible().is_empty());
        assert!(view.tags.loaded().is_some());
    }
}
