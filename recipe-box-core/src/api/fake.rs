//! In-memory backend for tests and offline use.
//!
//! Mirrors the nested-attributes behavior of the real backend closely enough
//! to drive every view end to end, and records each call so tests can check
//! what was (and was not) fetched.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    RecipeApi, CREATE_RECIPE_FAILED, DELETE_RECIPE_FAILED, FETCH_RECIPES_FAILED,
    FETCH_RECIPE_FAILED, FETCH_TAGS_FAILED, UPDATE_RECIPE_FAILED,
};
use crate::error::ApiError;
use crate::types::{
    Ingredient, IngredientAttributes, Recipe, RecipeId, RecipePayload, Step, StepAttributes, Tag,
};

/// One recorded call against the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListRecipes(Option<String>),
    GetRecipe(RecipeId),
    CreateRecipe,
    UpdateRecipe(RecipeId),
    DeleteRecipe(RecipeId),
    ListTags,
}

impl ApiCall {
    fn kind(&self) -> CallKind {
        match self {
            ApiCall::ListRecipes(_) => CallKind::ListRecipes,
            ApiCall::GetRecipe(_) => CallKind::GetRecipe,
            ApiCall::CreateRecipe => CallKind::CreateRecipe,
            ApiCall::UpdateRecipe(_) => CallKind::UpdateRecipe,
            ApiCall::DeleteRecipe(_) => CallKind::DeleteRecipe,
            ApiCall::ListTags => CallKind::ListTags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CallKind {
    ListRecipes,
    GetRecipe,
    CreateRecipe,
    UpdateRecipe,
    DeleteRecipe,
    ListTags,
}

/// Failure injected for the next call of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeFailure {
    /// Respond with this HTTP status and no `errors` body.
    Status(u16),
    /// Respond 422 with these validation errors.
    Validation(Vec<String>),
}

#[derive(Debug, Default)]
struct FakeState {
    recipes: BTreeMap<RecipeId, Recipe>,
    tags: Vec<Tag>,
    next_id: i64,
    calls: Vec<ApiCall>,
    failures: HashMap<CallKind, FakeFailure>,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag to the catalog.
    pub fn with_tag(self, id: i64, name: &str) -> Self {
        {
            let mut state = self.state();
            state.tags.push(Tag {
                id,
                name: name.to_string(),
            });
            state.next_id = state.next_id.max(id);
        }
        self
    }

    /// Store a recipe as-is. Ids of the recipe and its children are reserved.
    pub fn with_recipe(self, recipe: Recipe) -> Self {
        {
            let mut state = self.state();
            let highest = recipe
                .ingredients
                .iter()
                .map(|i| i.id)
                .chain(recipe.steps.iter().map(|s| s.id))
                .fold(recipe.id, i64::max);
            state.next_id = state.next_id.max(highest);
            state.recipes.insert(recipe.id, recipe);
        }
        self
    }

    /// Make the next call of the same kind as `call` fail.
    pub fn fail_next(&self, call: ApiCall, failure: FakeFailure) {
        self.state().failures.insert(call.kind(), failure);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Current server-side copy of a recipe.
    pub fn stored(&self, id: RecipeId) -> Option<Recipe> {
        self.state().recipes.get(&id).cloned()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and return the injected failure for it, if any.
    fn begin(state: &mut FakeState, call: ApiCall, message: &str) -> Result<(), ApiError> {
        let kind = call.kind();
        state.calls.push(call);
        match state.failures.remove(&kind) {
            None => Ok(()),
            Some(FakeFailure::Status(status)) => Err(ApiError::Status {
                status,
                message: message.to_string(),
            }),
            Some(FakeFailure::Validation(errors)) if errors.is_empty() => Err(ApiError::Status {
                status: 422,
                message: message.to_string(),
            }),
            Some(FakeFailure::Validation(errors)) => {
                Err(ApiError::Validation { status: 422, errors })
            }
        }
    }

    fn not_found(message: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            message: message.to_string(),
        }
    }

    fn validate(payload: &RecipePayload) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if payload.title.trim().is_empty() {
            errors.push("Title can't be blank".to_string());
        }
        if matches!(payload.servings, Some(n) if n <= 0) {
            errors.push("Servings must be greater than 0".to_string());
        }
        if matches!(payload.prep_time_minutes, Some(n) if n < 0) {
            errors.push("Prep time minutes must be greater than or equal to 0".to_string());
        }
        if matches!(payload.cook_time_minutes, Some(n) if n < 0) {
            errors.push("Cook time minutes must be greater than or equal to 0".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation {
                status: 422,
                errors,
            })
        }
    }

    /// Apply a payload onto `recipe`. Existing children are matched by id;
    /// children the payload leaves out are dropped.
    fn apply(state: &mut FakeState, recipe: &mut Recipe, payload: &RecipePayload) {
        recipe.title = payload.title.clone();
        recipe.description = payload.description.clone();
        recipe.servings = payload.servings;
        recipe.prep_time_minutes = payload.prep_time_minutes;
        recipe.cook_time_minutes = payload.cook_time_minutes;

        recipe.tags = payload
            .tag_ids
            .iter()
            .filter_map(|id| state.tags.iter().find(|t| t.id == *id).cloned())
            .collect();

        let ingredients = payload
            .ingredients_attributes
            .iter()
            .map(|attrs| {
                let IngredientAttributes {
                    id,
                    name,
                    quantity,
                    unit,
                } = attrs.clone();
                let id = match id {
                    Some(id) if recipe.ingredients.iter().any(|i| i.id == id) => id,
                    _ => state.next_id(),
                };
                Ingredient {
                    id,
                    name,
                    quantity,
                    unit,
                }
            })
            .collect();
        recipe.ingredients = ingredients;

        let steps = payload
            .steps_attributes
            .iter()
            .map(|attrs| {
                let StepAttributes {
                    id,
                    instruction,
                    position,
                } = attrs.clone();
                let id = match id {
                    Some(id) if recipe.steps.iter().any(|s| s.id == id) => id,
                    _ => state.next_id(),
                };
                Step {
                    id,
                    instruction,
                    position: Some(position),
                }
            })
            .collect();
        recipe.steps = steps;
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn list_recipes(&self, tag: Option<&str>) -> Result<Vec<Recipe>, ApiError> {
        let mut state = self.state();
        let tag = tag.filter(|t| !t.is_empty());
        Self::begin(
            &mut state,
            ApiCall::ListRecipes(tag.map(str::to_string)),
            FETCH_RECIPES_FAILED,
        )?;

        Ok(state
            .recipes
            .values()
            .filter(|r| match tag {
                Some(name) => r.tags.iter().any(|t| t.name == name),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        let mut state = self.state();
        Self::begin(&mut state, ApiCall::GetRecipe(id), FETCH_RECIPE_FAILED)?;
        state
            .recipes
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(FETCH_RECIPE_FAILED))
    }

    async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe, ApiError> {
        let mut state = self.state();
        Self::begin(&mut state, ApiCall::CreateRecipe, CREATE_RECIPE_FAILED)?;
        Self::validate(payload)?;

        let mut recipe = Recipe {
            id: state.next_id(),
            title: String::new(),
            description: None,
            servings: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: Vec::new(),
        };
        Self::apply(&mut state, &mut recipe, payload);
        state.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(
        &self,
        id: RecipeId,
        payload: &RecipePayload,
    ) -> Result<Recipe, ApiError> {
        let mut state = self.state();
        Self::begin(&mut state, ApiCall::UpdateRecipe(id), UPDATE_RECIPE_FAILED)?;

        let mut recipe = state
            .recipes
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(UPDATE_RECIPE_FAILED))?;
        Self::validate(payload)?;
        Self::apply(&mut state, &mut recipe, payload);
        state.recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), ApiError> {
        let mut state = self.state();
        Self::begin(&mut state, ApiCall::DeleteRecipe(id), DELETE_RECIPE_FAILED)?;
        state
            .recipes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(DELETE_RECIPE_FAILED))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let mut state = self.state();
        Self::begin(&mut state, ApiCall::ListTags, FETCH_TAGS_FAILED)?;
        Ok(state.tags.clone())
    }
}
