//! Recipe API client.
//!
//! Every view talks to the backend through [`RecipeApi`], so the views can be
//! driven against the real HTTP backend or the in-memory [`FakeApi`].

mod client;
mod fake;

pub use client::{HttpApi, HttpApiBuilder};
pub use fake::{ApiCall, FakeApi, FakeFailure};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{Recipe, RecipeId, RecipePayload, Tag};

/// The six REST operations the front-end consumes.
///
/// Each call is one-shot: no retry, no timeout, no caching.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes`, filtered server-side by tag name when given.
    async fn list_recipes(&self, tag: Option<&str>) -> Result<Vec<Recipe>, ApiError>;

    /// `GET /recipes/:id` with nested ingredients, steps and tags.
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, ApiError>;

    /// `POST /recipes`. Validation failures surface as [`ApiError::Validation`].
    async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe, ApiError>;

    /// `PATCH /recipes/:id`. Same error contract as create.
    async fn update_recipe(
        &self,
        id: RecipeId,
        payload: &RecipePayload,
    ) -> Result<Recipe, ApiError>;

    /// `DELETE /recipes/:id`.
    async fn delete_recipe(&self, id: RecipeId) -> Result<(), ApiError>;

    /// `GET /tags`.
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;
}

pub(crate) const FETCH_RECIPES_FAILED: &str = "Failed to fetch recipes";
pub(crate) const FETCH_RECIPE_FAILED: &str = "Failed to fetch recipe";
pub(crate) const CREATE_RECIPE_FAILED: &str = "Failed to create recipe";
pub(crate) const UPDATE_RECIPE_FAILED: &str = "Failed to update recipe";
pub(crate) const DELETE_RECIPE_FAILED: &str = "Failed to delete recipe";
pub(crate) const FETCH_TAGS_FAILED: &str = "Failed to fetch tags";
