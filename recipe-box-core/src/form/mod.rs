//! Create/edit recipe form.
//!
//! The form keeps every field as the text the user typed. Conversion to the
//! API's nested-attributes payload happens only in [`RecipeForm::build_payload`]:
//! blank ingredient names and step instructions are dropped there, and blank
//! step positions are numbered by their place among the surviving steps.

mod payload;
mod row;

pub use row::{IngredientField, IngredientFields, Row, StepField, StepFields};

use crate::api::RecipeApi;
use crate::error::{ApiError, FormError};
use crate::route::{Navigation, Route};
use crate::types::{Recipe, RecipeId, RecipePayload, Tag, TagId};
use crate::view::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit(RecipeId),
}

impl FormMode {
    /// Form mode for a route, if the route shows the form.
    pub fn for_route(route: Route) -> Option<Self> {
        match route {
            Route::NewRecipe => Some(FormMode::New),
            Route::EditRecipe(id) => Some(FormMode::Edit(id)),
            Route::Home | Route::Recipe(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Navigate(Navigation),
    Failed(String),
}

#[derive(Debug)]
pub struct RecipeForm {
    mode: FormMode,
    title: String,
    description: String,
    servings: String,
    prep_time: String,
    cook_time: String,
    ingredients: Vec<Row<IngredientFields>>,
    steps: Vec<Row<StepFields>>,
    all_tags: ViewState<Vec<Tag>>,
    selected_tag_ids: Vec<TagId>,
    error: Option<String>,
    saving: bool,
}

impl RecipeForm {
    /// Empty form with one blank ingredient row and one blank step row.
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            title: String::new(),
            description: String::new(),
            servings: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            ingredients: vec![Row::blank()],
            steps: vec![Row::blank()],
            all_tags: ViewState::Idle,
            selected_tag_ids: Vec::new(),
            error: None,
            saving: false,
        }
    }

    /// Fetch the tag catalog and, when editing, the recipe to populate from.
    ///
    /// A tag catalog failure is only logged. A recipe failure is kept as the
    /// inline error and returned.
    pub async fn load(&mut self, api: &dyn RecipeApi) -> Result<(), ApiError> {
        self.all_tags = ViewState::Loading;
        self.all_tags = ViewState::settle(api.list_tags().await, "list tags");

        if let FormMode::Edit(id) = self.mode {
            match api.get_recipe(id).await {
                Ok(recipe) => self.populate(&recipe),
                Err(e) => {
                    tracing::error!(id, error = %e, "failed to load recipe for editing");
                    self.error = Some(e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Replace the editable copy with the contents of `recipe`.
    pub fn populate(&mut self, recipe: &Recipe) {
        self.title = recipe.title.clone();
        self.description = recipe.description.clone().unwrap_or_default();
        self.servings = number_text(recipe.servings);
        self.prep_time = number_text(recipe.prep_time_minutes);
        self.cook_time = number_text(recipe.cook_time_minutes);

        self.ingredients = if recipe.ingredients.is_empty() {
            vec![Row::blank()]
        } else {
            recipe.ingredients.iter().map(Row::from).collect()
        };

        self.steps = if recipe.steps.is_empty() {
            vec![Row::blank()]
        } else {
            crate::detail::sorted_steps(&recipe.steps)
                .into_iter()
                .map(Row::from)
                .collect()
        };

        self.selected_tag_ids = recipe.tags.iter().map(|t| t.id).collect();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() {
            "Edit Recipe"
        } else {
            "New Recipe"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.saving, self.is_edit()) {
            (true, _) => "Saving…",
            (false, true) => "Update Recipe",
            (false, false) => "Create Recipe",
        }
    }

    /// True only while [`RecipeForm::submit`] is running. The `&mut self`
    /// borrow it holds is what keeps a second submit from starting meanwhile.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn ingredients(&self) -> &[Row<IngredientFields>] {
        &self.ingredients
    }

    pub fn steps(&self) -> &[Row<StepFields>] {
        &self.steps
    }

    /// Tag catalog offered for selection; empty until loaded or if the fetch failed.
    pub fn all_tags(&self) -> &[Tag] {
        self.all_tags.loaded().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_tag_ids(&self) -> &[TagId] {
        &self.selected_tag_ids
    }

    pub fn is_tag_selected(&self, id: TagId) -> bool {
        self.selected_tag_ids.contains(&id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn servings(&self) -> &str {
        &self.servings
    }

    pub fn prep_time(&self) -> &str {
        &self.prep_time
    }

    pub fn cook_time(&self) -> &str {
        &self.cook_time
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_servings(&mut self, value: impl Into<String>) {
        self.servings = value.into();
    }

    pub fn set_prep_time(&mut self, value: impl Into<String>) {
        self.prep_time = value.into();
    }

    pub fn set_cook_time(&mut self, value: impl Into<String>) {
        self.cook_time = value.into();
    }

    pub fn update_ingredient(
        &mut self,
        index: usize,
        field: IngredientField,
        value: impl Into<String>,
    ) {
        match self.ingredients.get_mut(index) {
            Some(row) => row.fields_mut().set(field, value.into()),
            None => tracing::debug!(index, "ignoring edit of missing ingredient row"),
        }
    }

    pub fn update_step(&mut self, index: usize, field: StepField, value: impl Into<String>) {
        match self.steps.get_mut(index) {
            Some(row) => row.fields_mut().set(field, value.into()),
            None => tracing::debug!(index, "ignoring edit of missing step row"),
        }
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients.push(Row::blank());
    }

    pub fn add_step(&mut self) {
        self.steps.push(Row::blank());
    }

    /// Remove a row; later rows shift up. May leave no rows at all.
    pub fn remove_ingredient(&mut self, index: usize) {
        if index < self.ingredients.len() {
            self.ingredients.remove(index);
        }
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, id: TagId) {
        if let Some(pos) = self.selected_tag_ids.iter().position(|t| *t == id) {
            self.selected_tag_ids.remove(pos);
        } else {
            self.selected_tag_ids.push(id);
        }
    }

    /// Check the input rules (title present, servings at least 1, times not
    /// negative) and convert the fields to the API payload.
    ///
    /// A whitespace-only title passes here; the backend rejects it.
    pub fn build_payload(&self) -> Result<RecipePayload, FormError> {
        if self.title.is_empty() {
            return Err(FormError::Required { field: "Title" });
        }

        Ok(RecipePayload {
            title: self.title.clone(),
            description: payload::non_empty(&self.description),
            servings: payload::parse_at_least(&self.servings, "Servings", 1)?,
            prep_time_minutes: payload::parse_at_least(&self.prep_time, "Prep time", 0)?,
            cook_time_minutes: payload::parse_at_least(&self.cook_time, "Cook time", 0)?,
            tag_ids: self.selected_tag_ids.clone(),
            ingredients_attributes: payload::ingredient_attributes(&self.ingredients),
            steps_attributes: payload::step_attributes(&self.steps)?,
        })
    }

    /// Save the form. On success, navigate to the saved recipe; on failure,
    /// keep the message inline and stay on the form.
    pub async fn submit(&mut self, api: &dyn RecipeApi) -> SubmitOutcome {
        self.error = None;
        self.saving = true;

        let result = self.save(api).await;
        self.saving = false;

        match result {
            Ok(saved) => {
                tracing::debug!(id = saved.id, "recipe saved");
                SubmitOutcome::Navigate(Navigation::To(Route::Recipe(saved.id)))
            }
            Err(message) => {
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn save(&self, api: &dyn RecipeApi) -> Result<Recipe, String> {
        let payload = self.build_payload().map_err(|e| e.to_string())?;
        let result = match self.mode {
            FormMode::Edit(id) => api.update_recipe(id, &payload).await,
            FormMode::New => api.create_recipe(&payload).await,
        };
        result.map_err(|e| e.to_string())
    }

    /// Leave without saving; local edits are discarded.
    pub fn cancel(&self) -> Navigation {
        Navigation::Back
    }
}

fn number_text(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
