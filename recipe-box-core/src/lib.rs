pub mod api;
pub mod app;
pub mod config;
pub mod detail;
pub mod error;
pub mod form;
pub mod interaction;
pub mod list;
pub mod render;
pub mod route;
pub mod types;
pub mod view;

pub use api::{ApiCall, FakeApi, FakeFailure, HttpApi, HttpApiBuilder, RecipeApi};
pub use app::{App, Page};
pub use config::ClientConfig;
pub use detail::{ingredient_line, sorted_steps, RecipeDetailView};
pub use error::{ApiError, FormError, RouteError};
pub use form::{
    FormMode, IngredientField, IngredientFields, RecipeForm, Row, StepField, StepFields,
    SubmitOutcome,
};
pub use interaction::{Interaction, ScriptedInteraction};
pub use list::{DeleteOutcome, RecipeListView};
pub use route::{History, NavShell, Navigation, Route};
pub use types::{
    Ingredient, IngredientAttributes, Recipe, RecipeId, RecipePayload, Step, StepAttributes, Tag,
    TagId,
};
pub use view::ViewState;
