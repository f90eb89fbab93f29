//! Route-driven shell: mounts the view for the current route and follows
//! the navigation each view asks for.

use crate::api::RecipeApi;
use crate::detail::RecipeDetailView;
use crate::form::{FormMode, RecipeForm, SubmitOutcome};
use crate::interaction::Interaction;
use crate::list::{DeleteOutcome, RecipeListView};
use crate::render;
use crate::route::{History, Navigation, Route};
use crate::types::RecipeId;

#[derive(Debug)]
pub enum Page {
    List(RecipeListView),
    Detail(RecipeDetailView),
    Form(RecipeForm),
}

pub struct App<A, I> {
    api: A,
    interaction: I,
    history: History,
    page: Page,
}

impl<A: RecipeApi, I: Interaction> App<A, I> {
    /// Create the shell on the home route. Nothing is fetched until [`App::start`].
    pub fn new(api: A, interaction: I) -> Self {
        Self {
            api,
            interaction,
            history: History::default(),
            page: Page::List(RecipeListView::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    pub fn route(&self) -> Route {
        self.history.current()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Mount the view for the current route.
    pub async fn start(&mut self) {
        self.mount(self.route()).await;
    }

    /// Push `route` and mount its view.
    pub async fn open(&mut self, route: Route) {
        self.navigate(Navigation::To(route)).await;
    }

    pub async fn navigate(&mut self, navigation: Navigation) -> Route {
        let route = self.history.apply(navigation);
        tracing::debug!(%route, "navigate");
        self.mount(route).await;
        route
    }

    async fn mount(&mut self, route: Route) {
        let api: &dyn RecipeApi = &self.api;
        match route {
            Route::Home => {
                let mut view = RecipeListView::new();
                view.mount(api).await;
                self.page = Page::List(view);
            }
            Route::Recipe(id) => {
                // Same page, new id: re-fetch in place.
                if let Page::Detail(view) = &mut self.page {
                    view.load(api, id).await;
                } else {
                    let mut view = RecipeDetailView::new(id);
                    view.load(api, id).await;
                    self.page = Page::Detail(view);
                }
            }
            Route::NewRecipe | Route::EditRecipe(_) => {
                let mode = match route {
                    Route::EditRecipe(id) => FormMode::Edit(id),
                    _ => FormMode::New,
                };
                let mut form = RecipeForm::new(mode);
                // A failed recipe fetch stays on the form as its inline error.
                let _ = form.load(api).await;
                self.page = Page::Form(form);
            }
        }
    }

    /// Render the header and the current page.
    pub fn render(&self) -> String {
        let body = match &self.page {
            Page::List(view) => render::list_page(view),
            Page::Detail(view) => render::detail_page(view),
            Page::Form(form) => render::form_page(form),
        };
        format!("{}\n\n{}", render::nav(), body)
    }

    /// Go home with the list already filtered by `tag`.
    pub async fn open_list(&mut self, tag: Option<&str>) {
        self.history.apply(Navigation::To(Route::Home));
        let mut view = RecipeListView::filtered(tag);
        view.mount(&self.api).await;
        self.page = Page::List(view);
    }

    /// Delete a recipe from the list page. Does nothing on other pages.
    pub async fn delete_from_list(&mut self, id: RecipeId) -> Option<DeleteOutcome> {
        match &mut self.page {
            Page::List(view) => Some(view.delete(&self.api, id, &self.interaction).await),
            _ => None,
        }
    }

    /// Delete the recipe shown on the detail page; goes home on success.
    pub async fn delete_current(&mut self) -> bool {
        let navigation = match &mut self.page {
            Page::Detail(view) => view.delete(&self.api, &self.interaction).await,
            _ => None,
        };
        match navigation {
            Some(navigation) => {
                self.navigate(navigation).await;
                true
            }
            None => false,
        }
    }

    /// Edit the form on the current page, if there is one.
    pub fn form_mut(&mut self) -> Option<&mut RecipeForm> {
        match &mut self.page {
            Page::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Submit the current form; on success, show the saved recipe.
    pub async fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let outcome = match &mut self.page {
            Page::Form(form) => form.submit(&self.api).await,
            _ => return None,
        };
        if let SubmitOutcome::Navigate(navigation) = outcome {
            self.navigate(navigation).await;
        }
        Some(outcome)
    }

    /// Leave the form, discarding edits.
    pub async fn cancel_form(&mut self) -> Option<Route> {
        let navigation = match &self.page {
            Page::Form(form) => form.cancel(),
            _ => return None,
        };
        Some(self.navigate(navigation).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, FakeApi};
    use crate::form::{IngredientField, StepField};
    use crate::interaction::ScriptedInteraction;

    fn app() -> App<FakeApi, ScriptedInteraction> {
        App::new(
            FakeApi::new().with_tag(1, "soup"),
            ScriptedInteraction::accepting(),
        )
    }

    #[tokio::test]
    async fn test_create_then_cancel_edit_returns_to_detail() {
        let mut app = app();
        app.start().await;
        app.open(Route::NewRecipe).await;

        let form = app.form_mut().unwrap();
        form.set_title("Soup");
        form.update_ingredient(0, IngredientField::Name, "Salt");
        form.update_step(0, StepField::Instruction, "Boil water");
        form.toggle_tag(1);

        let outcome = app.submit_form().await.unwrap();
        let id = match (outcome, app.route()) {
            (SubmitOutcome::Navigate(_), Route::Recipe(id)) => id,
            other => panic!("unexpected state: {:?}", other),
        };
        assert!(app.render().contains("Soup"));

        app.open(Route::EditRecipe(id)).await;
        app.form_mut().unwrap().set_title("Changed");
        assert_eq!(app.cancel_form().await, Some(Route::Recipe(id)));
        assert_eq!(app.api().stored(id).unwrap().title, "Soup");
    }

    #[tokio::test]
    async fn test_delete_current_goes_home() {
        let mut app = app();
        let mut form = RecipeForm::new(FormMode::New);
        form.set_title("Broth");
        form.submit(app.api()).await;

        app.open(Route::Recipe(2)).await;
        assert!(app.delete_current().await);
        assert_eq!(app.route(), Route::Home);
        assert!(matches!(app.page(), Page::List(_)));
        assert!(app.render().contains("No recipes found."));
    }

    #[tokio::test]
    async fn test_open_list_with_tag_fetches_filtered_only() {
        let mut app = app();
        app.open_list(Some("soup")).await;

        assert_eq!(app.route(), Route::Home);
        assert!(matches!(
            app.page(),
            Page::List(view) if view.selected_tag.as_deref() == Some("soup")
        ));
        assert_eq!(
            app.api().calls(),
            vec![
                ApiCall::ListTags,
                ApiCall::ListRecipes(Some("soup".to_string()))
            ]
        );
    }

    #[tokio::test]
    async fn test_detail_refetches_on_id_change() {
        let mut app = app();
        app.open(Route::Recipe(10)).await;
        app.open(Route::Recipe(11)).await;

        assert!(matches!(app.page(), Page::Detail(view) if view.id == 11));
        assert_eq!(
            app.api().calls(),
            vec![ApiCall::GetRecipe(10), ApiCall::GetRecipe(11)]
        );
    }
}
