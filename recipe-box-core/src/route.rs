//! Client-side routes, navigation and the header links.

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::types::RecipeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/recipes/new`
    NewRecipe,
    /// `/recipes/:id`
    Recipe(RecipeId),
    /// `/recipes/:id/edit`
    EditRecipe(RecipeId),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["recipes", "new"] => Ok(Route::NewRecipe),
            ["recipes", id] => Ok(Route::Recipe(parse_id(id)?)),
            ["recipes", id, "edit"] => Ok(Route::EditRecipe(parse_id(id)?)),
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::NewRecipe => "/recipes/new".to_string(),
            Route::Recipe(id) => format!("/recipes/{}", id),
            Route::EditRecipe(id) => format!("/recipes/{}/edit", id),
        }
    }
}

fn parse_id(segment: &str) -> Result<RecipeId, RouteError> {
    segment
        .parse()
        .map_err(|_| RouteError::InvalidId(segment.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a view wants to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    /// One history entry back.
    Back,
}

/// Visited routes, most recent last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Route>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
        }
    }

    pub fn current(&self) -> Route {
        // entries always holds the start route
        self.entries.last().copied().unwrap_or(Route::Home)
    }

    pub fn apply(&mut self, navigation: Navigation) -> Route {
        match navigation {
            Navigation::To(route) => self.entries.push(route),
            Navigation::Back => {
                if self.entries.len() > 1 {
                    self.entries.pop();
                }
            }
        }
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Static header shown above every page.
pub struct NavShell;

impl NavShell {
    pub const TITLE: &'static str = "Recipe Box";
    pub const NEW_RECIPE: &'static str = "+ New Recipe";

    pub fn links() -> [(&'static str, Route); 2] {
        [
            (Self::TITLE, Route::Home),
            (Self::NEW_RECIPE, Route::NewRecipe),
        ]
    }
}
