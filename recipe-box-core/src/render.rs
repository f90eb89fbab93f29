//! Plain-text rendering of each page.

use std::fmt::Write;

use crate::detail::{ingredient_line, sorted_steps, RecipeDetailView};
use crate::form::RecipeForm;
use crate::list::RecipeListView;
use crate::route::NavShell;
use crate::types::{Recipe, Tag};
use crate::view::ViewState;

pub const LOADING: &str = "Loading…";
pub const NO_RECIPES: &str = "No recipes found.";
pub const NOT_FOUND: &str = "Recipe not found.";

/// Header line: site title on the left, new-recipe link on the right.
pub fn nav() -> String {
    let [(title, home), (new_label, new_route)] = NavShell::links();
    format!("{} ({})    {} ({})", title, home, new_label, new_route)
}

/// "15m prep · 30m cook"; zero or missing times are left out.
pub fn card_meta(recipe: &Recipe) -> String {
    [
        positive(recipe.prep_time_minutes).map(|m| format!("{}m prep", m)),
        positive(recipe.cook_time_minutes).map(|m| format!("{}m cook", m)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ")
}

pub fn card(recipe: &Recipe) -> String {
    let mut out = format!("[{}] {}\n", recipe.id, recipe.title);
    if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {}", description);
    }
    if !recipe.tags.is_empty() {
        let _ = writeln!(out, "    {}", tag_chips(&recipe.tags));
    }
    let meta = card_meta(recipe);
    if !meta.is_empty() {
        let _ = writeln!(out, "    {}", meta);
    }
    out
}

pub fn list_page(view: &RecipeListView) -> String {
    let mut out = String::from("Recipes\n");

    let mut filter = vec![option_label("All Tags", view.selected_tag.is_none())];
    if let Some(tags) = view.tags.loaded() {
        filter.extend(tags.iter().map(|t| {
            option_label(&t.name, view.selected_tag.as_deref() == Some(t.name.as_str()))
        }));
    }
    let _ = writeln!(out, "Filter: {}\n", filter.join("  "));

    match &view.recipes {
        ViewState::Idle | ViewState::Loading => out.push_str(LOADING),
        _ if view.visible().is_empty() => out.push_str(NO_RECIPES),
        _ => {
            let cards: Vec<String> = view.visible().iter().map(card).collect();
            out.push_str(cards.join("\n").trim_end());
        }
    }
    out.push('\n');
    out
}

pub fn detail_page(view: &RecipeDetailView) -> String {
    let recipe = match &view.recipe {
        ViewState::Idle | ViewState::Loading => return format!("{}\n", LOADING),
        ViewState::Failed(_) => return format!("{}\n", NOT_FOUND),
        ViewState::Loaded(recipe) => recipe,
    };

    let mut out = format!("{}\n", recipe.title);
    if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{}", description);
    }

    let facts: Vec<String> = [
        positive(recipe.servings).map(|n| format!("Servings: {}", n)),
        positive(recipe.prep_time_minutes).map(|n| format!("Prep: {} min", n)),
        positive(recipe.cook_time_minutes).map(|n| format!("Cook: {} min", n)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" · "));
    }

    if !recipe.tags.is_empty() {
        let _ = writeln!(out, "{}", tag_chips(&recipe.tags));
    }

    if !recipe.ingredients.is_empty() {
        out.push_str("\nIngredients\n");
        for ingredient in &recipe.ingredients {
            let _ = writeln!(out, "  • {}", ingredient_line(ingredient));
        }
    }

    if !recipe.steps.is_empty() {
        out.push_str("\nSteps\n");
        for (n, step) in sorted_steps(&recipe.steps).into_iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", n + 1, step.instruction);
        }
    }

    let _ = write!(out, "\n[Edit: {}]", view.edit_route());
    out.push('\n');
    out
}

pub fn form_page(form: &RecipeForm) -> String {
    let mut out = format!("{}\n", form.heading());
    if let Some(error) = form.error() {
        let _ = writeln!(out, "! {}", error);
    }

    let _ = writeln!(out, "\nTitle *:      {}", form.title());
    let _ = writeln!(out, "Description:  {}", form.description());
    let _ = writeln!(
        out,
        "Servings: {}   Prep (min): {}   Cook (min): {}",
        blank_dash(form.servings()),
        blank_dash(form.prep_time()),
        blank_dash(form.cook_time())
    );

    if !form.all_tags().is_empty() {
        let chips: Vec<String> = form
            .all_tags()
            .iter()
            .map(|t| option_label(&t.name, form.is_tag_selected(t.id)))
            .collect();
        let _ = writeln!(out, "Tags:         {}", chips.join("  "));
    }

    out.push_str("\nIngredients\n");
    for (idx, row) in form.ingredients().iter().enumerate() {
        let fields = row.fields();
        let _ = writeln!(
            out,
            "  {}. qty={} unit={} name={}",
            idx + 1,
            blank_dash(&fields.quantity),
            blank_dash(&fields.unit),
            blank_dash(&fields.name)
        );
    }

    out.push_str("\nSteps\n");
    for (idx, row) in form.steps().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}",
            idx + 1,
            blank_dash(&row.fields().instruction)
        );
    }

    let _ = writeln!(out, "\n[{}]  [Cancel]", form.submit_label());
    out
}

pub fn tag_list(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!("{}\t{}\n", t.id, t.name))
        .collect()
}

fn tag_chips(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t.name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn option_label(label: &str, selected: bool) -> String {
    if selected {
        format!("[{}]", label)
    } else {
        label.to_string()
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|n| *n != 0)
}

fn blank_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormMode, IngredientField};
    use crate::types::{Ingredient, Step};

    fn recipe() -> Recipe {
        Recipe {
            id: 2,
            title: "Granola".to_string(),
            description: Some("Crunchy".to_string()),
            servings: Some(0),
            prep_time_minutes: Some(10),
            cook_time_minutes: Some(25),
            ingredients: vec![Ingredient {
                id: 1,
                name: "oats".to_string(),
                quantity: Some("3".to_string()),
                unit: Some("cups".to_string()),
            }],
            steps: vec![
                Step {
                    id: 5,
                    instruction: "Bake".to_string(),
                    position: Some(2),
                },
                Step {
                    id: 4,
                    instruction: "Mix".to_string(),
                    position: Some(1),
                },
            ],
            tags: vec![Tag {
                id: 1,
                name: "breakfast".to_string(),
            }],
        }
    }

    #[test]
    fn test_card_meta_omits_zero_and_missing_times() {
        let mut r = recipe();
        assert_eq!(card_meta(&r), "10m prep · 25m cook");
        r.prep_time_minutes = Some(0);
        assert_eq!(card_meta(&r), "25m cook");
        r.cook_time_minutes = None;
        assert_eq!(card_meta(&r), "");
    }

    #[test]
    fn test_detail_page() {
        let mut view = RecipeDetailView::new(2);
        view.recipe = ViewState::Loaded(recipe());
        let page = detail_page(&view);

        assert!(page.starts_with("Granola\nCrunchy\n"));
        assert!(page.contains("Prep: 10 min · Cook: 25 min"));
        assert!(!page.contains("Servings"));
        assert!(page.contains("#breakfast"));
        assert!(page.contains("  • 3 cups oats"));
        assert!(page.contains("  1. Mix\n  2. Bake\n"));
        assert!(page.contains("/recipes/2/edit"));
    }

    #[test]
    fn test_detail_page_states() {
        let mut view = RecipeDetailView::new(2);
        view.recipe = ViewState::Loading;
        assert_eq!(detail_page(&view), "Loading…\n");
        view.recipe = ViewState::Failed("Failed to fetch recipe".to_string());
        assert_eq!(detail_page(&view), "Recipe not found.\n");
    }

    #[test]
    fn test_list_page_marks_selected_tag() {
        let mut view = RecipeListView::new();
        view.tags = ViewState::Loaded(recipe().tags);
        view.selected_tag = Some("breakfast".to_string());
        view.recipes = ViewState::Loaded(vec![recipe()]);

        let page = list_page(&view);
        assert!(page.contains("Filter: All Tags  [breakfast]"));
        assert!(page.contains("[2] Granola"));

        view.recipes = ViewState::Failed("Failed to fetch recipes".to_string());
        assert!(list_page(&view).ends_with("No recipes found.\n"));
    }

    #[test]
    fn test_form_page() {
        let mut form = RecipeForm::new(FormMode::New);
        form.set_title("Tea");
        form.update_ingredient(0, IngredientField::Name, "leaves");

        let page = form_page(&form);
        assert!(page.starts_with("New Recipe\n"));
        assert!(page.contains("Title *:      Tea"));
        assert!(page.contains("  1. qty=- unit=- name=leaves"));
        assert!(page.contains("[Create Recipe]  [Cancel]"));
    }

    #[test]
    fn test_nav() {
        assert_eq!(nav(), "Recipe Box (/)    + New Recipe (/recipes/new)");
    }
}
