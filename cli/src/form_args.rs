//! Command-line flags that fill in the recipe form.
//!
//! Each flag maps onto the same edit a user would make by hand: typing into
//! a row, adding a row, removing a row or toggling a tag.

use clap::Args;
use recipe_box_core::{IngredientField, RecipeForm, Row, StepField, TagId};
use std::str::FromStr;

/// `qty|unit|name`, or just `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSpec {
    pub quantity: String,
    pub unit: String,
    pub name: String,
}

impl FromStr for IngredientSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').collect();
        match parts.as_slice() {
            [name] => Ok(Self {
                quantity: String::new(),
                unit: String::new(),
                name: name.to_string(),
            }),
            [quantity, unit, name] => Ok(Self {
                quantity: quantity.trim().to_string(),
                unit: unit.trim().to_string(),
                name: name.to_string(),
            }),
            _ => Err(format!(
                "expected \"qty|unit|name\" or \"name\", got \"{}\"",
                s
            )),
        }
    }
}

/// `instruction`, optionally followed by `@position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub instruction: String,
    pub position: String,
}

impl FromStr for StepSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((instruction, position)) = s.rsplit_once('@') {
            if position.trim().parse::<i64>().is_ok() {
                return Ok(Self {
                    instruction: instruction.to_string(),
                    position: position.trim().to_string(),
                });
            }
        }
        Ok(Self {
            instruction: s.to_string(),
            position: String::new(),
        })
    }
}

/// `N=value` with a 1-based row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indexed<T> {
    /// 0-based row index.
    pub index: usize,
    pub value: T,
}

impl<T> FromStr for Indexed<T>
where
    T: FromStr<Err = String>,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, rest) = s
            .split_once('=')
            .ok_or_else(|| format!("expected \"N=...\", got \"{}\"", s))?;
        let index = parse_row_number(number)?;
        Ok(Self {
            index,
            value: rest.parse()?,
        })
    }
}

/// 1-based row number as typed, to a 0-based index.
pub fn parse_row_number(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("row numbers start at 1, got \"{}\"", s)),
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ScalarArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub servings: Option<String>,
    /// Prep time in minutes
    #[arg(long)]
    pub prep: Option<String>,
    /// Cook time in minutes
    #[arg(long)]
    pub cook: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct NewArgs {
    #[command(flatten)]
    pub scalars: ScalarArgs,
    /// Ingredient as "qty|unit|name" (repeatable)
    #[arg(long = "ingredient", value_name = "SPEC")]
    pub ingredients: Vec<IngredientSpec>,
    /// Step as "instruction" or "instruction@position" (repeatable)
    #[arg(long = "step", value_name = "SPEC")]
    pub steps: Vec<StepSpec>,
    /// Tag id to attach (repeatable)
    #[arg(long = "tag-id", value_name = "ID")]
    pub tag_ids: Vec<TagId>,
}

/// Edits are applied in order: scalar fields, row replacements, row
/// removals, appended rows, then tag toggles.
#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub scalars: ScalarArgs,
    /// Replace ingredient row N: "N=qty|unit|name"
    #[arg(long = "set-ingredient", value_name = "N=SPEC")]
    pub set_ingredients: Vec<Indexed<IngredientSpec>>,
    /// Replace step row N: "N=instruction[@position]"
    #[arg(long = "set-step", value_name = "N=SPEC")]
    pub set_steps: Vec<Indexed<StepSpec>>,
    /// Remove ingredient row N (1-based)
    #[arg(long = "remove-ingredient", value_name = "N", value_parser = parse_row_number)]
    pub remove_ingredients: Vec<usize>,
    /// Remove step row N (1-based)
    #[arg(long = "remove-step", value_name = "N", value_parser = parse_row_number)]
    pub remove_steps: Vec<usize>,
    /// Append an ingredient row
    #[arg(long = "add-ingredient", value_name = "SPEC")]
    pub add_ingredients: Vec<IngredientSpec>,
    /// Append a step row
    #[arg(long = "add-step", value_name = "SPEC")]
    pub add_steps: Vec<StepSpec>,
    /// Select or deselect a tag id
    #[arg(long = "toggle-tag", value_name = "ID")]
    pub toggle_tags: Vec<TagId>,
}

impl ScalarArgs {
    pub fn apply(&self, form: &mut RecipeForm) {
        if let Some(title) = &self.title {
            form.set_title(title.as_str());
        }
        if let Some(description) = &self.description {
            form.set_description(description.as_str());
        }
        if let Some(servings) = &self.servings {
            form.set_servings(servings.as_str());
        }
        if let Some(prep) = &self.prep {
            form.set_prep_time(prep.as_str());
        }
        if let Some(cook) = &self.cook {
            form.set_cook_time(cook.as_str());
        }
    }
}

impl NewArgs {
    pub fn apply(&self, form: &mut RecipeForm) {
        self.scalars.apply(form);
        for spec in &self.ingredients {
            let index = next_ingredient_row(form);
            set_ingredient(form, index, spec);
        }
        for spec in &self.steps {
            let index = next_step_row(form);
            set_step(form, index, spec);
        }
        for id in &self.tag_ids {
            if !form.is_tag_selected(*id) {
                form.toggle_tag(*id);
            }
        }
    }
}

impl EditArgs {
    pub fn apply(&self, form: &mut RecipeForm) -> Result<(), String> {
        self.scalars.apply(form);

        for set in &self.set_ingredients {
            check_row(set.index, form.ingredients().len(), "ingredient")?;
            set_ingredient(form, set.index, &set.value);
        }
        for set in &self.set_steps {
            check_row(set.index, form.steps().len(), "step")?;
            set_step(form, set.index, &set.value);
        }

        // Highest first so earlier removals don't shift later ones.
        let mut removals = self.remove_ingredients.clone();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        removals.dedup();
        for index in removals {
            check_row(index, form.ingredients().len(), "ingredient")?;
            form.remove_ingredient(index);
        }
        let mut removals = self.remove_steps.clone();
        removals.sort_unstable_by(|a, b| b.cmp(a));
        removals.dedup();
        for index in removals {
            check_row(index, form.steps().len(), "step")?;
            form.remove_step(index);
        }

        for spec in &self.add_ingredients {
            form.add_ingredient();
            let index = form.ingredients().len() - 1;
            set_ingredient(form, index, spec);
        }
        for spec in &self.add_steps {
            form.add_step();
            let index = form.steps().len() - 1;
            set_step(form, index, spec);
        }

        for id in &self.toggle_tags {
            form.toggle_tag(*id);
        }
        Ok(())
    }
}

fn check_row(index: usize, len: usize, what: &str) -> Result<(), String> {
    if index < len {
        Ok(())
    } else {
        Err(format!(
            "there is no {} row {} (the form has {})",
            what,
            index + 1,
            len
        ))
    }
}

/// Fill the trailing blank row if there is one, otherwise append a row.
fn next_ingredient_row(form: &mut RecipeForm) -> usize {
    let reuse = matches!(form.ingredients().last(), Some(row) if *row == Row::blank());
    if !reuse {
        form.add_ingredient();
    }
    form.ingredients().len() - 1
}

fn next_step_row(form: &mut RecipeForm) -> usize {
    let reuse = matches!(form.steps().last(), Some(row) if *row == Row::blank());
    if !reuse {
        form.add_step();
    }
    form.steps().len() - 1
}

fn set_ingredient(form: &mut RecipeForm, index: usize, spec: &IngredientSpec) {
    form.update_ingredient(index, IngredientField::Quantity, spec.quantity.as_str());
    form.update_ingredient(index, IngredientField::Unit, spec.unit.as_str());
    form.update_ingredient(index, IngredientField::Name, spec.name.as_str());
}

fn set_step(form: &mut RecipeForm, index: usize, spec: &StepSpec) {
    form.update_step(index, StepField::Instruction, spec.instruction.as_str());
    form.update_step(index, StepField::Position, spec.position.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_box_core::{FormMode, Ingredient, Recipe, Step};

    #[test]
    fn test_ingredient_spec() {
        let spec: IngredientSpec = "2 | cups|flour".parse().unwrap();
        assert_eq!(spec.quantity, "2");
        assert_eq!(spec.unit, "cups");
        assert_eq!(spec.name, "flour");

        let spec: IngredientSpec = "salt".parse().unwrap();
        assert_eq!(spec.quantity, "");
        assert_eq!(spec.name, "salt");

        assert!("2|flour".parse::<IngredientSpec>().is_err());
    }

    #[test]
    fn test_step_spec() {
        let spec: StepSpec = "Bake@3".parse().unwrap();
        assert_eq!(spec.instruction, "Bake");
        assert_eq!(spec.position, "3");

        let spec: StepSpec = "Email chef@example.com".parse().unwrap();
        assert_eq!(spec.instruction, "Email chef@example.com");
        assert_eq!(spec.position, "");
    }

    #[test]
    fn test_indexed_spec() {
        let set: Indexed<IngredientSpec> = "2=1|tsp|salt".parse().unwrap();
        assert_eq!(set.index, 1);
        assert_eq!(set.value.unit, "tsp");

        assert!("0=salt".parse::<Indexed<IngredientSpec>>().is_err());
        assert!("salt".parse::<Indexed<IngredientSpec>>().is_err());
    }

    #[test]
    fn test_new_args_fill_seeded_rows_first() {
        let args = NewArgs {
            scalars: ScalarArgs {
                title: Some("Soup".to_string()),
                ..ScalarArgs::default()
            },
            ingredients: vec!["Salt".parse().unwrap(), "1|l|Water".parse().unwrap()],
            steps: vec!["Boil water".parse().unwrap()],
            tag_ids: vec![4, 4],
        };
        let mut form = RecipeForm::new(FormMode::New);
        args.apply(&mut form);

        assert_eq!(form.ingredients().len(), 2);
        assert_eq!(form.steps().len(), 1);
        assert_eq!(form.selected_tag_ids(), &[4]);

        let payload = form.build_payload().unwrap();
        assert_eq!(payload.title, "Soup");
        assert_eq!(payload.ingredients_attributes[1].unit.as_deref(), Some("l"));
        assert_eq!(payload.steps_attributes[0].position, 1);
    }

    #[test]
    fn test_edit_args_apply_in_order() {
        let mut form = RecipeForm::new(FormMode::Edit(1));
        form.populate(&Recipe {
            id: 1,
            title: "Stew".to_string(),
            description: None,
            servings: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            ingredients: vec![
                Ingredient {
                    id: 10,
                    name: "Beef".to_string(),
                    quantity: None,
                    unit: None,
                },
                Ingredient {
                    id: 11,
                    name: "Onion".to_string(),
                    quantity: None,
                    unit: None,
                },
            ],
            steps: vec![Step {
                id: 20,
                instruction: "Simmer".to_string(),
                position: Some(1),
            }],
            tags: vec![],
        });

        let args = EditArgs {
            set_ingredients: vec!["2=2||Shallots".parse().unwrap()],
            remove_ingredients: vec![0],
            add_steps: vec!["Serve".parse().unwrap()],
            toggle_tags: vec![9],
            ..EditArgs::default()
        };
        args.apply(&mut form).unwrap();

        assert_eq!(form.ingredients().len(), 1);
        assert_eq!(form.ingredients()[0].id(), Some(11));
        assert_eq!(form.ingredients()[0].fields().name, "Shallots");
        assert_eq!(form.steps().len(), 2);
        assert_eq!(form.selected_tag_ids(), &[9]);
    }

    #[test]
    fn test_edit_args_reject_missing_rows() {
        let mut form = RecipeForm::new(FormMode::New);
        let args = EditArgs {
            remove_steps: vec![4],
            ..EditArgs::default()
        };
        assert_eq!(
            args.apply(&mut form).unwrap_err(),
            "there is no step row 5 (the form has 1)"
        );
    }
}
