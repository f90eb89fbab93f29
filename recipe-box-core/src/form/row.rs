use crate::types::{Ingredient, Step};

/// One editable child row: either already persisted or new in this form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<F> {
    Existing { id: i64, fields: F },
    New { fields: F },
}

impl<F: Default> Row<F> {
    pub fn blank() -> Self {
        Row::New {
            fields: F::default(),
        }
    }
}

impl<F> Row<F> {
    pub fn id(&self) -> Option<i64> {
        match self {
            Row::Existing { id, .. } => Some(*id),
            Row::New { .. } => None,
        }
    }

    pub fn fields(&self) -> &F {
        match self {
            Row::Existing { fields, .. } | Row::New { fields } => fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut F {
        match self {
            Row::Existing { fields, .. } | Row::New { fields } => fields,
        }
    }
}

/// Raw text of an ingredient row, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientFields {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Name,
    Quantity,
    Unit,
}

impl IngredientFields {
    pub fn set(&mut self, field: IngredientField, value: String) {
        match field {
            IngredientField::Name => self.name = value,
            IngredientField::Quantity => self.quantity = value,
            IngredientField::Unit => self.unit = value,
        }
    }
}

impl From<&Ingredient> for Row<IngredientFields> {
    fn from(ingredient: &Ingredient) -> Self {
        Row::Existing {
            id: ingredient.id,
            fields: IngredientFields {
                name: ingredient.name.clone(),
                quantity: ingredient.quantity.clone().unwrap_or_default(),
                unit: ingredient.unit.clone().unwrap_or_default(),
            },
        }
    }
}

/// Raw text of a step row. `position` stays a string until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepFields {
    pub instruction: String,
    pub position: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepField {
    Instruction,
    Position,
}

impl StepFields {
    pub fn set(&mut self, field: StepField, value: String) {
        match field {
            StepField::Instruction => self.instruction = value,
            StepField::Position => self.position = value,
        }
    }
}

impl From<&Step> for Row<StepFields> {
    fn from(step: &Step) -> Self {
        Row::Existing {
            id: step.id,
            fields: StepFields {
                instruction: step.instruction.clone(),
                position: step.position.map(|p| p.to_string()).unwrap_or_default(),
            },
        }
    }
}
