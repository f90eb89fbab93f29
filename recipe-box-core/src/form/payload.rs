//! Form rows to the nested-attributes payload.

use super::row::{IngredientFields, Row, StepFields};
use crate::error::FormError;
use crate::types::{IngredientAttributes, StepAttributes};

/// Blank means `None`; anything else must parse as a whole number.
pub(crate) fn parse_number(value: &str, field: &'static str) -> Result<Option<i64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FormError::NotANumber { field })
}

/// Like [`parse_number`], with a lower bound on the parsed value.
pub(crate) fn parse_at_least(
    value: &str,
    field: &'static str,
    min: i64,
) -> Result<Option<i64>, FormError> {
    match parse_number(value, field)? {
        Some(n) if n < min => Err(FormError::TooSmall { field, min }),
        parsed => Ok(parsed),
    }
}

/// Empty text means `None`. Whitespace is kept as typed.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn ingredient_attributes(rows: &[Row<IngredientFields>]) -> Vec<IngredientAttributes> {
    rows.iter()
        .filter(|row| !row.fields().name.trim().is_empty())
        .map(|row| {
            let fields = row.fields();
            IngredientAttributes {
                id: row.id(),
                name: fields.name.clone(),
                quantity: non_empty(&fields.quantity),
                unit: non_empty(&fields.unit),
            }
        })
        .collect()
}

/// Blank positions default to the 1-based index among the rows that survive filtering.
pub(crate) fn step_attributes(rows: &[Row<StepFields>]) -> Result<Vec<StepAttributes>, FormError> {
    rows.iter()
        .filter(|row| !row.fields().instruction.trim().is_empty())
        .enumerate()
        .map(|(idx, row)| {
            let fields = row.fields();
            let position = parse_number(&fields.position, "Step position")?
                .unwrap_or(idx as i64 + 1);
            Ok(StepAttributes {
                id: row.id(),
                instruction: fields.instruction.clone(),
                position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(instruction: &str, position: &str) -> Row<StepFields> {
        Row::New {
            fields: StepFields {
                instruction: instruction.to_string(),
                position: position.to_string(),
            },
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("", "Servings"), Ok(None));
        assert_eq!(parse_number("   ", "Servings"), Ok(None));
        assert_eq!(parse_number(" 4 ", "Servings"), Ok(Some(4)));
        assert_eq!(parse_number("0", "Servings"), Ok(Some(0)));
        assert_eq!(
            parse_number("four", "Servings"),
            Err(FormError::NotANumber { field: "Servings" })
        );
    }

    #[test]
    fn test_parse_at_least() {
        assert_eq!(parse_at_least("", "Servings", 1), Ok(None));
        assert_eq!(parse_at_least("1", "Servings", 1), Ok(Some(1)));
        assert_eq!(
            parse_at_least("0", "Servings", 1),
            Err(FormError::TooSmall {
                field: "Servings",
                min: 1
            })
        );
        assert_eq!(parse_at_least("0", "Prep time", 0), Ok(Some(0)));
        assert_eq!(
            parse_at_least("-5", "Prep time", 0),
            Err(FormError::TooSmall {
                field: "Prep time",
                min: 0
            })
        );
        assert_eq!(
            parse_at_least("x", "Cook time", 0),
            Err(FormError::NotANumber { field: "Cook time" })
        );
    }

    #[test]
    fn test_blank_position_counts_only_surviving_steps() {
        let rows = vec![
            step("Chop", ""),
            step("   ", ""),
            step("Fry", ""),
            step("Plate", "10"),
            step("Serve", ""),
        ];
        let attrs = step_attributes(&rows).unwrap();
        let positions: Vec<(&str, i64)> = attrs
            .iter()
            .map(|a| (a.instruction.as_str(), a.position))
            .collect();
        assert_eq!(
            positions,
            vec![("Chop", 1), ("Fry", 2), ("Plate", 10), ("Serve", 4)]
        );
    }

    #[test]
    fn test_bad_position_is_a_form_error() {
        let rows = vec![step("Chop", "first")];
        assert_eq!(
            step_attributes(&rows),
            Err(FormError::NotANumber {
                field: "Step position"
            })
        );
    }

    #[test]
    fn test_blank_step_with_bad_position_is_ignored() {
        let rows = vec![step("", "oops"), step("Chop", "")];
        assert_eq!(step_attributes(&rows).unwrap()[0].position, 1);
    }
}
