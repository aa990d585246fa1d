//! Recipe records and required-field validation.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::clock::timestamp_format;

/// Store-assigned recipe identifier.
pub type RecipeId = i64;

/// Keys every create and update body must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "making_time", "serves", "ingredients", "cost"];

/// A stored recipe, timestamps included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
    #[serde(serialize_with = "timestamp_format::serialize")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "timestamp_format::serialize")]
    pub updated_at: NaiveDateTime,
}

impl Recipe {
    /// Public projection without timestamps.
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id,
            title: self.title.clone(),
            making_time: self.making_time.clone(),
            serves: self.serves.clone(),
            ingredients: self.ingredients.clone(),
            cost: self.cost.clone(),
        }
    }
}

/// The public projection returned by list, get and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
}

/// The five mutable fields, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
}

/// Why a create or update body was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error("missing or empty fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("field '{0}' must be a string or a number")]
    UnsupportedType(&'static str),
}

impl RecipeFields {
    /// Validates a decoded request body.
    ///
    /// `None` stands for an absent body. Every required key must map to a
    /// truthy string or number; anything else rejects the whole body.
    pub fn from_json(body: Option<&Value>) -> Result<Self, ValidationError> {
        let object = body
            .and_then(Value::as_object)
            .ok_or(ValidationError::NotAnObject)?;

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !object.get(*key).is_some_and(is_truthy))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let text = |key: &'static str| -> Result<String, ValidationError> {
            match &object[key] {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(ValidationError::UnsupportedType(key)),
            }
        };

        Ok(Self {
            title: text("title")?,
            making_time: text("making_time")?,
            serves: text("serves")?,
            ingredients: text("ingredients")?,
            cost: text("cost")?,
        })
    }
}

/// Presence test for a required field: not null, not an empty string,
/// not zero, not `false`, not an empty array or object.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tea() -> Value {
        json!({
            "title": "Tea",
            "making_time": "5 min",
            "serves": "1",
            "ingredients": "tea leaves, water",
            "cost": "3"
        })
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(" ")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!(true)));
    }

    #[test]
    fn accepts_complete_body() {
        let fields = RecipeFields::from_json(Some(&tea())).unwrap();
        assert_eq!(fields.title, "Tea");
        assert_eq!(fields.ingredients, "tea leaves, water");
        assert_eq!(fields.cost, "3");
    }

    #[test]
    fn numeric_cost_is_stored_as_text() {
        let mut body = tea();
        body["cost"] = json!(1000);
        let fields = RecipeFields::from_json(Some(&body)).unwrap();
        assert_eq!(fields.cost, "1000");
    }

    #[test]
    fn absent_or_non_object_body_is_rejected() {
        assert_eq!(RecipeFields::from_json(None), Err(ValidationError::NotAnObject));
        assert_eq!(
            RecipeFields::from_json(Some(&json!(null))),
            Err(ValidationError::NotAnObject)
        );
        assert_eq!(
            RecipeFields::from_json(Some(&json!([tea()]))),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn each_missing_or_empty_field_is_reported() {
        for key in REQUIRED_FIELDS {
            let mut removed = tea();
            removed.as_object_mut().unwrap().remove(key);
            assert_eq!(
                RecipeFields::from_json(Some(&removed)),
                Err(ValidationError::MissingFields(vec![key]))
            );

            let mut emptied = tea();
            emptied[key] = json!("");
            assert_eq!(
                RecipeFields::from_json(Some(&emptied)),
                Err(ValidationError::MissingFields(vec![key]))
            );
        }
    }

    #[test]
    fn zero_cost_is_missing() {
        let mut body = tea();
        body["cost"] = json!(0);
        assert_eq!(
            RecipeFields::from_json(Some(&body)),
            Err(ValidationError::MissingFields(vec!["cost"]))
        );
    }

    #[test]
    fn truthy_values_of_other_types_are_rejected() {
        let mut body = tea();
        body["serves"] = json!(true);
        assert_eq!(
            RecipeFields::from_json(Some(&body)),
            Err(ValidationError::UnsupportedType("serves"))
        );
    }

    #[test]
    fn summary_drops_timestamps() {
        let ts = crate::clock::parse_timestamp("2024-01-01 10:00:00").unwrap();
        let recipe = Recipe {
            id: 7,
            title: "Tea".into(),
            making_time: "5 min".into(),
            serves: "1".into(),
            ingredients: "tea leaves, water".into(),
            cost: "3".into(),
            created_at: ts,
            updated_at: ts,
        };
        let summary = serde_json::to_value(recipe.summary()).unwrap();
        assert_eq!(summary["id"], 7);
        assert!(summary.get("created_at").is_none());

        let full = serde_json::to_value(&recipe).unwrap();
        assert_eq!(full["created_at"], "2024-01-01 10:00:00");
    }
}
