use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The structured observation supplied by the captioning collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMealRecord {
    /// Main dish name, e.g. "curry". This is what gets embedded.
    pub primary_label: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

impl NewMealRecord {
    pub fn new(primary_label: impl Into<String>) -> Self {
        Self {
            primary_label: primary_label.into(),
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = ingredients.iter().map(|i| i.to_string()).collect();
        self
    }
}

/// One accepted meal, immutable once created.
///
/// Belongs to exactly one epoch: the one active when it was accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: String,
    pub user_id: String,
    pub epoch_id: String,
    pub primary_label: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    /// Absent when the gateway failed at ingestion time.
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}

impl MealRecord {
    pub fn new(
        user_id: &str,
        epoch_id: &str,
        input: NewMealRecord,
        embedding: Option<Vec<f32>>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            epoch_id: epoch_id.to_string(),
            primary_label: input.primary_label,
            tags: input.tags,
            ingredients: input.ingredients,
            embedding: embedding.filter(|e| !e.is_empty()),
            created_at: Utc::now(),
        }
    }
}
