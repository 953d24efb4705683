//! Education record domain model

use super::common::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// An education entry owned by a single principal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: RecordId,
    pub user_id: String,
    pub degree: String,
    pub gpa: f64,
    pub period: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_gpa(gpa: f64) -> Result<(), ValidationError> {
    if gpa.is_finite() && gpa >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("gpa_out_of_range"))
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Input for creating or replacing an education entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EducationInput {
    #[validate(length(max = 255), custom(function = "validate_not_blank"))]
    pub degree: String,
    #[validate(custom(function = "validate_gpa"))]
    pub gpa: f64,
    #[validate(length(max = 64), custom(function = "validate_not_blank"))]
    pub period: String,
}

impl Education {
    pub fn new(user_id: &str, input: EducationInput) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new_v4(),
            user_id: user_id.to_string(),
            degree: input.degree.trim().to_string(),
            gpa: input.gpa,
            period: input.period.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, input: EducationInput) {
        self.degree = input.degree.trim().to_string();
        self.gpa = input.gpa;
        self.period = input.period.trim().to_string();
        self.updated_at = Utc::now();
    }
}
