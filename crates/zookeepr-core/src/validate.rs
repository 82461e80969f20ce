//! Shape validation for incoming animals.
//!
//! A candidate is accepted only when `name`, `species` and `diet` are
//! non-empty strings and `personalityTraits` is a list of strings (an empty
//! list is fine). Malformed input never errors here; it just fails the check.

use crate::error::{Result, ZookeeprError};
use crate::types::{Animal, AnimalCandidate};
use serde_json::Value;

/// Check whether a candidate has the shape of an animal.
pub fn validate_animal(candidate: &AnimalCandidate) -> bool {
    required_text(&candidate.name).is_some()
        && required_text(&candidate.species).is_some()
        && required_text(&candidate.diet).is_some()
        && trait_list(&candidate.personality_traits).is_some()
}

impl AnimalCandidate {
    /// Shorthand for [`validate_animal`].
    pub fn is_valid(&self) -> bool {
        validate_animal(self)
    }

    /// Turn a validated candidate into a stored record with the given id.
    ///
    /// Fails with [`ZookeeprError::InvalidAnimal`] if the shape check fails.
    pub fn into_animal(self, id: impl Into<String>) -> Result<Animal> {
        let name = required_text(&self.name).ok_or(ZookeeprError::InvalidAnimal)?;
        let species = required_text(&self.species).ok_or(ZookeeprError::InvalidAnimal)?;
        let diet = required_text(&self.diet).ok_or(ZookeeprError::InvalidAnimal)?;
        let traits = trait_list(&self.personality_traits).ok_or(ZookeeprError::InvalidAnimal)?;

        Ok(Animal {
            id: id.into(),
            name: name.to_string(),
            species: species.to_string(),
            diet: diet.to_string(),
            personality_traits: Some(Value::from(traits)),
            extra: self.extra,
        })
    }
}

/// A present, non-empty string
fn required_text(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// A present list whose every element is a string
fn trait_list(value: &Option<Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}
