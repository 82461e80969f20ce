//! Core data types for Zookeepr.
//!
//! This module defines the record type held by the store and the loose
//! candidate shape that create requests arrive in. Field names on the wire
//! follow the persisted document (`personalityTraits` is camel-cased).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single animal record.
///
/// Fields beyond the four required ones are carried in `extra` and written
/// back at the top level of the JSON object, untouched.
///
/// ## Design Notes
///
/// - `personality_traits` holds the stored value verbatim, whatever its
///   shape, so rewriting the store never changes it. [`Animal::traits`] reads
///   it as a list of strings; a record where that fails never matches a
///   traits filter.
/// - `id` is assigned by the store and is the decimal position of the record
///   at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Store-assigned identifier
    pub id: String,

    /// Display name (e.g., "Erica")
    pub name: String,

    /// Species (e.g., "gorilla")
    pub species: String,

    /// Diet (e.g., "omnivore")
    pub diet: String,

    /// Personality traits as stored, normally a list of strings
    #[serde(
        rename = "personalityTraits",
        default,
        deserialize_with = "raw_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub personality_traits: Option<Value>,

    /// Unrecognized fields, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Animal {
    /// Create a new animal with no extra fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
        diet: impl Into<String>,
        personality_traits: Vec<String>,
    ) -> Self {
        Animal {
            id: id.into(),
            name: name.into(),
            species: species.into(),
            diet: diet.into(),
            personality_traits: Some(Value::from(personality_traits)),
            extra: Map::new(),
        }
    }

    /// Attach an extra pass-through field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The traits as a list of strings.
    ///
    /// `None` when the field is missing or is not a list made only of strings.
    pub fn traits(&self) -> Option<Vec<&str>> {
        match &self.personality_traits {
            Some(Value::Array(items)) => items.iter().map(Value::as_str).collect(),
            _ => None,
        }
    }

    /// Check whether this animal has every one of the given traits.
    ///
    /// An animal without a usable traits list has none of them.
    pub fn has_all_traits(&self, traits: &[String]) -> bool {
        match self.traits() {
            Some(own) => traits.iter().all(|t| own.contains(&t.as_str())),
            None => false,
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, {})",
            self.id, self.name, self.species, self.diet
        )
    }
}

/// Any present value, `null` included, is kept; only a missing key is `None`.
fn raw_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// An unvalidated create request.
///
/// Every required field is held as a raw JSON value so that a malformed body
/// (a numeric name, a string where a list belongs) still deserializes and is
/// then rejected by validation rather than by the parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalCandidate {
    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub species: Option<Value>,

    #[serde(default)]
    pub diet: Option<Value>,

    #[serde(rename = "personalityTraits", default)]
    pub personality_traits: Option<Value>,

    /// Client-supplied ids are discarded; the store assigns its own.
    #[serde(default, rename = "id")]
    _client_id: Option<Value>,

    /// Everything else in the request body
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnimalCandidate {
    /// Build a candidate from an arbitrary JSON value.
    ///
    /// Anything that is not a JSON object yields an empty candidate, which
    /// fails validation.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => AnimalCandidate::default(),
        }
    }

    /// Parse a candidate from a raw request body.
    ///
    /// Bodies that are not valid JSON yield an empty candidate.
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(Self::from_value)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_animal_roundtrip_keeps_extra_fields() {
        let raw = json!({
            "id": "3",
            "name": "Noodles",
            "species": "penguin",
            "diet": "carnivore",
            "personalityTraits": ["loving", "goofy"],
            "habitat": "antarctic"
        });

        let animal: Animal = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(animal.extra.get("habitat"), Some(&json!("antarctic")));
        assert_eq!(animal.traits(), Some(vec!["loving", "goofy"]));

        assert_eq!(serde_json::to_value(&animal).unwrap(), raw);
    }

    #[test]
    fn test_unusable_traits_kept_verbatim() {
        for stored in [json!("loyal"), json!(["calm", 7]), Value::Null] {
            let raw = json!({
                "id": "0",
                "name": "Rex",
                "species": "dog",
                "diet": "omnivore",
                "personalityTraits": stored
            });
            let animal: Animal = serde_json::from_value(raw.clone()).unwrap();

            assert_eq!(animal.traits(), None);
            assert!(!animal.has_all_traits(&["loyal".to_string()]));
            assert!(!animal.has_all_traits(&["calm".to_string()]));
            assert_eq!(serde_json::to_value(&animal).unwrap(), raw);
        }

        let animal: Animal = serde_json::from_value(json!({
            "id": "0",
            "name": "Rex",
            "species": "dog",
            "diet": "omnivore"
        }))
        .unwrap();
        assert_eq!(animal.personality_traits, None);
        assert!(serde_json::to_value(&animal)
            .unwrap()
            .get("personalityTraits")
            .is_none());
    }

    #[test]
    fn test_has_all_traits() {
        let animal = Animal::new(
            "0",
            "Tiger",
            "feline",
            "carnivore",
            vec!["fierce".to_string(), "cute".to_string()],
        );

        assert!(animal.has_all_traits(&[]));
        assert!(animal.has_all_traits(&["cute".to_string()]));
        assert!(animal.has_all_traits(&["cute".to_string(), "fierce".to_string()]));
        assert!(!animal.has_all_traits(&["cute".to_string(), "lazy".to_string()]));
    }

    #[test]
    fn test_candidate_discards_client_id() {
        let candidate = AnimalCandidate::from_value(json!({
            "id": "999",
            "name": "Wolf",
            "color": "grey"
        }));

        assert_eq!(candidate.name, Some(json!("Wolf")));
        assert!(!candidate.extra.contains_key("id"));
        assert_eq!(candidate.extra.get("color"), Some(&json!("grey")));
    }

    #[test]
    fn test_candidate_from_garbage() {
        let candidate = AnimalCandidate::from_slice(b"not json at all");
        assert!(candidate.name.is_none());

        let candidate = AnimalCandidate::from_value(json!(["name", "Wolf"]));
        assert!(candidate.name.is_none());
        assert!(candidate.extra.is_empty());
    }
}
