//! Query filtering for the animal store.
//!
//! A query is a conjunction of filters. Each recognized criterion narrows the
//! result further:
//! - `personalityTraits` - the animal must have every listed trait
//! - `diet` - exact, case-sensitive match
//! - `species` - exact, case-sensitive match
//! - `name` - exact, case-sensitive match
//!
//! Filtering never mutates its input and keeps the relative order of the
//! animals that match.

use crate::types::Animal;
use rayon::prelude::*;
use tracing::debug;

/// Query-string key for the traits criterion
pub const TRAITS_KEY: &str = "personalityTraits";
/// Query-string key for the diet criterion
pub const DIET_KEY: &str = "diet";
/// Query-string key for the species criterion
pub const SPECIES_KEY: &str = "species";
/// Query-string key for the name criterion
pub const NAME_KEY: &str = "name";

/// A set of criteria ready for matching.
///
/// Queries are cheap to build and can be reused across searches. An empty
/// query matches every animal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalQuery {
    filters: Vec<AnimalFilter>,
}

impl AnimalQuery {
    /// Create a query with no criteria.
    pub fn new() -> Self {
        AnimalQuery::default()
    }

    /// Add a filter to the query.
    pub fn with_filter(mut self, filter: AnimalFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Require every one of the given traits.
    ///
    /// An empty list adds no constraint.
    pub fn with_traits<I, S>(self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let traits: Vec<String> = traits.into_iter().map(Into::into).collect();
        if traits.is_empty() {
            self
        } else {
            self.with_filter(AnimalFilter::PersonalityTraits(traits))
        }
    }

    /// Require an exact diet.
    pub fn with_diet(self, diet: impl Into<String>) -> Self {
        self.with_filter(AnimalFilter::Diet(diet.into()))
    }

    /// Require an exact species.
    pub fn with_species(self, species: impl Into<String>) -> Self {
        self.with_filter(AnimalFilter::Species(species.into()))
    }

    /// Require an exact name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_filter(AnimalFilter::Name(name.into()))
    }

    /// The filters in application order.
    pub fn filters(&self) -> &[AnimalFilter] {
        &self.filters
    }

    /// Check if an animal satisfies every filter.
    pub fn matches(&self, animal: &Animal) -> bool {
        self.filters.iter().all(|f| f.matches(animal))
    }

    /// Check if this query would match everything (no criteria)
    pub fn matches_all(&self) -> bool {
        self.filters.is_empty()
    }

    /// Build a query from raw query-string pairs.
    ///
    /// Criteria are collected in a fixed order: traits, diet, species, name.
    /// `personalityTraits` may repeat (or use the `personalityTraits[]` form)
    /// to require several traits. Empty values and unknown keys are ignored.
    /// A repeated scalar key requires the field to equal each value.
    pub fn from_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values_for = |key: &str| -> Vec<String> {
            pairs
                .iter()
                .filter(|(k, _)| {
                    let k = k.as_ref();
                    k == key || k.strip_suffix("[]") == Some(key)
                })
                .map(|(_, v)| v.as_ref())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut query = AnimalQuery::new().with_traits(values_for(TRAITS_KEY));
        for diet in values_for(DIET_KEY) {
            query = query.with_diet(diet);
        }
        for species in values_for(SPECIES_KEY) {
            query = query.with_species(species);
        }
        for name in values_for(NAME_KEY) {
            query = query.with_name(name);
        }
        query
    }
}

/// A single criterion over an animal.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimalFilter {
    /// The animal must list every one of these traits
    PersonalityTraits(Vec<String>),

    /// Exact diet
    Diet(String),

    /// Exact species
    Species(String),

    /// Exact name
    Name(String),
}

impl AnimalFilter {
    /// Check if an animal matches this filter.
    pub fn matches(&self, animal: &Animal) -> bool {
        match self {
            AnimalFilter::PersonalityTraits(traits) => animal.has_all_traits(traits),
            AnimalFilter::Diet(diet) => animal.diet == *diet,
            AnimalFilter::Species(species) => animal.species == *species,
            AnimalFilter::Name(name) => animal.name == *name,
        }
    }
}

/// Filter a slice of animals, preserving order.
pub fn filter_animals(query: &AnimalQuery, animals: &[Animal]) -> Vec<Animal> {
    if query.matches_all() {
        return animals.to_vec();
    }

    let results: Vec<Animal> = animals
        .iter()
        .filter(|a| query.matches(a))
        .cloned()
        .collect();

    debug!(
        candidates = animals.len(),
        matched = results.len(),
        filters = query.filters().len(),
        "Filtered animals"
    );
    results
}

/// Parallel variant of [`filter_animals`] for large stores.
///
/// Rayon's indexed collect keeps the input order.
pub fn filter_animals_parallel(query: &AnimalQuery, animals: &[Animal]) -> Vec<Animal> {
    if query.matches_all() {
        return animals.to_vec();
    }

    let results: Vec<Animal> = animals
        .par_iter()
        .filter(|a| query.matches(a))
        .cloned()
        .collect();

    debug!(
        candidates = animals.len(),
        matched = results.len(),
        filters = query.filters().len(),
        "Filtered animals (parallel)"
    );
    results
}

/// Find the first animal with the given id.
pub fn find_by_id<'a>(id: &str, animals: &'a [Animal]) -> Option<&'a Animal> {
    animals.iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_animal(id: &str, name: &str, species: &str, diet: &str, traits: &[&str]) -> Animal {
        Animal::new(
            id,
            name,
            species,
            diet,
            traits.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn zoo() -> Vec<Animal> {
        vec![
            make_animal("0", "Tiger", "feline", "carnivore", &["fierce", "cute"]),
            make_animal("1", "Erica", "gorilla", "omnivore", &["quirky", "rash"]),
            make_animal("2", "Noel", "bear", "carnivore", &["impish", "sassy", "brave"]),
            make_animal("3", "Jacques", "bear", "omnivore", &["sassy", "brave"]),
            make_animal("4", "Mittens", "feline", "carnivore", &["cute"]),
        ]
    }

    fn ids(animals: &[Animal]) -> Vec<&str> {
        animals.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let animals = zoo();
        let results = filter_animals(&AnimalQuery::new(), &animals);
        assert_eq!(results, animals);
    }

    #[test]
    fn test_species_only() {
        let animals = zoo();
        let query = AnimalQuery::new().with_species("bear");

        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["2", "3"]);
    }

    #[test]
    fn test_diet_and_species_compose() {
        let animals = zoo();
        let both = AnimalQuery::new().with_diet("carnivore").with_species("feline");

        let by_diet = filter_animals(&AnimalQuery::new().with_diet("carnivore"), &animals);
        let then_species = filter_animals(&AnimalQuery::new().with_species("feline"), &by_diet);

        assert_eq!(filter_animals(&both, &animals), then_species);
        assert_eq!(ids(&then_species), vec!["0", "4"]);
    }

    #[test]
    fn test_traits_are_conjunctive() {
        let animals = zoo();
        let query = AnimalQuery::new().with_traits(["sassy", "brave"]);
        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["2", "3"]);

        let query = AnimalQuery::new().with_traits(["sassy", "impish"]);
        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["2"]);

        let query = AnimalQuery::new().with_traits(["cute", "rash"]);
        assert!(filter_animals(&query, &animals).is_empty());
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let animals = zoo();
        let query = AnimalQuery::new().with_name("tiger");
        assert!(filter_animals(&query, &animals).is_empty());

        let query = AnimalQuery::new().with_name("Tiger");
        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["0"]);
    }

    #[test]
    fn test_record_without_traits_never_matches_traits() {
        let mut animals = zoo();
        animals[0].personality_traits = None;

        let query = AnimalQuery::new().with_traits(["cute"]);
        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["4"]);

        // Other criteria still see it
        let query = AnimalQuery::new().with_name("Tiger");
        assert_eq!(ids(&filter_animals(&query, &animals)), vec!["0"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let animals: Vec<Animal> = (0..500)
            .map(|i| {
                let diet = if i % 3 == 0 { "herbivore" } else { "carnivore" };
                make_animal(&i.to_string(), "Zed", "zebra", diet, &["calm"])
            })
            .collect();
        let query = AnimalQuery::new().with_diet("herbivore").with_traits(["calm"]);

        assert_eq!(
            filter_animals_parallel(&query, &animals),
            filter_animals(&query, &animals)
        );
    }

    #[test]
    fn test_from_pairs_single_trait() {
        let query = AnimalQuery::from_pairs(&[("personalityTraits", "cute")]);
        assert_eq!(
            query.filters(),
            &[AnimalFilter::PersonalityTraits(vec!["cute".to_string()])]
        );
    }

    #[test]
    fn test_from_pairs_fixed_order() {
        let query = AnimalQuery::from_pairs(&[
            ("name", "Noel"),
            ("species", "bear"),
            ("personalityTraits", "sassy"),
            ("diet", "carnivore"),
            ("personalityTraits[]", "brave"),
        ]);

        assert_eq!(
            query.filters(),
            &[
                AnimalFilter::PersonalityTraits(vec!["sassy".to_string(), "brave".to_string()]),
                AnimalFilter::Diet("carnivore".to_string()),
                AnimalFilter::Species("bear".to_string()),
                AnimalFilter::Name("Noel".to_string()),
            ]
        );
        assert_eq!(ids(&filter_animals(&query, &zoo())), vec!["2"]);
    }

    #[test]
    fn test_from_pairs_ignores_empty_and_unknown() {
        let query = AnimalQuery::from_pairs(&[("diet", ""), ("color", "orange")]);
        assert!(query.matches_all());
    }

    #[test]
    fn test_from_pairs_repeated_scalar() {
        let query = AnimalQuery::from_pairs(&[("species", "bear"), ("species", "feline")]);
        assert!(filter_animals(&query, &zoo()).is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let animals = zoo();
        assert_eq!(find_by_id("3", &animals).map(|a| a.name.as_str()), Some("Jacques"));
        assert!(find_by_id("99", &animals).is_none());
        assert!(find_by_id("", &animals).is_none());
    }

    #[test]
    fn test_find_by_id_first_match_wins() {
        let mut animals = zoo();
        animals.push(make_animal("1", "Impostor", "gorilla", "omnivore", &[]));

        assert_eq!(find_by_id("1", &animals).map(|a| a.name.as_str()), Some("Erica"));
    }
}
