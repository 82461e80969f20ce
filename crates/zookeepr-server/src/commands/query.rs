//! Query command - filter stored animals.

use crate::app::App;
use crate::OutputFormat;
use std::time::Instant;
use zookeepr_core::filter::{DIET_KEY, NAME_KEY, SPECIES_KEY, TRAITS_KEY};
use zookeepr_core::{AnimalQuery, Config};

/// Run the query command.
///
/// Criteria go through the same parsing as the HTTP query string, so empty
/// values are ignored here too.
pub fn run(
    config: Config,
    traits: Vec<String>,
    diet: Option<String>,
    species: Option<String>,
    name: Option<String>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let app = App::new(config)?;

    if app.store.is_empty() {
        eprintln!("Store is empty. POST animals to /api/animals to add some.");
        return Ok(());
    }

    let mut pairs: Vec<(&str, String)> = traits.into_iter().map(|t| (TRAITS_KEY, t)).collect();
    pairs.extend(diet.map(|d| (DIET_KEY, d)));
    pairs.extend(species.map(|s| (SPECIES_KEY, s)));
    pairs.extend(name.map(|n| (NAME_KEY, n)));
    let query = AnimalQuery::from_pairs(&pairs);

    let start = Instant::now();
    let results = app.store.search(&query);
    let elapsed = start.elapsed();

    match output {
        OutputFormat::Text => {
            for animal in &results {
                match animal.traits() {
                    Some(traits) if !traits.is_empty() => {
                        println!("{} [{}]", animal, traits.join(", "))
                    }
                    _ => println!("{}", animal),
                }
            }

            eprintln!();
            eprintln!(
                "Found {} of {} animals in {:.3}ms",
                results.len(),
                app.store.len(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
