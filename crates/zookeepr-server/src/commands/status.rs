//! Status command - show store status and statistics.

use crate::app::App;
use std::collections::BTreeMap;
use zookeepr_core::Config;

/// Run the status command.
pub fn run(config: Config) -> anyhow::Result<()> {
    let app = App::new(config)?;

    println!("Zookeepr Store Status");
    println!("=====================");
    println!();
    println!("Data file: {}", app.store.storage_description());
    println!();

    if app.store.is_empty() {
        println!("Store is empty.");
        return Ok(());
    }

    let animals = app.store.all();
    let mut by_species: BTreeMap<&str, usize> = BTreeMap::new();
    let mut by_diet: BTreeMap<&str, usize> = BTreeMap::new();
    for animal in &animals {
        *by_species.entry(animal.species.as_str()).or_default() += 1;
        *by_diet.entry(animal.diet.as_str()).or_default() += 1;
    }
    let without_traits = animals
        .iter()
        .filter(|a| a.traits().is_none())
        .count();

    println!("Summary:");
    println!("  Total animals: {}", animals.len());
    println!("  Species:       {}", by_species.len());
    if without_traits > 0 {
        println!("  ⚠ {} record(s) without a usable traits list", without_traits);
    }

    println!();
    println!("By species:");
    for (species, count) in &by_species {
        println!("  {:<16} {}", species, count);
    }

    println!();
    println!("By diet:");
    for (diet, count) in &by_diet {
        println!("  {:<16} {}", diet, count);
    }

    Ok(())
}
