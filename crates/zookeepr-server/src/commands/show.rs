//! Show command - print a single animal.

use crate::app::App;
use crate::OutputFormat;
use zookeepr_core::Config;

/// Run the show command.
pub fn run(config: Config, id: &str, output: OutputFormat) -> anyhow::Result<()> {
    let app = App::new(config)?;
    let animal = app.store.find_by_id(id)?;

    match output {
        OutputFormat::Text => {
            println!("{}", animal);
            match (animal.traits(), &animal.personality_traits) {
                (Some(traits), _) => println!("  Traits: {}", traits.join(", ")),
                (None, Some(raw)) => println!("  Traits (unreadable): {}", raw),
                (None, None) => {}
            }
            for (key, value) in &animal.extra {
                println!("  {}: {}", key, value);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&animal)?);
        }
    }

    Ok(())
}
