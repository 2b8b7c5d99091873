//! Building, mutating and serializing a tree.
//!
//! ```bash
//! cargo run --example mutation_example
//! ```

use treeconf::{Config, ConfigError, SettingType};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== treeconf Mutation & Serialization Example ===\n");

    let mut config = Config::new();
    config.read_str(
        r#"
general
  {
  border_size = 3;
  opacity = 0.9;
  }
"#,
    )?;
    println!("📖 Initial configuration loaded\n");

    // ========== VALUE MUTATIONS ==========
    let border = config.lookup("general.border_size").ok_or("missing border_size")?;
    config.setting_mut(border).ok_or("stale handle")?.set_int(5)?;
    println!("✓ Changed border_size: 3 -> 5");

    // A setting's type is fixed once assigned
    match config.setting_mut(border).ok_or("stale handle")?.set_string("wide") {
        Err(ConfigError::TypeMismatch { expected, found }) => {
            println!("✓ Rejected string write: expected {}, found {}", expected, found)
        }
        other => println!("unexpected result: {:?}", other),
    }

    // ========== ADDING SETTINGS ==========
    let general = config.lookup("general").ok_or("missing general")?;
    let name = config.add(general, Some("name"), SettingType::String)?;
    config.setting_mut(name).ok_or("stale handle")?.set_string("main \"bar\"")?;

    let root = config.root();
    let gaps = config.add(root, Some("gaps"), SettingType::Array)?;
    for gap in [4, 8, 16] {
        config.set_int_elem(gaps, None, gap)?;
    }
    println!("✓ Added general.name and gaps = [ 4, 8, 16 ]");

    if let Err(err) = config.add(general, Some("name"), SettingType::Int) {
        println!("✓ Duplicate add refused: {}", err);
    }

    // ========== REMOVAL ==========
    config.remove(general, "opacity")?;
    println!("✓ Removed general.opacity\n");

    // ========== SERIALIZATION ==========
    let text = config.serialize();
    println!("📝 Serialized configuration:\n{}", text);

    let mut reloaded = Config::new();
    reloaded.read_str(&text)?;
    println!(
        "🔁 Reloaded: border_size = {}, name = {}",
        reloaded.lookup_int("general.border_size"),
        reloaded.lookup_string("general.name").unwrap_or_default()
    );

    Ok(())
}
