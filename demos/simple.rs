use std::path::PathBuf;
use treeconf::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    config_path.push("demos/example.cfg");

    let mut config = Config::new();
    config.read_file(&config_path)?;
    println!("✅ Successfully parsed configuration!\n");

    println!("Title: {}", config.lookup_string("title").unwrap_or("<none>"));
    println!("Window: {}x{}", config.lookup_int("window.width"), config.lookup_int("window:height"));
    println!("Scale: {}", config.lookup_float("window/scale"));
    println!("Fullscreen?: {}", config.lookup_bool("window.fullscreen"));

    if let Some(outputs) = config.lookup("outputs") {
        for index in 0..config.length(outputs) {
            println!("Output {}: {}", index, config.get_string_elem(outputs, index).unwrap_or_default());
        }
    }

    // Missing paths read as zero values
    println!("Depth (missing): {}", config.lookup_int("window.depth"));

    Ok(())
}
