use anyhow::Context;
use chiptune_assets::generate_all;
use chiptune_assets::manifest::OUTPUT_DIR;
use console::style;
use env_logger::{Builder, Env};

fn main() -> Result<(), anyhow::Error> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let generated = generate_all(OUTPUT_DIR)
        .with_context(|| format!("generating audio assets in {OUTPUT_DIR}"))?;

    for asset in &generated {
        log::debug!("{} -> {}", asset.file_name, asset.path.display());
    }

    println!(
        "{} {} audio assets in {}",
        style("Generated").green().bold(),
        generated.len(),
        OUTPUT_DIR
    );
    Ok(())
}
