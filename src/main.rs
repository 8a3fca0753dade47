mod generate;
mod icon;
mod raster;

use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let written = generate::generate_all(Path::new(generate::OUTPUT_DIR))?;
    log::debug!("Wrote {} icons", written.len());

    println!("All icons generated successfully!");
    Ok(())
}
