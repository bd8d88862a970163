use anyhow::Result;

use swipedeck_core::AppConfig;

/// Print the effective configuration, or write the default config file
pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if write {
        let path = AppConfig::config_path();
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            config.save()?;
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
