use tracing::info;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

/// Updates only the fields that were given; everything else keeps its
/// current (or default) value.
pub fn run(
    dataset_path: Option<String>,
    company: Option<String>,
    currency: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(path) = dataset_path {
        settings.dataset_path = shellexpand_path(&path);
    }
    if let Some(name) = company {
        settings.company_name = name;
    }
    if let Some(symbol) = currency {
        settings.currency_symbol = symbol;
    }
    save_settings(&settings)?;
    info!(dataset = %settings.dataset_path, "settings initialized");

    println!("Settings saved to {}", settings_path().display());
    println!("  Dataset:  {}", settings.dataset_path);
    if !settings.company_name.is_empty() {
        println!("  Company:  {}", settings.company_name);
    }
    println!("  Currency: {}", settings.currency_symbol);
    Ok(())
}
