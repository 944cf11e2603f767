use std::path::PathBuf;

use crate::dataset::save_dataset;
use crate::demo::demo_dataset;
use crate::error::Result;
use crate::settings::resolve_dataset_path;

pub fn run(output: Option<&str>) -> Result<()> {
    let path: PathBuf = resolve_dataset_path(output);
    let dataset = demo_dataset();
    save_dataset(&path, &dataset)?;

    println!("Demo dataset written to {}", path.display());
    println!("  Projects:  {}", dataset.projects.len());
    println!("  Tasks:     {}", dataset.tasks.len());
    println!("  Rates:     {}", dataset.rates.len());
    println!("  Payroll:   {}", dataset.payroll.len());
    println!("  Accounts:  {}", dataset.accounts.len());
    println!();
    println!("Try these next:");
    println!("  erp-metrics report portfolio");
    println!("  erp-metrics report tasks --as-of 2024-06-03");
    println!("  erp-metrics report reconciliation");
    println!("  erp-metrics report balance");
    Ok(())
}
