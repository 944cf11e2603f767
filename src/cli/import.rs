use std::path::Path;

use crate::dataset::{import_tasks_csv, load_dataset, merge_tasks, save_dataset};
use crate::error::Result;
use crate::settings::resolve_dataset_path;

pub fn run(file: &str, project: &str, dataset_override: Option<&str>) -> Result<()> {
    let path = resolve_dataset_path(dataset_override);
    let mut dataset = load_dataset(&path)?;
    dataset.project(project)?;

    let imported = import_tasks_csv(Path::new(file), project)?;
    let (added, replaced) = merge_tasks(&mut dataset, imported);
    save_dataset(&path, &dataset)?;

    println!("Imported into {project}: {added} added, {replaced} replaced");
    Ok(())
}
