//! `srcsync classify <url>...` – explain what `sync` would do for each URL.

use anyhow::Result;
use srcsync_core::{plan_fetch, CommandMode, SourceTypeRegistry};
use std::path::Path;

pub fn run_classify(registry: &SourceTypeRegistry, work_dir: &Path, urls: &[String]) -> Result<()> {
    for url in urls {
        println!("{}", url);
        let plan = match plan_fetch(registry, work_dir, url) {
            Ok(plan) => plan,
            Err(e) => {
                println!("  {}", e);
                continue;
            }
        };
        let download = registry.expand(&plan.key, url, &plan.name, CommandMode::Download)?;
        let update = registry.expand(&plan.key, url, &plan.name, CommandMode::Update)?;
        println!("  type:     {}", plan.key);
        println!("  name:     {}", plan.name);
        println!("  next:     {}", plan.mode);
        println!("  download: {}", download);
        println!("  update:   {}", update);
    }
    Ok(())
}
