//! `srcsync types` – list source types in classification order.

use srcsync_core::SourceTypeRegistry;

pub fn run_types(registry: &SourceTypeRegistry) {
    for (i, source_type) in registry.iter().enumerate() {
        println!("{}. {}  /{}/", i + 1, source_type.key(), source_type.url_pattern());
        if let Some(ext) = source_type.extension() {
            println!("     extension: {}", ext);
        }
        if let Some(pattern) = source_type.filename_pattern() {
            println!("     name from: /{}/", pattern);
        }
    }
}
