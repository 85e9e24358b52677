//! Cache management command

use anyhow::Result;

use crate::cache::StatCache;
use crate::cli::{CacheCommands, Output};
use crate::config::GradekeeperConfig;

pub async fn execute(
    cmd: CacheCommands,
    config: &GradekeeperConfig,
    output: &Output,
) -> Result<()> {
    let (students, grades) = super::open_stores(config, None)?;
    let cache = StatCache::new(
        config.cache.max_capacity,
        config.cache.staleness_window(),
        config.cache.warm_quota,
        students,
        grades,
    );

    match cmd {
        CacheCommands::Stats => {
            let stats = cache.stats();
            output.header("Cache statistics");
            output.key_value(
                "Size",
                &format!("{} / {}", stats.size, cache.max_capacity()),
            );
            output.key_value("Hit rate", &format!("{:.1}%", cache.hit_rate() * 100.0));
            output.key_value("Hits", &stats.hits.to_string());
            output.key_value("Misses", &stats.misses.to_string());
            output.key_value(
                "Avg accesses per entry",
                &format!("{:.1}", cache.mean_access_count()),
            );
        }
        CacheCommands::Refresh => {
            let removed = cache.refresh();
            output.success(&format!(
                "Cache refreshed, {} stale entries removed, {} entries resident",
                removed,
                cache.len()
            ));
        }
        CacheCommands::Clear => {
            cache.clear();
            output.success("Cache cleared");
        }
    }
    Ok(())
}
