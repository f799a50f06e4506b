//! Loads the effective settings from the `settings` table.

use greenhouse_core::metrics::ThresholdConfig;
use greenhouse_core::settings::{Settings, SettingsSection};
use greenhouse_db::repositories::SettingsRepo;
use greenhouse_db::DbPool;

/// Layer every stored section over the defaults.
///
/// Unknown or invalid stored sections are skipped with a warning so a bad
/// row never prevents startup.
pub async fn load_settings(pool: &DbPool) -> Result<Settings, sqlx::Error> {
    let mut settings = Settings::default();

    for row in SettingsRepo::list_all(pool).await? {
        let section: SettingsSection = match row.section.parse() {
            Ok(section) => section,
            Err(_) => {
                tracing::warn!(section = %row.section, "Ignoring unknown settings section");
                continue;
            }
        };

        let applied = serde_json::from_str::<serde_json::Value>(&row.value)
            .map_err(|e| e.to_string())
            .and_then(|value| {
                settings
                    .apply_section(section, value)
                    .map_err(|e| e.to_string())
            });
        if let Err(error) = applied {
            tracing::warn!(%section, %error, "Ignoring invalid stored settings section");
        }
    }

    Ok(settings)
}

/// Warn about bands whose warning margins overlap. Such bands never
/// classify an in-band value as normal.
pub fn log_overlapping_margins(thresholds: &ThresholdConfig) {
    for metric in thresholds.overlapping_margin_metrics() {
        let band = thresholds.band(metric);
        tracing::warn!(
            %metric,
            min = ?band.min,
            max = ?band.max,
            "Band is too narrow for separate warning margins; in-band values will always warn"
        );
    }
}
