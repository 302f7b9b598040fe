use super::{default_global_config_path, ConfigError, Settings, SettingsOverrides};

/// Resolves the effective settings. An explicit `--config` must exist; the
/// default config file is optional when the flags name every required path.
pub fn load_settings(overrides: &SettingsOverrides) -> Result<Settings, ConfigError> {
    let (path, explicit) = match &overrides.config_path {
        Some(path) => (Some(path.clone()), true),
        None => (default_global_config_path().ok(), false),
    };

    let mut settings = match path {
        Some(path) if explicit || path.exists() => Settings::from_path(&path)?,
        _ => overrides.to_settings()?,
    };
    overrides.apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

