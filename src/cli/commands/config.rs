//! Config command - show or edit configuration

use crate::cache::BufferPolicy;
use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{PropnetError, PropnetResult};
use crate::ui::{self, Mark, OutputMode};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "cache.enabled",
    "cache.dir",
    "cache.digest",
    "cache.compression_level",
    "normalize.buffer_policy",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> PropnetResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> PropnetResult<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{}", toml);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> PropnetResult<()> {
    let mode = OutputMode::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::status(
            mode,
            Mark::Warn,
            &format!("Config already exists at {}", path.display()),
            Some("use --force to overwrite"),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::status(
        mode,
        Mark::Ok,
        "Configuration initialized",
        Some(&path.display().to_string()),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> PropnetResult<()> {
    let mode = OutputMode::detect();
    let mut config = config.clone();

    if let Err(e) = apply_value(&mut config, key, value) {
        ui::status(mode, Mark::Fail, "Cannot set config value", Some(&e.to_string()));
        ui::status(mode, Mark::Note, "Valid keys", Some(&VALID_KEYS.join(", ")));
        return Err(e);
    }

    manager.save(&config).await?;
    ui::status(mode, Mark::Ok, &format!("Set {} = {}", key, value), None);

    Ok(())
}

/// Apply a dot-separated `key = value` assignment to `config`
fn apply_value(config: &mut Config, key: &str, value: &str) -> PropnetResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => return Err(invalid(key, value, "use text or json")),
        },
        ["cache", "enabled"] => config.cache.enabled = parse_bool(value)?,
        ["cache", "dir"] => config.cache.dir = Some(PathBuf::from(value)),
        ["cache", "digest"] => config.cache.digest = value.to_ascii_lowercase(),
        ["cache", "compression_level"] => {
            let level = parse_u32(value)?;
            if level > 9 {
                return Err(invalid(key, value, "use a level from 0 to 9"));
            }
            config.cache.compression_level = level;
        }
        ["normalize", "buffer_policy"] => {
            config.normalize.buffer_policy = match value {
                "fan-out" => BufferPolicy::FanOut,
                "every-edge" => BufferPolicy::EveryEdge,
                _ => return Err(invalid(key, value, "use fan-out or every-edge")),
            }
        }
        _ => return Err(PropnetError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}

fn invalid(key: &str, value: &str, hint: &str) -> PropnetError {
    PropnetError::User(format!("Invalid value {} for {}: {}", value, key, hint))
}

fn parse_bool(value: &str) -> PropnetResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PropnetError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u32(value: &str) -> PropnetResult<u32> {
    value
        .parse()
        .map_err(|_| PropnetError::User(format!("Invalid number: {}", value)))
}
