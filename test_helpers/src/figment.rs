//! `figment::Jail` plumbing for the settings tests.
//!
//! Settings tests write their TOML layer and `CONFIG_TREE_*` variables inside
//! a jail so nothing leaks between tests or into the host environment.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;
use config_tree::{BuilderSettings, ConfigTreeResult};

/// File name used by [`load_settings`].
pub const SETTINGS_FILE: &str = "config-tree.toml";

/// Runs `f` inside a [`figment::Jail`] and hands back what it produced.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut produced = None;
    figment::Jail::try_with(|jail| {
        produced = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jail failed: {err}"))?;
    produced.ok_or_else(|| anyhow!("jail closure produced nothing"))
}

/// Writes a settings file into the jail and returns its relative path.
///
/// # Errors
///
/// Returns the jail's error when the file cannot be created.
pub fn settings_file(
    jail: &mut figment::Jail,
    name: &str,
    contents: &str,
) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)?;
    Ok(Utf8PathBuf::from(name))
}

/// Writes `contents` to [`SETTINGS_FILE`] and loads the layered settings.
///
/// The outer result covers the jail; the inner one is the loader's own.
///
/// # Errors
///
/// Returns the jail's error when the file cannot be created.
pub fn load_settings(
    jail: &mut figment::Jail,
    contents: &str,
) -> figment::error::Result<ConfigTreeResult<BuilderSettings>> {
    let file = settings_file(jail, SETTINGS_FILE, contents)?;
    Ok(BuilderSettings::load(Some(&file)))
}
