//! Tunables for [`crate::ConfigurationTreeBuilder`].
//!
//! Settings are layered with Figment: built-in defaults first, then an
//! optional TOML file, then `CONFIG_TREE_`-prefixed environment variables.

use std::sync::Arc;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::constants::{AUTOEXPORT_CONFIG_PATH, SETTINGS_ENV_PREFIX, TRANSLATIONS_PATH};
use crate::path::NodePath;
use crate::{ConfigTreeError, ConfigTreeResult};

/// Builder tunables.
///
/// # Examples
///
/// ```rust
/// use config_tree::{BuilderSettings, ConfigurationTreeBuilder};
///
/// let settings = BuilderSettings {
///     report_redundant_operations: false,
///     ..BuilderSettings::default()
/// };
/// let builder = ConfigurationTreeBuilder::new().with_settings(settings);
/// assert!(!builder.settings().report_redundant_operations);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Subtrees in which a `replace` with unchanged values is not reported.
    pub redundant_replace_exempt_paths: Vec<String>,
    /// Reports redundant replaces, repeated ignore-reordered-children flags
    /// and unnecessary order-before directives.
    pub report_redundant_operations: bool,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            redundant_replace_exempt_paths: vec![
                String::from(TRANSLATIONS_PATH),
                String::from(AUTOEXPORT_CONFIG_PATH),
            ],
            report_redundant_operations: true,
        }
    }
}

impl BuilderSettings {
    /// Returns the Figment that [`Self::load`] extracts from.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        file.into_iter()
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path.as_std_path())),
            )
            .merge(Env::prefixed(SETTINGS_ENV_PREFIX))
    }

    /// Loads settings from defaults, `file` and the environment.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::Settings`] when a layer cannot be parsed or
    /// holds values of the wrong type.
    pub fn load(file: Option<&Utf8Path>) -> ConfigTreeResult<Self> {
        Self::figment(file)
            .extract()
            .map_err(|e| Arc::new(ConfigTreeError::settings(e)))
    }

    /// Returns `true` when redundant replaces at `path` should not be reported.
    #[must_use]
    pub fn is_redundant_replace_exempt(&self, path: &NodePath) -> bool {
        self.redundant_replace_exempt_paths.iter().any(|raw| {
            NodePath::parse(raw).is_ok_and(|prefix| path.starts_with(&prefix))
        })
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;

    use super::BuilderSettings;
    use crate::path::NodePath;

    #[test]
    fn defaults_when_nothing_is_configured() {
        figment::Jail::expect_with(|_| {
            let settings = BuilderSettings::load(None).map_err(|e| e.to_string())?;
            assert_eq!(settings, BuilderSettings::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_environment_override_defaults() {
        figment::Jail::expect_with(|j| {
            j.create_file(
                "tree.toml",
                "redundant_replace_exempt_paths = [\"/custom\"]\nreport_redundant_operations = true\n",
            )?;
            j.set_env("CONFIG_TREE_REPORT_REDUNDANT_OPERATIONS", "false");
            let path = Utf8PathBuf::from("tree.toml");
            let settings = BuilderSettings::load(Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(settings.redundant_replace_exempt_paths, ["/custom"]);
            assert!(!settings.report_redundant_operations);
            Ok(())
        });
    }

    #[test]
    fn malformed_values_are_settings_errors() {
        figment::Jail::expect_with(|j| {
            j.set_env("CONFIG_TREE_REPORT_REDUNDANT_OPERATIONS", "[1, 2]");
            let err = BuilderSettings::load(None).expect_err("wrong type is rejected");
            assert!(matches!(
                err.as_ref(),
                crate::ConfigTreeError::Settings(_)
            ));
            Ok(())
        });
    }

    #[rstest]
    #[case("/hippo:configuration/hippo:translations/hippo:hst/x", true)]
    #[case("/hippo:configuration/hippo:modules/autoexport/hippo:moduleconfig", true)]
    #[case("/hippo:configuration/hippo:modules/other", false)]
    #[case("/", false)]
    fn exempt_paths_match_subtrees(#[case] raw: &str, #[case] exempt: bool) {
        let path = NodePath::parse(raw).expect("valid path");
        assert_eq!(
            BuilderSettings::default().is_redundant_replace_exempt(&path),
            exempt
        );
    }
}
