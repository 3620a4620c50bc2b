//! Well-known names used by the merge rules.

/// Property naming a node's primary type.
pub const JCR_PRIMARY_TYPE: &str = "jcr:primaryType";

/// Property listing a node's mixin types.
pub const JCR_MIXIN_TYPES: &str = "jcr:mixinTypes";

/// Property carrying a node's identifier.
pub const JCR_UUID: &str = "jcr:uuid";

/// Primary type of the root node.
pub const ROOT_PRIMARY_TYPE: &str = "rep:root";

/// Mixin carried by the root node.
pub const ROOT_MIXIN: &str = "mix:referenceable";

/// Fixed identifier of the root node.
pub const ROOT_UUID: &str = "cafebabe-cafe-babe-cafe-babecafebabe";

/// Translations tree, whose values are routinely re-declared.
pub const TRANSLATIONS_PATH: &str = "/hippo:configuration/hippo:translations";

/// Auto-export module configuration, which updates itself.
pub const AUTOEXPORT_CONFIG_PATH: &str = "/hippo:configuration/hippo:modules/autoexport";

/// Prefix of environment variables read by [`crate::settings::BuilderSettings::load`].
pub const SETTINGS_ENV_PREFIX: &str = "CONFIG_TREE_";
