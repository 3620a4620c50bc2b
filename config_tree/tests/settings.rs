//! Layered builder settings and their effect on merge diagnostics.

use anyhow::{Result, anyhow, ensure};
use config_tree::{ConfigTreeError, ConfigurationTreeBuilder, WarningKind};
use rstest::rstest;
use test_helpers::definitions::{bare, merge, text, typed};
use test_helpers::figment::{load_settings, with_jail};

fn replace_twice(builder: &mut ConfigurationTreeBuilder, path: &str) -> Result<()> {
    let mut first = typed(path, "m1/a.yaml")?;
    first.add_property(text("p", "x"));
    merge(builder, first)?;
    let mut second = bare(path, "m2/a.yaml")?;
    second.add_property(text("p", "x"));
    merge(builder, second)?;
    Ok(())
}

#[rstest]
#[case::defaults("", "/a", true)]
#[case::file_disables_reporting("report_redundant_operations = false\n", "/a", false)]
#[case::file_adds_exempt_subtree("redundant_replace_exempt_paths = [\"/quiet\"]\n", "/quiet", false)]
fn settings_file_controls_redundant_replace_reporting(
    #[case] contents: &str,
    #[case] path: &str,
    #[case] reported: bool,
) -> Result<()> {
    let settings = with_jail(|j| load_settings(j, contents))??;
    let mut builder = ConfigurationTreeBuilder::new().with_settings(settings);
    replace_twice(&mut builder, path)?;
    let redundant = builder
        .warnings()
        .iter()
        .any(|w| w.kind() == WarningKind::RedundantReplace);
    ensure!(redundant == reported, "redundant replace reported: {redundant}");
    Ok(())
}

#[rstest]
fn environment_overrides_the_file() -> Result<()> {
    let settings = with_jail(|j| {
        j.set_env("CONFIG_TREE_REPORT_REDUNDANT_OPERATIONS", "true");
        load_settings(j, "report_redundant_operations = false\n")
    })??;
    ensure!(settings.report_redundant_operations);
    Ok(())
}

#[rstest]
fn malformed_file_is_a_settings_error() -> Result<()> {
    let outcome = with_jail(|j| load_settings(j, "report_redundant_operations = \"often\"\n"))?;
    let err = outcome
        .err()
        .ok_or_else(|| anyhow!("malformed settings were accepted"))?;
    ensure!(matches!(err.as_ref(), ConfigTreeError::Settings(_)));
    Ok(())
}
