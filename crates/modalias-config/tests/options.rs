//! Tests for layered option loading.

use figment::Jail;
use modalias_config::AliasOptions;
use std::path::PathBuf;

#[test]
fn load_without_environment_gives_defaults() {
    Jail::expect_with(|_jail| {
        let opts = AliasOptions::load().expect("options should load");
        assert_eq!(opts, AliasOptions::default());
        Ok(())
    });
}

#[test]
fn environment_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("MODALIAS_CWD", "/proj");
        jail.set_env("MODALIAS_FILE", "aliases.json");
        jail.set_env("MODALIAS_MODULES_DIR", "shared,vendor");

        let opts = AliasOptions::load().expect("options should load");
        assert_eq!(opts.cwd, Some(PathBuf::from("/proj")));
        assert_eq!(opts.settings_file(), "aliases.json");
        assert_eq!(opts.modules_dir, vec!["shared", "vendor"]);
        Ok(())
    });
}

#[test]
fn explicit_values_win_over_environment() {
    Jail::expect_with(|jail| {
        jail.set_env("MODALIAS_CWD", "/from-env");
        jail.set_env("MODALIAS_MODULES_DIR", "shared");

        let opts = AliasOptions::load()
            .expect("options should load")
            .merge(AliasOptions::default().with_cwd("/explicit"));

        assert_eq!(opts.cwd, Some(PathBuf::from("/explicit")));
        assert_eq!(opts.modules_dir, vec!["shared"]);
        Ok(())
    });
}

#[test]
fn default_cwd_is_process_directory() {
    Jail::expect_with(|jail| {
        let opts = AliasOptions::load().expect("options should load");
        let cwd = opts.resolved_cwd().expect("cwd");
        assert_eq!(
            cwd.canonicalize().unwrap(),
            jail.directory().canonicalize().unwrap()
        );
        Ok(())
    });
}

#[test]
fn relative_cwd_resolves_against_process_directory() {
    Jail::expect_with(|jail| {
        jail.create_dir("proj")?;
        jail.set_env("MODALIAS_CWD", "proj");

        let opts = AliasOptions::load().expect("options should load");
        let cwd = opts.resolved_cwd().expect("cwd");
        assert!(cwd.is_absolute());
        assert_eq!(
            cwd.canonicalize().unwrap(),
            jail.directory().join("proj").canonicalize().unwrap()
        );
        Ok(())
    });
}
