//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_peeklog_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("peeklog") && path_str.ends_with("config.toml"),
        "Path should contain 'peeklog' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("peeklog_test_config.toml");

    let toml_content = r#"
verbosity = 2
max_depth = 12
style = "renaissance"
history = true
log_file_path = "/tmp/peeklog-test.log"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.verbosity, Some(2));
    assert_eq!(config.max_depth, Some(12));
    assert_eq!(config.style, Some(StyleName::Renaissance));
    assert_eq!(config.history, Some(true));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/peeklog-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_accepts_legacy_style_spelling() {
    let config: ConfigFile = toml::from_str(r#"style = "reinassance""#).expect("alias parses");
    assert_eq!(config.style, Some(StyleName::Renaissance));
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("peeklog_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = env::temp_dir().join("peeklog_test_partial.toml");

    fs::write(
        &config_path,
        r#"
verbosity = 3
# Other fields omitted
"#,
    )
    .expect("Failed to write partial test config");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.verbosity, Some(3));
    assert_eq!(config.style, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_rejects_unknown_style() {
    let result: Result<ConfigFile, _> = toml::from_str("style = \"baroque\"");
    assert!(result.is_err());
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.verbosity, 0);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.style, StyleName::Minimal);
    assert!(!config.history);
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_clamps_out_of_range_max_depth() {
    let huge: ConfigFile =
        toml::from_str("max_depth = 4611686018427387903").expect("valid TOML integer");
    let zero: ConfigFile = toml::from_str("max_depth = 0").expect("valid TOML integer");

    let resolved = merge_config(Some(huge));
    assert_eq!(resolved.max_depth, MAX_DEPTH_LIMIT);
    assert_eq!(merge_config(Some(zero)).max_depth, 1);

    // The resolved value must be safe to build a tracker from.
    let tracker = crate::tracker::ScopeTracker::with_options(
        Box::new(std::io::sink()),
        TrackerOptions::from(&resolved),
    );
    assert_eq!(tracker.max_depth(), MAX_DEPTH_LIMIT);
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        verbosity: Some(4),
        max_depth: Some(8),
        style: Some(StyleName::Renaissance),
        history: Some(true),
        log_file_path: None,
    };

    let resolved = merge_config(Some(config_file));

    assert_eq!(resolved.verbosity, 4);
    assert_eq!(resolved.max_depth, 8);
    assert_eq!(resolved.style, StyleName::Renaissance);
    assert!(resolved.history);
    assert_eq!(resolved.log_file_path, default_log_path());
}

#[test]
fn tracker_options_follow_resolved_config() {
    let resolved = ResolvedConfig {
        verbosity: -1,
        max_depth: 3,
        style: StyleName::Renaissance,
        history: true,
        log_file_path: default_log_path(),
    };

    let options = TrackerOptions::from(&resolved);

    assert_eq!(
        options,
        TrackerOptions {
            verbosity: -1,
            max_depth: 3,
            style: StyleName::Renaissance,
            history: true,
        }
    );
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(peeklog_env)]
fn apply_env_overrides_respects_verbosity_and_style() {
    let _verbosity = EnvGuard::new(VERBOSITY_ENV);
    let _style = EnvGuard::new(STYLE_ENV);

    env::set_var(VERBOSITY_ENV, " 5 ");
    env::set_var(STYLE_ENV, "renaissance");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.verbosity, 5);
    assert_eq!(result.style, StyleName::Renaissance);
}

#[test]
#[serial(peeklog_env)]
fn apply_env_overrides_ignores_unparsable_values() {
    let _verbosity = EnvGuard::new(VERBOSITY_ENV);
    let _style = EnvGuard::new(STYLE_ENV);

    env::set_var(VERBOSITY_ENV, "loud");
    env::set_var(STYLE_ENV, "baroque");

    let base = ResolvedConfig {
        verbosity: 2,
        ..ResolvedConfig::default()
    };
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base, "Unparsable env values should be ignored");
}

#[test]
#[serial(peeklog_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _verbosity = EnvGuard::new(VERBOSITY_ENV);
    let _style = EnvGuard::new(STYLE_ENV);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base);
}

#[test]
#[serial(peeklog_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("peeklog_explicit.toml");
    fs::write(&explicit_path, "verbosity = 7").expect("Failed to write explicit config");

    // PEEKLOG_CONFIG points elsewhere and should be ignored
    let env_path = temp_dir.join("peeklog_env.toml");
    fs::write(&env_path, "verbosity = 1").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.verbosity,
        Some(7),
        "Should use explicit path, not PEEKLOG_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(peeklog_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let env_path = env::temp_dir().join("peeklog_env_only.toml");
    fs::write(&env_path, "style = \"renaissance\"").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.style, Some(StyleName::Renaissance));

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    let result = apply_cli_overrides(base.clone(), None, None, None, None);
    assert_eq!(result, base);
}

#[test]
#[serial(peeklog_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _verbosity = EnvGuard::new(VERBOSITY_ENV);
    let _style = EnvGuard::new(STYLE_ENV);

    // File sets everything
    let config_file = ConfigFile {
        verbosity: Some(1),
        max_depth: Some(10),
        style: Some(StyleName::Renaissance),
        history: Some(false),
        log_file_path: None,
    };
    let resolved = merge_config(Some(config_file));

    // Env overrides verbosity only
    env::set_var(VERBOSITY_ENV, "2");
    let resolved = apply_env_overrides(resolved);
    assert_eq!(resolved.verbosity, 2);
    assert_eq!(resolved.style, StyleName::Renaissance);

    // CLI overrides verbosity and history
    let resolved = apply_cli_overrides(resolved, Some(3), None, None, Some(true));

    assert_eq!(resolved.verbosity, 3, "CLI should win over env");
    assert_eq!(resolved.max_depth, 10, "File value should survive");
    assert_eq!(resolved.style, StyleName::Renaissance);
    assert!(resolved.history);
}
