use std::io::Write as _;
use std::path::Path;

use super::*;

#[test]
fn defaults_are_valid() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.storage.directory, Path::new(".site-locale"));
    assert_eq!(settings.storage.namespace, "lang-storage");
    assert_eq!(
        settings.content.authors_file,
        Path::new("content/authors.toml")
    );
    assert_eq!(settings.content.fallback, FallbackPolicy::DefaultLocale);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.storage.namespace = Some("from-file".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        storage_namespace: Some("from-cli".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.storage.namespace, "from-cli");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn rejects_unparseable_log_level() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn rejects_namespaces_that_are_not_file_stems() {
    for namespace in ["", "   ", ".hidden", "a/b", "lang storage", "..\\x"] {
        let mut raw = RawSettings::default();
        raw.storage.namespace = Some(namespace.to_string());

        let err = Settings::from_raw(raw).expect_err("invalid namespace");
        assert!(
            matches!(
                err,
                LoadError::Invalid {
                    key: "storage.namespace",
                    ..
                }
            ),
            "`{namespace}` should be rejected"
        );
    }
}

#[test]
fn parses_fallback_policy() {
    let mut raw = RawSettings::default();
    raw.content.fallback = Some("strict".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.content.fallback, FallbackPolicy::Strict);

    let mut raw = RawSettings::default();
    raw.content.fallback = Some("first_match".to_string());
    let err = Settings::from_raw(raw).expect_err("unknown policy");
    assert!(err.to_string().contains("content.fallback"));
}

#[test]
fn reads_settings_from_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config file");
    writeln!(
        file,
        "[storage]\nnamespace = \"prefs\"\n\n[content]\nfallback = \"strict\"\n"
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "site-locale",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "--storage-directory",
        "/tmp/site-locale-state",
        "current",
    ]);
    let settings = load(&args).expect("valid settings");

    assert_eq!(settings.storage.namespace, "prefs");
    assert_eq!(
        settings.storage.directory,
        Path::new("/tmp/site-locale-state")
    );
    assert_eq!(settings.content.fallback, FallbackPolicy::Strict);
}

#[test]
fn defaults_to_no_command() {
    let args = CliArgs::parse_from(["site-locale"]);
    assert!(args.command.is_none());
}

#[test]
fn parse_switch_arguments() {
    let args = CliArgs::parse_from(["site-locale", "switch", "zh"]);

    match args.command.expect("switch command") {
        Command::Switch(switch) => assert_eq!(switch.code, "zh"),
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_route_arguments() {
    let args = CliArgs::parse_from(["site-locale", "route", "/about", "--to", "zh"]);

    match args.command.expect("route command") {
        Command::Route(route) => {
            assert_eq!(route.path, "/about");
            assert_eq!(route.to.as_deref(), Some("zh"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn global_overrides_follow_the_subcommand() {
    let args = CliArgs::parse_from([
        "site-locale",
        "menu",
        "--select",
        "en",
        "--storage-namespace",
        "prefs",
    ]);

    assert_eq!(args.overrides.storage_namespace.as_deref(), Some("prefs"));
    match args.command.expect("menu command") {
        Command::Menu(menu) => {
            assert_eq!(menu.select.as_deref(), Some("en"));
            assert!(!menu.open);
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn menu_open_conflicts_with_select() {
    let result = CliArgs::try_parse_from(["site-locale", "menu", "--open", "--select", "zh"]);
    assert!(result.is_err());
}
