use super::*;

#[test]
fn defaults_match_page_templates() {
    let c = UiConfig::default();
    assert_eq!(c.cooldown_secs, 30);
    assert_eq!(c.cooldown_tick_ms, 1_000);
    assert_eq!(c.cooldown_key, "dmoj-refresh-timestamp");
    assert_eq!(c.scroll_debounce_ms, 100);
    assert_eq!(c.submit_delay_ms, 50);
    assert_eq!(c.scroll_container_selector, ".overflow-auto");
    assert_eq!(c.unit_id_prefix, "unit-");
    assert_eq!(c.topic_id_prefix, "topic-");
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c = UiConfig::from_json(r#"{ "cooldownSecs": 60, "darkThemes": ["midnight"] }"#).unwrap();
    assert_eq!(c.cooldown_secs, 60);
    assert_eq!(c.dark_themes, vec!["midnight".to_owned()]);
    assert_eq!(c.scroll_debounce_ms, 100);
    assert_eq!(c.cooldown_button_id, "refresh-dmoj-btn");
}

#[test]
fn zero_durations_are_rejected() {
    let err = UiConfig::from_json(r#"{ "scrollDebounceMs": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Zero { field: "scrollDebounceMs" }));
    assert!(UiConfig::from_json(r#"{ "cooldownSecs": -5 }"#).is_err());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(UiConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
}

#[test]
fn fallback_uses_defaults_for_missing_or_bad_input() {
    assert_eq!(UiConfig::from_json_or_default(None), UiConfig::default());
    assert_eq!(UiConfig::from_json_or_default(Some("   ")), UiConfig::default());
    assert_eq!(UiConfig::from_json_or_default(Some("[1, 2]")), UiConfig::default());
    assert_eq!(UiConfig::from_json_or_default(Some(r#"{"cooldownSecs": 0}"#)), UiConfig::default());
}

#[test]
fn fallback_accepts_valid_overrides() {
    let c = UiConfig::from_json_or_default(Some(r#"{"submitDelayMs": 10}"#));
    assert_eq!(c.submit_delay_ms, 10);
}

#[test]
fn non_object_json_is_rejected() {
    assert!(matches!(UiConfig::from_json("[1, 2]"), Err(ConfigError::NotAnObject)));
    assert!(matches!(UiConfig::from_json("30"), Err(ConfigError::NotAnObject)));
    assert!(matches!(UiConfig::from_json("null"), Err(ConfigError::NotAnObject)));
}

#[test]
fn log_level_defaults_to_info_and_accepts_overrides() {
    assert_eq!(UiConfig::default().log_level(), log::Level::Info);

    let c = UiConfig::from_json(r#"{"logLevel": "DEBUG"}"#).unwrap();
    assert_eq!(c.log_level(), log::Level::Debug);

    let c = UiConfig::from_json(r#"{"logLevel": "chatty"}"#).unwrap();
    assert_eq!(c.log_level(), log::Level::Info);
}
