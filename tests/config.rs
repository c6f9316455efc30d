//! Configuration tests

use libcli::cli::{Config, NumberPolicy};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(config.echo);
    assert!(config.clear_screen);
    assert_eq!(config.numbers, NumberPolicy::Lenient);
}

#[test]
fn test_config_from_json() {
    let config =
        Config::from_json(br#"{"echo":false,"clear_screen":false,"numbers":"strict"}"#).unwrap();
    assert_eq!(
        config,
        Config {
            echo: false,
            clear_screen: false,
            numbers: NumberPolicy::Strict,
        }
    );
}

#[test]
fn test_missing_fields_take_defaults() {
    assert_eq!(Config::from_json(b"{}").unwrap(), Config::default());
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(Config::from_json(b"{\"echo\":").is_err());
    assert!(Config::from_json(br#"{"numbers":"loose"}"#).is_err());
}

#[test]
fn test_config_json_round_trip() {
    let config = Config {
        echo: false,
        ..Config::default()
    };
    let mut buf = [0u8; 128];
    let len = config.to_json(&mut buf).unwrap();
    assert_eq!(
        &buf[..len],
        br#"{"echo":false,"clear_screen":true,"numbers":"lenient"}"#
    );
    assert_eq!(Config::from_json(&buf[..len]).unwrap(), config);
}
