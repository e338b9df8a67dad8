use std::collections::HashMap;

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = Config::resolve_with(&Overrides::default(), None, env_of(&[]));
    assert_eq!(cfg.api_key, None);
    assert_eq!(cfg.model, "flash");
    assert_eq!(cfg.model_id(), crate::gemini::MODEL_FLASH);
    assert_eq!(cfg.timeout, Duration::from_secs(120));
    assert_eq!(cfg.output_dir, PathBuf::from("."));
    assert!(matches!(
        cfg.require_api_key(),
        Err(NanobananaError::MissingApiKey)
    ));
}

#[test]
fn env_key_order_is_respected() {
    let env = env_of(&[("GOOGLE_API_KEY", "google"), ("NANOBANANA_API_KEY", "nano")]);
    let cfg = Config::resolve_with(&Overrides::default(), None, env);
    assert_eq!(cfg.api_key.as_deref(), Some("nano"));

    let env = env_of(&[("GEMINI_API_KEY", ""), ("GOOGLE_API_KEY", "google")]);
    let cfg = Config::resolve_with(&Overrides::default(), None, env);
    assert_eq!(cfg.api_key.as_deref(), Some("google"));
}

#[test]
fn flags_beat_env_beat_file() {
    let file = FileConfig {
        api_key: Some("from-file".to_string()),
        model: Some("pro".to_string()),
        timeout_secs: Some(30),
        output_dir: Some(PathBuf::from("renders")),
    };

    let cfg = Config::resolve_with(&Overrides::default(), Some(file.clone()), env_of(&[]));
    assert_eq!(cfg.api_key.as_deref(), Some("from-file"));
    assert_eq!(cfg.model_id(), crate::gemini::MODEL_PRO);
    assert_eq!(cfg.timeout, Duration::from_secs(30));
    assert_eq!(cfg.output_dir, PathBuf::from("renders"));

    let env = env_of(&[("GEMINI_API_KEY", "from-env"), ("NANOBANANA_MODEL", "flash")]);
    let cfg = Config::resolve_with(&Overrides::default(), Some(file.clone()), env);
    assert_eq!(cfg.api_key.as_deref(), Some("from-env"));
    assert_eq!(cfg.model, "flash");

    let flags = Overrides {
        api_key: Some("from-flag".to_string()),
        model: Some("custom-model".to_string()),
    };
    let env = env_of(&[("GEMINI_API_KEY", "from-env")]);
    let cfg = Config::resolve_with(&flags, Some(file), env);
    assert_eq!(cfg.require_api_key().unwrap(), "from-flag");
    assert_eq!(cfg.model_id(), "custom-model");
}

#[test]
fn toml_file_parsing() {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();

    let good = dir.join("config.toml");
    std::fs::write(&good, "model = \"pro\"\ntimeout_secs = 45\n").unwrap();
    let parsed = load_file(&good).unwrap().unwrap();
    assert_eq!(parsed.model.as_deref(), Some("pro"));
    assert_eq!(parsed.timeout_secs, Some(45));
    assert_eq!(parsed.api_key, None);

    let bad = dir.join("bad.toml");
    std::fs::write(&bad, "colour = \"blue\"\n").unwrap();
    assert_eq!(load_file(&bad).unwrap_err().code(), "INTERNAL_ERROR");

    assert_eq!(load_file(&dir.join("absent.toml")).unwrap(), None);
}

#[test]
fn relative_outputs_land_in_output_dir() {
    let mut cfg = Config::resolve_with(&Overrides::default(), None, env_of(&[]));
    assert_eq!(cfg.output_path(Path::new("a.png")), PathBuf::from("a.png"));

    cfg.output_dir = PathBuf::from("renders");
    assert_eq!(
        cfg.output_path(Path::new("sub/a.png")),
        PathBuf::from("renders/sub/a.png")
    );
    let abs = std::env::temp_dir().join("a.png");
    assert_eq!(cfg.output_path(&abs), abs);
}
