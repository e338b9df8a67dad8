use super::*;

#[test]
fn aliases_resolve() {
    assert_eq!(resolve_model_name("flash"), MODEL_FLASH);
    assert_eq!(resolve_model_name(""), MODEL_FLASH);
    assert_eq!(resolve_model_name("pro"), MODEL_PRO);
    assert_eq!(resolve_model_name("custom-model-001"), "custom-model-001");
}

#[test]
fn ratio_and_resolution_tables() {
    assert!(is_valid_aspect_ratio("21:9"));
    assert!(!is_valid_aspect_ratio("2:1"));
    assert!(is_valid_resolution("2K"));
    assert!(!is_valid_resolution("8K"));
}

#[test]
fn config_validation() {
    assert!(ImageConfig::default().validate(MODEL_FLASH).is_ok());

    let too_many = ImageConfig {
        count: 11,
        ..Default::default()
    };
    assert_eq!(too_many.validate(MODEL_FLASH).unwrap_err().code(), "INVALID_INPUT");

    let bad_ratio = ImageConfig {
        aspect_ratio: "7:3".to_string(),
        ..Default::default()
    };
    assert!(bad_ratio.validate(MODEL_FLASH).is_err());

    let four_k = ImageConfig {
        resolution: "4K".to_string(),
        ..Default::default()
    };
    assert!(four_k.validate(MODEL_FLASH).is_err());
    assert!(four_k.validate(MODEL_PRO).is_ok());
}

#[test]
fn dimension_estimates() {
    assert_eq!(estimate_dimensions("1:1"), (1024, 1024));
    assert_eq!(estimate_dimensions(""), (1024, 1024));
    assert_eq!(estimate_dimensions("16:9"), (1024, 576));
    assert_eq!(estimate_dimensions("2:3"), (683, 1024));
    assert_eq!(estimate_dimensions("nonsense"), (1024, 1024));
}
