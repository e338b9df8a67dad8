use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        NanobananaError::invalid_crop("x")
            .to_string()
            .contains("invalid crop:")
    );
    assert!(
        NanobananaError::invalid_size("x")
            .to_string()
            .contains("invalid size:")
    );
    assert!(
        NanobananaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        NanobananaError::NotEnoughImages(1)
            .to_string()
            .contains("not enough images")
    );
    assert!(
        NanobananaError::InvalidDirection("diagonal".to_string())
            .to_string()
            .contains("invalid direction")
    );
}

#[test]
fn codes_are_stable() {
    assert_eq!(NanobananaError::NoOperation.code(), "NO_OPERATION");
    assert_eq!(NanobananaError::NotEnoughImages(0).code(), "NOT_ENOUGH_IMAGES");
    assert_eq!(
        NanobananaError::InvalidDirection(String::new()).code(),
        "INVALID_DIRECTION"
    );
    assert_eq!(NanobananaError::InvalidTolerance(101).code(), "INVALID_TOLERANCE");
    assert_eq!(NanobananaError::MissingApiKey.code(), "MISSING_API_KEY");
}

#[test]
fn api_errors_are_classified_on_construction() {
    let err = NanobananaError::api("googleapi: Error 429: Resource has been exhausted (e.g. check quota)");
    assert_eq!(err.code(), "QUOTA_EXCEEDED");
    assert_eq!(err.to_string(), "[QUOTA_EXCEEDED] API quota exceeded");

    let err = NanobananaError::api("connection reset by peer");
    assert_eq!(err.code(), "API_ERROR");
    assert!(err.to_string().contains("connection reset by peer"));
}

#[test]
fn hints_follow_the_error_kind() {
    assert!(NanobananaError::NoOperation.hint().is_some());
    assert!(
        NanobananaError::api("API key not valid")
            .hint()
            .unwrap()
            .contains("aistudio")
    );
    assert!(NanobananaError::invalid_crop("x").hint().is_none());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = NanobananaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.code(), "INTERNAL_ERROR");
}
