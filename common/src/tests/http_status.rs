use crate::HttpStatusCode;

/// **VALUE**: Verifies auth failures are recognised when logging relay failures.
///
/// **WHY THIS MATTERS**: A 401 from the provider means the GROQ key is missing or wrong;
/// the relay logs a dedicated hint for it instead of a generic upstream failure.
#[test]
fn given_status_codes_when_checked_for_auth_failure_then_only_401_and_403_match() {
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(404).is_auth_failure());
}

#[test]
fn given_u16_when_converted_then_displays_plain_number() {
    let status: HttpStatusCode = 503.into();
    assert_eq!(status.to_string(), "503");
}
