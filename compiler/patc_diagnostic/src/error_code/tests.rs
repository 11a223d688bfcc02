use super::*;

#[test]
fn display_matches_as_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.to_string(), code.as_str());
    }
}

#[test]
fn parse_round_trips_case_insensitively() {
    assert_eq!("e3005".parse::<ErrorCode>(), Ok(ErrorCode::E3005));
    assert_eq!("W3004".parse::<ErrorCode>(), Ok(ErrorCode::W3004));
    assert_eq!("E0000".parse::<ErrorCode>(), Err(()));
}

#[test]
fn categories_are_exclusive() {
    for code in ErrorCode::ALL {
        let categories = [
            code.is_pattern_code(),
            code.is_codegen_error(),
            code.is_internal_error(),
        ];
        assert_eq!(
            categories.iter().filter(|c| **c).count(),
            1,
            "{code} must belong to exactly one category"
        );
    }
}

#[test]
fn only_w_codes_are_warnings() {
    assert!(ErrorCode::W3001.is_warning());
    assert!(ErrorCode::W3004.is_warning());
    assert!(!ErrorCode::E3001.is_warning());
    assert!(!ErrorCode::E5001.is_warning());
}
