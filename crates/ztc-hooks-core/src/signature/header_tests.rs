//! Tests for signature header parsing.

use super::*;

const SAMPLE_TIMESTAMP: i64 = 1694033429;
const SAMPLE_SIGNATURE: &str = "04d87956d1953f28ac04d441f139fc655109e9b5c64396fb55dbdf567c735f86";

fn sample_now() -> DateTime<Utc> {
    DateTime::from_timestamp(SAMPLE_TIMESTAMP, 0).unwrap()
}

fn parse(header: &str) -> Result<SignedHeader, SignatureError> {
    SignedHeader::parse_at(header, Duration::from_secs(300), sample_now())
}

// ============================================================================
// Well-formed headers
// ============================================================================

#[test]
fn test_parse_single_signature() {
    let header = format!("t={},v1={}", SAMPLE_TIMESTAMP, SAMPLE_SIGNATURE);

    let parsed = parse(&header).expect("header should parse");

    assert_eq!(parsed.timestamp(), SAMPLE_TIMESTAMP);
    assert_eq!(parsed.signatures(), &[hex::decode(SAMPLE_SIGNATURE).unwrap()]);
}

#[test]
fn test_parse_keeps_every_version_in_order() {
    let header = format!("t={},v1=aabb,v0=ccdd,v1=eeff", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(
        parsed.signatures(),
        &[vec![0xaa, 0xbb], vec![0xcc, 0xdd], vec![0xee, 0xff]]
    );
}

#[test]
fn test_parse_is_order_insensitive() {
    let header = format!("v1={},t={}", SAMPLE_SIGNATURE, SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.timestamp(), SAMPLE_TIMESTAMP);
    assert_eq!(parsed.signatures().len(), 1);
}

#[test]
fn test_parse_accepts_uppercase_hex() {
    let header = format!("t={},v1=AABB", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.signatures(), &[vec![0xaa, 0xbb]]);
}

#[test]
fn test_duplicate_timestamp_last_write_wins() {
    let header = format!("t=1,t={},v1=aabb", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.timestamp(), SAMPLE_TIMESTAMP);
}

#[test]
fn test_unrecognized_keys_are_ignored() {
    let header = format!("t={},x=123,scheme=hmac,v1=aabb", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.signatures(), &[vec![0xaa, 0xbb]]);
}

/// Any key containing `v` is a signature slot, not only `v0`/`v1`.
#[test]
fn test_any_key_containing_v_is_a_signature() {
    let header = format!("t={},sig_v2=aabb", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.signatures(), &[vec![0xaa, 0xbb]]);
}

#[test]
fn test_negative_timestamp_parses() {
    let epoch = DateTime::from_timestamp(0, 0).unwrap();

    let parsed = SignedHeader::parse_at("t=-5,v1=aabb", Duration::from_secs(10), epoch).unwrap();

    assert_eq!(parsed.timestamp(), -5);
}

// ============================================================================
// Malformed headers
// ============================================================================

#[test]
fn test_empty_header_is_missing() {
    assert_eq!(parse(""), Err(SignatureError::MissingSignatureHeader));
}

#[test]
fn test_token_without_separator_is_malformed() {
    let header = format!("t={},v1", SAMPLE_TIMESTAMP);

    assert!(matches!(
        parse(&header),
        Err(SignatureError::MalformedHeader { .. })
    ));
}

#[test]
fn test_trailing_comma_is_malformed() {
    let header = format!("t={},v1=aabb,", SAMPLE_TIMESTAMP);

    assert!(matches!(
        parse(&header),
        Err(SignatureError::MalformedHeader { .. })
    ));
}

#[test]
fn test_non_numeric_timestamp_is_malformed() {
    assert!(matches!(
        parse("t=yesterday,v1=aabb"),
        Err(SignatureError::MalformedHeader { .. })
    ));
    assert!(matches!(
        parse("t=1694033429.5,v1=aabb"),
        Err(SignatureError::MalformedHeader { .. })
    ));
}

/// Without `t` there is no signing time, so the hook can never be fresh.
#[test]
fn test_missing_timestamp_is_expired() {
    assert_eq!(
        parse("v1=aabb"),
        Err(SignatureError::TimestampExpired {
            timestamp: 0,
            skew_seconds: SAMPLE_TIMESTAMP as u64
        })
    );
    assert!(matches!(
        SignedHeader::parse_at("v1=aabb", Duration::MAX, sample_now()),
        Err(SignatureError::TimestampExpired { .. })
    ));
}

// ============================================================================
// Candidate filtering
// ============================================================================

#[test]
fn test_invalid_hex_signature_is_skipped() {
    let header = format!(
        "t={},v1=not-hex,v1={}",
        SAMPLE_TIMESTAMP, SAMPLE_SIGNATURE
    );

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.signatures(), &[hex::decode(SAMPLE_SIGNATURE).unwrap()]);
}

/// Only the first `=` separates key and value, so the remainder is the value.
#[test]
fn test_value_is_everything_after_first_separator() {
    let header = format!("t={},v1=aa=bb,v0=ccdd", SAMPLE_TIMESTAMP);

    let parsed = parse(&header).unwrap();

    assert_eq!(parsed.signatures(), &[vec![0xcc, 0xdd]]);
}

#[test]
fn test_no_decodable_signature() {
    let header = format!("t={},v1=zz,v0=abc", SAMPLE_TIMESTAMP);

    assert_eq!(parse(&header), Err(SignatureError::NoValidSignature));
}

#[test]
fn test_timestamp_only_has_no_signature() {
    let header = format!("t={}", SAMPLE_TIMESTAMP);

    assert_eq!(parse(&header), Err(SignatureError::NoValidSignature));
}

// ============================================================================
// Replay window
// ============================================================================

#[test]
fn test_old_timestamp_is_expired() {
    let header = format!("t={},v1={}", SAMPLE_TIMESTAMP - 301, SAMPLE_SIGNATURE);

    assert_eq!(
        parse(&header),
        Err(SignatureError::TimestampExpired {
            timestamp: SAMPLE_TIMESTAMP - 301,
            skew_seconds: 301
        })
    );
}

#[test]
fn test_future_timestamp_is_expired() {
    let header = format!("t={},v1={}", SAMPLE_TIMESTAMP + 301, SAMPLE_SIGNATURE);

    assert!(matches!(
        parse(&header),
        Err(SignatureError::TimestampExpired {
            skew_seconds: 301,
            ..
        })
    ));
}

#[test]
fn test_skew_equal_to_tolerance_is_accepted() {
    let past = format!("t={},v1={}", SAMPLE_TIMESTAMP - 300, SAMPLE_SIGNATURE);
    let future = format!("t={},v1={}", SAMPLE_TIMESTAMP + 300, SAMPLE_SIGNATURE);

    assert!(parse(&past).is_ok());
    assert!(parse(&future).is_ok());
}

#[test]
fn test_zero_tolerance_accepts_only_current_second() {
    let header = format!("t={},v1=aabb", SAMPLE_TIMESTAMP);

    assert!(SignedHeader::parse_at(&header, Duration::ZERO, sample_now()).is_ok());

    let later = sample_now() + chrono::Duration::seconds(1);
    assert!(matches!(
        SignedHeader::parse_at(&header, Duration::ZERO, later),
        Err(SignatureError::TimestampExpired { .. })
    ));
}

/// Verify that the fraction of a second elapsed since `now`'s whole second counts toward the skew
#[test]
fn test_sub_second_skew_beyond_tolerance_is_expired() {
    // Arrange
    let header = "t=1700000000,v1=aabb";
    let now = DateTime::from_timestamp(1_700_000_300, 900_000_000).unwrap();

    // Act
    let result = SignedHeader::parse_at(header, Duration::from_secs(300), now);

    // Assert
    assert!(matches!(
        result,
        Err(SignatureError::TimestampExpired {
            timestamp: 1700000000,
            ..
        })
    ));
}

#[test]
fn test_sub_second_skew_within_tolerance_is_accepted() {
    let now = DateTime::from_timestamp(1_700_000_299, 999_000_000).unwrap();

    let parsed =
        SignedHeader::parse_at("t=1700000000,v1=aabb", Duration::from_secs(300), now).unwrap();

    assert_eq!(parsed.timestamp(), 1700000000);
}

#[test]
fn test_expiry_is_reported_before_missing_signatures() {
    let header = format!("t={},v1=zz", SAMPLE_TIMESTAMP - 3600);

    assert!(matches!(
        parse(&header),
        Err(SignatureError::TimestampExpired { .. })
    ));
    assert!(matches!(
        parse(&format!("t={}", SAMPLE_TIMESTAMP - 3600)),
        Err(SignatureError::TimestampExpired { .. })
    ));
}

#[test]
fn test_timestamp_outside_calendar_range_is_expired() {
    let header = format!("t={},v1=aabb", i64::MAX);

    assert!(matches!(
        SignedHeader::parse_at(&header, Duration::MAX, sample_now()),
        Err(SignatureError::TimestampExpired { .. })
    ));
}

#[test]
fn test_parse_uses_current_time() {
    let header = format!("t={},v1={}", SAMPLE_TIMESTAMP, SAMPLE_SIGNATURE);

    assert!(matches!(
        SignedHeader::parse(&header, Duration::from_secs(1)),
        Err(SignatureError::TimestampExpired { .. })
    ));
    assert!(SignedHeader::parse(&header, Duration::from_secs(65535 * 3600)).is_ok());
}
