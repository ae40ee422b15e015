//! Integration tests for legacy signed payload verification.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bigcommerce_api::auth::hmac::compute_signature;
use bigcommerce_api::auth::signed_payload::{sign_payload, verify_signed_payload};
use bigcommerce_api::SignedPayloadError;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

const SECRET: &str = "test-client-secret";

fn load_callback() -> serde_json::Value {
    json!({
        "user": { "id": 24654, "email": "merchant@example.com" },
        "owner": { "id": 24654, "email": "merchant@example.com" },
        "context": "stores/abc123",
        "store_hash": "abc123",
        "timestamp": 1_469_823_892
    })
}

#[test]
fn test_round_trip() {
    let data = load_callback();
    let payload = sign_payload(&data.to_string(), SECRET);

    assert_eq!(assert_ok!(verify_signed_payload(&payload, SECRET)), data);
}

#[test]
fn test_accepts_hand_built_payload() {
    let json = r#"{"store_hash":"abc123","user":{"id":1,"email":"a@example.com"}}"#;
    let signature = compute_signature(json.as_bytes(), SECRET);
    let payload = format!("{}.{}", STANDARD.encode(json), STANDARD.encode(signature));

    let data = assert_ok!(verify_signed_payload(&payload, SECRET));
    assert_eq!(data["store_hash"], "abc123");
    assert_eq!(data["user"]["id"], 1);
}

#[test]
fn test_accepts_unpadded_segments() {
    let payload = sign_payload(r#"{"a":1}"#, SECRET).replace('=', "");
    assert_ok!(verify_signed_payload(&payload, SECRET));
}

#[test]
fn test_rejects_wrong_secret() {
    let payload = sign_payload(&load_callback().to_string(), SECRET);
    assert_eq!(
        verify_signed_payload(&payload, "other-secret"),
        Err(SignedPayloadError::InvalidSignature)
    );
}

#[test]
fn test_every_single_bit_flip_of_signature_is_rejected() {
    let payload = sign_payload(&load_callback().to_string(), SECRET);
    let (data, signature) = payload.split_once('.').unwrap();

    for index in 0..signature.len() {
        // Bit 7 is skipped so the segment stays ASCII.
        for bit in 0..7 {
            let mut bytes = signature.as_bytes().to_vec();
            bytes[index] ^= 1 << bit;
            let mutated = format!("{data}.{}", String::from_utf8(bytes).unwrap());

            assert_eq!(
                verify_signed_payload(&mutated, SECRET),
                Err(SignedPayloadError::InvalidSignature),
                "flipping bit {bit} of signature byte {index} was accepted"
            );
        }
    }
}

#[test]
fn test_rejects_tampered_data() {
    let payload = sign_payload(r#"{"store_hash":"abc123"}"#, SECRET);
    let (_, signature) = payload.split_once('.').unwrap();
    let forged = format!("{}.{signature}", STANDARD.encode(r#"{"store_hash":"zzz999"}"#));

    assert_eq!(
        verify_signed_payload(&forged, SECRET),
        Err(SignedPayloadError::InvalidSignature)
    );
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        verify_signed_payload("", SECRET),
        Err(SignedPayloadError::MissingPayload)
    );
    assert_eq!(
        verify_signed_payload("no-separator", SECRET),
        Err(SignedPayloadError::MalformedInput)
    );

    let error = assert_err!(verify_signed_payload("!!!.c2ln", SECRET));
    assert!(matches!(error, SignedPayloadError::MalformedPayload { .. }));
}

#[test]
fn test_signed_non_json_is_malformed() {
    let payload = sign_payload("not json", SECRET);
    assert!(matches!(
        verify_signed_payload(&payload, SECRET),
        Err(SignedPayloadError::MalformedPayload { .. })
    ));
}
