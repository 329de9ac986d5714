use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::Signer as _;
use p256::ecdsa::signature::hazmat::PrehashSigner;
use pkcs8::{DecodePrivateKey, EncodePublicKey, LineEnding};
use rsa::signature::{RandomizedSigner as _, SignatureEncoding as _, Signer as _};

use crate::error::VerifyError;
use crate::types::Tenant;
use crate::verify::{key_type, verify_signature, DigestAlgorithm};

const RSA_PEM: &str = include_str!("../../tests/fixtures/public.pem");
const RSA_PKCS1_PEM: &str = include_str!("../../tests/fixtures/public_pkcs1.pem");
const RSA_PRIVATE_PEM: &str = include_str!("../../tests/fixtures/private.pem");
const OTHER_RSA_PEM: &str = include_str!("../../tests/fixtures/other_public.pem");
const EC_PEM: &str = include_str!("../../tests/fixtures/ec_public.pem");
const ED25519_PEM: &str = include_str!("../../tests/fixtures/ed25519_public.pem");

const SIG_SHA256_B64: &str = include_str!("../../tests/fixtures/signature_sha256.b64");
const SIG_SHA256_HEX: &str = include_str!("../../tests/fixtures/signature_sha256.hex");
const SIG_SHA512_B64: &str = include_str!("../../tests/fixtures/signature_sha512.b64");
const EC_SIG_SHA256_B64: &str = include_str!("../../tests/fixtures/ec_signature_sha256.b64");
const ED25519_SIG_B64: &str = include_str!("../../tests/fixtures/ed25519_signature.b64");

fn tenant(key: &[u8], format: &str, algorithm: &str) -> Tenant {
    Tenant::new(
        "foo".to_string(),
        key.to_vec(),
        format.to_string(),
        algorithm.to_string(),
        None,
    )
}

fn tamper_base64(signature: &str, position: usize) -> String {
    let mut bytes = BASE64.decode(signature).unwrap();
    bytes[position] ^= 0x01;
    BASE64.encode(bytes)
}

// ==================== Golden vectors (openssl dgst / pkeyutl) ====================

#[test]
fn test_rsa_sha256_base64_golden() {
    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(verify_signature(&t, SIG_SHA256_B64.trim()), Ok(true));
}

#[test]
fn test_rsa_sha256_hex_golden() {
    let t = tenant(RSA_PEM.as_bytes(), "hex", "sha256");
    assert_eq!(verify_signature(&t, SIG_SHA256_HEX.trim()), Ok(true));
}

#[test]
fn test_rsa_pkcs1_key_golden() {
    let t = tenant(RSA_PKCS1_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(verify_signature(&t, SIG_SHA256_B64.trim()), Ok(true));
}

#[test]
fn test_rsa_sha512_golden() {
    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha512");
    assert_eq!(verify_signature(&t, SIG_SHA512_B64.trim()), Ok(true));

    // Same key, digest mismatch: well-formed signature that does not verify
    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(verify_signature(&t, SIG_SHA512_B64.trim()), Ok(false));
}

#[test]
fn test_rsa_algorithm_aliases() {
    for alg in ["SHA256", "RSA-SHA256", "rsa-sha256"] {
        let t = tenant(RSA_PEM.as_bytes(), "base64", alg);
        assert_eq!(
            verify_signature(&t, SIG_SHA256_B64.trim()),
            Ok(true),
            "alias {alg}"
        );
    }
}

#[test]
fn test_ecdsa_p256_golden() {
    let t = tenant(EC_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(verify_signature(&t, EC_SIG_SHA256_B64.trim()), Ok(true));
}

#[test]
fn test_ed25519_golden() {
    let t = tenant(ED25519_PEM.as_bytes(), "base64", "ed25519");
    assert_eq!(verify_signature(&t, ED25519_SIG_B64.trim()), Ok(true));
}

// ==================== Rejections ====================

#[test]
fn test_wrong_key_does_not_verify() {
    let t = tenant(OTHER_RSA_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(verify_signature(&t, SIG_SHA256_B64.trim()), Ok(false));
}

#[test]
fn test_wrong_challenge_does_not_verify() {
    let t = Tenant::new(
        "bar".to_string(),
        RSA_PEM.as_bytes().to_vec(),
        "base64".to_string(),
        "sha256".to_string(),
        None,
    );
    assert_eq!(verify_signature(&t, SIG_SHA256_B64.trim()), Ok(false));
}

#[test]
fn test_single_byte_tamper_rejected_for_every_key_type() {
    let cases = [
        (RSA_PEM, "sha256", SIG_SHA256_B64),
        (EC_PEM, "sha256", EC_SIG_SHA256_B64),
        (ED25519_PEM, "ed25519", ED25519_SIG_B64),
    ];

    for (key, alg, sig) in cases {
        let t = tenant(key.as_bytes(), "base64", alg);
        let raw_len = BASE64.decode(sig.trim()).unwrap().len();
        for position in [0, raw_len / 2, raw_len - 1] {
            let tampered = tamper_base64(sig.trim(), position);
            let result = verify_signature(&t, &tampered);
            assert!(
                !matches!(result, Ok(true)),
                "{alg} signature with byte {position} flipped must not verify"
            );
        }
    }
}

#[test]
fn test_unsupported_algorithm() {
    let t = tenant(RSA_PEM.as_bytes(), "base64", "md4");
    assert!(matches!(
        verify_signature(&t, SIG_SHA256_B64.trim()),
        Err(VerifyError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn test_unsupported_encoding() {
    let t = tenant(RSA_PEM.as_bytes(), "utf16le", "sha256");
    assert!(matches!(
        verify_signature(&t, SIG_SHA256_B64.trim()),
        Err(VerifyError::UnsupportedEncoding(_))
    ));
}

#[test]
fn test_malformed_signature_text() {
    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha256");
    let prefixed = format!("x{}", SIG_SHA256_B64.trim());
    assert!(matches!(
        verify_signature(&t, &prefixed),
        Err(VerifyError::InvalidEncoding { .. })
    ));
}

#[test]
fn test_rsa_signature_length_checked() {
    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha256");
    let short = BASE64.encode([0u8; 16]);
    assert!(matches!(
        verify_signature(&t, &short),
        Err(VerifyError::InvalidSignature(_))
    ));
}

#[test]
fn test_malformed_key() {
    let t = tenant(b"bar", "base64", "sha256");
    assert!(matches!(
        verify_signature(&t, SIG_SHA256_B64.trim()),
        Err(VerifyError::InvalidKey(_))
    ));
    assert!(key_type(&t).is_err());
}

#[test]
fn test_key_algorithm_mismatch() {
    let t = tenant(ED25519_PEM.as_bytes(), "base64", "sha256");
    assert_eq!(
        verify_signature(&t, ED25519_SIG_B64.trim()),
        Err(VerifyError::KeyAlgorithmMismatch {
            algorithm: "sha256".to_string(),
            key_type: "Ed25519",
        })
    );

    let t = tenant(RSA_PEM.as_bytes(), "base64", "ed25519");
    assert!(matches!(
        verify_signature(&t, SIG_SHA256_B64.trim()),
        Err(VerifyError::KeyAlgorithmMismatch { key_type: "RSA", .. })
    ));
}

#[test]
fn test_key_type_reporting() {
    assert_eq!(key_type(&tenant(RSA_PEM.as_bytes(), "base64", "sha256")), Ok("RSA"));
    assert_eq!(
        key_type(&tenant(EC_PEM.as_bytes(), "base64", "sha256")),
        Ok("ECDSA P-256")
    );
    assert_eq!(
        key_type(&tenant(ED25519_PEM.as_bytes(), "base64", "ed25519")),
        Ok("Ed25519")
    );
}

// ==================== Freshly signed vectors ====================

#[test]
fn test_fresh_ed25519_key() {
    let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::thread_rng());
    let pem = signing_key
        .verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    let signature = signing_key.sign(b"foo");

    let t = tenant(pem.as_bytes(), "base64url", "ed25519");
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature.to_bytes());
    assert_eq!(verify_signature(&t, &encoded), Ok(true));
}

#[test]
fn test_fresh_p256_key_sha384() {
    let signing_key = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
    let pem = signing_key
        .verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    let prehash = DigestAlgorithm::Sha384.digest(b"foo");
    let signature: p256::ecdsa::Signature = signing_key.sign_prehash(&prehash).unwrap();
    let der = signature.to_der();

    let t = tenant(pem.as_bytes(), "hex", "sha384");
    assert_eq!(verify_signature(&t, &hex::encode(der.as_bytes())), Ok(true));

    let t = tenant(pem.as_bytes(), "hex", "sha256");
    assert_eq!(verify_signature(&t, &hex::encode(der.as_bytes())), Ok(false));
}

#[test]
fn test_fresh_rsa_signatures_each_digest() {
    let private_key = rsa::RsaPrivateKey::from_pkcs8_pem(RSA_PRIVATE_PEM).unwrap();

    let sha224 = rsa::pkcs1v15::SigningKey::<sha2::Sha224>::new(private_key.clone())
        .sign(b"foo")
        .to_vec();
    let sha384 = rsa::pkcs1v15::SigningKey::<sha2::Sha384>::new(private_key)
        .sign_with_rng(&mut rand::thread_rng(), b"foo")
        .to_vec();

    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha224");
    assert_eq!(verify_signature(&t, &BASE64.encode(&sha224)), Ok(true));

    let t = tenant(RSA_PEM.as_bytes(), "base64", "sha384");
    assert_eq!(verify_signature(&t, &BASE64.encode(&sha384)), Ok(true));
}
