use rand::{SeedableRng, rngs::StdRng};
use sportop::{
    Error,
    pkce::{
        PkcePair, UNRESERVED_CHARSET, generate_code_challenge, generate_code_verifier,
        generate_code_verifier_with,
    },
};

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier(128).unwrap();

    // Should be exactly the requested length
    assert_eq!(verifier.len(), 128);

    // Should only contain unreserved characters
    assert!(verifier.bytes().all(|b| UNRESERVED_CHARSET.contains(&b)));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier(128).unwrap();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_verifier_bounds() {
    assert_eq!(generate_code_verifier(43).unwrap().len(), 43);

    assert!(matches!(
        generate_code_verifier(42),
        Err(Error::InvalidVerifierLength(42))
    ));
    assert!(matches!(
        generate_code_verifier(129),
        Err(Error::InvalidVerifierLength(129))
    ));
}

#[test]
fn test_generate_code_verifier_with_seeded_rng() {
    // Same seed, same verifier
    let a = generate_code_verifier_with(&mut StdRng::seed_from_u64(7), 64).unwrap();
    let b = generate_code_verifier_with(&mut StdRng::seed_from_u64(7), 64).unwrap();
    assert_eq!(a, b);

    let c = generate_code_verifier_with(&mut StdRng::seed_from_u64(8), 64).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_generate_code_challenge_rfc7636_vector() {
    // RFC 7636, Appendix B
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    assert_eq!(
        generate_code_challenge(verifier),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_generate_code_challenge() {
    let verifier = generate_code_verifier(128).unwrap();
    let challenge = generate_code_challenge(&verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(&verifier));

    // SHA-256 is 32 bytes, 43 characters once base64url-encoded without padding
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('='));
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));
}

#[test]
fn test_pkce_pair() {
    let pair = PkcePair::generate(96).unwrap();
    assert_eq!(pair.verifier.len(), 96);
    assert_eq!(pair.challenge, generate_code_challenge(&pair.verifier));

    let fixed = PkcePair::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_string());
    assert_eq!(fixed.challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}
