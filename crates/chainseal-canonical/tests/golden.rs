use chainseal_canonical::{
    canonical_bytes, sha256_hex, sha384_hex, sha512_hex, stringify_numbers, to_canonical_json,
    CanonicalError, HashAlgorithm, TenantId,
};
use serde_json::json;

#[test]
fn canonical_json_orders_keys_at_every_level() {
    let value = json!({"b": 1, "a": {"z": true, "m": {"k2": null, "k1": "v"}}});
    let canonical = to_canonical_json(&value).unwrap();
    assert_eq!(canonical, r#"{"a":{"m":{"k1":"v","k2":null},"z":true},"b":1}"#);
}

#[test]
fn canonical_json_preserves_array_order() {
    let value = json!({"items": [3, 1, 2], "tag": "x"});
    let canonical = to_canonical_json(&value).unwrap();
    assert_eq!(canonical, r#"{"items":[3,1,2],"tag":"x"}"#);
}

#[test]
fn canonical_bytes_are_stable_across_key_insertion_order() {
    let a = json!({"actor": "svc:billing", "action": "invoice.create", "outcome": "success"});
    let b = json!({"outcome": "success", "action": "invoice.create", "actor": "svc:billing"});
    assert_eq!(canonical_bytes(&a).unwrap(), canonical_bytes(&b).unwrap());
}

#[test]
fn finite_floats_canonicalize() {
    let value = json!({"metrics": {"latency": 12.5, "requests": 40}});
    assert!(to_canonical_json(&value).is_ok());
}

#[test]
fn serialization_error_carries_message() {
    let err = CanonicalError::Serialization("boom".into());
    assert_eq!(err.to_string(), "canonical serialization failed: boom");
}

#[test]
fn stringify_numbers_recurses_into_arrays_and_objects() {
    let mut value = json!({"count": 3, "nested": {"score": 1.5}, "list": [1, "two", {"n": 7}]});
    stringify_numbers(&mut value);
    assert_eq!(
        value,
        json!({"count": "3", "nested": {"score": "1.5"}, "list": ["1", "two", {"n": "7"}]})
    );
}

#[test]
fn sha256_matches_known_vectors() {
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha384_matches_known_vector() {
    assert_eq!(
        sha384_hex(b"abc"),
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
    );
}

#[test]
fn sha512_matches_known_vector() {
    assert_eq!(
        sha512_hex(b"abc"),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn digest_hex_dispatches_on_algorithm() {
    let data = b"chainseal";
    assert_eq!(HashAlgorithm::Sha256.digest_hex(data), sha256_hex(data));
    assert_eq!(HashAlgorithm::Sha384.digest_hex(data), sha384_hex(data));
    assert_eq!(HashAlgorithm::Sha512.digest_hex(data), sha512_hex(data));
}

#[test]
fn prefixed_digest_matches_concatenation() {
    let prefix = b"chainseal:content:v1\0";
    let data = br#"{"action":"login"}"#;
    let mut joined = prefix.to_vec();
    joined.extend_from_slice(data);
    for alg in HashAlgorithm::ALL {
        assert_eq!(alg.digest_hex_prefixed(prefix, data), alg.digest_hex(&joined));
    }
}

#[test]
fn digest_widths_match_algorithms() {
    for alg in HashAlgorithm::ALL {
        let digest = alg.digest_hex(b"x");
        assert_eq!(digest.len(), alg.hex_len());
        assert!(alg.is_valid_digest(&digest));
    }
}

#[test]
fn digest_validation_rejects_wrong_width_and_case() {
    let digest = sha256_hex(b"x");
    assert!(!HashAlgorithm::Sha384.is_valid_digest(&digest));
    assert!(!HashAlgorithm::Sha256.is_valid_digest(&digest.to_uppercase()));
    assert!(!HashAlgorithm::Sha256.is_valid_digest("zz"));
}

#[test]
fn algorithm_serializes_to_lowercase_names() {
    assert_eq!(
        serde_json::to_string(&HashAlgorithm::Sha256).unwrap(),
        r#""sha256""#
    );
    assert_eq!(
        serde_json::to_string(&HashAlgorithm::Sha512).unwrap(),
        r#""sha512""#
    );
}

#[test]
fn algorithm_parses_wire_names_and_rejects_unknown() {
    assert_eq!("sha384".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha384);
    let err = "md5".parse::<HashAlgorithm>().unwrap_err();
    assert!(err.to_string().contains("md5"));
}

#[test]
fn tenant_id_parses_valid_identifiers() {
    assert!(TenantId::parse("acme").is_ok());
    assert!(TenantId::parse("acme-corp.eu_west-1").is_ok());
    assert!(TenantId::parse("0fleet").is_ok());
}

#[test]
fn tenant_id_rejects_invalid_identifiers() {
    assert!(TenantId::parse("").is_err());
    assert!(TenantId::parse("Acme").is_err());
    assert!(TenantId::parse("-leading-dash").is_err());
    assert!(TenantId::parse("a".repeat(65)).is_err());
}
