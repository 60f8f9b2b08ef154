//! End-to-end tests for the argonbox container protocol.

use argonbox::container::{self, Modeline, MAGIC};
use argonbox::crypto::{KdfAlgorithm, KdfParams, KdfPreset, SALT_LEN};
use argonbox::errors::ArgonboxError;

// Small-but-valid cost parameters so most tests stay fast; the concrete
// default-parameter scenario below uses the real preset.
fn fast_params() -> KdfParams {
    KdfParams {
        algorithm: KdfAlgorithm::Argon2id,
        version: 0x13,
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_assorted_plaintexts() {
    let cases: &[&[u8]] = &[
        b"",
        b"x",
        b"hello world",
        &[0u8; 1024],
        &[0xFFu8; 33],
        "unicode \u{1F512} text".as_bytes(),
    ];

    for plaintext in cases {
        let sealed = container::seal(plaintext, "passphrase", &fast_params())
            .expect("seal should succeed");
        let opened = container::open(sealed.as_bytes(), "passphrase")
            .expect("open should succeed");
        assert_eq!(&*opened, *plaintext);
    }
}

#[test]
fn hello_world_with_default_parameters() {
    // Default preset, the literal scenario: "hello world" / "correct horse".
    let params = KdfPreset::Default.params();
    let sealed = container::seal(b"hello world", "correct horse", &params).expect("seal");

    let opened = container::open(sealed.as_bytes(), "correct horse").expect("open");
    assert_eq!(&*opened, b"hello world");

    let err = container::open(sealed.as_bytes(), "wrong horse").unwrap_err();
    assert!(matches!(err, ArgonboxError::AuthenticationFailed));
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

/// Corrupt a base64 record by swapping its first alphanumeric character
/// for a different alphabet character.
fn corrupt_record(container_text: &str, record_index: usize) -> String {
    let mut lines: Vec<String> = container_text
        .trim_end()
        .split('\n')
        .map(str::to_string)
        .collect();
    let mut bytes = lines[record_index].clone().into_bytes();
    let pos = bytes
        .iter()
        .position(|b| b.is_ascii_alphanumeric())
        .expect("record should contain base64 characters");
    bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
    lines[record_index] = String::from_utf8(bytes).expect("still ASCII");
    format!("{}\n", lines.join("\n"))
}

#[test]
fn tampered_ciphertext_fails_authentication() {
    let sealed = container::seal(b"important data", "pw", &fast_params()).unwrap();
    let mangled = corrupt_record(&sealed, 3);
    assert_ne!(sealed, mangled);

    let err = container::open(mangled.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::AuthenticationFailed));
}

#[test]
fn tampered_mac_fails_authentication() {
    let sealed = container::seal(b"important data", "pw", &fast_params()).unwrap();
    let mangled = corrupt_record(&sealed, 2);
    assert_ne!(sealed, mangled);

    let err = container::open(mangled.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::AuthenticationFailed));
}

#[test]
fn truncated_mac_is_not_a_prefix_match() {
    let sealed = container::seal(b"important data", "pw", &fast_params()).unwrap();
    let mut lines: Vec<String> = sealed.trim_end().split('\n').map(str::to_string).collect();
    // Keep a valid-base64 prefix of the tag (24 chars = 18 bytes).
    lines[2].truncate(24);
    let mangled = format!("{}\n", lines.join("\n"));

    let err = container::open(mangled.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::AuthenticationFailed));
}

// ---------------------------------------------------------------------------
// Modeline rejection
// ---------------------------------------------------------------------------

#[test]
fn unknown_variant_rejected_before_key_derivation() {
    // Hand-crafted container with an unknown variant. Cost parameters are
    // deliberately absurd: if key derivation ran, this test would need
    // gigabytes of memory rather than failing instantly.
    let salt_b64 = "c2FsdHNhbHRzYWx0c2FsdA==";
    let modeline = format!("$argon2x$v=0d$m=4096,t=3,p=1${salt_b64}");
    let crafted = format!("{MAGIC}\n{modeline}\nAAAA\nAAAA\n");

    let err = container::open(crafted.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::InvalidModeline(_)));
    assert!(err.to_string().contains("argon2x"));
}

#[test]
fn embedded_secret_field_rejected() {
    let sealed = container::seal(b"data", "pw", &fast_params()).unwrap();
    let mut lines: Vec<String> = sealed.trim_end().split('\n').map(str::to_string).collect();
    lines[1] = format!("{}$c3RvbGVuLWtleQ", lines[1]);
    let mangled = format!("{}\n", lines.join("\n"));

    let err = container::open(mangled.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::InvalidModeline(_)));
}

// ---------------------------------------------------------------------------
// Magic marker
// ---------------------------------------------------------------------------

#[test]
fn wrong_magic_beats_well_formed_modeline() {
    // Well-formed modeline and MAC, wrong magic: the magic check must win.
    let sealed = container::seal(b"data", "pw", &fast_params()).unwrap();
    let mangled = sealed.replacen(MAGIC, "lockbox/v1", 1);

    let err = container::open(mangled.as_bytes(), "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::UnrecognizedFormat));

    let err = container::inspect(mangled.as_bytes()).unwrap_err();
    assert!(matches!(err, ArgonboxError::UnrecognizedFormat));
}

#[test]
fn arbitrary_bytes_are_unrecognized() {
    let err = container::open(b"not a container at all", "pw").unwrap_err();
    assert!(matches!(err, ArgonboxError::UnrecognizedFormat));
}

// ---------------------------------------------------------------------------
// Self-description
// ---------------------------------------------------------------------------

#[test]
fn container_embeds_exact_parameters() {
    let params = KdfParams {
        algorithm: KdfAlgorithm::Argon2i,
        version: 0x13,
        memory_kib: 2048,
        iterations: 2,
        parallelism: 2,
    };
    let sealed = container::seal(b"data", "pw", &params).unwrap();

    let modeline = container::inspect(sealed.as_bytes()).unwrap();
    assert_eq!(modeline.params, params);
    assert_eq!(modeline.salt.len(), SALT_LEN);

    // And decryption honors them without being told.
    let opened = container::open(sealed.as_bytes(), "pw").unwrap();
    assert_eq!(&*opened, b"data");
}

#[test]
fn foreign_modeline_field_order_is_honored() {
    // A compatible writer may order the settings differently; reuse our
    // salt and MAC by rewriting only the settings block.
    let sealed = container::seal(b"data", "pw", &fast_params()).unwrap();
    let mut lines: Vec<String> = sealed.trim_end().split('\n').map(str::to_string).collect();
    lines[1] = lines[1].replace("m=1024,t=1,p=1", "p=1,t=1,m=1024");
    let reordered = format!("{}\n", lines.join("\n"));

    let ml = Modeline::decode(&lines[1]).unwrap();
    assert_eq!(ml.params.memory_kib, 1024);

    let opened = container::open(reordered.as_bytes(), "pw").unwrap();
    assert_eq!(&*opened, b"data");
}
