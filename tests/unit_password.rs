use rollbook::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_a_hash() {
    let hash = hash_password("s3cret-password").unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, "s3cret-password");
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_accepts_the_right_password() {
    let hash = hash_password("s3cret-password").unwrap();

    assert!(verify_password("s3cret-password", &hash).unwrap());
}

#[test]
fn test_verify_password_rejects_the_wrong_password() {
    let hash = hash_password("s3cret-password").unwrap();

    assert!(!verify_password("wrong-password", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let hash1 = hash_password("same-password").unwrap();
    let hash2 = hash_password("same-password").unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password("same-password", &hash1).unwrap());
    assert!(verify_password("same-password", &hash2).unwrap());
}
