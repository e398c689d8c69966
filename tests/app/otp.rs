use app::cache::OtpStore;
use app::error::TeamError;
use chrono::{Duration, Utc};

#[test]
fn reset_code_expires_after_ten_minutes() {
    let store = OtpStore::new(Duration::minutes(10));
    let issued = Utc::now();

    let code = store.issue_at("Xctf26te0001", issued);
    assert!(store.verify_at("Xctf26te0001", &code, issued + Duration::minutes(10)).is_ok());

    let code = store.issue_at("Xctf26te0001", issued);
    let late = issued + Duration::minutes(10) + Duration::seconds(1);
    assert!(matches!(
        store.verify_at("Xctf26te0001", &code, late),
        Err(TeamError::OtpExpired)
    ));
    assert!(!store.is_pending("Xctf26te0001"));
}

#[test]
fn reset_code_is_single_use() {
    let store = OtpStore::new(Duration::minutes(10));
    let code = store.issue("Xctf26te0001");

    assert!(store.verify("Xctf26te0001", &code).is_ok());
    assert!(matches!(
        store.verify("Xctf26te0001", &code),
        Err(TeamError::OtpMissing)
    ));
}

#[test]
fn stores_are_keyed_independently() {
    let store = OtpStore::new(Duration::minutes(10));
    let first = store.issue("a@example.com");
    let second = store.issue("b@example.com");

    assert_eq!(store.len(), 2);
    assert!(store.verify("b@example.com", &second).is_ok());
    assert!(store.is_pending("a@example.com"));
    assert!(store.verify("a@example.com", &first).is_ok());
    assert!(store.is_empty());
}
