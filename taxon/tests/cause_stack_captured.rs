//! Runs in its own process: the backtrace switch is read once per process.

use serde_json::json;

#[test]
fn test_generic_cause_carries_captured_stack() {
    std::env::set_var("RUST_LIB_BACKTRACE", "1");

    let load = taxon::create("LoadError", [("Io", "read failed")]).unwrap();
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
    let err = load.creator("Io").unwrap().create(anyhow::Error::new(io));

    let cause = &err.to_json()["cause"];
    assert_eq!(cause["code"], json!("UnexpectedEof"));
    assert_eq!(cause["message"], json!("short read"));
    assert!(cause["stack"].as_str().is_some_and(|s| !s.is_empty()), "{}", cause);
}
