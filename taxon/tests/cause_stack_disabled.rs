//! Runs in its own process: the backtrace switch is read once per process.

#[test]
fn test_generic_cause_omits_stack_when_disabled() {
    std::env::set_var("RUST_LIB_BACKTRACE", "0");

    let load = taxon::create("LoadError", [("Io", "read failed")]).unwrap();
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
    let err = load.creator("Io").unwrap().create(anyhow::Error::new(io));

    let json = err.to_json();
    let keys: Vec<_> = json["cause"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["code", "message"]);
}
