use std::fs;

use qsim::config::QsimConfig;

#[test]
fn missing_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = QsimConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap();
    assert_eq!(cfg, QsimConfig::default());
    assert_eq!(QsimConfig::load(None).unwrap().registers, 16);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "side = 2\ntrace = true\n").unwrap();
    let cfg = QsimConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(cfg.side, 2);
    assert!(cfg.trace);
    assert_eq!(cfg.registers, 16);
    assert_eq!(cfg.prompt, "qsim");
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = QsimConfig { registers: 4, side: 2, log_level: "debug".into(), ..QsimConfig::default() };
    cfg.save(&path).unwrap();
    assert_eq!(QsimConfig::load(Some(path.as_path())).unwrap(), cfg);
}

#[test]
fn rejects_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    fs::write(&path, "qubits = 3\n").unwrap();
    assert!(QsimConfig::load(Some(path.as_path())).is_err());

    fs::write(&path, "side = 0\n").unwrap();
    let err = QsimConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("side must be at least 1"), "{}", err);
}
