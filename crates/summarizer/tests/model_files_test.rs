use std::fs;
use std::path::Path;

use summarizer::model_ref::{HubSettings, ModelFiles, parse_model_ref, resolve_model_files};
use summarizer::{InitializationError, ModelArchitecture, ModelRef, Summarizer, SummarizerConfig};
use tempfile::TempDir;

fn write_files(dir: &Path, model_type: &str, files: &[&str]) {
    fs::write(
        dir.join("config.json"),
        format!(r#"{{"model_type": "{model_type}", "d_model": 16}}"#),
    )
    .expect("write config");
    for name in files {
        fs::write(dir.join(name), b"stub").expect("write model file");
    }
}

fn resolve(dir: &Path) -> Result<ModelFiles, InitializationError> {
    let model = parse_model_ref(&format!("file:{}", dir.display()))?;
    resolve_model_files(&model, &HubSettings::default())
}

#[test]
fn resolves_local_bart_directory() {
    let dir = TempDir::new().expect("temp dir");
    write_files(
        dir.path(),
        "bart",
        &["vocab.json", "merges.txt", "rust_model.ot"],
    );

    let files = resolve(dir.path()).expect("resolve");
    assert_eq!(files.architecture, ModelArchitecture::Bart);
    assert_eq!(files.config, dir.path().join("config.json"));
    assert_eq!(files.vocab, dir.path().join("vocab.json"));
    assert_eq!(files.merges, Some(dir.path().join("merges.txt")));
    assert_eq!(files.weights, dir.path().join("rust_model.ot"));
}

#[test]
fn resolves_local_t5_directory_without_merges() {
    let dir = TempDir::new().expect("temp dir");
    write_files(dir.path(), "t5", &["spiece.model", "rust_model.ot"]);

    let files = resolve(dir.path()).expect("resolve");
    assert_eq!(files.architecture, ModelArchitecture::T5);
    assert_eq!(files.vocab, dir.path().join("spiece.model"));
    assert!(files.merges.is_none());
}

#[test]
fn plain_directory_path_is_a_local_model() {
    let dir = TempDir::new().expect("temp dir");
    let raw = dir.path().display().to_string();
    assert_eq!(
        parse_model_ref(&raw).expect("parse"),
        ModelRef::LocalDir(dir.path().to_path_buf())
    );
}

#[test]
fn missing_weights_are_reported() {
    let dir = TempDir::new().expect("temp dir");
    write_files(dir.path(), "bart", &["vocab.json", "merges.txt"]);

    let err = resolve(dir.path()).unwrap_err();
    match err {
        InitializationError::MissingFile(path) => assert!(path.ends_with("rust_model.ot")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unsupported_architecture_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    write_files(dir.path(), "gpt2", &["vocab.json", "merges.txt", "rust_model.ot"]);

    assert!(matches!(
        resolve(dir.path()),
        Err(InitializationError::UnsupportedModel(_))
    ));
}

#[test]
fn config_without_model_type_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("config.json"), "{}").expect("write config");

    assert!(matches!(
        resolve(dir.path()),
        Err(InitializationError::UnsupportedModel(_))
    ));
}

#[test]
fn malformed_config_is_a_json_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("config.json"), "not json").expect("write config");

    assert!(matches!(
        resolve(dir.path()),
        Err(InitializationError::Json(_))
    ));
}

#[test]
fn nonexistent_directory_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nope");
    let model = ModelRef::LocalDir(missing);
    assert!(matches!(
        resolve_model_files(&model, &HubSettings::default()),
        Err(InitializationError::InvalidModelRef(_))
    ));
}

#[test]
fn construction_fails_for_invalid_identifier() {
    let result = Summarizer::new("not-a-model");
    assert!(matches!(
        result,
        Err(InitializationError::InvalidModelRef(_))
    ));
}

#[test]
fn construction_fails_for_incomplete_local_model() {
    let dir = TempDir::new().expect("temp dir");
    write_files(dir.path(), "bart", &["vocab.json"]);

    let cfg = SummarizerConfig {
        model: format!("file:{}", dir.path().display()),
        device: summarizer::DeviceKind::Cpu,
        ..SummarizerConfig::default()
    };
    assert!(matches!(
        Summarizer::from_config(cfg),
        Err(InitializationError::MissingFile(_))
    ));
}

#[test]
fn unlogged_construction_reports_the_same_error() {
    let dir = TempDir::new().expect("temp dir");
    write_files(dir.path(), "bart", &["vocab.json"]);

    let cfg = SummarizerConfig {
        model: format!("file:{}", dir.path().display()),
        device: summarizer::DeviceKind::Cpu,
        ..SummarizerConfig::default()
    };
    let quiet = Summarizer::try_from_config(&cfg).err().expect("load should fail");
    let logged = Summarizer::from_config(cfg).err().expect("load should fail");
    assert!(matches!(quiet, InitializationError::MissingFile(_)));
    assert_eq!(quiet.to_string(), logged.to_string());

    let invalid = SummarizerConfig::for_model("not-a-model");
    assert!(matches!(
        Summarizer::try_from_config(&invalid),
        Err(InitializationError::InvalidModelRef(_))
    ));
}
