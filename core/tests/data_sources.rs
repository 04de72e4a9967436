// core/tests/data_sources.rs
//
// Integration tests for loading data from disk.
//
// Tests cover:
// - DataDir reading the standard text files
// - Compiled fst + bincode artifacts taking precedence over text
// - Fallback to text when the compiled pair is inconsistent
// - Missing files leaving a usable, empty engine

use cantoinput_core::{
    Config, DataDir, DataProvider, Dictionary, ImeEngine, ImeSession, InputMethod, KeyEvent,
    KeyOutcome, Modifiers,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cantoinput_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn data_dir_reads_text_files() {
    let dir = scratch_dir("text");
    fs::write(dir.join("input-jyutping.utf-8"), "nei5 你 妳\nnei5hou2 你好\n").expect("write dict");
    fs::write(dir.join("trad-simp.utf-8"), "妳 你\n").expect("write conv");
    fs::write(dir.join("punct.utf-8"), ". ．\n").expect("write punct");

    let data = DataDir::new(&dir);
    let dict = data.dictionary(InputMethod::Jyutping);
    assert_eq!(dict.len(), 2);
    assert_eq!(data.conversion_table().convert("妳"), "你");
    assert_eq!(data.punctuation_table().get('.'), Some("．"));
    assert_eq!(data.punctuation_table().get(','), None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn compiled_artifacts_take_precedence() {
    let dir = scratch_dir("compiled");
    fs::write(dir.join("input-yale.utf-8"), "neih 妳\n").expect("write dict");

    let compiled = Dictionary::parse("neih 你\nngoh 我\n");
    let data = DataDir::new(&dir);
    let (fst_path, bincode_path) = data.compiled_paths(InputMethod::Yale);
    compiled.save_compiled(&fst_path, &bincode_path).expect("save compiled");

    let dict = data.dictionary(InputMethod::Yale);
    assert_eq!(dict.get("neih"), Some("你"));
    assert_eq!(dict.entries(), compiled.entries());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inconsistent_compiled_pair_falls_back_to_text() {
    let dir = scratch_dir("mismatch");
    fs::write(dir.join("input-yale.utf-8"), "neih 妳\n").expect("write dict");

    let data = DataDir::new(&dir);
    let (fst_path, bincode_path) = data.compiled_paths(InputMethod::Yale);
    Dictionary::parse("neih 你\n")
        .save_compiled(&fst_path, &bincode_path)
        .expect("save compiled");
    // Payload vector no longer matches the key count
    let payloads: Vec<String> = vec!["你".into(), "我".into()];
    fs::write(&bincode_path, bincode::serialize(&payloads).expect("serialize")).expect("write");

    assert!(Dictionary::load_compiled(&fst_path, &bincode_path).is_err());
    assert_eq!(data.dictionary(InputMethod::Yale).get("neih"), Some("妳"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_data_leaves_engine_usable() {
    let dir = scratch_dir("empty");
    let engine = ImeEngine::new(DataDir::new(&dir), Config::default());
    let mut session = ImeSession::new();

    let out = engine.process_key(&mut session, KeyEvent::Char('n'), Modifiers::NONE);
    assert_eq!(out, KeyOutcome::handled());
    assert!(!session.has_candidates());
    let out = engine.process_key(&mut session, KeyEvent::Char('.'), Modifiers::NONE);
    assert_eq!(out, KeyOutcome::commit("。"));

    let _ = fs::remove_dir_all(&dir);
}
