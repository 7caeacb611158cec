use std::fs;
use std::path::{Path, PathBuf};

use manarb::testkit::domain::market_json;

/// Write a platform-shaped market document into `dir`.
pub fn write_market(dir: &Path, id: &str, probability: f64, yes: f64, no: f64) -> PathBuf {
    let path = dir.join(format!("{id}.json"));
    fs::write(&path, market_json(id, probability, yes, no)).expect("write market file");
    path
}

/// Write an arbitrary file into `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}
