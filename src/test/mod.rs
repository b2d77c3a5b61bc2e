
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::path::PathBuf;

/// Creates a fresh directory under the system temp dir holding `files`.
pub fn asset_dir(files: &[(&str, &str)]) -> PathBuf {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    let dir = std::env::temp_dir().join(format!("static_http_{suffix}"));

    for (name, contents) in files {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();

    dir
}
