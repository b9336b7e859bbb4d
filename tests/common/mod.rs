#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.current_dir(dir).args(args);
    cmd
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_kit_command(dir, args)
        .output()
        .expect("Failed to run kit command");
    assert!(
        output.status.success(),
        "kit {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Non-utf8 command output")
}

pub fn write_file(dir: &Path, relative_path: &str, content: &str) {
    let path = dir.join(relative_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {parent:?}: {e}"));
    }
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write file {path:?}: {e}"));
}
