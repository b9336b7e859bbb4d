use predicates::prelude::predicate;

mod common;

#[test]
fn init_repository_successfully() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    common::run_kit_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized git directory"));

    assert!(dir.path().join(".git").join("objects").is_dir());
    assert!(dir.path().join(".git").join("refs").is_dir());

    let head = std::fs::read_to_string(dir.path().join(".git").join("HEAD"))?;
    assert_eq!(head, "ref: refs/heads/main\n");

    Ok(())
}

#[test]
fn init_repository_at_explicit_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let target = dir.path().join("nested").join("repo");

    common::run_kit_command(dir.path(), &["init", target.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized git directory"));

    assert!(target.join(".git").join("objects").is_dir());
    assert!(target.join(".git").join("refs").is_dir());

    Ok(())
}

#[test]
fn init_twice_is_harmless() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    common::run_kit_command(dir.path(), &["init"]).assert().success();
    common::run_kit_command(dir.path(), &["init"]).assert().success();

    let head = std::fs::read_to_string(dir.path().join(".git").join("HEAD"))?;
    assert_eq!(head, "ref: refs/heads/main\n");

    Ok(())
}
