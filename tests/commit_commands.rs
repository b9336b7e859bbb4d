use predicates::prelude::predicate;

mod common;

fn committed_tree(dir: &std::path::Path) -> String {
    common::run_kit_command(dir, &["init"]).assert().success();
    common::write_file(dir, "a.txt", "alpha\n");
    common::stdout_of(dir, &["write-tree"]).trim().to_string()
}

#[test]
fn write_commit_object_successfully() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let tree_id = committed_tree(dir.path());

    common::run_kit_command(dir.path(), &["commit-tree", &tree_id, "Initial commit"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);

    Ok(())
}

#[test]
fn commit_payload_carries_tree_author_and_message() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let tree_id = committed_tree(dir.path());

    let commit_id = common::stdout_of(dir.path(), &["commit-tree", &tree_id, "Initial commit"])
        .trim()
        .to_string();

    let payload = common::stdout_of(dir.path(), &["cat-file", "-p", &commit_id]);
    let mut lines = payload.lines();

    assert_eq!(lines.next(), Some(format!("tree {tree_id}").as_str()));

    // root commit: no parent line at all
    let author_line = lines.next().expect("missing author line");
    assert!(
        author_line.starts_with("author Kit Committer <committer@kit.dev> "),
        "unexpected author line: {author_line}"
    );
    let millis = author_line.rsplit(' ').next().unwrap();
    assert!(millis.parse::<i64>().is_ok(), "timestamp is not an integer");

    let committer_line = lines.next().expect("missing committer line");
    assert!(committer_line.starts_with("committer Kit Committer <committer@kit.dev> "));

    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Initial commit"));

    Ok(())
}

#[test]
fn commit_with_parent_emits_parent_line() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let tree_id = committed_tree(dir.path());

    let root_commit = common::stdout_of(dir.path(), &["commit-tree", &tree_id, "first"])
        .trim()
        .to_string();

    let child_commit = common::stdout_of(
        dir.path(),
        &["commit-tree", &tree_id, "-p", &root_commit, "second"],
    )
    .trim()
    .to_string();

    let payload = common::stdout_of(dir.path(), &["cat-file", "-p", &child_commit]);
    let mut lines = payload.lines();

    assert_eq!(lines.next(), Some(format!("tree {tree_id}").as_str()));
    assert_eq!(lines.next(), Some(format!("parent {root_commit}").as_str()));

    Ok(())
}

#[test]
fn commit_tree_rejects_malformed_ids() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    common::run_kit_command(dir.path(), &["init"]).assert().success();

    common::run_kit_command(dir.path(), &["commit-tree", "not-a-sha", "message"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid object ID"));

    Ok(())
}
