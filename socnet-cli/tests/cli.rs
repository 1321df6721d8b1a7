use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn socnet(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("socnet").unwrap();
    cmd.arg("--data").arg(data_dir);
    cmd
}

#[test]
fn user_add_persists_across_invocations() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "add", "1", "Ahmed", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ahmed"));

    socnet(dir.path())
        .args(["user", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User ID: 1, Name: Ahmed, Age: 20"));
}

#[test]
fn duplicate_user_id_is_rejected() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "add", "1", "Ahmed", "20"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["user", "add", "1", "Fatima", "22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn friendship_is_visible_from_both_sides() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "add", "1", "Ahmed", "20"])
        .assert()
        .success();
    socnet(dir.path())
        .args(["user", "add", "2", "Fatima", "22"])
        .assert()
        .success();
    socnet(dir.path())
        .args(["friend", "add", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friendship added"));

    socnet(dir.path())
        .args(["user", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fatima (ID:2)"));
    socnet(dir.path())
        .args(["user", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ahmed (ID:1)"));

    socnet(dir.path())
        .args(["friend", "remove", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friendship removed"));
    socnet(dir.path())
        .args(["friend", "remove", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("were not friends"));
}

#[test]
fn self_friendship_fails() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "add", "1", "Ahmed", "20"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["friend", "add", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot friend themselves"));
}

#[test]
fn post_lifecycle_end_to_end() {
    let dir = tempdir().unwrap();

    for args in [
        ["user", "add", "1", "Ahmed", "20"],
        ["user", "add", "2", "Fatima", "22"],
    ] {
        socnet(dir.path()).args(args).assert().success();
    }

    socnet(dir.path())
        .args(["post", "create", "1", "hello world", "25.3.2025", "--share", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Post 1 created"));

    socnet(dir.path())
        .args(["report", "shared", "--user", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"))
        .stdout(predicate::str::contains("Creator: Ahmed"));

    // Creator delete removes the post from the viewer's report too.
    socnet(dir.path())
        .args(["post", "delete", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Post 1 deleted"));

    socnet(dir.path())
        .args(["report", "shared", "--user", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world").not());

    // Deleting it again is a clean error.
    socnet(dir.path())
        .args(["post", "delete", "1", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn viewer_delete_is_scoped() {
    let dir = tempdir().unwrap();

    for args in [
        ["user", "add", "1", "Ahmed", "20"],
        ["user", "add", "2", "Fatima", "22"],
        ["user", "add", "3", "Khaled", "31"],
    ] {
        socnet(dir.path()).args(args).assert().success();
    }

    socnet(dir.path())
        .args(["post", "create", "3", "from khaled", "1.4.2025", "--share", "1,2"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["post", "delete", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed from user 1's view"));

    socnet(dir.path())
        .args(["report", "shared", "--user", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from khaled").not());
    socnet(dir.path())
        .args(["report", "shared", "--user", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from khaled"));
}

#[test]
fn delete_user_cascades_and_verify_stays_clean() {
    let dir = tempdir().unwrap();

    for args in [
        ["user", "add", "1", "Ahmed", "20"],
        ["user", "add", "2", "Fatima", "22"],
    ] {
        socnet(dir.path()).args(args).assert().success();
    }
    socnet(dir.path())
        .args(["friend", "add", "1", "2"])
        .assert()
        .success();
    socnet(dir.path())
        .args(["post", "create", "1", "doomed", "1.1.2025", "--share", "2"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["user", "delete", "1"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["user", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friends: None"))
        .stdout(predicate::str::contains("Posts shared with user: 0"));

    socnet(dir.path())
        .args(["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no integrity violations"));
}

#[test]
fn operating_on_missing_user_fails() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "update", "9", "Ghost", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user 9 not found"));
}

#[test]
fn post_content_with_commas_is_rejected() {
    let dir = tempdir().unwrap();

    socnet(dir.path())
        .args(["user", "add", "1", "Ahmed", "20"])
        .assert()
        .success();

    socnet(dir.path())
        .args(["post", "create", "1", "a,b", "1.1.2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not contain commas"));
}

#[test]
fn completions_are_generated() {
    Command::cargo_bin("socnet")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("socnet"));
}
