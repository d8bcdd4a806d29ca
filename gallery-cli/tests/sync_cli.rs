use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const PAGE: &str = "<html>\n<script>\nconst images = [\n  \"old.png\"\n];\nshow(images);\n</script>\n</html>\n";

fn gallery_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gallery"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn gallery_dir(images: &[&str], page: Option<&str>) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for name in images {
        fs::write(dir.path().join(name), b"\x89PNG\r\n\x1a\n").expect("write image");
    }
    if let Some(page) = page {
        fs::write(dir.path().join("index.html"), page).expect("write page");
    }
    dir
}

fn read_page(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("index.html")).expect("read page")
}

#[test]
fn bare_invocation_rewrites_index_in_working_directory() {
    let dir = gallery_dir(&["b.png", "a.png", "notes.txt"], Some(PAGE));

    gallery_cmd(dir.path())
        .assert()
        .success()
        .stdout(contains("index.html updated with 2 images"));

    assert_eq!(
        read_page(&dir),
        "<html>\n<script>\nconst images = [\n  \"a.png\",\n  \"b.png\"\n];\nshow(images);\n</script>\n</html>\n"
    );
}

#[test]
fn second_sync_leaves_file_byte_identical() {
    let dir = gallery_dir(&["a.png", "b.png"], Some(PAGE));
    gallery_cmd(dir.path()).arg("sync").assert().success();
    let first = fs::read(dir.path().join("index.html")).expect("read");

    gallery_cmd(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("already up to date (2 images)"));
    assert_eq!(fs::read(dir.path().join("index.html")).expect("read"), first);
}

#[test]
fn zero_images_embed_empty_array() {
    let dir = gallery_dir(&[], Some(PAGE));
    gallery_cmd(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("updated with 0 images"));
    assert!(read_page(&dir).contains("const images = [];"));
}

#[test]
fn dry_run_reports_and_writes_nothing() {
    let dir = gallery_dir(&["a.png"], Some(PAGE));
    gallery_cmd(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"));
    assert_eq!(read_page(&dir), PAGE);
}

#[test]
fn page_without_literal_fails_and_is_untouched() {
    let original = "<html><body>no manifest</body></html>\n";
    let dir = gallery_dir(&["a.png"], Some(original));
    gallery_cmd(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("array literal"));
    assert_eq!(read_page(&dir), original);
}

#[test]
fn missing_target_fails() {
    let dir = gallery_dir(&["a.png"], None);
    gallery_cmd(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("target file not found"));
}

#[test]
fn dir_flag_and_overrides_point_elsewhere() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("a.JPG"), b"\x89PNG\r\n\x1a\n").expect("image");
    fs::write(dir.path().join("b.png"), b"\x89PNG\r\n\x1a\n").expect("image");
    fs::write(dir.path().join("photos.html"), "let shots = [];\n").expect("page");
    let elsewhere = TempDir::new().expect("cwd");

    gallery_cmd(elsewhere.path())
        .arg("--dir")
        .arg(dir.path())
        .args(["sync", "--target", "photos.html", "--identifier", "shots", "--ext", "jpg"])
        .assert()
        .success()
        .stdout(contains("photos.html updated with 1 image"));

    assert_eq!(
        fs::read_to_string(dir.path().join("photos.html")).expect("read"),
        "let shots = [\n  \"a.JPG\"\n];\n"
    );
}

#[test]
fn invalid_identifier_is_rejected() {
    let dir = gallery_dir(&["a.png"], Some(PAGE));
    gallery_cmd(dir.path())
        .args(["sync", "--identifier", "2bad"])
        .assert()
        .failure()
        .stderr(contains("invalid identifier"));
    assert_eq!(read_page(&dir), PAGE);
}
