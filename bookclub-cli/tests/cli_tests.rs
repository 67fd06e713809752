//! Integration tests for the Bookclub CLI

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::Value;

/// The binary pointed at a mock provider, isolated from the caller's keys
fn bookclub(server: &Server) -> Command {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.env("BOOKCLUB_CATALOG_URL", server.url())
        .env("BOOKCLUB_LISTS_URL", server.url())
        .env_remove("GOOGLE_BOOKS_API_KEY")
        .env_remove("NYT_API_KEY");
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("home"))
        .stdout(predicate::str::contains("bestsellers"))
        .stdout(predicate::str::contains("details"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookclub"));
}

#[test]
fn test_search_help() {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search the book catalog"))
        .stdout(predicate::str::contains("--max"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_search_requires_query() {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_zero_max_rejected() {
    let mut cmd = Command::cargo_bin("bookclub").unwrap();
    cmd.args(["search", "dune", "--max", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_search_json() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "dune".into()),
            Matcher::UrlEncoded("maxResults".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items": [{"id": "abc", "volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"]}}]}"#,
        )
        .create();

    let output = bookclub(&server)
        .args(["search", "dune", "--max", "3", "--json"])
        .output()
        .unwrap();

    mock.assert();
    assert!(output.status.success());
    let books: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(books[0]["external_id"], "abc");
    assert_eq!(books[0]["authors"][0], "Frank Herbert");
}

#[test]
fn test_search_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items": [{"id": "abc", "volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"]}}]}"#)
        .create();

    bookclub(&server)
        .args(["search", "dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Dune by Frank Herbert [abc]"));
}

#[test]
fn test_search_provider_down() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    bookclub(&server)
        .args(["search", "dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books found."));
}

#[test]
fn test_bestsellers_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/lists/current/hardcover-fiction.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"results": {"list_name": "Hardcover Fiction", "books": [
                {"title": "FOURTH WING", "author": "Rebecca Yarros", "rank": 1},
                {"title": "THE WOMEN", "author": "Kristin Hannah", "rank": 2}
            ]}}"#,
        )
        .create();

    bookclub(&server)
        .args(["bestsellers", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 FOURTH WING by Rebecca Yarros"))
        .stdout(predicate::str::contains("THE WOMEN").not());
}

#[test]
fn test_details_not_found() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/volumes/missing")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    bookclub(&server)
        .args(["details", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Book not found: missing"));
}

#[test]
fn test_details_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/volumes/abc")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id": "abc", "volumeInfo": {"title": "Dune", "publishedDate": "1965",
                "description": "<p>A desert planet.</p>"}}"#,
        )
        .create();

    bookclub(&server)
        .args(["details", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:       Dune"))
        .stdout(predicate::str::contains("Published:   1965"))
        .stdout(predicate::str::contains("Description: A desert planet."));
}
