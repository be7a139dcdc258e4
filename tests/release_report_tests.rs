mod common;

use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tokio::task;
use warp::Filter;

use common::{SESSION_COOKIE, session_routes};

fn write_config(addr: std::net::SocketAddr) -> assert_fs::NamedTempFile {
    let config_file = assert_fs::NamedTempFile::new("jira.yaml").unwrap();
    config_file
        .write_str(&format!("base_url: http://{addr}\nproject_key: ABC\n"))
        .unwrap();
    config_file
}

#[tokio::test]
async fn release_report_prints_closed_issues_grouped_by_type() {
    let search_route = warp::path!("rest" / "api" / "2" / "search")
        .and(warp::get())
        .and(warp::header::exact("cookie", SESSION_COOKIE))
        .map(|| {
            warp::reply::json(&json!({
                "issues": [
                    {
                        "key": "ABC-1",
                        "fields": {
                            "description": "Fix login",
                            "status": { "id": "6" },
                            "issuetype": { "id": "1" }
                        }
                    },
                    {
                        "key": "ABC-4",
                        "fields": {
                            "description": "Speed up search",
                            "status": { "id": "6" },
                            "issuetype": { "id": "4" }
                        }
                    }
                ]
            }))
        });
    let routes = session_routes().or(search_route);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    let config_file = write_config(addr);

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("jira-connector");
        cmd.env("JIRA_USERNAME", "mockuser")
            .env("JIRA_PASSWORD", "secret")
            .args(["release-report", "-c"])
            .arg(config_file.path())
            .args(["-r", "10001"]);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("** Bug"))
            .stdout(predicate::str::contains("\t * [ABC-1] - Fix login"))
            .stdout(predicate::str::contains("** Improvement"))
            .stdout(predicate::str::contains("\t * [ABC-4] - Speed up search"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn release_report_without_closed_issues_says_so() {
    let search_route = warp::path!("rest" / "api" / "2" / "search")
        .and(warp::get())
        .and(warp::header::exact("cookie", SESSION_COOKIE))
        .map(|| warp::reply::json(&json!({ "issues": [] })));
    let routes = session_routes().or(search_route);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    let config_file = write_config(addr);

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("jira-connector");
        cmd.env("JIRA_USERNAME", "mockuser")
            .env("JIRA_PASSWORD", "secret")
            .args(["release-report", "-c"])
            .arg(config_file.path())
            .args(["-r", "10001"]);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("No closed issues in release 10001"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn close_release_with_unknown_name_fails() {
    let versions_route = warp::path!("rest" / "api" / "2" / "project" / String / "versions")
        .and(warp::get())
        .and(warp::header::exact("cookie", SESSION_COOKIE))
        .map(|_project: String| {
            warp::reply::json(&json!([{ "id": "10001", "name": "1.0", "released": false }]))
        });
    let routes = session_routes().or(versions_route);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    let config_file = write_config(addr);

    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("jira-connector");
        cmd.env("JIRA_USERNAME", "mockuser")
            .env("JIRA_PASSWORD", "secret")
            .args(["close-release", "-c"])
            .arg(config_file.path())
            .args(["-n", "2.0"]);
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("release not found: 2.0"));
    })
    .await
    .unwrap();
}
