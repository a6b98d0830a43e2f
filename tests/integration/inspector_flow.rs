use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use yarnspace::cache::CacheStore;
use yarnspace::error::ApiError;
use yarnspace::workspace::{SELECTED_COMMANDS_KEY, SELECTED_WORKSPACE_KEY};

use crate::integration::support::{harness, possible_commands, ScriptedGateway};

fn two_workspaces() -> ScriptedGateway {
    ScriptedGateway::with_workspaces(json!({
        "lib": { "location": "packages/lib", "workspaceDependencies": [] },
        "web": { "location": "packages/web", "workspaceDependencies": ["lib"] }
    }))
}

#[test]
fn workspaces_are_discovered_once_and_shared() {
    let temp = TempDir::new().unwrap();
    let h = harness(two_workspaces(), &temp.path().join("package.json"));

    let first = h.inspector.workspaces().unwrap();
    let second = h.inspector.workspaces().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(h.gateway.workspace_calls(), 1);
    assert_eq!(h.inspector.workspace_names(), vec!["lib", "web"]);
    assert_eq!(h.gateway.workspace_calls(), 1);
}

#[test]
fn failed_discovery_is_none_and_retried() {
    let temp = TempDir::new().unwrap();
    let h = harness(ScriptedGateway::broken(), &temp.path().join("package.json"));

    assert!(h.inspector.workspaces().is_none());
    assert!(h.inspector.workspace_names().is_empty());
    assert_eq!(h.gateway.workspace_calls(), 2);
}

#[test]
fn check_reports_missing_tool_before_discovery() {
    let temp = TempDir::new().unwrap();
    let h = harness(
        two_workspaces().not_installed(),
        &temp.path().join("package.json"),
    );

    let err = h.inspector.check().unwrap_err();
    assert!(matches!(err, ApiError::ToolNotInstalled(ref tool) if tool == "yarn"));
    assert_eq!(h.gateway.workspace_calls(), 0);
}

#[test]
fn check_requires_workspaces() {
    let temp = TempDir::new().unwrap();
    let empty = harness(
        ScriptedGateway::with_workspaces(json!({})),
        &temp.path().join("package.json"),
    );
    assert!(matches!(
        empty.inspector.check(),
        Err(ApiError::NoWorkspacesFound)
    ));

    let broken = harness(ScriptedGateway::broken(), &temp.path().join("package.json"));
    assert!(matches!(
        broken.inspector.check(),
        Err(ApiError::NoWorkspacesFound)
    ));

    let ok = harness(two_workspaces(), &temp.path().join("package.json"));
    assert!(ok.inspector.check().is_ok());
}

#[test]
fn command_catalog_caches_only_non_empty_results() {
    let temp = TempDir::new().unwrap();
    let gateway = two_workspaces()
        .queue_commands(
            "web",
            &["noise".to_string(), possible_commands(&["build", "test"])],
        )
        .queue_commands("lib", &["noise".to_string(), "more noise".to_string()])
        .queue_commands("lib", &[possible_commands(&["lint"])]);
    let h = harness(gateway, &temp.path().join("package.json"));

    assert_eq!(h.inspector.workspace_commands("web"), vec!["build", "test"]);
    assert_eq!(h.inspector.workspace_commands("web"), vec!["build", "test"]);
    assert_eq!(h.gateway.command_calls(), 1);

    assert!(h.inspector.workspace_commands("lib").is_empty());
    assert_eq!(h.gateway.command_calls(), 2);
    assert_eq!(h.inspector.workspace_commands("lib"), vec!["lint"]);
    assert_eq!(h.gateway.command_calls(), 3);
}

#[test]
fn unknown_workspace_commands_skip_the_tool() {
    let temp = TempDir::new().unwrap();
    let h = harness(two_workspaces(), &temp.path().join("package.json"));

    assert!(h.inspector.workspace_commands("nope").is_empty());
    assert_eq!(h.gateway.command_calls(), 0);
}

#[test]
fn forgetting_a_catalog_fetches_it_again() {
    let temp = TempDir::new().unwrap();
    let gateway = two_workspaces()
        .queue_commands("web", &[possible_commands(&["build"])])
        .queue_commands("web", &[possible_commands(&["build", "serve"])]);
    let h = harness(gateway, &temp.path().join("package.json"));

    assert_eq!(h.inspector.workspace_commands("web"), vec!["build"]);
    assert!(h.inspector.forget_workspace_commands("web"));
    assert!(!h.inspector.forget_workspace_commands("web"));
    assert_eq!(h.inspector.workspace_commands("web"), vec!["build", "serve"]);
}

#[test]
fn selecting_unknown_workspace_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let h = harness(two_workspaces(), &temp.path().join("package.json"));

    let err = h.inspector.set_selected_workspace("unknown").unwrap_err();
    assert!(matches!(err, ApiError::UnknownWorkspace(ref name) if name == "unknown"));
    assert_eq!(h.store.batches_written(), 0);
    assert!(h.store.is_empty());
}

#[test]
fn selecting_without_workspaces_reports_none_found() {
    let temp = TempDir::new().unwrap();
    let h = harness(
        ScriptedGateway::with_workspaces(json!({})),
        &temp.path().join("package.json"),
    );

    let err = h.inspector.set_selected_workspace("unknown").unwrap_err();
    assert!(matches!(err, ApiError::NoWorkspacesFound));
    assert_eq!(h.store.batches_written(), 0);
}

#[test]
fn no_selection_means_no_valid_commands() {
    let temp = TempDir::new().unwrap();
    let h = harness(two_workspaces(), &temp.path().join("package.json"));

    assert!(!h.inspector.is_valid_workspace_command("build").unwrap());
    assert_eq!(h.inspector.selected_workspace().unwrap(), None);
    assert_eq!(h.inspector.selected_workspace_commands().unwrap(), None);
}

#[test]
fn selection_persists_workspace_and_catalog_together() {
    let temp = TempDir::new().unwrap();
    let gateway = two_workspaces().queue_commands("web", &[possible_commands(&["build", "test"])]);
    let h = harness(gateway, &temp.path().join("package.json"));

    let commands = h.inspector.set_selected_workspace("web").unwrap();
    assert_eq!(commands, vec!["build", "test"]);
    assert_eq!(h.store.batches_written(), 1);
    assert_eq!(
        h.store.get(SELECTED_WORKSPACE_KEY).unwrap(),
        Some(json!("web"))
    );
    assert_eq!(
        h.store.get(SELECTED_COMMANDS_KEY).unwrap(),
        Some(json!(["build", "test"]))
    );

    assert_eq!(h.inspector.selected_workspace().unwrap().as_deref(), Some("web"));
    assert!(h.inspector.is_valid_workspace_command("test").unwrap());
    assert!(!h.inspector.is_valid_workspace_command("deploy").unwrap());
}

#[test]
fn selection_with_empty_catalog_still_persists() {
    let temp = TempDir::new().unwrap();
    let h = harness(two_workspaces(), &temp.path().join("package.json"));

    assert!(h.inspector.set_selected_workspace("lib").unwrap().is_empty());
    assert_eq!(h.inspector.selected_workspace().unwrap().as_deref(), Some("lib"));
    assert_eq!(
        h.inspector.selected_workspace_commands().unwrap(),
        Some(Vec::new())
    );
}
