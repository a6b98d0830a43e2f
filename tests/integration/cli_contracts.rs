use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use yarnspace::cache::{CacheStore, MemoryCacheStore, SledCacheStore};
use yarnspace::config::YarnspaceConfig;
use yarnspace::error::ApiError;
use yarnspace::tooling::cli::{CliContext, Commands};

use crate::integration::support::{possible_commands, ScriptedGateway};

fn context(root: PathBuf, gateway: ScriptedGateway, store: Arc<dyn CacheStore>) -> CliContext {
    CliContext::with_parts(root, YarnspaceConfig::default(), Arc::new(gateway), store)
}

fn monorepo() -> ScriptedGateway {
    ScriptedGateway::with_workspaces(json!({
        "lib": { "location": "packages/lib" },
        "web": { "location": "packages/web", "workspaceDependencies": ["lib"] }
    }))
    .queue_commands("web", &[possible_commands(&["build", "dev"])])
}

#[test]
fn list_json_contract_has_workspace_records() {
    let temp = TempDir::new().unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let output = cli
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let names: Vec<&String> = parsed.as_object().unwrap().keys().collect();
    assert_eq!(names.len(), 2);
    assert_eq!(
        parsed["web"]["workspaceDependencies"],
        json!(["lib"])
    );
}

#[test]
fn select_then_selected_and_validate_json_contracts() {
    let temp = TempDir::new().unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let output = cli
        .execute(&Commands::Select {
            workspace: Some("web".to_string()),
        })
        .unwrap();
    assert!(output.contains("web"));

    let output = cli
        .execute(&Commands::Selected {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, json!({ "workspace": "web", "commands": ["build", "dev"] }));

    let output = cli
        .execute(&Commands::Validate {
            command: "dev".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, json!({ "command": "dev", "valid": true }));
}

#[test]
fn selection_survives_a_new_session() {
    let temp = TempDir::new().unwrap();
    let cache_path = temp.path().join("cache");
    {
        let store = Arc::new(SledCacheStore::open(&cache_path).unwrap());
        let cli = context(temp.path().to_path_buf(), monorepo(), store);
        cli.execute(&Commands::Select {
            workspace: Some("web".to_string()),
        })
        .unwrap();
    }

    let store = Arc::new(SledCacheStore::open(&cache_path).unwrap());
    let cli = context(temp.path().to_path_buf(), ScriptedGateway::broken(), store);
    let output = cli
        .execute(&Commands::Selected {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(output, "Selected workspace: web\nCommands: build, dev\n");
}

#[test]
fn info_json_contract_is_nested_tree() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("package.json"),
        r#"{"name":"mono","devDependencies":{"web":"*"}}"#,
    )
    .unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let output = cli
        .execute(&Commands::Info {
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, json!({ "lib": { "web": { "mono (root)": null } } }));
}

#[test]
fn select_unknown_surfaces_error() {
    let temp = TempDir::new().unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let err = cli
        .execute(&Commands::Select {
            workspace: Some("api".to_string()),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownWorkspace(_)));
    assert_eq!(err.to_string(), "Cannot find selected workspace api!");
}

#[test]
fn config_command_prints_parseable_toml() {
    let temp = TempDir::new().unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let output = cli.execute(&Commands::Config).unwrap();
    let parsed: YarnspaceConfig = toml::from_str(&output).unwrap();
    assert_eq!(parsed.tool.program, "yarn");
    assert_eq!(parsed.manifest.path, PathBuf::from("package.json"));
}

#[test]
fn info_text_is_empty_when_there_is_nothing_to_show() {
    let temp = TempDir::new().unwrap();
    let info = Commands::Info {
        format: "text".to_string(),
    };

    let empty = context(
        temp.path().to_path_buf(),
        ScriptedGateway::with_workspaces(json!({})),
        Arc::new(MemoryCacheStore::new()),
    );
    assert_eq!(empty.execute(&info).unwrap(), "");

    let broken = context(
        temp.path().to_path_buf(),
        ScriptedGateway::broken(),
        Arc::new(MemoryCacheStore::new()),
    );
    assert_eq!(broken.execute(&info).unwrap(), "");
}

#[test]
fn info_text_has_heading_and_tree_when_roots_exist() {
    let temp = TempDir::new().unwrap();
    let cli = context(
        temp.path().to_path_buf(),
        monorepo(),
        Arc::new(MemoryCacheStore::new()),
    );

    let output = cli
        .execute(&Commands::Info {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Dependency tree"));
    assert!(output.ends_with("└─ lib\n   └─ web"));
}

#[test]
fn list_distinguishes_failed_discovery_from_empty() {
    let temp = TempDir::new().unwrap();
    let list = |format: &str| Commands::List {
        format: format.to_string(),
    };

    let broken = context(
        temp.path().to_path_buf(),
        ScriptedGateway::broken(),
        Arc::new(MemoryCacheStore::new()),
    );
    assert_eq!(broken.execute(&list("json")).unwrap(), "null");
    let failed_text = broken.execute(&list("text")).unwrap();
    assert!(failed_text.contains("could not be discovered"));

    let empty = context(
        temp.path().to_path_buf(),
        ScriptedGateway::with_workspaces(json!({})),
        Arc::new(MemoryCacheStore::new()),
    );
    assert_eq!(empty.execute(&list("json")).unwrap(), "{}");
    let empty_text = empty.execute(&list("text")).unwrap();
    assert!(empty_text.contains("No workspaces found."));
    assert_ne!(failed_text, empty_text);
}

#[test]
fn cache_is_not_opened_by_commands_that_skip_the_selection() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("yarnspace.toml");
    std::fs::write(&config_path, "[cache]\npath = \".yarnspace/cache\"\n").unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_path)).unwrap();
    cli.execute(&Commands::Config).unwrap();
    assert!(!temp.path().join(".yarnspace").exists());

    let output = cli
        .execute(&Commands::Selected {
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(output, "No workspace selected.\n");
    assert!(temp.path().join(".yarnspace/cache").exists());
}
