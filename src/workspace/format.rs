//! Format workspace listings, command catalogs, selections, and dependency trees as text.

use crate::types::{DependencyTree, WorkspaceInfo};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render a dependency tree as box-drawing text, one node per line.
///
/// ```text
/// ├─ lib
/// │  ├─ core
/// │  └─ app (root)
/// └─ tools
/// ```
pub fn render_tree(tree: &DependencyTree) -> String {
    let mut out = String::new();
    render_branch(tree, "", &mut out);
    out
}

fn render_branch(tree: &DependencyTree, prefix: &str, out: &mut String) {
    let count = tree.0.len();
    for (i, (name, dependents)) in tree.iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└─ " } else { "├─ " });
        out.push_str(name);
        out.push('\n');
        if let Some(dependents) = dependents {
            let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
            render_branch(dependents, &child_prefix, out);
        }
    }
}

/// Format discovered workspaces as a table.
pub fn format_workspace_list_text(info: &WorkspaceInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Workspaces")));
    if info.is_empty() {
        out.push_str("No workspaces found.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Workspace", "Location", "Depends on", "Mismatched"]);
    for (name, record) in info {
        table.add_row(vec![
            name.clone(),
            record.location.clone().unwrap_or_else(|| "-".to_string()),
            join_or_dash(&record.workspace_dependencies),
            join_or_dash(&record.mismatched_workspace_dependencies),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("\nTotal: {}\n", info.len()));
    out
}

/// Message shown when the workspace listing could not be obtained at all.
pub fn format_discovery_failed_text(program: &str) -> String {
    format!(
        "{}\n\nWorkspaces could not be discovered with {}. Run `yarnspace check` for details.\n",
        format_section_heading("Workspaces"),
        program
    )
}

/// Format a command catalog as an indented list.
pub fn format_commands_text(workspace: &str, commands: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Commands for {}", workspace))
    ));
    if commands.is_empty() {
        out.push_str("No commands found.\n");
        return out;
    }
    for command in commands {
        out.push_str(&format!("  {}\n", command));
    }
    out
}

/// Format the persisted selection.
pub fn format_selection_text(workspace: Option<&str>, commands: Option<&[String]>) -> String {
    match workspace {
        None => "No workspace selected.\n".to_string(),
        Some(workspace) => {
            let mut out = format!("Selected workspace: {}\n", workspace);
            let commands = commands.unwrap_or_default();
            if commands.is_empty() {
                out.push_str("No commands cached.\n");
            } else {
                out.push_str(&format!("Commands: {}\n", commands.join(", ")));
            }
            out
        }
    }
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
