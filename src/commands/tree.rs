//! # Tree Command Implementation
//!
//! Implements `workspace-setup tree`, which displays the nested submodule
//! hierarchy of a workspace as read from the `.gitmodules` files on disk.
//! Submodules that are not checked out are shown but not descended into.
//!
//! This command is a safe, read-only operation that does not run git.

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};

use workspace_setup::manifest::{discover_tree, SubmoduleNode};

use super::resolve_workspace;

/// Display the nested submodule hierarchy of a workspace
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Root directory of the workspace repository
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 1 to show only the workspace's own submodules.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<i32> {
    let workspace = resolve_workspace(&args.workspace)?;
    let nodes = discover_tree(&workspace, args.depth.unwrap_or(usize::MAX))
        .with_context(|| format!("Failed to read submodules of {}", workspace.display()))?;

    let root = TreeNode {
        label: workspace.display().to_string(),
        children: nodes.iter().map(build_tree_node).collect(),
    };
    print_tree(&root).context("Failed to display tree")?;

    Ok(0)
}

/// Build a tree node from a submodule node
fn build_tree_node(node: &SubmoduleNode) -> TreeNode {
    let mut label = format!("{} ({})", node.record.path, node.record.url);
    if !node.checked_out {
        label.push_str(" [not checked out]");
    }
    TreeNode {
        label,
        children: node.children.iter().map(build_tree_node).collect(),
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
