//! Suggestion forests for the demo: a built-in sample or a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use treenav::TreeNode;

use crate::error::DemoError;

/// Read a JSON array of root nodes.
pub fn load(path: &Path) -> Result<Vec<TreeNode>, DemoError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DemoError::Suggestions {
        path: path.to_path_buf(),
        source,
    })
}

fn group(prefix: &str, words: &[(&str, u64)]) -> TreeNode {
    TreeNode::prefix(format!("p:{prefix}"), prefix).children(
        words
            .iter()
            .map(|(word, freq)| TreeNode::word(format!("w:{word}"), *word).frequency(*freq)),
    )
}

pub fn builtin() -> Vec<TreeNode> {
    vec![
        TreeNode::prefix("p:a", "a").children([
            group("ap", &[("apple", 920), ("apply", 610), ("apricot", 95)]),
            group("an", &[("ant", 310), ("anchor", 280), ("angle", 240)]),
            TreeNode::word("w:avocado", "avocado").frequency(150),
        ]),
        TreeNode::prefix("p:b", "b").children([
            group("ba", &[("banana", 870), ("band", 400), ("basil", 120)]),
            group("be", &[("bee", 330), ("berry", 210)]),
        ]),
        TreeNode::prefix("p:c", "c").children([
            group("ca", &[("cat", 990), ("camera", 450), ("canal", 60)]),
            group("ch", &[("cherry", 380), ("chess", 260), ("chair", 500)]),
            group("co", &[("coffee", 940), ("copper", 130), ("coral", 90)]),
        ]),
        TreeNode::prefix("p:x", "x"),
        TreeNode::word("w:zebra", "zebra").frequency(70),
    ]
}
