//! Definition index for cross-file call resolution

use std::collections::HashMap;

/// Maps function names to node ids and remembers where each file's functions start.
///
/// Name lookup is last-write-wins: when several files define the same name,
/// the most recently inserted definition shadows the rest.
#[derive(Debug, Default)]
pub struct DefinitionIndex {
    definitions: HashMap<String, String>,
    /// file path -> (line, node id), sorted by line once frozen
    file_functions: HashMap<String, Vec<(u32, String)>>,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function definition under `name`.
    pub fn insert(&mut self, name: &str, node_id: String) {
        self.definitions.insert(name.to_string(), node_id);
    }

    /// Record that a function starting at `line` of `file` has `node_id`.
    pub fn insert_position(&mut self, file: &str, line: u32, node_id: String) {
        self.file_functions
            .entry(file.to_string())
            .or_default()
            .push((line, node_id));
    }

    /// Sort per-file positions so attribution can binary search them.
    ///
    /// The sort is stable, so among functions on the same line the one
    /// inserted last wins attribution.
    pub fn freeze(&mut self) {
        for positions in self.file_functions.values_mut() {
            positions.sort_by_key(|(line, _)| *line);
        }
    }

    /// Look up a function definition by name.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.definitions.get(name).map(String::as_str)
    }

    /// The nearest function in `file` starting at or above `line`.
    pub fn enclosing_function(&self, file: &str, line: u32) -> Option<&str> {
        let positions = self.file_functions.get(file)?;
        let upper = positions.partition_point(|(start, _)| *start <= line);
        positions[..upper].last().map(|(_, id)| id.as_str())
    }

    /// Number of distinct function names indexed.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
