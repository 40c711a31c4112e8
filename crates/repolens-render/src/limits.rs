//! Display caps for rendered output

use serde::{Deserialize, Serialize};

/// How many items of each category a diagram shows before a `+N more` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLimits {
    pub components: usize,
    pub classes: usize,
    pub functions: usize,
    pub endpoints_per_method: usize,
    pub models: usize,
    pub module_edges: usize,
    pub tree_files: usize,
    pub label_chars: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        DisplayLimits {
            components: 20,
            classes: 15,
            functions: 15,
            endpoints_per_method: 8,
            models: 15,
            module_edges: 400,
            tree_files: 200,
            label_chars: 30,
        }
    }
}
