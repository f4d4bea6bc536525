use std::path::Path;

use crate::error::{LowerError, LowerResult};
use crate::graph::GraphInfo;

/// Load a portable graph from its JSON form.
pub fn load_graph_from_path(path: &Path) -> LowerResult<GraphInfo> {
    let contents = std::fs::read_to_string(path).map_err(|source| LowerError::GraphRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LowerError::GraphParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_graph_from_path(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, LowerError::GraphRead { .. }));
    }

    #[test]
    fn parses_minimal_graph() {
        let dir = std::env::temp_dir();
        let path = dir.join("rustnpu_minimal_graph.json");
        std::fs::write(
            &path,
            r#"{"node_units": [], "graph_inputs": [], "graph_outputs": []}"#,
        )
        .unwrap();
        let graph = load_graph_from_path(&path).unwrap();
        assert!(graph.node_units.is_empty());
        assert!(!graph.quantized);
        std::fs::remove_file(&path).ok();
    }
}
