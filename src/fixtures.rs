//! Built-in application directory and graphs served by `flowmap serve`.

use crate::model::{Application, GraphSnapshot};
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded demo data: three applications and their service graphs.
pub const BUILTIN_CATALOG_JSON: &str = r#"{
  "apps": [
    { "id": "prod-api", "name": "Production API", "description": "Main production service" },
    { "id": "analytics", "name": "Analytics Service", "description": "Data analytics pipeline" },
    { "id": "auth", "name": "Auth Service", "description": "Authentication system" }
  ],
  "graphs": {
    "prod-api": {
      "nodes": [
        { "id": "node-1", "type": "service", "position": { "x": 100, "y": 100 },
          "data": { "label": "API Gateway", "status": "healthy", "cpu": 45, "memory": 62, "requests": 1250 } },
        { "id": "node-2", "type": "service", "position": { "x": 400, "y": 100 },
          "data": { "label": "Database", "status": "healthy", "cpu": 30, "memory": 78, "requests": 850 } },
        { "id": "node-3", "type": "service", "position": { "x": 250, "y": 300 },
          "data": { "label": "Cache Layer", "status": "degraded", "cpu": 65, "memory": 45, "requests": 2100 } }
      ],
      "edges": [
        { "id": "e1-2", "source": "node-1", "target": "node-2" },
        { "id": "e1-3", "source": "node-1", "target": "node-3" },
        { "id": "e3-2", "source": "node-3", "target": "node-2" }
      ]
    },
    "analytics": {
      "nodes": [
        { "id": "node-a1", "type": "service", "position": { "x": 150, "y": 150 },
          "data": { "label": "Data Ingestion", "status": "healthy", "cpu": 55, "memory": 70, "requests": 980 } },
        { "id": "node-a2", "type": "service", "position": { "x": 400, "y": 150 },
          "data": { "label": "Processing Engine", "status": "healthy", "cpu": 75, "memory": 85, "requests": 450 } }
      ],
      "edges": [
        { "id": "ea1-a2", "source": "node-a1", "target": "node-a2" }
      ]
    },
    "auth": {
      "nodes": [
        { "id": "node-auth1", "type": "service", "position": { "x": 200, "y": 200 },
          "data": { "label": "Auth Server", "status": "healthy", "cpu": 25, "memory": 40, "requests": 1500 } }
      ],
      "edges": []
    }
  }
}"#;

/// An application directory plus one graph per application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    apps: Vec<Application>,
    #[serde(default)]
    graphs: HashMap<String, GraphSnapshot>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, serde_json::Error> {
        serde_json::from_str(BUILTIN_CATALOG_JSON)
    }

    pub fn new(apps: Vec<Application>) -> Self {
        Self {
            apps,
            graphs: HashMap::new(),
        }
    }

    pub fn with_graph(mut self, app_id: impl Into<String>, graph: GraphSnapshot) -> Self {
        self.graphs.insert(app_id.into(), graph);
        self
    }

    pub fn applications(&self) -> &[Application] {
        &self.apps
    }

    /// The graph for `app_id`; unknown ids get an empty graph, not an error.
    pub fn graph(&self, app_id: &str) -> GraphSnapshot {
        self.graphs.get(app_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();

        let ids: Vec<_> = catalog.applications().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["prod-api", "analytics", "auth"]);
        assert_eq!(catalog.graph("prod-api").nodes.len(), 3);
        assert_eq!(catalog.graph("prod-api").edges.len(), 3);
    }

    #[test]
    fn test_unknown_app_has_empty_graph() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.graph("billing").is_empty());
    }
}
