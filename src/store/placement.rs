use crate::model::{GraphNode, Position};

/// Default position for nodes added from the canvas.
///
/// Walks a grid row by row from `origin` and picks the first cell that no
/// existing node sits in, so consecutive additions never stack on each other.
#[derive(Debug, Clone)]
pub struct Placement {
    pub origin: Position,
    pub spacing: f64,
    pub columns: usize,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            origin: Position::new(100.0, 100.0),
            spacing: 80.0,
            columns: 5,
        }
    }
}

impl Placement {
    pub fn next(&self, nodes: &[GraphNode]) -> Position {
        let columns = self.columns.max(1);
        let spacing = if self.spacing > 0.0 { self.spacing } else { 80.0 };
        let half = spacing / 2.0;

        // One more cell than there are nodes is always enough to find a free one.
        for cell in 0..=nodes.len() {
            let candidate = Position::new(
                self.origin.x + (cell % columns) as f64 * spacing,
                self.origin.y + (cell / columns) as f64 * spacing,
            );
            let occupied = nodes.iter().any(|n| {
                (n.position.x - candidate.x).abs() < half && (n.position.y - candidate.y).abs() < half
            });
            if !occupied {
                return candidate;
            }
        }

        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeData;

    fn node_at(id: &str, x: f64, y: f64) -> GraphNode {
        GraphNode::new(id, Position::new(x, y), NodeData::default())
    }

    #[test]
    fn test_empty_canvas_uses_origin() {
        assert_eq!(Placement::default().next(&[]), Position::new(100.0, 100.0));
    }

    #[test]
    fn test_skips_occupied_cells() {
        let placement = Placement::default();
        let nodes = vec![node_at("a", 100.0, 100.0), node_at("b", 185.0, 95.0)];
        assert_eq!(placement.next(&nodes), Position::new(260.0, 100.0));
    }

    #[test]
    fn test_wraps_to_next_row() {
        let placement = Placement {
            columns: 2,
            ..Placement::default()
        };
        let nodes = vec![node_at("a", 100.0, 100.0), node_at("b", 180.0, 100.0)];
        assert_eq!(placement.next(&nodes), Position::new(100.0, 180.0));
    }
}
