//! Renderable 3D scene description
//!
//! A [`Scene`] is a projection of a graph and its layout into render
//! primitives: one line segment per edge and one point marker per node. It
//! carries the styling of the structure view but no state of its own.
//!
//! Renderers that draw every edge with a single polyline call can use
//! [`Scene::edge_trace`], which flattens the segments into coordinate buffers
//! separated by `None` break markers so consecutive edges never join.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::graph::{Edge, Graph, NodeId, Point3, Positions};

/// Color constants for scene primitives (RGBA, normalized 0.0-1.0)
pub mod colors {
    /// Edge lines: Grey (#888888)
    pub const EDGE: [f32; 4] = [0.533, 0.533, 0.533, 1.0];

    /// Node markers: Green (#4CAF50)
    pub const NODE: [f32; 4] = [0.298, 0.686, 0.314, 1.0];

    /// Node marker outline: White (#FFFFFF)
    pub const NODE_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Default edge line width
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Default node marker size
pub const DEFAULT_MARKER_SIZE: f32 = 8.0;

/// Default node marker outline width
pub const DEFAULT_OUTLINE_WIDTH: f32 = 2.0;

/// One edge drawn as a straight segment between its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Edge this segment renders
    pub edge: Edge,
    /// Position of the edge's lower-id endpoint
    pub start: Point3,
    /// Position of the edge's higher-id endpoint
    pub end: Point3,
}

/// One node drawn as a point marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMarker {
    /// Node this marker renders
    pub node: NodeId,
    /// Marker position
    pub position: Point3,
}

/// Styling shared by all edge lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line width in pixels
    pub width: f32,
    /// Line color (RGBA)
    pub color: [f32; 4],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_LINE_WIDTH,
            color: colors::EDGE,
        }
    }
}

/// Styling shared by all node markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker diameter in pixels
    pub size: f32,
    /// Fill color (RGBA)
    pub color: [f32; 4],
    /// Outline width in pixels
    pub outline_width: f32,
    /// Outline color (RGBA)
    pub outline_color: [f32; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_MARKER_SIZE,
            color: colors::NODE,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            outline_color: colors::NODE_OUTLINE,
        }
    }
}

/// Visibility of one scene axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisStyle {
    /// Draw grid lines
    pub show_grid: bool,
    /// Draw the line through zero
    pub show_zero_line: bool,
    /// Draw tick labels
    pub show_tick_labels: bool,
}

impl AxisStyle {
    /// Axis with grid, zero line and tick labels all hidden
    pub fn hidden() -> Self {
        Self {
            show_grid: false,
            show_zero_line: false,
            show_tick_labels: false,
        }
    }
}

/// Figure-level presentation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Show the trace legend
    pub show_legend: bool,
    /// X axis visibility
    pub x_axis: AxisStyle,
    /// Y axis visibility
    pub y_axis: AxisStyle,
    /// Z axis visibility
    pub z_axis: AxisStyle,
    /// Left, right, top, bottom
    pub margins: [u32; 4],
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            show_legend: false,
            x_axis: AxisStyle::hidden(),
            y_axis: AxisStyle::hidden(),
            z_axis: AxisStyle::hidden(),
            margins: [0; 4],
        }
    }
}

/// Flattened coordinate buffers for one trace.
///
/// `None` entries are break markers between polylines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    /// X coordinates
    pub x: Vec<Option<f64>>,
    /// Y coordinates
    pub y: Vec<Option<f64>>,
    /// Z coordinates
    pub z: Vec<Option<f64>>,
}

impl Trace {
    fn push(&mut self, point: Point3) {
        self.x.push(Some(point[0]));
        self.y.push(Some(point[1]));
        self.z.push(Some(point[2]));
    }

    fn push_break(&mut self) {
        self.x.push(None);
        self.y.push(None);
        self.z.push(None);
    }

    /// Number of entries per axis, break markers included
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the trace has no entries
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest coordinate on each axis
    pub min: Point3,
    /// Largest coordinate on each axis
    pub max: Point3,
}

impl Bounds {
    /// Midpoint of the box
    pub fn center(&self) -> Point3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Edge lengths of the box
    pub fn size(&self) -> Point3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Render primitives for one graph layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// One segment per edge, in edge order
    pub edge_lines: Vec<LineSegment>,
    /// One marker per node, in node order
    pub node_markers: Vec<NodeMarker>,
    /// Styling for every edge line
    pub edge_style: LineStyle,
    /// Styling for every node marker
    pub node_style: MarkerStyle,
    /// Figure-level settings
    pub layout: SceneLayout,
}

impl Scene {
    /// Edge segments flattened as `start, end, break` triples
    pub fn edge_trace(&self) -> Trace {
        let mut trace = Trace::default();
        for line in &self.edge_lines {
            trace.push(line.start);
            trace.push(line.end);
            trace.push_break();
        }
        trace
    }

    /// Marker positions as coordinate buffers (no break markers)
    pub fn node_trace(&self) -> Trace {
        let mut trace = Trace::default();
        for marker in &self.node_markers {
            trace.push(marker.position);
        }
        trace
    }

    /// Bounding box of all node markers, `None` for an empty scene
    pub fn bounds(&self) -> Option<Bounds> {
        let mut markers = self.node_markers.iter();
        let first = markers.next()?.position;
        let bounds = markers.fold(
            Bounds {
                min: first,
                max: first,
            },
            |mut bounds, marker| {
                for axis in 0..3 {
                    bounds.min[axis] = bounds.min[axis].min(marker.position[axis]);
                    bounds.max[axis] = bounds.max[axis].max(marker.position[axis]);
                }
                bounds
            },
        );
        Some(bounds)
    }
}

/// Converts a graph and its layout into a [`Scene`]
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    edge_style: LineStyle,
    node_style: MarkerStyle,
    layout: SceneLayout,
}

impl SceneBuilder {
    /// Create a builder with the default structure-view styling
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the edge line style
    pub fn with_edge_style(mut self, style: LineStyle) -> Self {
        self.edge_style = style;
        self
    }

    /// Override the node marker style
    pub fn with_node_style(mut self, style: MarkerStyle) -> Self {
        self.node_style = style;
        self
    }

    /// Override the figure layout
    pub fn with_layout(mut self, layout: SceneLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Build the scene for `graph` laid out at `positions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteLayout`](crate::Error::IncompleteLayout) for
    /// the lowest node id that has no position.
    pub fn build(&self, graph: &Graph, positions: &Positions) -> Result<Scene> {
        let node_markers = graph
            .nodes()
            .map(|node| -> Result<NodeMarker> {
                Ok(NodeMarker {
                    node,
                    position: positions.require(node)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let edge_lines = graph
            .edges()
            .map(|&edge| -> Result<LineSegment> {
                let (a, b) = edge.endpoints();
                Ok(LineSegment {
                    edge,
                    start: positions.require(a)?,
                    end: positions.require(b)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            lines = edge_lines.len(),
            markers = node_markers.len(),
            "built scene"
        );

        Ok(Scene {
            edge_lines,
            node_markers,
            edge_style: self.edge_style,
            node_style: self.node_style,
            layout: self.layout,
        })
    }
}

/// Build a scene with the default styling
pub fn build_scene(graph: &Graph, positions: &Positions) -> Result<Scene> {
    SceneBuilder::new().build(graph, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn triangle() -> (Graph, Positions) {
        let graph = Graph::complete(3);
        let positions = [
            (0, [0.0, 0.0, 0.0]),
            (1, [1.0, 0.0, 0.0]),
            (2, [0.0, 1.0, -1.0]),
        ]
        .into_iter()
        .collect();
        (graph, positions)
    }

    #[test]
    fn one_primitive_per_element() {
        let (graph, positions) = triangle();
        let scene = build_scene(&graph, &positions).unwrap();

        assert_eq!(scene.edge_lines.len(), graph.edge_count());
        assert_eq!(scene.node_markers.len(), graph.node_count());
    }

    #[test]
    fn segments_use_endpoint_positions() {
        let (graph, positions) = triangle();
        let scene = build_scene(&graph, &positions).unwrap();

        for line in &scene.edge_lines {
            let (a, b) = line.edge.endpoints();
            assert_eq!(Some(line.start), positions.get(a));
            assert_eq!(Some(line.end), positions.get(b));
        }
    }

    #[test]
    fn markers_follow_node_order() {
        let (graph, positions) = triangle();
        let scene = build_scene(&graph, &positions).unwrap();

        let nodes: Vec<NodeId> = scene.node_markers.iter().map(|m| m.node).collect();
        assert_eq!(nodes, vec![0, 1, 2]);
    }

    #[test]
    fn missing_position_is_incomplete_layout() {
        let graph = Graph::complete(3);
        let positions: Positions = [(0, [0.0; 3]), (1, [1.0; 3])].into_iter().collect();

        let err = build_scene(&graph, &positions).unwrap_err();
        assert_eq!(err, Error::IncompleteLayout { node: 2 });
    }

    #[test]
    fn extra_positions_are_ignored() {
        let graph = Graph::new(1);
        let positions: Positions = [(0, [0.0; 3]), (5, [1.0; 3])].into_iter().collect();

        let scene = build_scene(&graph, &positions).unwrap();
        assert_eq!(scene.node_markers.len(), 1);
    }

    #[test]
    fn edge_trace_separates_segments() {
        let (graph, positions) = triangle();
        let trace = build_scene(&graph, &positions).unwrap().edge_trace();

        assert_eq!(trace.len(), 3 * graph.edge_count());
        for chunk in trace.x.chunks(3) {
            assert!(chunk[0].is_some());
            assert!(chunk[1].is_some());
            assert!(chunk[2].is_none());
        }
    }

    #[test]
    fn node_trace_has_no_breaks() {
        let (graph, positions) = triangle();
        let trace = build_scene(&graph, &positions).unwrap().node_trace();

        assert_eq!(trace.len(), 3);
        assert!(trace.z.iter().all(Option::is_some));
    }

    #[test]
    fn edge_trace_json_shape() {
        let mut graph = Graph::new(2);
        graph.add_edge(0, 1).unwrap();
        let positions: Positions = [(0, [0.0, 0.5, 1.0]), (1, [1.0, -0.5, 0.0])]
            .into_iter()
            .collect();

        let trace = build_scene(&graph, &positions).unwrap().edge_trace();
        insta::assert_snapshot!(serde_json::to_string(&trace).unwrap(), @r#"{"x":[0.0,1.0,null],"y":[0.5,-0.5,null],"z":[1.0,0.0,null]}"#);
    }

    #[test]
    fn bounds_cover_all_markers() {
        let (graph, positions) = triangle();
        let bounds = build_scene(&graph, &positions).unwrap().bounds().unwrap();

        assert_eq!(bounds.min, [0.0, 0.0, -1.0]);
        assert_eq!(bounds.max, [1.0, 1.0, 0.0]);
        assert_eq!(bounds.size(), [1.0, 1.0, 1.0]);
        assert_eq!(bounds.center(), [0.5, 0.5, -0.5]);
    }

    #[test]
    fn empty_scene_has_no_bounds() {
        let scene = build_scene(&Graph::new(0), &Positions::new()).unwrap();
        assert!(scene.bounds().is_none());
        assert!(scene.edge_trace().is_empty());
    }

    #[test]
    fn default_styling_matches_structure_view() {
        let scene = build_scene(&Graph::new(1), &[(0, [0.0; 3])].into_iter().collect()).unwrap();

        assert_eq!(scene.edge_style.width, 2.0);
        assert_eq!(scene.edge_style.color, colors::EDGE);
        assert_eq!(scene.node_style.size, 8.0);
        assert_eq!(scene.node_style.outline_color, colors::NODE_OUTLINE);
        assert!(!scene.layout.show_legend);
        assert!(!scene.layout.z_axis.show_grid);
    }

    #[test]
    fn custom_styles_are_applied() {
        let builder = SceneBuilder::new().with_edge_style(LineStyle {
            width: 4.0,
            color: colors::NODE,
        });
        let scene = builder
            .build(&Graph::new(1), &[(0, [0.0; 3])].into_iter().collect())
            .unwrap();
        assert_eq!(scene.edge_style.width, 4.0);
    }
}
