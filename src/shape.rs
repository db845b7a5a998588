//! Built-in polyhedra and vertex-table loading.
//!
//! A shape is a vertex list plus an edge list of index pairs into it. The
//! two supported shapes have fixed topology; their vertex coordinates can be
//! replaced by a vertex table whose row order gives the vertex index.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::math::vec3::Vec3;

pub const CUBE_VERTEX_COUNT: usize = 8;
pub const CUBE_EDGE_COUNT: usize = 12;
pub const PRISM_VERTEX_COUNT: usize = 6;
pub const PRISM_EDGE_COUNT: usize = 9;

/// An unordered pair of vertex indices joined by a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

// Face 0-1-2-3 at z = -1, face 4-5-6-7 at z = +1, vertex i + 4 above vertex i.
pub const CUBE_VERTICES: [Vec3; CUBE_VERTEX_COUNT] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

pub const CUBE_EDGES: [Edge; CUBE_EDGE_COUNT] = [
    // Bottom face
    Edge::new(0, 1),
    Edge::new(1, 2),
    Edge::new(2, 3),
    Edge::new(3, 0),
    // Top face
    Edge::new(4, 5),
    Edge::new(5, 6),
    Edge::new(6, 7),
    Edge::new(7, 4),
    // Verticals
    Edge::new(0, 4),
    Edge::new(1, 5),
    Edge::new(2, 6),
    Edge::new(3, 7),
];

// Rectangular base 0-1-2-3 at z = -1, ridge 4-5 along x at y = 0, z = +1.
// Triangular ends are 0-3-4 and 1-2-5.
pub const PRISM_VERTICES: [Vec3; PRISM_VERTEX_COUNT] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
];

pub const PRISM_EDGES: [Edge; PRISM_EDGE_COUNT] = [
    // Base
    Edge::new(0, 1),
    Edge::new(1, 2),
    Edge::new(2, 3),
    Edge::new(3, 0),
    // Sloped edges and the ridge
    Edge::new(0, 4),
    Edge::new(1, 5),
    Edge::new(4, 5),
    Edge::new(2, 5),
    Edge::new(3, 4),
];

/// The supported polyhedra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    TriangularPrism,
}

impl ShapeKind {
    pub fn default_vertices(&self) -> &'static [Vec3] {
        match self {
            ShapeKind::Cube => &CUBE_VERTICES,
            ShapeKind::TriangularPrism => &PRISM_VERTICES,
        }
    }

    pub fn edges(&self) -> &'static [Edge] {
        match self {
            ShapeKind::Cube => &CUBE_EDGES,
            ShapeKind::TriangularPrism => &PRISM_EDGES,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.default_vertices().len()
    }

    /// File name of the vertex table conventionally shipped for this shape.
    pub fn table_file_name(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube_table.csv",
            ShapeKind::TriangularPrism => "tri_prism_table.csv",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Cube => write!(f, "cube"),
            ShapeKind::TriangularPrism => write!(f, "triangular prism"),
        }
    }
}

/// Error returned when a shape name or menu number is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape {:?}, expected 1 (cube) or 2 (prism)", self.0)
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    /// Accepts the menu numbers `1`/`2` or the names `cube`/`prism`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "cube" => Ok(ShapeKind::Cube),
            "2" | "prism" | "triangular prism" | "tri_prism" => Ok(ShapeKind::TriangularPrism),
            _ => Err(UnknownShape(s.trim().to_string())),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse { line: usize, message: String },
    VertexCount { expected: usize, found: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read vertex table: {e}"),
            LoadError::Parse { line, message } => {
                write!(f, "vertex table line {line}: {message}")
            }
            LoadError::VertexCount { expected, found } => write!(
                f,
                "vertex table has {found} rows, shape needs {expected}"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Integer vertex coordinates, one row per vertex.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexTable {
    rows: Vec<[i64; 3]>,
}

impl VertexTable {
    /// Parses comma-separated rows of three integers.
    ///
    /// Blank lines are skipped and fields are trimmed. Line numbers in
    /// errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut rows = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(LoadError::Parse {
                    line,
                    message: format!("expected 3 columns, found {}", fields.len()),
                });
            }
            let mut row = [0i64; 3];
            for (cell, field) in row.iter_mut().zip(&fields) {
                *cell = field.parse().map_err(|_| LoadError::Parse {
                    line,
                    message: format!("{field:?} is not an integer"),
                })?;
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_vertices(&self) -> Vec<Vec3> {
        self.rows
            .iter()
            .map(|&[x, y, z]| Vec3::new(x as f64, y as f64, z as f64))
            .collect()
    }
}

/// A polyhedron ready to render: vertices plus the edges joining them.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    vertices: Vec<Vec3>,
}

impl Shape {
    /// The shape with its built-in vertex coordinates.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            vertices: kind.default_vertices().to_vec(),
        }
    }

    /// The shape's fixed topology with coordinates from `table`.
    pub fn with_vertices(kind: ShapeKind, table: &VertexTable) -> Result<Self, LoadError> {
        if table.len() != kind.vertex_count() {
            return Err(LoadError::VertexCount {
                expected: kind.vertex_count(),
                found: table.len(),
            });
        }
        Ok(Self {
            kind,
            vertices: table.to_vertices(),
        })
    }

    /// Loads `kind.table_file_name()` from `dir`.
    pub fn from_table_dir<P: AsRef<Path>>(kind: ShapeKind, dir: P) -> Result<Self, LoadError> {
        let table = VertexTable::from_path(dir.as_ref().join(kind.table_file_name()))?;
        Self::with_vertices(kind, &table)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &'static [Edge] {
        self.kind.edges()
    }
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_topology(kind: ShapeKind, vertices: usize, edges: usize) {
        assert_eq!(kind.vertex_count(), vertices);
        assert_eq!(kind.edges().len(), edges);

        let mut seen = HashSet::new();
        let mut degree = vec![0; vertices];
        for edge in kind.edges() {
            assert!(edge.a < vertices && edge.b < vertices);
            assert_ne!(edge.a, edge.b);
            assert!(seen.insert((edge.a.min(edge.b), edge.a.max(edge.b))));
            degree[edge.a] += 1;
            degree[edge.b] += 1;
        }
        // Both polyhedra are simple: three edges meet at every vertex.
        assert!(degree.iter().all(|&d| d == 3));
    }

    #[test]
    fn cube_topology() {
        assert_topology(ShapeKind::Cube, 8, 12);
        assert!(CUBE_VERTICES
            .iter()
            .all(|v| v.x.abs() == 1.0 && v.y.abs() == 1.0 && v.z.abs() == 1.0));
    }

    #[test]
    fn prism_topology() {
        assert_topology(ShapeKind::TriangularPrism, 6, 9);
    }

    #[test]
    fn cube_edges_have_unit_cube_length() {
        for edge in ShapeKind::Cube.edges() {
            let d = CUBE_VERTICES[edge.a] - CUBE_VERTICES[edge.b];
            assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 2.0);
        }
    }

    #[test]
    fn shape_kind_parses_menu_choices() {
        assert_eq!("1".parse::<ShapeKind>(), Ok(ShapeKind::Cube));
        assert_eq!(" 2 ".parse::<ShapeKind>(), Ok(ShapeKind::TriangularPrism));
        assert_eq!("Cube".parse::<ShapeKind>(), Ok(ShapeKind::Cube));
        assert_eq!("prism".parse::<ShapeKind>(), Ok(ShapeKind::TriangularPrism));
        assert!("3".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn vertex_table_parses_rows_in_order() {
        let table = VertexTable::parse("1,2,3\n\n -4 , 5, -6\n").expect("valid table");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.to_vertices(),
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 5.0, -6.0)]
        );
    }

    #[test]
    fn vertex_table_rejects_bad_rows() {
        match VertexTable::parse("1,2,3\n1,2\n") {
            Err(LoadError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
        match VertexTable::parse("1,2,3.5\n") {
            Err(LoadError::Parse { line, message }) => {
                assert_eq!(line, 1);
                assert!(message.contains("3.5"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn shape_from_table_requires_matching_vertex_count() {
        let table = VertexTable::parse("0,0,0\n1,1,1\n").expect("valid table");
        match Shape::with_vertices(ShapeKind::Cube, &table) {
            Err(LoadError::VertexCount { expected, found }) => {
                assert_eq!((expected, found), (8, 2));
            }
            other => panic!("expected vertex count error, got {other:?}"),
        }
    }

    #[test]
    fn shape_from_table_uses_given_coordinates() {
        let text = "0,0,0\n2,0,0\n2,2,0\n0,2,0\n0,1,2\n2,1,2\n";
        let table = VertexTable::parse(text).expect("valid table");
        let shape = Shape::with_vertices(ShapeKind::TriangularPrism, &table).expect("six rows");
        assert_eq!(shape.vertices()[5], Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(shape.edges().len(), 9);
    }

    #[test]
    fn missing_table_file_is_an_io_error() {
        let result = Shape::from_table_dir(ShapeKind::Cube, "/nonexistent/wireproj");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn default_shape_matches_builtin_vertices() {
        let shape = Shape::from(ShapeKind::TriangularPrism);
        assert_eq!(shape.vertices(), &PRISM_VERTICES[..]);
        assert_eq!(shape.kind(), ShapeKind::TriangularPrism);
    }
}
