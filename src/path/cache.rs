use super::point::*;
use crate::state::Winding;
use crate::render::{Vertex2D, PathVertices};

use std::ops::Range;

///
/// An axis-aligned bounding box
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32
}

impl Bounds {
    ///
    /// Bounds that contain nothing (any point added will replace them)
    ///
    pub fn empty() -> Bounds {
        Bounds {
            min_x: 1e6,
            min_y: 1e6,
            max_x: -1e6,
            max_y: -1e6
        }
    }

    ///
    /// Extends these bounds to include the specified point
    ///
    #[inline]
    pub fn add_point(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    ///
    /// True if no points have been added to these bounds
    ///
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::empty()
    }
}

///
/// A sub-path that has been converted into a list of points
///
#[derive(Clone, PartialEq, Debug)]
pub struct FlattenedPath {
    /// Index of the first point of this path in the cache's point list
    pub first: usize,

    /// Number of points in this path
    pub count: usize,

    /// True if this path forms a closed loop
    pub closed: bool,

    /// The winding class of this path
    pub winding: Winding,

    /// True if every join in this path turns the same way
    pub convex: bool,

    /// Number of joins that have a bevel on their outer side
    pub bevel_count: usize,

    /// Range of the fill vertices for this path in the cache's vertex buffer
    pub fill: Range<usize>,

    /// Range of the stroke (or fringe) vertices for this path in the cache's vertex buffer
    pub stroke: Range<usize>
}

impl FlattenedPath {
    ///
    /// Creates a new path starting at the specified point index
    ///
    pub fn new(first: usize) -> FlattenedPath {
        FlattenedPath {
            first:          first,
            count:          0,
            closed:         false,
            winding:        Winding::Solid,
            convex:         false,
            bevel_count:    0,
            fill:           0..0,
            stroke:         0..0
        }
    }

    ///
    /// The range of points covered by this path
    ///
    #[inline]
    pub fn points(&self) -> Range<usize> {
        self.first..(self.first + self.count)
    }
}

///
/// Scratch storage for flattening and tessellating paths
///
/// The cache is reused between draws: the point and path lists are produced by flattening, and the
/// vertex buffer is produced by one of the tessellators and then handed to the render backend.
///
#[derive(Clone, Debug)]
pub struct PathCache {
    /// The points in all of the flattened paths
    pub points: Vec<PathPoint>,

    /// The flattened paths
    pub paths: Vec<FlattenedPath>,

    /// Vertices generated by the last tessellation
    pub vertices: Vec<Vertex2D>,

    /// The bounds of the flattened points
    pub bounds: Bounds,

    /// True if the point and path lists are up to date with the current path
    pub (crate) flattened: bool
}

impl PathCache {
    ///
    /// Creates a new empty path cache
    ///
    pub fn new() -> PathCache {
        PathCache {
            points:     Vec::with_capacity(128),
            paths:      Vec::with_capacity(16),
            vertices:   Vec::with_capacity(256),
            bounds:     Bounds::empty(),
            flattened:  false
        }
    }

    ///
    /// Removes all of the paths from this cache (they will need to be flattened again)
    ///
    pub fn clear(&mut self) {
        self.points.clear();
        self.paths.clear();
        self.vertices.clear();
        self.bounds     = Bounds::empty();
        self.flattened  = false;
    }

    ///
    /// True if the cache contains the flattened version of the current path
    ///
    #[inline]
    pub fn is_flattened(&self) -> bool {
        self.flattened
    }

    ///
    /// The points making up a flattened path
    ///
    #[inline]
    pub fn path_points(&self, path: &FlattenedPath) -> &[PathPoint] {
        &self.points[path.points()]
    }

    ///
    /// The vertices generated for each path by the last tessellation
    ///
    pub fn path_vertices(&self) -> Vec<PathVertices<'_>> {
        self.paths.iter()
            .map(|path| PathVertices {
                fill:   &self.vertices[path.fill.clone()],
                stroke: &self.vertices[path.stroke.clone()],
                closed: path.closed,
                convex: path.convex
            })
            .collect()
    }

    ///
    /// The last point added to the cache, if there is one
    ///
    #[inline]
    pub (crate) fn last_point_mut(&mut self) -> Option<&mut PathPoint> {
        self.points.last_mut()
    }

    ///
    /// Writes the contents of the cache to the debug log
    ///
    pub fn dump(&self) {
        debug!("Path cache: {} paths, {} points, {} vertices, bounds {:?}", self.paths.len(), self.points.len(), self.vertices.len(), self.bounds);

        for (idx, path) in self.paths.iter().enumerate() {
            debug!("  Path {}: closed={} convex={} winding={:?} bevels={}", idx, path.closed, path.convex, path.winding, path.bevel_count);

            if !path.fill.is_empty() {
                debug!("    Fill: {} vertices", path.fill.len());
                for vertex in &self.vertices[path.fill.clone()] {
                    debug!("      {:?}", vertex);
                }
            }

            if !path.stroke.is_empty() {
                debug!("    Stroke: {} vertices", path.stroke.len());
                for vertex in &self.vertices[path.stroke.clone()] {
                    debug!("      {:?}", vertex);
                }
            }
        }
    }
}

impl Default for PathCache {
    fn default() -> PathCache {
        PathCache::new()
    }
}
