//! Edge-function triangle rasterizer.

/// A vertex in framebuffer space. `z` holds the reciprocal of the vertex depth, which
/// interpolates linearly in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position must be finite. `z` may be infinite (a vertex at depth zero) but not NaN.
    fn is_drawable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && !self.z.is_nan()
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` that coverage is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ClipRect {
    /// The whole of a `width x height` target.
    pub fn from_extent(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: i32::try_from(width).unwrap_or(i32::MAX),
            y1: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    pub fn intersect(self, other: ClipRect) -> ClipRect {
        ClipRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// One covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coverage {
    pub x: u32,
    pub y: u32,
    /// Perspective-correct depth: the reciprocal of the interpolated `1/z`.
    pub depth: f32,
    /// Weights of the three input vertices at the pixel center; they sum to 1.
    pub barycentric: [f32; 3],
}

fn edge(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// Calls `covered` once for every pixel of `clip` whose center `(x + 0.5, y + 0.5)` lies inside
/// or on the edge of the triangle.
///
/// Both windings rasterize. Pixels exactly on an edge pass the test, so two triangles sharing an
/// edge may both cover the pixels centred on it. Returns `false` without covering anything when
/// the triangle has zero area, a non-finite position or a NaN `z`. An infinite `z` is a vertex
/// at depth zero.
pub fn rasterize_triangle(
    clip: ClipRect,
    [v0, v1, v2]: [Vertex; 3],
    mut covered: impl FnMut(Coverage),
) -> bool {
    if !(v0.is_drawable() && v1.is_drawable() && v2.is_drawable()) {
        return false;
    }
    let finite_depth = v0.z.is_finite() && v1.z.is_finite() && v2.z.is_finite();

    let area = edge(v0.x, v0.y, v1.x, v1.y, v2.x, v2.y);
    if area == 0.0 || !area.is_finite() {
        return false;
    }
    let (sign, inv_area) = if area < 0.0 {
        (-1.0f32, 1.0f32 / (-area))
    } else {
        (1.0f32, 1.0f32 / area)
    };

    let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

    // Negative pixel coordinates are never emitted, whatever the clip rectangle says.
    let bounds = clip
        .intersect(ClipRect {
            x0: min_x,
            y0: min_y,
            x1: max_x,
            y1: max_y,
        })
        .intersect(ClipRect {
            x0: 0,
            y0: 0,
            x1: i32::MAX,
            y1: i32::MAX,
        });
    if bounds.is_empty() {
        return true;
    }

    for y in bounds.y0..bounds.y1 {
        for x in bounds.x0..bounds.x1 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let w0 = edge(v1.x, v1.y, v2.x, v2.y, px, py) * sign;
            let w1 = edge(v2.x, v2.y, v0.x, v0.y, px, py) * sign;
            let w2 = edge(v0.x, v0.y, v1.x, v1.y, px, py) * sign;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }
            let w0 = w0 * inv_area;
            let w1 = w1 * inv_area;
            let w2 = w2 * inv_area;

            let inv_depth = if finite_depth {
                // Affine form: exact when all three vertices share a depth.
                v0.z + (v1.z - v0.z) * w1 + (v2.z - v0.z) * w2
            } else {
                // Zero weights drop out so `inf * 0` cannot produce NaN.
                [(v0.z, w0), (v1.z, w1), (v2.z, w2)]
                    .into_iter()
                    .filter(|&(_, w)| w != 0.0)
                    .map(|(z, w)| z * w)
                    .sum::<f32>()
            };
            let depth = 1.0 / inv_depth;
            if depth.is_nan() {
                continue;
            }

            covered(Coverage {
                x: x as u32,
                y: y as u32,
                depth,
                barycentric: [w0, w1, w2],
            });
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(clip: ClipRect, tri: [Vertex; 3]) -> Vec<Coverage> {
        let mut out = Vec::new();
        rasterize_triangle(clip, tri, |c| out.push(c));
        out
    }

    #[test]
    fn right_triangle_covers_the_lower_left_half() {
        let tri = [
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(6.0, 1.0, 1.0),
            Vertex::new(1.0, 6.0, 1.0),
        ];
        let covered = collect(ClipRect::from_extent(8, 8), tri);

        assert!(!covered.is_empty());
        for c in &covered {
            assert!((1..6).contains(&c.x) && (1..6).contains(&c.y), "{c:?}");
            let (px, py) = (c.x as f32 + 0.5, c.y as f32 + 0.5);
            assert!(px + py <= 7.0, "{c:?}");
            assert_eq!(c.depth, 1.0);
        }
        assert!(!covered.iter().any(|c| c.x == 0 && c.y == 0));
        // The center of (5, 1) lies exactly on the hypotenuse.
        assert!(covered.iter().any(|c| (c.x, c.y) == (5, 1)));
        assert_eq!(covered.len(), 15);
    }

    #[test]
    fn winding_does_not_change_coverage() {
        let ccw = [
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(8.0, 0.0, 1.0),
            Vertex::new(0.0, 8.0, 1.0),
        ];
        let cw = [ccw[0], ccw[2], ccw[1]];
        let clip = ClipRect::from_extent(8, 8);
        let a: Vec<_> = collect(clip, ccw).iter().map(|c| (c.x, c.y)).collect();
        let b: Vec<_> = collect(clip, cw).iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_triangles_cover_nothing() {
        let line = [
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(4.0, 4.0, 1.0),
            Vertex::new(8.0, 8.0, 1.0),
        ];
        let mut calls = 0;
        assert!(!rasterize_triangle(ClipRect::from_extent(8, 8), line, |_| calls += 1));
        assert_eq!(calls, 0);

        let nan = [line[0], line[1], Vertex::new(f32::NAN, 1.0, 1.0)];
        assert!(!rasterize_triangle(ClipRect::from_extent(8, 8), nan, |_| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn infinite_inverse_depth_is_depth_zero() {
        let tri = [
            Vertex::new(0.0, 0.0, f32::INFINITY),
            Vertex::new(8.0, 0.0, f32::INFINITY),
            Vertex::new(0.0, 8.0, f32::INFINITY),
        ];
        let covered = collect(ClipRect::from_extent(8, 8), tri);
        assert_eq!(covered.len(), 36);
        assert!(covered.iter().all(|c| c.depth == 0.0), "{covered:?}");

        // One vertex at depth zero pulls every pixel it weighs on to zero.
        let mixed = [tri[0], Vertex::new(8.0, 0.0, 1.0), Vertex::new(0.0, 8.0, 1.0)];
        let covered = collect(ClipRect::from_extent(8, 8), mixed);
        assert_eq!(covered.len(), 36);
        for c in &covered {
            if c.barycentric[0] > 0.0 {
                assert_eq!(c.depth, 0.0, "{c:?}");
            } else {
                assert_eq!(c.depth, 1.0, "{c:?}");
            }
        }

        let nan_depth = [tri[0], tri[1], Vertex::new(0.0, 8.0, f32::NAN)];
        assert!(!rasterize_triangle(ClipRect::from_extent(8, 8), nan_depth, |_| {}));
    }

    #[test]
    fn coverage_is_clipped_to_the_target() {
        let huge = [
            Vertex::new(-100.0, -100.0, 1.0),
            Vertex::new(100.0, -100.0, 1.0),
            Vertex::new(0.0, 100.0, 1.0),
        ];
        let covered = collect(ClipRect::from_extent(4, 3), huge);
        assert_eq!(covered.len(), 12);
    }

    #[test]
    fn depth_is_the_reciprocal_of_interpolated_inverse_depth() {
        // 1/z grows from 1 to 2 along x.
        let tri = [
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(8.0, 0.0, 2.0),
            Vertex::new(0.0, 8.0, 1.0),
        ];
        let covered = collect(ClipRect::from_extent(8, 8), tri);
        let c = covered
            .iter()
            .find(|c| (c.x, c.y) == (3, 0))
            .expect("pixel (3, 0) is covered");
        let expected_inv = 1.0 + c.barycentric[1];
        assert!((c.depth - 1.0 / expected_inv).abs() < 1e-6);
        assert!((c.barycentric.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }
}
