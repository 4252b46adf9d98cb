//! Triangulation of closed contours carrying per vertex data.
//!
//! A [`Tessellator`] is generic over the data attached to each vertex. Whenever the tessellator
//! needs a vertex which is not one of the inputs, such as where two inputs share a position or two
//! edges cross, the data of the new vertex is produced by a [`VertexCombine`] from the data of the
//! vertices it is made of.
use std::{collections::HashMap, f64::consts::TAU, iter};

use glam::{DVec2, Vec2};
use itertools::Itertools;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TessellationError {
    #[error("No contours to tessellate")]
    NoContours,

    #[error("Contour {0} has fewer than 3 distinct points")]
    DegenerateContour(usize),

    #[error("Earcut failed: {0}")]
    Earcut(String),

    #[error("Tessellation produced no triangles")]
    Empty,
}

/// Decides which regions enclosed by contours are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// Regions enclosed an odd number of times
    #[default]
    EvenOdd,
    /// Regions with a non zero winding number
    NonZero,
}

impl WindingRule {
    fn is_filled(&self, winding: i32) -> bool {
        match self {
            WindingRule::EvenOdd => winding % 2 != 0,
            WindingRule::NonZero => winding != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContourVertex<V> {
    pub position: Vec2,
    pub data: V,
}

impl<V> ContourVertex<V> {
    pub fn new(position: Vec2, data: V) -> Self {
        Self { position, data }
    }
}

/// Produces the data of a vertex made from several other vertices.
///
/// `weights` are parallel to `data` and sum to one.
pub trait VertexCombine<V> {
    fn combine(&self, position: Vec2, data: &[&V], weights: &[f32]) -> V;
}

impl<V, F> VertexCombine<V> for F
where
    F: Fn(Vec2, &[&V], &[f32]) -> V,
{
    fn combine(&self, position: Vec2, data: &[&V], weights: &[f32]) -> V {
        (self)(position, data, weights)
    }
}

/// A list of triangles indexing into a list of vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation<V> {
    pub vertices: Vec<ContourVertex<V>>,
    pub indices: Vec<u32>,
}

impl<V> Tessellation<V> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|v| [v[0], v[1], v[2]])
    }
}

pub trait Tessellator {
    /// Tessellates the closed `contours` into triangles covering the regions filled according to
    /// `rule`.
    fn tessellate<V, C>(
        &mut self,
        contours: &[Vec<ContourVertex<V>>],
        rule: WindingRule,
        combine: &C,
    ) -> Result<Tessellation<V>, TessellationError>
    where
        V: Clone,
        C: VertexCombine<V> + ?Sized;
}

/// Tessellates contours using ear clipping.
///
/// Vertices at exactly the same position are welded into one vertex with uniform weights. Edges
/// which cross are split at the crossing, creating a vertex blended from the four edge endpoints
/// by where the crossing lies along each edge. The outline of the filled area is then traced and
/// each outer ring is clipped together with the holes it contains.
#[derive(Debug, Clone, Default)]
pub struct EarcutTessellator {}

impl EarcutTessellator {
    pub fn new() -> Self {
        Self {}
    }
}

/// Relative distance to either side of an edge at which the winding number is sampled
const SIDE_OFFSET: f64 = 1e-6;
const COLLINEAR_EPSILON: f64 = 1e-9;
const AREA_EPSILON: f64 = 1e-12;

struct Ring {
    vertices: Vec<usize>,
    area: f64,
}

impl Ring {
    fn new(vertices: Vec<usize>, positions: &[DVec2]) -> Self {
        let area = signed_area(vertices.iter().map(|&v| positions[v]));
        Self { vertices, area }
    }
}

/// Welded vertices of all contours, along with those created where edges cross
struct Vertices<V> {
    lookup: HashMap<[u32; 2], usize>,
    positions: Vec<DVec2>,
    data: Vec<V>,
}

impl<V> Vertices<V> {
    fn insert_with(&mut self, position: DVec2, data: impl FnOnce(&[V]) -> V) -> usize {
        let key = position_key(position.as_vec2());
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }

        let value = data(&self.data);
        let index = self.positions.len();
        self.positions.push(position);
        self.data.push(value);
        self.lookup.insert(key, index);
        index
    }
}

impl Tessellator for EarcutTessellator {
    fn tessellate<V, C>(
        &mut self,
        contours: &[Vec<ContourVertex<V>>],
        rule: WindingRule,
        combine: &C,
    ) -> Result<Tessellation<V>, TessellationError>
    where
        V: Clone,
        C: VertexCombine<V> + ?Sized,
    {
        if contours.is_empty() {
            return Err(TessellationError::NoContours);
        }

        let _span = tracing::debug_span!("tessellate", contours = contours.len()).entered();

        let mut lookup: HashMap<[u32; 2], usize> = HashMap::new();
        let mut sources: Vec<SmallVec<[&ContourVertex<V>; 4]>> = Vec::new();
        let mut rings = Vec::with_capacity(contours.len());

        for (contour, vertices) in contours.iter().enumerate() {
            let mut ring: Vec<usize> = Vec::with_capacity(vertices.len());

            for vertex in vertices {
                let index = *lookup.entry(position_key(vertex.position)).or_insert_with(|| {
                    sources.push(SmallVec::new());
                    sources.len() - 1
                });

                sources[index].push(vertex);

                if ring.last() != Some(&index) {
                    ring.push(index);
                }
            }

            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }

            if ring.len() < 3 {
                return Err(TessellationError::DegenerateContour(contour));
            }

            rings.push((contour, ring));
        }

        let mut vertices = Vertices {
            lookup,
            positions: sources
                .iter()
                .map(|v| v[0].position.as_dvec2())
                .collect_vec(),
            data: sources
                .iter()
                .map(|merged| match merged.as_slice() {
                    [single] => single.data.clone(),
                    merged => {
                        let data: SmallVec<[&V; 4]> = merged.iter().map(|v| &v.data).collect();
                        let weights: SmallVec<[f32; 4]> =
                            smallvec![1.0 / merged.len() as f32; merged.len()];
                        combine.combine(merged[0].position, &data, &weights)
                    }
                })
                .collect_vec(),
        };

        let rings = rings
            .into_iter()
            .map(|(contour, ring)| {
                let ring = Ring::new(ring, &vertices.positions);
                if ring.area.abs() < AREA_EPSILON {
                    tracing::warn!(contour, "contour without area");
                }
                ring
            })
            .collect_vec();

        let edges = rings.iter().flat_map(edges).collect_vec();
        let segments = split_edges(&edges, &mut vertices, combine);
        let outline = outline(&segments, &vertices.positions, rule);

        let (outer, holes): (Vec<_>, Vec<_>) = trace_rings(&outline, &vertices.positions)
            .into_iter()
            .map(|ring| Ring::new(ring, &vertices.positions))
            .filter(|ring| ring.area.abs() >= AREA_EPSILON)
            .partition(|ring| ring.area > 0.0);

        let mut children: Vec<Vec<&Ring>> = vec![Vec::new(); outer.len()];
        for hole in &holes {
            let point = (vertices.positions[hole.vertices[0]]
                + vertices.positions[hole.vertices[1]])
                * 0.5;

            let parent = (0..outer.len())
                .filter(|&v| contains(&outer[v], &vertices.positions, point))
                .min_by(|&a, &b| outer[a].area.total_cmp(&outer[b].area));

            match parent {
                Some(parent) => children[parent].push(hole),
                None => tracing::warn!(?point, "hole outside of any filled region"),
            }
        }

        let mut indices: Vec<usize> = Vec::new();

        for (ring, holes) in outer.iter().zip(&children) {
            let triangles = clip(ring, holes, &vertices.positions)?;

            tracing::debug!(
                vertices = ring.vertices.len(),
                holes = holes.len(),
                triangles = triangles.len() / 3,
                "tessellated region"
            );

            indices.extend(triangles);
        }

        if indices.is_empty() {
            return Err(TessellationError::Empty);
        }

        // Only emit referenced vertices, in order of their first appearance in the input
        let mut remap: Vec<Option<u32>> = vec![None; vertices.positions.len()];
        for &index in &indices {
            remap[index] = Some(0);
        }

        let mut output = Vec::new();
        for ((slot, position), data) in remap
            .iter_mut()
            .zip(&vertices.positions)
            .zip(vertices.data)
        {
            if slot.is_some() {
                *slot = Some(output.len() as u32);
                output.push(ContourVertex {
                    position: position.as_vec2(),
                    data,
                });
            }
        }

        let indices = indices
            .into_iter()
            .map(|v| remap[v].unwrap_or_default())
            .collect_vec();

        Ok(Tessellation {
            vertices: output,
            indices,
        })
    }
}

fn position_key(position: Vec2) -> [u32; 2] {
    // Adding zero turns -0.0 into 0.0
    [(position.x + 0.0).to_bits(), (position.y + 0.0).to_bits()]
}

fn signed_area(points: impl Iterator<Item = DVec2> + Clone + ExactSizeIterator) -> f64 {
    points
        .circular_tuple_windows::<(DVec2, DVec2)>()
        .map(|(a, b)| a.perp_dot(b))
        .sum::<f64>()
        * 0.5
}

fn edges(ring: &Ring) -> impl Iterator<Item = (usize, usize)> + '_ {
    ring.vertices.iter().copied().circular_tuple_windows::<(usize, usize)>()
}

/// Splits `edges` wherever they cross another edge or pass through a vertex.
///
/// Returns the directed segments the edges are made of.
fn split_edges<V, C>(
    edges: &[(usize, usize)],
    vertices: &mut Vertices<V>,
    combine: &C,
) -> Vec<(usize, usize)>
where
    C: VertexCombine<V> + ?Sized,
{
    let input_count = vertices.positions.len();
    let mut splits: Vec<Vec<(f64, usize)>> = vec![Vec::new(); edges.len()];

    for (i, &(a, b)) in edges.iter().enumerate() {
        let (p0, p1) = (vertices.positions[a], vertices.positions[b]);
        let length = (p1 - p0).length_squared();

        for v in (0..input_count).filter(|&v| v != a && v != b) {
            let p = vertices.positions[v];
            let t = (p - p0).dot(p1 - p0) / length;
            let distance = (p1 - p0).perp_dot(p - p0).abs();

            if t > 0.0 && t < 1.0 && distance <= COLLINEAR_EPSILON * length {
                splits[i].push((t, v));
            }
        }
    }

    for i in 0..edges.len() {
        for j in i + 1..edges.len() {
            let ((a0, a1), (b0, b1)) = (edges[i], edges[j]);
            if a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1 {
                continue;
            }

            let positions = &vertices.positions;
            let Some((s, t)) = crossing(
                positions[a0],
                positions[a1],
                positions[b0],
                positions[b1],
            ) else {
                continue;
            };

            let point = positions[a0] + (positions[a1] - positions[a0]) * s;
            let weights = [
                (1.0 - s) * 0.5,
                s * 0.5,
                (1.0 - t) * 0.5,
                t * 0.5,
            ]
            .map(|v| v as f32);

            let vertex = vertices.insert_with(point, |data| {
                combine.combine(
                    point.as_vec2(),
                    &[&data[a0], &data[a1], &data[b0], &data[b1]],
                    &weights,
                )
            });

            tracing::trace!(?point, vertex, "split crossing edges");

            splits[i].push((s, vertex));
            splits[j].push((t, vertex));
        }
    }

    edges
        .iter()
        .zip(splits)
        .flat_map(|(&(a, b), mut splits)| {
            splits.sort_by(|x, y| x.0.total_cmp(&y.0));

            iter::once(a)
                .chain(splits.into_iter().map(|v| v.1))
                .chain(iter::once(b))
                .dedup()
                .tuple_windows::<(usize, usize)>()
                .collect_vec()
        })
        .collect_vec()
}

/// Parameters along `a` and `b` where the segments properly cross, touching excluded
fn crossing(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> Option<(f64, f64)> {
    let orient = |p: DVec2, q: DVec2, r: DVec2| (q - p).perp_dot(r - p);

    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        Some((d1 / (d1 - d2), d3 / (d3 - d4)))
    } else {
        None
    }
}

/// Winding number of `point` with respect to the directed `segments`
fn winding(point: DVec2, segments: &[(usize, usize)], positions: &[DVec2]) -> i32 {
    segments
        .iter()
        .map(|&(a, b)| {
            let (a, b) = (positions[a], positions[b]);
            let side = (b - a).perp_dot(point - a);

            if a.y <= point.y && b.y > point.y && side > 0.0 {
                1
            } else if a.y > point.y && b.y <= point.y && side < 0.0 {
                -1
            } else {
                0
            }
        })
        .sum()
}

/// Segments separating filled from unfilled regions, directed to have the filled side on the
/// left.
fn outline(
    segments: &[(usize, usize)],
    positions: &[DVec2],
    rule: WindingRule,
) -> Vec<(usize, usize)> {
    segments
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .unique()
        .filter_map(|(a, b)| {
            let (p0, p1) = (positions[a], positions[b]);
            let middle = (p0 + p1) * 0.5;
            let offset = (p1 - p0).perp() * SIDE_OFFSET;

            let left = rule.is_filled(winding(middle + offset, segments, positions));
            let right = rule.is_filled(winding(middle - offset, segments, positions));

            match (left, right) {
                (true, false) => Some((a, b)),
                (false, true) => Some((b, a)),
                _ => None,
            }
        })
        .collect_vec()
}

/// Links the outline into closed rings.
///
/// Where several rings meet at a vertex, the ring turns as far right as possible, which keeps
/// regions touching at a single point apart.
fn trace_rings(outline: &[(usize, usize)], positions: &[DVec2]) -> Vec<Vec<usize>> {
    let mut outgoing: HashMap<usize, SmallVec<[usize; 2]>> = HashMap::new();
    for (i, &(a, _)) in outline.iter().enumerate() {
        outgoing.entry(a).or_default().push(i);
    }

    let angle = |v: DVec2| v.y.atan2(v.x);
    let direction = |edge: usize| {
        let (a, b) = outline[edge];
        positions[b] - positions[a]
    };

    let mut visited = vec![false; outline.len()];
    let mut rings = Vec::new();

    for start in 0..outline.len() {
        let mut ring = Vec::new();
        let mut edge = start;

        while !visited[edge] {
            visited[edge] = true;

            let (from, to) = outline[edge];
            ring.push(from);

            let back = angle(positions[from] - positions[to]);
            let turn = |edge: usize| {
                let turn = (back - angle(direction(edge))).rem_euclid(TAU);
                if turn > 0.0 {
                    turn
                } else {
                    TAU
                }
            };

            match outgoing
                .get(&to)
                .and_then(|v| v.iter().copied().min_by(|&a, &b| turn(a).total_cmp(&turn(b))))
            {
                Some(next) => edge = next,
                None => break,
            }
        }

        if ring.len() >= 3 {
            rings.push(ring);
        }
    }

    rings
}

fn contains(ring: &Ring, positions: &[DVec2], point: DVec2) -> bool {
    let mut inside = false;

    for (a, b) in edges(ring) {
        let (a, b) = (positions[a], positions[b]);

        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }

    inside
}

/// Ear clips `outer` with `holes`, returning triangles indexing into `positions`
fn clip(outer: &Ring, holes: &[&Ring], positions: &[DVec2]) -> Result<Vec<usize>, TessellationError> {
    let vertices = outer
        .vertices
        .iter()
        .chain(holes.iter().flat_map(|v| &v.vertices))
        .copied()
        .collect_vec();

    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut offset = outer.vertices.len();
    for hole in holes {
        hole_indices.push(offset);
        offset += hole.vertices.len();
    }

    let coords = vertices
        .iter()
        .flat_map(|&v| [positions[v].x, positions[v].y])
        .collect_vec();

    let triangles = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|err| TessellationError::Earcut(format!("{err:?}")))?;

    Ok(triangles.into_iter().map(|v| vertices[v]).collect_vec())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use glam::vec2;

    use super::*;

    fn contour(points: &[[f32; 2]], first_id: u32) -> Vec<ContourVertex<u32>> {
        points
            .iter()
            .zip(first_id..)
            .map(|(&p, id)| ContourVertex::new(Vec2::from_array(p), id))
            .collect_vec()
    }

    fn no_combine(_: Vec2, _: &[&u32], _: &[f32]) -> u32 {
        panic!("no vertices should be combined")
    }

    fn area<V>(tessellation: &Tessellation<V>) -> f32 {
        tessellation
            .triangles()
            .map(|[a, b, c]| {
                let [a, b, c] = [a, b, c].map(|v| tessellation.vertices[v as usize].position);
                ((b - a).perp_dot(c - a) * 0.5).abs()
            })
            .sum()
    }

    const SQUARE: [[f32; 2]; 4] = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];
    const INNER: [[f32; 2]; 4] = [[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]];

    #[test]
    fn quad() {
        let tessellation = EarcutTessellator::new()
            .tessellate(&[contour(&SQUARE, 0)], WindingRule::EvenOdd, &no_combine)
            .unwrap();

        assert_eq!(tessellation.triangle_count(), 2);
        assert_eq!(tessellation.vertices.len(), 4);
        assert!(tessellation
            .indices
            .iter()
            .all(|&v| (v as usize) < tessellation.vertices.len()));
        assert_eq!(area(&tessellation), 16.0);

        // Vertices keep their input order and data
        assert_eq!(
            tessellation.vertices.iter().map(|v| v.data).collect_vec(),
            [0, 1, 2, 3]
        );
    }

    #[test]
    fn hole() {
        let contours = [contour(&SQUARE, 0), contour(&INNER, 4)];

        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::EvenOdd, &no_combine)
            .unwrap();

        assert_eq!(tessellation.vertices.len(), 8);
        assert!((area(&tessellation) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn non_zero_fills_nested_contours_of_same_orientation() {
        let contours = [contour(&SQUARE, 0), contour(&INNER, 4)];

        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::NonZero, &no_combine)
            .unwrap();

        assert!((area(&tessellation) - 16.0).abs() < 1e-5);

        // Opposite orientation cancels out
        let mut reversed = INNER;
        reversed.reverse();
        let contours = [contour(&SQUARE, 0), contour(&reversed, 4)];

        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::NonZero, &no_combine)
            .unwrap();

        assert!((area(&tessellation) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn shared_points_are_combined() {
        let left = contour(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]], 0);
        let right = contour(&[[2.0, 0.0], [4.0, 0.0], [4.0, 2.0], [2.0, 2.0]], 10);

        let calls = RefCell::new(Vec::new());
        let combine = |position: Vec2, data: &[&u32], weights: &[f32]| {
            calls
                .borrow_mut()
                .push((position, data.iter().map(|&&v| v).collect_vec(), weights.to_vec()));
            data.iter().map(|&&v| v).sum::<u32>()
        };

        let tessellation = EarcutTessellator::new()
            .tessellate(&[left, right], WindingRule::EvenOdd, &combine)
            .unwrap();

        assert_eq!(tessellation.vertices.len(), 6);
        assert_eq!(tessellation.triangle_count(), 4);
        assert!((area(&tessellation) - 8.0).abs() < 1e-5);

        let calls = calls.into_inner();
        assert_eq!(
            calls,
            [
                (vec2(2.0, 0.0), vec![1, 10], vec![0.5, 0.5]),
                (vec2(2.0, 2.0), vec![2, 13], vec![0.5, 0.5]),
            ]
        );
    }

    #[test]
    fn repeated_closing_point() {
        let mut points = SQUARE.to_vec();
        points.push(SQUARE[0]);

        let tessellation = EarcutTessellator::new()
            .tessellate(&[contour(&points, 0)], WindingRule::EvenOdd, &|_: Vec2, data: &[&u32], _: &[f32]| *data[0])
            .unwrap();

        assert_eq!(tessellation.vertices.len(), 4);
        assert_eq!(tessellation.triangle_count(), 2);
    }

    #[test]
    fn malformed() {
        let mut tessellator = EarcutTessellator::new();

        assert_eq!(
            tessellator.tessellate::<u32, _>(&[], WindingRule::EvenOdd, &no_combine),
            Err(TessellationError::NoContours)
        );

        assert_eq!(
            tessellator.tessellate(
                &[contour(&[[0.0, 0.0], [1.0, 0.0]], 0)],
                WindingRule::EvenOdd,
                &no_combine
            ),
            Err(TessellationError::DegenerateContour(0))
        );

        assert_eq!(
            tessellator.tessellate(
                &[contour(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], 0)],
                WindingRule::EvenOdd,
                &no_combine
            ),
            Err(TessellationError::Empty)
        );
    }

    #[test]
    fn bow_tie() {
        let calls = RefCell::new(Vec::new());
        let combine = |position: Vec2, data: &[&u32], weights: &[f32]| {
            calls
                .borrow_mut()
                .push((position, data.iter().map(|&&v| v).collect_vec(), weights.to_vec()));
            100u32
        };

        let bow_tie = contour(&[[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]], 0);

        for rule in [WindingRule::EvenOdd, WindingRule::NonZero] {
            calls.borrow_mut().clear();

            let tessellation = EarcutTessellator::new()
                .tessellate(&[bow_tie.clone()], rule, &combine)
                .unwrap();

            // Both lobes, which wind in opposite directions
            assert_eq!(tessellation.vertices.len(), 5);
            assert_eq!(tessellation.triangle_count(), 2);
            assert!((area(&tessellation) - 2.0).abs() < 1e-5);

            assert_eq!(
                *calls.borrow(),
                [(vec2(1.0, 1.0), vec![0, 1, 2, 3], vec![0.25; 4])]
            );

            let crossing = tessellation
                .vertices
                .iter()
                .find(|v| v.data == 100)
                .unwrap();
            assert_eq!(crossing.position, vec2(1.0, 1.0));
        }
    }

    #[test]
    fn overlapping_squares() {
        let first = contour(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]], 0);
        let second = contour(&[[1.0, 1.0], [4.0, 1.0], [4.0, 4.0], [1.0, 4.0]], 10);

        let calls = RefCell::new(Vec::new());
        let combine = |position: Vec2, data: &[&u32], weights: &[f32]| {
            let mut calls = calls.borrow_mut();
            calls.push((position, data.iter().map(|&&v| v).collect_vec(), weights.to_vec()));
            100 + calls.len() as u32
        };

        let contours = [first, second];

        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::EvenOdd, &combine)
            .unwrap();

        // Both squares without their overlap
        assert!((area(&tessellation) - 11.0).abs() < 1e-5);
        assert_eq!(tessellation.vertices.len(), 10);

        // Weighted by where the crossing lies along each edge
        let calls = calls.into_inner();
        assert_eq!(calls.len(), 2);

        let expected = [
            (vec2(2.0, 1.0), [1, 2, 10, 11], [0.25, 0.25, 1.0 / 3.0, 1.0 / 6.0]),
            (vec2(1.0, 2.0), [2, 3, 13, 10], [0.25, 0.25, 1.0 / 6.0, 1.0 / 3.0]),
        ];

        for ((position, data, weights), (expected_position, expected_data, expected_weights)) in
            calls.iter().zip(expected)
        {
            assert!(position.abs_diff_eq(expected_position, 1e-6));
            assert_eq!(data, &expected_data);
            for (a, b) in weights.iter().zip(expected_weights) {
                assert!((a - b).abs() < 1e-6, "{weights:?}");
            }
        }

        let created = tessellation
            .vertices
            .iter()
            .filter(|v| v.data > 100)
            .map(|v| v.position)
            .collect_vec();
        assert_eq!(created.len(), 2);

        // The union covers the overlap once, leaving the corners inside the other square unused
        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::NonZero, &|_: Vec2, _: &[&u32], _: &[f32]| 100u32)
            .unwrap();

        assert!((area(&tessellation) - 12.0).abs() < 1e-5);
        assert_eq!(tessellation.vertices.len(), 8);
        assert!(tessellation
            .vertices
            .iter()
            .all(|v| v.position != vec2(2.0, 2.0) && v.position != vec2(1.0, 1.0)));
    }

    #[test]
    fn touching_regions_stay_apart() {
        // Two squares meeting at a single corner
        let contours = [
            contour(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], 0),
            contour(&[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]], 10),
        ];

        let tessellation = EarcutTessellator::new()
            .tessellate(&contours, WindingRule::EvenOdd, &|_: Vec2, data: &[&u32], _: &[f32]| {
                *data[0]
            })
            .unwrap();

        assert_eq!(tessellation.vertices.len(), 7);
        assert_eq!(tessellation.triangle_count(), 4);
        assert!((area(&tessellation) - 2.0).abs() < 1e-5);
    }
}
