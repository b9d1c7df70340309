use ahrs::{utils::deg_to_rad, Tilt};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use nalgebra as na;

pub const BOARD_LENGTH: f32 = 5.0;
pub const BOARD_WIDTH: f32 = 3.0;
pub const BOARD_THICKNESS: f32 = 0.8;
pub const AXIS_LENGTH: f32 = 3.0;

/// Half-extent of the drawn world cube on every axis
pub const WORLD_LIMIT: f32 = 5.0;

/// Interior grid line positions on each back pane
const GRID_TICKS: [f32; 3] = [-2.5, 0.0, 2.5];

/// Camera rotation per dragged pixel, in degrees
const ORBIT_DEG_PER_PIXEL: f32 = 0.5;

/// Vertex indices of each face: bottom, top, then the four sides
pub const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

pub const EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

const BOTTOM_FILL: Color32 = Color32::from_rgb(13, 56, 153);
const TOP_FILL: Color32 = Color32::from_rgb(38, 128, 255);
const SIDE_FILL: Color32 = Color32::from_rgb(26, 89, 230);
const FACE_OUTLINE: Color32 = Color32::from_rgb(13, 38, 128);
const EDGE_COLOR: Color32 = Color32::from_rgb(5, 13, 64);
const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(0, 128, 0),
    Color32::from_rgb(0, 0, 255),
];
const AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// Rectangular box centred on the origin
#[derive(Debug, Clone)]
pub struct BoardGeometry {
    vertices: [na::Point3<f32>; 8],
}

impl BoardGeometry {
    pub fn new(length: f32, width: f32, thickness: f32) -> Self {
        let (l, w, t) = (length / 2.0, width / 2.0, thickness / 2.0);
        Self {
            vertices: [
                na::Point3::new(-l, -w, -t),
                na::Point3::new(l, -w, -t),
                na::Point3::new(l, w, -t),
                na::Point3::new(-l, w, -t),
                na::Point3::new(-l, -w, t),
                na::Point3::new(l, -w, t),
                na::Point3::new(l, w, t),
                na::Point3::new(-l, w, t),
            ],
        }
    }

    pub fn vertices(&self) -> &[na::Point3<f32>; 8] {
        &self.vertices
    }

    pub fn rotated(&self, rotation: &na::Rotation3<f32>) -> [na::Point3<f32>; 8] {
        self.vertices.map(|v| rotation * v)
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(BOARD_LENGTH, BOARD_WIDTH, BOARD_THICKNESS)
    }
}

/// Orthographic camera orbiting the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Angle above the XY plane, in degrees
    pub elevation: f32,
    /// Rotation about the Z axis, in degrees
    pub azimuth: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            elevation: 30.0,
            azimuth: -60.0,
        }
    }
}

impl Camera {
    /// Screen right, screen up and towards-viewer unit vectors in world space
    fn basis(&self) -> [na::Vector3<f32>; 3] {
        let (se, ce) = deg_to_rad(self.elevation).sin_cos();
        let (sa, ca) = deg_to_rad(self.azimuth).sin_cos();
        let right = na::Vector3::new(-sa, ca, 0.0);
        let up = na::Vector3::new(-se * ca, -se * sa, ce);
        let eye = na::Vector3::new(ce * ca, ce * sa, se);
        [right, up, eye]
    }

    /// Orbit the camera by a pointer drag in screen pixels
    ///
    /// Horizontal drags turn about Z, vertical drags tilt the view. Elevation
    /// is clamped to straight up or down and azimuth wraps to (-180, 180].
    pub fn orbit(&mut self, drag: Vec2) {
        self.azimuth -= drag.x * ORBIT_DEG_PER_PIXEL;
        self.elevation = (self.elevation + drag.y * ORBIT_DEG_PER_PIXEL).clamp(-90.0, 90.0);
        if self.azimuth > 180.0 {
            self.azimuth -= 360.0;
        } else if self.azimuth <= -180.0 {
            self.azimuth += 360.0;
        }
    }

    /// View coordinates of a world point: (right, up, depth)
    ///
    /// Depth grows towards the viewer.
    pub fn view(&self, p: &na::Point3<f32>) -> na::Vector3<f32> {
        let [right, up, eye] = self.basis();
        na::Vector3::new(
            p.coords.dot(&right),
            p.coords.dot(&up),
            p.coords.dot(&eye),
        )
    }

    /// Map a world point into `rect`, keeping the whole world cube visible
    pub fn project(&self, p: &na::Point3<f32>, rect: Rect) -> Pos2 {
        let v = self.view(p);
        // The cube's half diagonal bounds its projection for any view direction
        let scale = rect.width().min(rect.height()) / 2.0 / (WORLD_LIMIT * 3f32.sqrt());
        let center = rect.center();
        Pos2::new(center.x + v.x * scale, center.y - v.y * scale)
    }
}

/// Board plus the axes that rotate with it
#[derive(Debug, Clone, Default)]
pub struct Scene {
    geometry: BoardGeometry,
}

impl Scene {
    pub fn frame(&self, tilt: &Tilt) -> SceneFrame {
        let rotation = tilt.rotation();
        SceneFrame {
            vertices: self.geometry.rotated(&rotation),
            axes: [
                rotation * (na::Vector3::x() * AXIS_LENGTH),
                rotation * (na::Vector3::y() * AXIS_LENGTH),
                rotation * (na::Vector3::z() * AXIS_LENGTH),
            ],
        }
    }
}

/// Everything needed to draw one frame, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub vertices: [na::Point3<f32>; 8],

    /// Tips of the body X, Y and Z axes
    pub axes: [na::Vector3<f32>; 3],
}

impl SceneFrame {
    /// Face indices ordered from farthest to nearest
    pub fn faces_back_to_front(&self, camera: &Camera) -> [usize; 6] {
        let depth = |face: usize| {
            FACES[face]
                .iter()
                .map(|&i| camera.view(&self.vertices[i]).z)
                .sum::<f32>()
                / 4.0
        };
        let mut order = [0, 1, 2, 3, 4, 5];
        order.sort_by(|&a, &b| depth(a).total_cmp(&depth(b)));
        order
    }

    pub fn paint(&self, painter: &Painter, rect: Rect, camera: &Camera) {
        paint_world_cube(painter, rect, camera);

        let project = |p: &na::Point3<f32>| camera.project(p, rect);

        for face in self.faces_back_to_front(camera) {
            let points = FACES[face]
                .iter()
                .map(|&i| project(&self.vertices[i]))
                .collect();
            let fill = match face {
                0 => BOTTOM_FILL,
                1 => TOP_FILL,
                _ => SIDE_FILL,
            };
            painter.add(Shape::convex_polygon(
                points,
                fill,
                Stroke::new(1.8, FACE_OUTLINE),
            ));
        }

        for [a, b] in EDGES {
            painter.line_segment(
                [project(&self.vertices[a]), project(&self.vertices[b])],
                Stroke::new(2.5, EDGE_COLOR),
            );
        }

        let origin = project(&na::Point3::origin());
        for (axis, color) in self.axes.iter().zip(AXIS_COLORS) {
            painter.line_segment(
                [origin, project(&na::Point3::from(*axis))],
                Stroke::new(2.0, color),
            );
        }
    }
}

/// Grid lines on the three cube panes facing away from the camera
fn grid_segments(camera: &Camera) -> Vec<[na::Point3<f32>; 2]> {
    let [_, _, eye] = camera.basis();
    let mut segments = Vec::with_capacity(3 * 2 * GRID_TICKS.len());
    for axis in 0..3 {
        // The back pane sits on the side opposite the viewer
        let pane = if eye[axis] >= 0.0 { -WORLD_LIMIT } else { WORLD_LIMIT };
        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        for tick in GRID_TICKS {
            for (along, across) in [(u, v), (v, u)] {
                let mut start = na::Point3::origin();
                start[axis] = pane;
                start[across] = tick;
                start[along] = -WORLD_LIMIT;
                let mut end = start;
                end[along] = WORLD_LIMIT;
                segments.push([start, end]);
            }
        }
    }
    segments
}

/// Reference cube spanning the world limits, with grid and axis labels
fn paint_world_cube(painter: &Painter, rect: Rect, camera: &Camera) {
    let grid = Stroke::new(0.5, Color32::from_gray(215));
    for [a, b] in grid_segments(camera) {
        painter.line_segment([camera.project(&a, rect), camera.project(&b, rect)], grid);
    }

    let stroke = Stroke::new(1.0, Color32::from_gray(190));
    let corners = BoardGeometry::new(2.0 * WORLD_LIMIT, 2.0 * WORLD_LIMIT, 2.0 * WORLD_LIMIT);
    let corners = corners.vertices();
    for [a, b] in EDGES {
        painter.line_segment(
            [camera.project(&corners[a], rect), camera.project(&corners[b], rect)],
            stroke,
        );
    }

    let offset = WORLD_LIMIT * 1.15;
    let label_positions = [
        na::Point3::new(0.0, -offset, -WORLD_LIMIT),
        na::Point3::new(offset, 0.0, -WORLD_LIMIT),
        na::Point3::new(-offset, -WORLD_LIMIT, 0.0),
    ];
    for (pos, name) in label_positions.iter().zip(AXIS_NAMES) {
        painter.text(
            camera.project(pos, rect),
            Align2::CENTER_CENTER,
            name,
            FontId::proportional(14.0),
            Color32::from_gray(110),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn assert_close(a: &na::Vector3<f32>, b: &na::Vector3<f32>) {
        assert!((a - b).norm() < 1e-5, "expected {:?}, got {:?}", b, a);
    }

    #[test]
    fn test_board_dimensions() {
        let geometry = BoardGeometry::default();
        let v = geometry.vertices();
        assert_eq!(v[0], na::Point3::new(-2.5, -1.5, -0.4));
        assert_eq!(v[6], na::Point3::new(2.5, 1.5, 0.4));
        // Bottom face at -T/2, top face at +T/2
        assert!(FACES[0].iter().all(|&i| v[i].z < 0.0));
        assert!(FACES[1].iter().all(|&i| v[i].z > 0.0));
    }

    #[test]
    fn test_every_edge_is_on_two_faces() {
        for [a, b] in EDGES {
            let count = FACES
                .iter()
                .filter(|face| {
                    (0..4).any(|k| {
                        let (p, q) = (face[k], face[(k + 1) % 4]);
                        (p, q) == (a, b) || (p, q) == (b, a)
                    })
                })
                .count();
            assert_eq!(count, 2, "edge {:?}", [a, b]);
        }
    }

    #[test]
    fn test_level_frame_matches_geometry() {
        let scene = Scene::default();
        let frame = scene.frame(&Tilt::LEVEL);
        assert_eq!(&frame.vertices, BoardGeometry::default().vertices());
        assert_close(&frame.axes[0], &na::Vector3::new(AXIS_LENGTH, 0.0, 0.0));
        assert_close(&frame.axes[2], &na::Vector3::new(0.0, 0.0, AXIS_LENGTH));
    }

    #[test]
    fn test_rolled_frame_rotates_axes() {
        let scene = Scene::default();
        let frame = scene.frame(&Tilt::new(FRAC_PI_2, 0.0));
        // A quarter roll turns body Y onto world Z and body Z onto world -Y
        assert_close(&frame.axes[0], &na::Vector3::new(AXIS_LENGTH, 0.0, 0.0));
        assert_close(&frame.axes[1], &na::Vector3::new(0.0, 0.0, AXIS_LENGTH));
        assert_close(&frame.axes[2], &na::Vector3::new(0.0, -AXIS_LENGTH, 0.0));
        assert!((frame.vertices[6].z - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_camera_basis_is_orthonormal() {
        let camera = Camera::default();
        let [right, up, eye] = camera.basis();
        for v in [right, up, eye] {
            assert!((v.norm() - 1.0).abs() < 1e-5);
        }
        assert!(right.dot(&up).abs() < 1e-5);
        assert!(right.dot(&eye).abs() < 1e-5);
        assert!(up.dot(&eye).abs() < 1e-5);
        // Right-handed: right x up points at the viewer
        assert_close(&right.cross(&up), &eye);
    }

    #[test]
    fn test_camera_z_is_up_on_screen() {
        let camera = Camera::default();
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(200.0, 100.0));
        let origin = camera.project(&na::Point3::origin(), rect);
        let top = camera.project(&na::Point3::new(0.0, 0.0, 1.0), rect);
        assert_eq!(origin, rect.center());
        assert!(top.y < origin.y);
        assert!((top.x - origin.x).abs() < 1e-4);
    }

    #[test]
    fn test_world_cube_fits_rect() {
        let camera = Camera {
            elevation: 35.0,
            azimuth: 45.0,
        };
        let rect = Rect::from_min_max(Pos2::new(10.0, 20.0), Pos2::new(410.0, 320.0));
        let cube = BoardGeometry::new(2.0 * WORLD_LIMIT, 2.0 * WORLD_LIMIT, 2.0 * WORLD_LIMIT);
        for corner in cube.vertices() {
            let p = camera.project(corner, rect);
            assert!(rect.expand(1e-3).contains(p), "{:?} outside {:?}", p, rect);
        }
    }

    fn split_by_depth(order: [usize; 6]) -> ([usize; 3], [usize; 3]) {
        let mut back = [order[0], order[1], order[2]];
        let mut front = [order[3], order[4], order[5]];
        back.sort();
        front.sort();
        (back, front)
    }

    #[test]
    fn test_level_board_hidden_faces_drawn_first() {
        let frame = Scene::default().frame(&Tilt::LEVEL);
        let order = frame.faces_back_to_front(&Camera::default());
        // Looking down from -Y, +X: top, -Y side and +X side face the viewer
        assert_eq!(split_by_depth(order), ([0, 4, 5], [1, 2, 3]));
    }

    #[test]
    fn test_flipped_board_hidden_faces_drawn_first() {
        let frame = Scene::default().frame(&Tilt::new(core::f32::consts::PI, 0.0));
        let order = frame.faces_back_to_front(&Camera::default());
        assert_eq!(split_by_depth(order), ([1, 2, 5], [0, 3, 4]));
    }

    #[test]
    fn test_orbit_follows_drag() {
        let mut camera = Camera::default();
        camera.orbit(Vec2::new(20.0, -10.0));
        assert_eq!(camera.azimuth, -70.0);
        assert_eq!(camera.elevation, 25.0);
    }

    #[test]
    fn test_orbit_clamps_elevation_and_wraps_azimuth() {
        let mut camera = Camera {
            elevation: 80.0,
            azimuth: -170.0,
        };
        camera.orbit(Vec2::new(40.0, 100.0));
        assert_eq!(camera.elevation, 90.0);
        assert_eq!(camera.azimuth, 170.0);

        camera.orbit(Vec2::new(-40.0, -400.0));
        assert_eq!(camera.elevation, -90.0);
        assert_eq!(camera.azimuth, -170.0);
    }

    #[test]
    fn test_grid_on_back_panes() {
        // Default view looks from +X, -Y, +Z: back panes are x = -5, y = +5, z = -5
        let segments = grid_segments(&Camera::default());
        assert_eq!(segments.len(), 18);
        let back = [-WORLD_LIMIT, WORLD_LIMIT, -WORLD_LIMIT];
        for axis in 0..3 {
            let on_pane = segments
                .iter()
                .filter(|[a, b]| a[axis] == back[axis] && b[axis] == back[axis])
                .count();
            assert_eq!(on_pane, 6, "axis {}", axis);
        }
        for [a, b] in &segments {
            assert!(a.iter().chain(b.iter()).all(|c| c.abs() <= WORLD_LIMIT));
            assert_eq!((b - a).norm(), 2.0 * WORLD_LIMIT);
        }
    }
}
