/// Half-width of the square window a click must land in to select a node.
pub const MATCH_THRESHOLD: f64 = 10.0;

/// Two coordinates closer than this on an axis are treated as equal.
pub const COINCIDENCE_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_within(&self, other: Point, threshold: f64) -> bool {
        (self.x - other.x).abs() < threshold && (self.y - other.y).abs() < threshold
    }

    pub fn coincides_with(&self, other: Point) -> bool {
        self.is_within(other, COINCIDENCE_EPSILON)
    }

    pub fn is_origin(&self) -> bool {
        self.coincides_with(Point::default())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Index of the first position (in creation order) whose square window
/// around `target` contains it. Earlier entries win over closer ones.
pub fn find_node_near<I>(positions: I, target: Point) -> Option<usize>
where
    I: IntoIterator<Item = Point>,
{
    positions
        .into_iter()
        .position(|position| position.is_within(target, MATCH_THRESHOLD))
}
