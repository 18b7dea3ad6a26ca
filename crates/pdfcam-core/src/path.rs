//! Subpath accumulation for the path construction operators.
//!
//! Three parallel buffers are kept, one per [`SubpathKind`]. Each has an open
//! subpath under construction and a list of subpaths already closed by `h`.
//! The kind of the last construction operator is the *active kind*; painting
//! operators realize only the active kind.

use crate::geometry::Point;

/// Geometry kind of a subpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubpathKind {
    Lines,
    Bezier,
    Rectangle,
}

/// One contiguous subpath, already in target-unit coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Subpath {
    /// Polyline vertices.
    Lines(Vec<Point>),
    /// Curve segments as `[start, c1, c2, stop]`.
    Bezier(Vec<[Point; 4]>),
    /// Five closed corner points.
    Rectangle(Vec<Point>),
}

impl Subpath {
    pub fn kind(&self) -> SubpathKind {
        match self {
            Subpath::Lines(_) => SubpathKind::Lines,
            Subpath::Bezier(_) => SubpathKind::Bezier,
            Subpath::Rectangle(_) => SubpathKind::Rectangle,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Subpath::Lines(pts) | Subpath::Rectangle(pts) => pts.is_empty(),
            Subpath::Bezier(segs) => segs.is_empty(),
        }
    }
}

/// Subpaths handed to a painting operator.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPath {
    pub kind: SubpathKind,
    /// Subpaths closed with `h` since the last paint.
    pub closed: Vec<Subpath>,
    /// The subpath still under construction, if any.
    pub open: Option<Subpath>,
}

impl PendingPath {
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty() && self.open.is_none()
    }

    pub fn len(&self) -> usize {
        self.closed.len() + usize::from(self.open.is_some())
    }
}

#[derive(Debug, Clone)]
struct KindBuffer<T> {
    open: Vec<T>,
    path: Vec<Vec<T>>,
}

impl<T> Default for KindBuffer<T> {
    fn default() -> Self {
        Self {
            open: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl<T> KindBuffer<T> {
    fn close(&mut self) -> bool {
        if self.open.is_empty() {
            return false;
        }
        let open = std::mem::take(&mut self.open);
        self.path.push(open);
        true
    }

    fn is_empty(&self) -> bool {
        self.open.is_empty() && self.path.is_empty()
    }

    fn clear(&mut self) {
        self.open.clear();
        self.path.clear();
    }
}

/// Accumulates subpaths between painting operators.
///
/// Points are expected to be already transformed into target units.
#[derive(Debug, Clone, Default)]
pub struct PathAccumulator {
    lines: KindBuffer<Point>,
    bezier: KindBuffer<[Point; 4]>,
    rectangle: KindBuffer<Point>,
    active: Option<SubpathKind>,
    current_point: Option<Point>,
    subpath_start: Option<Point>,
    closed: bool,
    /// The most recent structural event was `h` moving a subpath into the path.
    just_closed: bool,
}

impl PathAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `m` operator: start a new subpath at `p`.
    ///
    /// Resets the open line buffer to `[p]` and drops any open curve chain.
    pub fn move_to(&mut self, p: Point) {
        self.lines.open = vec![p];
        self.bezier.open.clear();
        self.current_point = Some(p);
        self.subpath_start = Some(p);
        self.closed = false;
        self.just_closed = false;
        self.active = Some(SubpathKind::Lines);
    }

    /// `l` operator: straight line from the current point to `p`.
    pub fn line_to(&mut self, p: Point) {
        if self.lines.open.is_empty() {
            if let Some(cp) = self.current_point {
                self.lines.open.push(cp);
            }
        }
        self.lines.open.push(p);
        self.extended(SubpathKind::Lines, p);
    }

    /// `c` operator: cubic curve from the current point.
    ///
    /// Ignored when there is no current point.
    pub fn curve_to(&mut self, c1: Point, c2: Point, stop: Point) {
        let Some(start) = self.current_point else {
            return;
        };
        self.bezier.open.push([start, c1, c2, stop]);
        self.extended(SubpathKind::Bezier, stop);
    }

    /// `v` operator: cubic curve whose first control point is the current point.
    pub fn curve_to_v(&mut self, c2: Point, stop: Point) {
        let Some(start) = self.current_point else {
            return;
        };
        self.curve_to(start, c2, stop);
    }

    /// `y` operator: cubic curve whose second control point is the endpoint.
    pub fn curve_to_y(&mut self, c1: Point, stop: Point) {
        self.curve_to(c1, stop, stop);
    }

    /// `re` operator: rectangle with origin `p` and transformed extent.
    ///
    /// A rectangle still open from an earlier `re` is moved into the path first.
    pub fn rectangle(&mut self, p: Point, width: f64, height: f64) {
        self.rectangle.close();
        self.rectangle.open = vec![
            p,
            Point::new(p.x + width, p.y),
            Point::new(p.x + width, p.y + height),
            Point::new(p.x, p.y + height),
            p,
        ];
        self.current_point = Some(p);
        self.subpath_start = Some(p);
        self.closed = false;
        self.just_closed = false;
        self.active = Some(SubpathKind::Rectangle);
    }

    fn extended(&mut self, kind: SubpathKind, p: Point) {
        self.current_point = Some(p);
        self.closed = false;
        self.just_closed = false;
        self.active = Some(kind);
    }

    /// `h` operator: close the open subpath of the active kind.
    ///
    /// Line subpaths get the recorded start point appended; curve and
    /// rectangle subpaths are moved as-is.
    pub fn close_subpath(&mut self) {
        let moved = match self.active {
            None => false,
            Some(SubpathKind::Lines) => {
                if let (Some(start), Some(&last)) = (self.subpath_start, self.lines.open.last()) {
                    if last != start {
                        self.lines.open.push(start);
                    }
                }
                self.lines.close()
            }
            Some(SubpathKind::Bezier) => self.bezier.close(),
            Some(SubpathKind::Rectangle) => self.rectangle.close(),
        };
        if self.active.is_some() {
            self.closed = true;
        }
        if let Some(start) = self.subpath_start {
            self.current_point = Some(start);
        }
        self.just_closed = moved;
    }

    /// `W`/`W*` operator: drop the clip region's geometry.
    ///
    /// Discards the open subpath of the active kind and, when the previous
    /// event closed a subpath into the path, that subpath as well.
    pub fn clip(&mut self) {
        match self.active {
            None => {}
            Some(SubpathKind::Lines) => {
                self.lines.open.clear();
                if self.just_closed {
                    self.lines.path.pop();
                }
            }
            Some(SubpathKind::Bezier) => {
                self.bezier.open.clear();
                if self.just_closed {
                    self.bezier.path.pop();
                }
            }
            Some(SubpathKind::Rectangle) => {
                self.rectangle.open.clear();
                if self.just_closed {
                    self.rectangle.path.pop();
                }
            }
        }
        self.just_closed = false;
    }

    /// Take the active kind's subpaths for a painting operator and reset.
    ///
    /// Buffers of inactive kinds are discarded; the count of discarded
    /// subpaths is returned alongside.
    pub fn take_for_paint(&mut self) -> (Option<PendingPath>, usize) {
        let pending = self.active.map(|kind| match kind {
            SubpathKind::Lines => {
                let (closed, open) = drain(&mut self.lines);
                PendingPath {
                    kind,
                    closed: closed.into_iter().map(Subpath::Lines).collect(),
                    open: open.map(Subpath::Lines),
                }
            }
            SubpathKind::Bezier => {
                let (closed, open) = drain(&mut self.bezier);
                PendingPath {
                    kind,
                    closed: closed.into_iter().map(Subpath::Bezier).collect(),
                    open: open.map(Subpath::Bezier),
                }
            }
            SubpathKind::Rectangle => {
                let (closed, open) = drain(&mut self.rectangle);
                PendingPath {
                    kind,
                    closed: closed.into_iter().map(Subpath::Rectangle).collect(),
                    open: open.map(Subpath::Rectangle),
                }
            }
        });
        let discarded = self.pending_subpath_count();
        self.discard();
        (pending.filter(|p| !p.is_empty()), discarded)
    }

    /// `n` operator and post-paint reset: drop every buffer.
    pub fn discard(&mut self) {
        self.lines.clear();
        self.bezier.clear();
        self.rectangle.clear();
        self.active = None;
        self.current_point = None;
        self.subpath_start = None;
        self.closed = false;
        self.just_closed = false;
    }

    fn pending_subpath_count(&self) -> usize {
        fn count<T>(b: &KindBuffer<T>) -> usize {
            b.path.len() + usize::from(!b.open.is_empty())
        }
        count(&self.lines) + count(&self.bezier) + count(&self.rectangle)
    }

    pub fn active_kind(&self) -> Option<SubpathKind> {
        self.active
    }

    /// Whether the last structural operator was a close.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current_point
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.bezier.is_empty() && self.rectangle.is_empty()
    }
}

fn drain<T>(buffer: &mut KindBuffer<T>) -> (Vec<Vec<T>>, Option<Vec<T>>) {
    let closed = std::mem::take(&mut buffer.path);
    let open = std::mem::take(&mut buffer.open);
    (closed, (!open.is_empty()).then_some(open))
}
