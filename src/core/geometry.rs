//! Rectangles and margins in device-independent pixels.

/// Axis-aligned rectangle.  `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn translate_y(&self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..*self
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Overlap of two rects.  Edge-adjacent rects produce a zero-area
    /// intersection rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if left > right || top > bottom {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// ───────────────────────────────────────── margins ───────────

/// Per-edge margin, CSS order (top, right, bottom, left).
///
/// Positive values grow a rect outward, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Parse CSS margin shorthand with one to four `px` values,
    /// e.g. `"0px 0px -100px 0px"`.  Unit-less zero is accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let values: Vec<f64> = s
            .split_whitespace()
            .map(parse_px)
            .collect::<Option<Vec<_>>>()?;

        match values.as_slice() {
            [all] => Some(Self::new(*all, *all, *all, *all)),
            [v, h] => Some(Self::new(*v, *h, *v, *h)),
            [t, h, b] => Some(Self::new(*t, *h, *b, *h)),
            [t, r, b, l] => Some(Self::new(*t, *r, *b, *l)),
            _ => None,
        }
    }

    /// Apply the margins to `rect`.
    pub fn expand(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            rect.width + self.left + self.right,
            rect.height + self.top + self.bottom,
        )
    }
}

impl std::fmt::Display for Margins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

fn parse_px(token: &str) -> Option<f64> {
    let number = token.strip_suffix("px").unwrap_or(token);
    let value: f64 = number.parse().ok().filter(|v: &f64| v.is_finite())?;
    if token.ends_with("px") || value == 0.0 {
        Some(value)
    } else {
        None
    }
}
