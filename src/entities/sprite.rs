use ratatui::layout::Rect;

/// The play field in cells. Coordinates are relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: u16,
    pub height: u16,
}

impl Field {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Largest x a sprite of `width` can take while staying inside.
    pub fn max_x(&self, width: u16) -> u16 {
        self.width.saturating_sub(width)
    }

    /// Largest y a sprite of `height` can take while staying inside.
    pub fn max_y(&self, height: u16) -> u16 {
        self.height.saturating_sub(height)
    }
}

/// Common state of every drawable actor: where it is, how big it is and
/// whether it still takes part in the game.
pub trait Sprite {
    fn position(&self) -> (u16, u16);

    fn size(&self) -> (u16, u16);

    fn is_visible(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        let (width, height) = self.size();
        Rect::new(x, y, width, height)
    }

    /// Axis-aligned bounding-box overlap. Hidden sprites never collide.
    fn collides_with<S: Sprite + ?Sized>(&self, other: &S) -> bool
    where
        Self: Sized,
    {
        self.is_visible() && other.is_visible() && self.bounds().intersects(other.bounds())
    }
}
