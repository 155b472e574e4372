//! Sheet sprites and the frame-offset animator

use serde::{Serialize, Deserialize};

/// A sub-rectangle of a texture atlas
///
/// `width` and `height` are in UV units; `scale` multiplies the entity size
/// when the sprite is drawn and when half-extents are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSprite {
    /// Sub-image width in UV units
    pub width: f32,
    /// Sub-image height in UV units
    pub height: f32,
    /// World-space scale applied to the owning entity
    pub scale: f32,
}

impl SheetSprite {
    /// Create a sheet sprite
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self { width, height, scale }
    }

    /// Texture coordinates for a quad at offset `(u, v)`, two triangles
    pub fn tex_coords(&self, u: f32, v: f32) -> [[f32; 2]; 6] {
        [
            [u, v + self.height],
            [u + self.width, v],
            [u, v],
            [u + self.width, v],
            [u, v + self.height],
            [u + self.width, v + self.height],
        ]
    }
}

impl Default for SheetSprite {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Cyclic cursor over a flat `[u0, v0, u1, v1, ...]` list of frame offsets
///
/// Serializes as the bare offset list; deserializing goes through
/// [`SpriteSheetAnimator::new`] and starts at the first frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f32>", into = "Vec<f32>")]
pub struct SpriteSheetAnimator {
    offsets: Vec<f32>,
    cursor: usize,
    u: f32,
    v: f32,
}

impl SpriteSheetAnimator {
    /// Create an animator over the given offset pairs
    ///
    /// A trailing unpaired value is ignored.
    pub fn new(mut offsets: Vec<f32>) -> Self {
        offsets.truncate(offsets.len() - offsets.len() % 2);
        Self { offsets, cursor: 0, u: 0.0, v: 0.0 }
    }

    /// Animator with a single frame at `(u, v)`
    pub fn still(u: f32, v: f32) -> Self {
        let mut animator = Self::new(vec![u, v]);
        animator.advance();
        animator
    }

    /// Whether there is anything to animate
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of frames (offset pairs)
    pub fn frame_count(&self) -> usize {
        self.offsets.len() / 2
    }

    /// Index into the flat offset list of the next frame to show
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The `(u, v)` offset currently shown
    pub fn current_offset(&self) -> (f32, f32) {
        (self.u, self.v)
    }

    /// Show the frame under the cursor and move the cursor to the next pair
    ///
    /// Wraps to the first pair after the last. No-op on an empty animator.
    pub fn advance(&mut self) {
        if self.offsets.is_empty() {
            return;
        }
        self.u = self.offsets[self.cursor];
        self.v = self.offsets[self.cursor + 1];

        self.cursor += 2;
        if self.cursor >= self.offsets.len() {
            self.cursor = 0;
        }
    }

    /// Return to the first frame without showing it
    pub fn restart(&mut self) {
        self.cursor = 0;
    }
}

impl From<Vec<f32>> for SpriteSheetAnimator {
    fn from(offsets: Vec<f32>) -> Self {
        Self::new(offsets)
    }
}

impl From<SpriteSheetAnimator> for Vec<f32> {
    fn from(animator: SpriteSheetAnimator) -> Self {
        animator.offsets
    }
}
