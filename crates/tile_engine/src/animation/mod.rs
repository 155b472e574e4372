//! Sprite-sheet animation
//!
//! Frames are (u, v) offsets into a shared texture atlas. The animator only
//! tracks which offset is current; timing lives with the owner (see
//! [`crate::entity::Entity::animate`]).

pub mod sprite_sheet;

pub use sprite_sheet::{SheetSprite, SpriteSheetAnimator};
