use crate::app::{GridPos, Vec2};

use super::sprites::{SpriteId, SpriteSheet};
use super::transform::{grid_to_iso, TILE_HEIGHT_PX, TILE_WIDTH_PX};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::rgba(255, 255, 255, 255);
    pub const YELLOW: Tint = Tint::rgba(253, 249, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled to `alpha` in `[0, 1]`.
    pub fn faded(self, alpha: f32) -> Self {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (alpha * 255.0).round() as u8,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub source: Rect,
    pub dest: Rect,
    /// Subtracted from `dest`'s origin by the renderer.
    pub anchor: Vec2,
    pub rotation: f32,
    pub tint: Tint,
}

/// Closed line strip drawn over the sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineDraw {
    pub points: [Vec2; 5],
    pub tint: Tint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawDirective {
    Sprite(SpriteDraw),
    Outline(OutlineDraw),
}

/// Per-step directive buffer. Everything pushed during a step leaves through
/// [`DrawList::drain_sorted`] before the next one starts.
#[derive(Debug, Default)]
pub struct DrawList {
    sprites: Vec<SpriteDraw>,
    overlays: Vec<OutlineDraw>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sprite(&mut self, draw: SpriteDraw) {
        self.sprites.push(draw);
    }

    pub fn push_outline(&mut self, draw: OutlineDraw) {
        self.overlays.push(draw);
    }

    pub fn len(&self) -> usize {
        self.sprites.len() + self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sprites(&self) -> &[SpriteDraw] {
        &self.sprites
    }

    pub fn overlays(&self) -> &[OutlineDraw] {
        &self.overlays
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.overlays.clear();
    }

    /// Moves every directive out of `other`, keeping push order.
    pub fn append(&mut self, other: &mut DrawList) {
        self.sprites.append(&mut other.sprites);
        self.overlays.append(&mut other.overlays);
    }

    /// Sprites in painter's order (destination y ascending, stable), then
    /// overlays in push order. The list is empty afterwards.
    pub fn drain_sorted(&mut self) -> Vec<DrawDirective> {
        self.sprites.sort_by(|a, b| a.dest.y.total_cmp(&b.dest.y));
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.sprites.drain(..).map(DrawDirective::Sprite));
        out.extend(self.overlays.drain(..).map(DrawDirective::Outline));
        out
    }
}

/// Static floor texture whose top face sits on the cell's diamond.
pub fn floor_tile_draw(sheet: &SpriteSheet, local: GridPos) -> SpriteDraw {
    let iso = grid_to_iso(local.as_vec2());
    SpriteDraw {
        sprite: sheet.id,
        source: sheet.frame_rect(0, false),
        dest: Rect {
            x: iso.x,
            y: iso.y + TILE_HEIGHT_PX / 2.0 - sheet.frame_height,
            w: sheet.frame_width,
            h: sheet.frame_height,
        },
        anchor: Vec2::ZERO,
        rotation: 0.0,
        tint: Tint::WHITE,
    }
}

pub fn animated_tile_draw(sheet: &SpriteSheet, local: GridPos, frame: u32) -> SpriteDraw {
    let iso = grid_to_iso(local.as_vec2());
    SpriteDraw {
        sprite: sheet.id,
        source: sheet.frame_rect(frame, false),
        dest: Rect {
            x: iso.x,
            y: iso.y,
            w: sheet.frame_width,
            h: sheet.frame_height,
        },
        anchor: Vec2::new(
            sheet.frame_width / 2.0 - TILE_WIDTH_PX / 2.0,
            sheet.frame_height - TILE_HEIGHT_PX / 2.0,
        ),
        rotation: 0.0,
        tint: Tint::WHITE,
    }
}

/// Free-standing sprite whose feet rest on the (fractional) grid position.
pub fn actor_draw(sheet: &SpriteSheet, local: Vec2, frame: u32, flip: bool) -> SpriteDraw {
    let iso = grid_to_iso(local);
    SpriteDraw {
        sprite: sheet.id,
        source: sheet.frame_rect(frame, flip),
        dest: Rect {
            x: iso.x,
            y: iso.y,
            w: sheet.frame_width,
            h: sheet.frame_height,
        },
        anchor: Vec2::new(
            sheet.frame_width / 2.0 - TILE_WIDTH_PX / 2.0,
            sheet.frame_height,
        ),
        rotation: 0.0,
        tint: Tint::WHITE,
    }
}

pub fn tile_outline(local: GridPos, tint: Tint) -> OutlineDraw {
    let p = grid_to_iso(local.as_vec2());
    let half_w = TILE_WIDTH_PX / 2.0;
    let half_h = TILE_HEIGHT_PX / 2.0;
    OutlineDraw {
        points: [
            p,
            p + Vec2::new(half_w, -half_h),
            p + Vec2::new(TILE_WIDTH_PX, 0.0),
            p + Vec2::new(half_w, half_h),
            p,
        ],
        tint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rendering::sprites::SpriteCatalog;

    fn sprite_at_y(y: f32, sprite: SpriteId) -> SpriteDraw {
        SpriteDraw {
            sprite,
            source: Rect::default(),
            dest: Rect {
                x: 0.0,
                y,
                w: 1.0,
                h: 1.0,
            },
            anchor: Vec2::ZERO,
            rotation: 0.0,
            tint: Tint::WHITE,
        }
    }

    #[test]
    fn drain_sorts_sprites_by_dest_y_and_keeps_overlays_last() {
        let mut list = DrawList::new();
        list.push_outline(tile_outline(GridPos::new(0, 0), Tint::YELLOW));
        list.push_sprite(sprite_at_y(30.0, SpriteId::Hero));
        list.push_sprite(sprite_at_y(-4.0, SpriteId::FloorTile));
        list.push_sprite(sprite_at_y(30.0, SpriteId::HazardTile));

        let drained = list.drain_sorted();
        assert!(list.is_empty());
        let order: Vec<_> = drained
            .iter()
            .map(|directive| match directive {
                DrawDirective::Sprite(draw) => Some(draw.sprite),
                DrawDirective::Outline(_) => None,
            })
            .collect();
        assert_eq!(
            order,
            vec![
                Some(SpriteId::FloorTile),
                Some(SpriteId::Hero),
                Some(SpriteId::HazardTile),
                None
            ]
        );
    }

    #[test]
    fn floor_tile_is_lifted_by_texture_height() {
        let sheet = SpriteCatalog::builtin().sheet(SpriteId::FloorTile);
        let draw = floor_tile_draw(&sheet, GridPos::new(1, 1));
        assert_eq!(draw.dest.x, 0.0);
        assert_eq!(draw.dest.y, 16.0 + 8.0 - 32.0);
        assert_eq!(draw.anchor, Vec2::ZERO);
    }

    #[test]
    fn actor_anchor_centers_sprite_on_tile() {
        let sheet = SpriteCatalog::builtin().sheet(SpriteId::Hero);
        let draw = actor_draw(&sheet, Vec2::new(1.0, 0.0), 1, true);
        assert_eq!(draw.dest.x, 16.0);
        assert_eq!(draw.dest.y, 8.0);
        assert_eq!(draw.anchor, Vec2::new(0.0, 32.0));
        assert_eq!(draw.source.w, -32.0);
    }

    #[test]
    fn outline_is_closed_diamond() {
        let outline = tile_outline(GridPos::new(0, 0), Tint::YELLOW);
        assert_eq!(outline.points[0], outline.points[4]);
        assert_eq!(outline.points[2], Vec2::new(32.0, 0.0));
        assert_eq!(outline.points[1], Vec2::new(16.0, -8.0));
    }

    #[test]
    fn faded_tint_scales_alpha() {
        assert_eq!(Tint::YELLOW.faded(0.5).a, 128);
        assert_eq!(Tint::YELLOW.faded(2.0).a, 255);
        assert_eq!(Tint::YELLOW.faded(-1.0).a, 0);
        assert_eq!(Tint::YELLOW.faded(0.5).r, 253);
    }
}
