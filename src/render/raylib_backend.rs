//! raylib backend (feature `window`).
//!
//! Textures are generated procedurally from the [`SpriteStore`] sizes, so the
//! demo needs no asset files. Each frame the recorded [`DrawList`] is
//! replayed through [`RaylibScreen`], which maps world coordinates (y up,
//! counter-clockwise radians) to raylib's screen space (y down, clockwise
//! degrees).

use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::sprite::{SpriteHandle, SpriteId};
use crate::math;
use crate::render::{BlendMode, Flip, SpriteRenderer, SpriteState};
use crate::resources::drawlist::DrawList;
use crate::resources::gameconfig::GameConfig;
use crate::resources::spritestore::SpriteStore;
use crate::systems::time::update_world_time;

/// GPU textures keyed by sprite id.
pub struct SpriteTextures {
    map: FxHashMap<SpriteId, Texture2D>,
}

impl SpriteTextures {
    /// One soft radial blob per registered sprite, at the sprite's size.
    pub fn generate(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        store: &SpriteStore,
    ) -> Result<Self, String> {
        let mut map = FxHashMap::default();
        for (name, handle) in store.iter() {
            let w = handle.width.max(1.0) as i32;
            let h = handle.height.max(1.0) as i32;
            let image = unsafe {
                let raw = ffi::GenImageGradientRadial(
                    w,
                    h,
                    0.0,
                    Color::WHITE.into(),
                    Color::BLANK.into(),
                );
                Image::from_raw(raw)
            };
            let texture = rl
                .load_texture_from_image(thread, &image)
                .map_err(|e| format!("Failed to create texture for '{}': {}", name, e))?;
            map.insert(handle.id, texture);
        }
        Ok(Self { map })
    }

    pub fn get(&self, id: SpriteId) -> Option<&Texture2D> {
        self.map.get(&id)
    }
}

/// [`SpriteRenderer`] drawing into an open raylib frame.
pub struct RaylibScreen<'a, D: RaylibDraw> {
    draw: &'a mut D,
    textures: &'a SpriteTextures,
    states: FxHashMap<SpriteId, SpriteState>,
    screen_height: f32,
}

impl<'a, D: RaylibDraw> RaylibScreen<'a, D> {
    pub fn new(draw: &'a mut D, textures: &'a SpriteTextures, screen_height: f32) -> Self {
        Self {
            draw,
            textures,
            states: FxHashMap::default(),
            screen_height,
        }
    }
}

impl<D: RaylibDraw> SpriteRenderer for RaylibScreen<'_, D> {
    fn draw_sprite(&mut self, sprite: &SpriteHandle, center: math::Vector2, angle: f32, flip: Flip) {
        let Some(texture) = self.textures.get(sprite.id) else {
            return;
        };
        let state = self.sprite_state(sprite.id);

        let (tw, th) = (texture.width as f32, texture.height as f32);
        let src = match flip {
            Flip::None => Rectangle::new(0.0, 0.0, tw, th),
            Flip::Horizontal => Rectangle::new(0.0, 0.0, -tw, th),
            Flip::Vertical => Rectangle::new(0.0, 0.0, tw, -th),
        };
        let dest = Rectangle::new(
            center.x,
            self.screen_height - center.y,
            sprite.width,
            sprite.height,
        );
        let origin = Vector2::new(sprite.width * 0.5, sprite.height * 0.5);
        let alpha = (state.color.a as u16 * state.alpha as u16 / 255) as u8;
        let tint = Color::new(state.color.r, state.color.g, state.color.b, alpha);
        let (mode, factors) = blend_setup(state.blend);

        unsafe {
            if let Some((src, dst, equation)) = factors {
                ffi::rlSetBlendFactors(src, dst, equation);
            }
            ffi::BeginBlendMode(mode as i32);
        }
        self.draw
            .draw_texture_pro(texture, src, dest, origin, -angle.to_degrees(), tint);
        unsafe { ffi::EndBlendMode() };
    }

    fn sprite_state(&self, sprite: SpriteId) -> SpriteState {
        self.states.get(&sprite).copied().unwrap_or_default()
    }

    fn set_sprite_state(&mut self, sprite: SpriteId, state: SpriteState) {
        self.states.insert(sprite, state);
    }
}

const GL_ZERO: i32 = 0;
const GL_ONE: i32 = 1;
const GL_FUNC_ADD: i32 = 0x8006;

/// raylib blend mode for `blend`, with the GL factors to set first when the
/// mode is custom. `None` writes source pixels over the destination.
fn blend_setup(blend: BlendMode) -> (ffi::BlendMode, Option<(i32, i32, i32)>) {
    match blend {
        BlendMode::Blend => (ffi::BlendMode::BLEND_ALPHA, None),
        BlendMode::Additive => (ffi::BlendMode::BLEND_ADDITIVE, None),
        BlendMode::None => (
            ffi::BlendMode::BLEND_CUSTOM,
            Some((GL_ONE, GL_ZERO, GL_FUNC_ADD)),
        ),
    }
}

/// Open a window and run the schedule until it is closed.
pub fn run_window(world: &mut World, schedule: &mut Schedule) -> Result<(), String> {
    let (width, height, fps) = {
        let config = world.resource::<GameConfig>();
        (config.window_width, config.window_height, config.target_fps)
    };

    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("plasmafx")
        .build();
    rl.set_target_fps(fps);

    let textures = SpriteTextures::generate(&mut rl, &thread, world.resource::<SpriteStore>())?;
    info!("Window {}x{} open, {} fps target", width, height, fps);

    while !rl.window_should_close() {
        let dt_ms = (rl.get_frame_time() * 1000.0).round() as u32;
        update_world_time(world, dt_ms);
        schedule.run(world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        let mut screen = RaylibScreen::new(&mut d, &textures, height as f32);
        world.resource::<DrawList>().replay(&mut screen);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_none_copies_source() {
        let (mode, factors) = blend_setup(BlendMode::None);
        assert_eq!(mode as i32, ffi::BlendMode::BLEND_CUSTOM as i32);
        assert_eq!(factors, Some((GL_ONE, GL_ZERO, GL_FUNC_ADD)));
    }

    #[test]
    fn test_blend_and_additive_use_builtin_modes() {
        let (mode, factors) = blend_setup(BlendMode::Blend);
        assert_eq!(mode as i32, ffi::BlendMode::BLEND_ALPHA as i32);
        assert!(factors.is_none());
        let (mode, factors) = blend_setup(BlendMode::Additive);
        assert_eq!(mode as i32, ffi::BlendMode::BLEND_ADDITIVE as i32);
        assert!(factors.is_none());
    }
}
