//! Recorded draw intents for one frame.
//!
//! [`DrawList`] is a [`SpriteRenderer`] that draws nothing: every
//! `draw_sprite` call is stored as a [`DrawCommand`] together with the sprite
//! state (alpha, tint, blend) in effect at that moment. The render systems
//! fill it each frame; the driver then dumps it as JSON or replays it through
//! a real backend.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::color::Rgba;
use crate::components::sprite::{SpriteHandle, SpriteId};
use crate::math::Vector2;
use crate::render::{BlendMode, Flip, SpriteRenderer, SpriteState};

/// A single recorded sprite draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub sprite: SpriteHandle,
    pub center: Vector2,
    pub angle: f32,
    pub flip: Flip,
    pub alpha: u8,
    pub color: Rgba,
    pub blend: BlendMode,
}

impl DrawCommand {
    pub fn state(&self) -> SpriteState {
        SpriteState {
            alpha: self.alpha,
            color: self.color,
            blend: self.blend,
        }
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    /// Sprites whose state differs from the default.
    states: SmallVec<[(SpriteId, SpriteState); 8]>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget recorded commands. Sprite state is kept, like a real renderer
    /// keeps texture modulation between frames.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn count_for(&self, sprite: SpriteId) -> usize {
        self.commands.iter().filter(|c| c.sprite.id == sprite).count()
    }

    /// True when no sprite carries modified state.
    pub fn state_is_pristine(&self) -> bool {
        self.states.is_empty()
    }

    /// Issue every recorded command against `renderer`, setting the recorded
    /// state around each draw and restoring it afterwards.
    pub fn replay<R: SpriteRenderer + ?Sized>(&self, renderer: &mut R) {
        for cmd in &self.commands {
            let saved = renderer.sprite_state(cmd.sprite.id);
            renderer.set_sprite_state(cmd.sprite.id, cmd.state());
            renderer.draw_sprite(&cmd.sprite, cmd.center, cmd.angle, cmd.flip);
            renderer.set_sprite_state(cmd.sprite.id, saved);
        }
    }

    /// One JSON object per command, newline separated.
    pub fn to_json_lines(&self) -> Result<String, String> {
        let mut out = String::new();
        for cmd in &self.commands {
            let line = serde_json::to_string(cmd)
                .map_err(|e| format!("Failed to serialize draw command: {}", e))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}

impl SpriteRenderer for DrawList {
    fn draw_sprite(&mut self, sprite: &SpriteHandle, center: Vector2, angle: f32, flip: Flip) {
        let state = self.sprite_state(sprite.id);
        self.commands.push(DrawCommand {
            sprite: *sprite,
            center,
            angle,
            flip,
            alpha: state.alpha,
            color: state.color,
            blend: state.blend,
        });
    }

    fn sprite_state(&self, sprite: SpriteId) -> SpriteState {
        self.states
            .iter()
            .find(|(id, _)| *id == sprite)
            .map(|(_, state)| *state)
            .unwrap_or_default()
    }

    fn set_sprite_state(&mut self, sprite: SpriteId, state: SpriteState) {
        let position = self.states.iter().position(|(id, _)| *id == sprite);
        match (position, state == SpriteState::default()) {
            (Some(index), true) => {
                self.states.swap_remove(index);
            }
            (Some(index), false) => self.states[index].1 = state,
            (None, true) => {}
            (None, false) => self.states.push((sprite, state)),
        }
    }
}
