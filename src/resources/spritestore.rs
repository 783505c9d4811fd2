//! Named sprite handles.
//!
//! The store hands out [`SpriteHandle`]s by name and assigns their ids. It
//! never owns pixels: a windowed backend builds its textures from the same
//! entries, the headless driver only needs the sizes.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::projectile::ProjectileImages;
use crate::components::sprite::{Facing, SpriteHandle, SpriteId};

pub const HALO: &str = "halo";
pub const FIRE: &str = "fire";
pub const PROJECTILE: &str = "projectile";
pub const SPLASH: &str = "splash";
pub const MUZZLE_PARTICLE: &str = "muzzle_particle";
pub const SPARK: &str = "spark";
pub const RADIAL_SHOT: &str = "radial_shot";
pub const SWIRL: &str = "swirl";

#[derive(Resource, Debug, Default, Clone)]
pub struct SpriteStore {
    map: FxHashMap<String, SpriteHandle>,
    next_id: u32,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with every sprite the built-in effects use.
    pub fn with_effect_sprites() -> Self {
        let mut store = Self::new();
        store.register(HALO, 24.0, 24.0, Facing::Up);
        store.register(FIRE, 12.0, 20.0, Facing::Up);
        store.register(PROJECTILE, 8.0, 32.0, Facing::Up);
        store.register(SPLASH, 32.0, 32.0, Facing::Up);
        store.register(MUZZLE_PARTICLE, 6.0, 6.0, Facing::Right);
        store.register(SPARK, 4.0, 4.0, Facing::Right);
        store.register(RADIAL_SHOT, 10.0, 24.0, Facing::Up);
        store.register(SWIRL, 32.0, 32.0, Facing::Right);
        store
    }

    /// Add a sprite under `name`. Registering a name again replaces its size
    /// and facing but keeps its id.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        width: f32,
        height: f32,
        facing: Facing,
    ) -> SpriteHandle {
        let name = name.into();
        if let Some(existing) = self.map.get_mut(&name) {
            *existing = SpriteHandle {
                width,
                height,
                facing,
                ..*existing
            };
            return *existing;
        }
        let handle = SpriteHandle::new(self.next_id, width, height, facing);
        self.next_id += 1;
        debug!("Registered sprite '{}' as {:?}", name, handle.id);
        self.map.insert(name, handle);
        handle
    }

    pub fn get(&self, name: &str) -> Option<SpriteHandle> {
        self.map.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<SpriteHandle, String> {
        self.get(name)
            .ok_or_else(|| format!("Sprite '{}' is not registered", name))
    }

    /// Name registered for `id`, if any.
    pub fn name_of(&self, id: SpriteId) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, handle)| handle.id == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpriteHandle)> {
        self.map.iter().map(|(name, handle)| (name.as_str(), handle))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The four images of a plasma shot.
    pub fn projectile_images(&self) -> Result<ProjectileImages, String> {
        Ok(ProjectileImages {
            halo: self.require(HALO)?,
            fire: self.require(FIRE)?,
            projectile: self.require(PROJECTILE)?,
            splash: self.require(SPLASH)?,
        })
    }
}
