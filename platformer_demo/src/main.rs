//! Platformer Collision Demo
//!
//! Runs a scripted hero through a small level without a window:
//! - Gravity and jumps resolved with sliding movement
//! - Coins collected through trigger events and removed after the query
//! - Named zones reporting enter and exit
//! - A raw transform delegate standing in for the hero sprite
//! - Periodic debug outlines and line-of-sight raycasts
//!
//! Usage: `platformer_demo [level.ron|level.toml]`

mod level;

use level::{to_aabb, LevelDesc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sector_collide::assets::AssetError;
use sector_collide::config::ConfigError;
use sector_collide::debug::DebugLineBuffer;
use sector_collide::foundation::math::{affine, colors, vec2, Mat3, Vec2};
use sector_collide::physics::{
    ColliderDesc, ColliderHandle, CollisionError, CollisionLayers, CollisionSystem, HitSides,
    PositionDelegate, Ray, TriggerKind, AABB,
};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

// Simulation settings (meters per frame)
const FRAMES: usize = 1200;
const RUN_SPEED: f32 = 0.12;
const GRAVITY: f32 = 0.025;
const JUMP_SPEED: f32 = 0.45;
const MAX_FALL: f32 = 0.5;
const COIN_SIZE: f32 = 0.5;
const SIGHT_RANGE: f32 = 8.0;

/// Errors that stop the demo
#[derive(Error, Debug)]
pub enum DemoError {
    /// Collision system failure
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// Level file failure
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Level blob failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a non-solid collider is, stored as its user data
#[derive(Debug, Clone)]
enum Pickup {
    Coin,
    Zone(String),
}

struct Hero {
    handle: ColliderHandle,
    velocity: Vec2,
    grounded: bool,
    sprite: Rc<RefCell<Mat3>>,
}

struct PlatformerDemo {
    world: CollisionSystem,
    hero: Hero,
    coins_left: usize,
    score: usize,
    debug_lines: DebugLineBuffer,
}

impl PlatformerDemo {
    fn new(level: &LevelDesc, level_path: Option<&str>) -> Result<Self, DemoError> {
        let mut world = CollisionSystem::new(level.collision.clone())?;
        world.set_meters_to_display_scale(level.pixels_per_meter);

        let solids = level.solid_boxes(level_path)?;
        let solid_handles = world.add_static_boxes(solids, CollisionLayers::ENVIRONMENT)?;
        log::info!("Added {} solids", solid_handles.len());

        let mut rng = StdRng::seed_from_u64(0xC01);
        let mut coin_corners: Vec<Vec2> = level.coins.iter().map(|c| vec2(c[0], c[1])).collect();
        for _ in 0..level.random_coins {
            coin_corners.push(vec2(rng.gen_range(2.0..38.0), rng.gen_range(8.5..9.2)));
        }
        for corner in &coin_corners {
            world.add_collider(
                ColliderDesc::new(AABB::from_top_left_size(*corner, vec2(COIN_SIZE, COIN_SIZE)))
                    .with_category(CollisionLayers::PICKUP)
                    .with_collision_mask(CollisionLayers::NONE)
                    .with_user_data(Pickup::Coin),
            )?;
        }

        for zone in &level.zones {
            world.add_collider(
                ColliderDesc::new(to_aabb(zone.bounds))
                    .with_category(CollisionLayers::TRIGGER)
                    .with_collision_mask(CollisionLayers::NONE)
                    .with_user_data(Pickup::Zone(zone.name.clone())),
            )?;
        }

        let handle = world.add_collider(
            ColliderDesc::new(level.hero_box())
                .with_category(CollisionLayers::PLAYER)
                .with_collision_mask(CollisionLayers::ENVIRONMENT)
                .with_trigger_mask(CollisionLayers::PICKUP | CollisionLayers::TRIGGER),
        )?;

        // sprite origin sits at the hero's feet
        let sprite = Rc::new(RefCell::new(Mat3::identity()));
        let size = level.hero_box().size();
        world.set_delegate(
            handle,
            PositionDelegate::RawTransform(Rc::clone(&sprite)),
            vec2(0.5 * size.x, size.y),
        )?;

        Ok(Self {
            world,
            hero: Hero {
                handle,
                velocity: Vec2::zeros(),
                grounded: false,
                sprite,
            },
            coins_left: coin_corners.len(),
            score: 0,
            debug_lines: DebugLineBuffer::new(),
        })
    }

    /// Advance one frame; returns false once the hero reaches the exit
    fn step(&mut self, frame: usize) -> Result<bool, DemoError> {
        let hits = self.move_hero(frame)?;
        if hits.hit_right() && self.hero.grounded {
            self.hero.velocity.y = -JUMP_SPEED;
            self.hero.grounded = false;
            log::debug!("Frame {}: jumping over obstacle", frame);
        }

        let reached_exit = self.process_triggers(frame)?;

        if frame % 60 == 0 {
            self.look_ahead(frame);
        }
        if frame % 120 == 0 {
            self.world.debug_draw(&mut self.debug_lines, colors::green());
            log::debug!("Frame {}: {} debug lines", frame, self.debug_lines.len());
            self.debug_lines.clear();
        }

        Ok(!reached_exit)
    }

    fn move_hero(&mut self, frame: usize) -> Result<HitSides, DemoError> {
        let hero = &mut self.hero;
        hero.velocity.x = RUN_SPEED;
        hero.velocity.y = (hero.velocity.y + GRAVITY).min(MAX_FALL);

        let hits = self.world.move_collider(hero.handle, hero.velocity)?;
        if hits.hit_bottom() {
            if !hero.grounded {
                log::trace!("Frame {}: landed", frame);
            }
            hero.grounded = true;
            hero.velocity.y = 0.0;
        } else {
            hero.grounded = false;
        }
        if hits.hit_top() {
            hero.velocity.y = 0.0;
        }
        Ok(hits)
    }

    fn process_triggers(&mut self, frame: usize) -> Result<bool, DemoError> {
        let events = self.world.query_triggers(self.hero.handle, 16)?;

        let mut collected = Vec::new();
        let mut reached_exit = false;
        for event in events {
            let pickup = self.world.user_data::<Pickup>(event.trigger)?.cloned();
            match (event.kind, pickup) {
                (TriggerKind::Enter, Some(Pickup::Coin)) => collected.push(event.trigger),
                (TriggerKind::Enter, Some(Pickup::Zone(name))) => {
                    log::info!("Frame {}: entered {}", frame, name);
                    reached_exit |= name == "exit";
                }
                (TriggerKind::Exit, Some(Pickup::Zone(name))) => {
                    log::info!("Frame {}: left {}", frame, name);
                }
                _ => {}
            }
        }

        for coin in collected {
            self.world.remove_collider(coin)?;
            self.score += 1;
            self.coins_left -= 1;
            log::info!("Frame {}: coin collected ({} left)", frame, self.coins_left);
        }
        Ok(reached_exit)
    }

    fn look_ahead(&self, frame: usize) {
        let Ok(hero) = self.world.collider(self.hero.handle) else {
            return;
        };
        let eye = hero.bounds().center();
        let ray = Ray::new(eye, eye + vec2(SIGHT_RANGE, 0.0));
        let sprite = affine::get_translation(&self.hero.sprite.borrow());

        match self.world.raycast(&ray, CollisionLayers::ENVIRONMENT) {
            Some(hit) => log::info!(
                "Frame {}: sprite at ({:.1}, {:.1}) px, wall {:.2} m ahead",
                frame,
                sprite.x,
                sprite.y,
                hit.u * SIGHT_RANGE
            ),
            None => log::info!(
                "Frame {}: sprite at ({:.1}, {:.1}) px, clear ahead",
                frame,
                sprite.x,
                sprite.y
            ),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let level_path = std::env::args().nth(1);
    let level = LevelDesc::load(level_path.as_deref())?;

    let mut demo = PlatformerDemo::new(&level, level_path.as_deref())?;
    let mut frames_run = FRAMES;
    for frame in 0..FRAMES {
        if !demo.step(frame)? {
            frames_run = frame + 1;
            log::info!("Reached the exit");
            break;
        }
    }

    log::info!(
        "Finished after {} frames: {} coins collected, {} left, {} contacts active",
        frames_run,
        demo.score,
        demo.coins_left,
        demo.world.contact_count()
    );
    Ok(())
}
