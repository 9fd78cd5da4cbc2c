//! Game-loop style scenarios

use super::assert_hash_consistent;
use crate::foundation::logging;
use crate::config::CollisionConfig;
use crate::foundation::math::{affine, vec2, Mat3, Point2};
use crate::physics::{
    ColliderDelegate, ColliderDesc, ColliderHandle, CollisionLayers, CollisionSystem,
    PositionDelegate, Ray, TransformNode, TriggerEvent, AABB,
};
use approx::assert_relative_eq;
use std::cell::RefCell;
use std::rc::Rc;

const GRAVITY: f32 = 0.25;

fn hero_desc(aabb: AABB) -> ColliderDesc {
    ColliderDesc::new(aabb)
        .with_category(CollisionLayers::PLAYER)
        .with_collision_mask(CollisionLayers::ENVIRONMENT)
        .with_trigger_mask(CollisionLayers::TRIGGER | CollisionLayers::PICKUP)
}

fn level() -> (CollisionSystem, ColliderHandle) {
    let mut sys = CollisionSystem::new(CollisionConfig::with_capacities(64, 256, 64)).unwrap();
    sys.add_static_boxes(
        vec![
            // floor, left wall, right wall, ledge
            AABB::from_coords(-1.0, 10.0, 21.0, 11.0),
            AABB::from_coords(-1.0, 0.0, 0.0, 10.0),
            AABB::from_coords(20.0, 0.0, 21.0, 10.0),
            AABB::from_coords(8.0, 6.0, 12.0, 6.5),
        ],
        CollisionLayers::ENVIRONMENT,
    )
    .unwrap();
    let hero = sys.add_collider(hero_desc(AABB::from_coords(1.0, 1.0, 2.0, 3.0))).unwrap();
    (sys, hero)
}

#[test]
fn test_hero_falls_and_lands() {
    logging::init();
    let (mut sys, hero) = level();
    let mut vy = 0.0;
    let mut grounded = false;
    for _ in 0..60 {
        vy += GRAVITY;
        let hits = sys.move_collider(hero, vec2(0.0, vy)).unwrap();
        if hits.hit_bottom() {
            vy = 0.0;
            grounded = true;
        }
    }
    assert!(grounded);
    let b = sys.collider(hero).unwrap().bounds();
    assert_relative_eq!(b.max.y, 10.0);
    assert_relative_eq!(b.min.y, 8.0);
    assert_hash_consistent(&sys);
}

#[test]
fn test_hero_runs_into_wall_and_bumps_ledge() {
    let (mut sys, hero) = level();
    sys.set_position(hero, vec2(1.0, 8.0)).unwrap();

    // run right along the floor into the right wall
    let mut last = sys.move_collider(hero, vec2(0.0, 0.5)).unwrap();
    assert!(last.hit_bottom());
    for _ in 0..40 {
        last = sys.move_collider(hero, vec2(0.75, 0.1)).unwrap();
    }
    assert!(last.hit_right());
    assert!(last.hit_bottom());
    assert_relative_eq!(sys.collider(hero).unwrap().bounds().max.x, 20.0);

    // jump under the ledge
    sys.set_position(hero, vec2(9.5, 8.0)).unwrap();
    let hits = sys.move_collider(hero, vec2(0.0, -3.0)).unwrap();
    assert!(hits.hit_top());
    assert_relative_eq!(sys.collider(hero).unwrap().bounds().min.y, 6.5);
}

#[test]
fn test_pickups_and_zones() {
    let (mut sys, hero) = level();
    sys.set_position(hero, vec2(1.0, 8.0)).unwrap();
    let coin = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(4.0, 8.5, 4.5, 9.0))
                .with_category(CollisionLayers::PICKUP)
                .with_user_data("coin"),
        )
        .unwrap();
    let water = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(6.0, 7.0, 9.0, 10.0)).with_category(CollisionLayers::TRIGGER),
        )
        .unwrap();

    let mut collected = Vec::new();
    let mut log = Vec::new();
    for _ in 0..20 {
        sys.move_collider(hero, vec2(0.5, 0.0)).unwrap();
        for event in sys.query_triggers(hero, 8).unwrap() {
            log.push(event);
            if sys.user_data::<&'static str>(event.trigger).unwrap() == Some(&"coin") {
                collected.push(event.trigger);
            }
        }
        // structural changes happen after the query returns
        for handle in collected.drain(..) {
            sys.remove_collider(handle).unwrap();
        }
    }

    assert_eq!(
        log,
        vec![
            TriggerEvent::enter(coin),
            TriggerEvent::enter(water),
            TriggerEvent::exit(water),
        ]
    );
    assert!(!sys.contains(coin));
    assert_eq!(sys.contact_count(), 0);
    assert_hash_consistent(&sys);
}

#[test]
fn test_trigger_removed_while_in_contact() {
    let (mut sys, hero) = level();
    let zone = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(0.5, 0.5, 3.0, 3.0)).with_category(CollisionLayers::TRIGGER),
        )
        .unwrap();
    assert_eq!(sys.query_triggers(hero, 4).unwrap(), vec![TriggerEvent::enter(zone)]);

    sys.remove_collider(zone).unwrap();
    assert_eq!(sys.contact_count(), 0);
    assert!(sys.query_triggers(hero, 4).unwrap().is_empty());
    assert!(sys.query_point(vec2(2.5, 2.5), CollisionLayers::TRIGGER, 4).is_empty());

    // the freed slot is reused by a new zone with a fresh handle
    let again = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(0.5, 0.5, 3.0, 3.0)).with_category(CollisionLayers::TRIGGER),
        )
        .unwrap();
    assert_ne!(again, zone);
    assert_eq!(sys.query_triggers(hero, 4).unwrap(), vec![TriggerEvent::enter(again)]);
}

#[test]
fn test_mover_removed_while_in_contact() {
    let (mut sys, hero) = level();
    let zone = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(0.5, 0.5, 3.0, 3.0)).with_category(CollisionLayers::TRIGGER),
        )
        .unwrap();
    sys.query_triggers(hero, 4).unwrap();
    assert_eq!(sys.contact_count(), 1);

    sys.remove_collider(hero).unwrap();
    assert_eq!(sys.contact_count(), 0);
    assert!(sys.contains(zone));
}

#[test]
fn test_raycast_line_of_sight() {
    let (sys, hero) = level();
    let eye = sys.collider(hero).unwrap().bounds().center();

    let hit = sys
        .raycast(&Ray::new(eye, eye + vec2(30.0, 0.0)), CollisionLayers::ENVIRONMENT)
        .unwrap();
    assert_relative_eq!(hit.point.x, 20.0, epsilon = 1e-4);
    assert_relative_eq!(hit.u, (20.0 - eye.x) / 30.0, epsilon = 1e-5);

    // the hero's own box contains the ray start and is never hit
    let down = sys.raycast(&Ray::new(eye, eye + vec2(0.0, 20.0)), CollisionLayers::ALL).unwrap();
    assert_relative_eq!(down.point.y, 10.0, epsilon = 1e-4);
    assert_ne!(down.collider, hero);
}

struct Sprite {
    world: Mat3,
}

impl TransformNode for Sprite {
    fn world(&self) -> Mat3 {
        self.world
    }

    fn set_world(&mut self, world: Mat3) {
        self.world = world;
    }
}

struct Positions(Rc<RefCell<Vec<Point2>>>);

impl ColliderDelegate for Positions {
    fn set_position(&mut self, position: Point2) {
        self.0.borrow_mut().push(position);
    }
}

#[test]
fn test_delegates_follow_moves() {
    let (mut sys, hero) = level();
    sys.set_meters_to_display_scale(16.0);

    let xform = Rc::new(RefCell::new(Mat3::identity()));
    sys.set_delegate(hero, PositionDelegate::RawTransform(Rc::clone(&xform)), vec2(0.5, 2.0))
        .unwrap();
    sys.move_collider(hero, vec2(1.0, 0.0)).unwrap();
    // min (2, 1) plus pivot (0.5, 2) at 16 px per meter
    assert_relative_eq!(affine::get_translation(&xform.borrow()), vec2(40.0, 48.0));

    let sprite = Rc::new(RefCell::new(Sprite { world: affine::scale(2.0) }));
    let node: Rc<RefCell<dyn TransformNode>> = sprite.clone();
    sys.set_delegate(hero, PositionDelegate::SceneNode(node), vec2(0.0, 0.0)).unwrap();
    sys.move_collider(hero, vec2(1.0, 0.0)).unwrap();
    let world = sprite.borrow().world;
    assert_relative_eq!(affine::get_translation(&world), vec2(48.0, 16.0));
    assert_relative_eq!(world[(0, 0)], 2.0);

    let positions = Rc::new(RefCell::new(Vec::new()));
    sys.set_delegate(hero, PositionDelegate::Generic(Box::new(Positions(Rc::clone(&positions)))), vec2(0.0, 0.0))
        .unwrap();
    sys.move_collider(hero, vec2(0.0, 0.0)).unwrap();
    sys.set_position(hero, vec2(5.0, 5.0)).unwrap();
    assert_eq!(positions.borrow().as_slice(), &[Point2::new(48.0, 16.0)]);

    sys.clear_delegate(hero).unwrap();
    sys.move_collider(hero, vec2(1.0, 0.0)).unwrap();
    assert_eq!(positions.borrow().len(), 1);
    assert!(!sys.collider(hero).unwrap().delegate().is_attached());
}

#[test]
fn test_huge_collider_is_found_everywhere() {
    let mut sys = CollisionSystem::with_capacity(8, 32, 8).unwrap();
    let sky = sys
        .add_collider(
            ColliderDesc::new(AABB::from_coords(-500.0, -500.0, 500.0, 500.0))
                .with_category(CollisionLayers::TRIGGER),
        )
        .unwrap();
    let hero = sys.add_collider(hero_desc(AABB::from_coords(123.0, -77.0, 124.0, -76.0))).unwrap();

    assert_eq!(sys.query_triggers(hero, 4).unwrap(), vec![TriggerEvent::enter(sky)]);
    sys.move_collider(hero, vec2(1000.0, 0.0)).unwrap();
    assert_eq!(sys.query_triggers(hero, 4).unwrap(), vec![TriggerEvent::exit(sky)]);
    assert_hash_consistent(&sys);
}
