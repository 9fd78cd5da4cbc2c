//! Position delegates
//!
//! A collider may push its position to one external object every time it is
//! moved. The position written is `meters_to_display * (box.min + pivot)`.
//! Delegates are written, never read, by the collision system.

use crate::foundation::math::{affine, Mat3, Point2};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Generic receiver for collider positions
pub trait ColliderDelegate {
    /// Called with the collider's display-space position after each move
    fn set_position(&mut self, position: Point2);
}

/// A node in an external transform hierarchy
///
/// The collision system reads the node's world transform, replaces its
/// translation and writes it back, so rotation and scale are preserved.
pub trait TransformNode {
    /// Current world transform
    fn world(&self) -> Mat3;

    /// Overwrite the world transform
    fn set_world(&mut self, world: Mat3);
}

/// Where a collider's position goes after it moves
#[derive(Default)]
pub enum PositionDelegate {
    /// Nothing is notified
    #[default]
    None,

    /// A shared transform whose translation column is overwritten
    RawTransform(Rc<RefCell<Mat3>>),

    /// A scene node whose world translation is replaced
    SceneNode(Rc<RefCell<dyn TransformNode>>),

    /// Any other receiver
    Generic(Box<dyn ColliderDelegate>),
}

impl PositionDelegate {
    /// Is a delegate attached?
    pub fn is_attached(&self) -> bool {
        !matches!(self, PositionDelegate::None)
    }

    /// Push a display-space position to the delegate
    ///
    /// A shared transform that is still borrowed elsewhere is skipped with a
    /// warning; it picks up the position on the next move.
    pub(crate) fn push(&mut self, position: Point2) {
        match self {
            PositionDelegate::None => {}
            PositionDelegate::RawTransform(xform) => match xform.try_borrow_mut() {
                Ok(mut xform) => affine::set_translation(&mut xform, position),
                Err(_) => log::warn!("Transform delegate already borrowed; skipping position {:?}", position),
            },
            PositionDelegate::SceneNode(node) => match node.try_borrow_mut() {
                Ok(mut node) => {
                    let mut world = node.world();
                    affine::set_translation(&mut world, position);
                    node.set_world(world);
                }
                Err(_) => log::warn!("Scene node delegate already borrowed; skipping position {:?}", position),
            },
            PositionDelegate::Generic(delegate) => delegate.set_position(position),
        }
    }
}

impl fmt::Debug for PositionDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            PositionDelegate::None => "None",
            PositionDelegate::RawTransform(_) => "RawTransform",
            PositionDelegate::SceneNode(_) => "SceneNode",
            PositionDelegate::Generic(_) => "Generic",
        };
        f.write_str(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::vec2;
    use approx::assert_relative_eq;

    struct Node {
        world: Mat3,
    }

    impl TransformNode for Node {
        fn world(&self) -> Mat3 {
            self.world
        }

        fn set_world(&mut self, world: Mat3) {
            self.world = world;
        }
    }

    struct Recorder(Rc<RefCell<Vec<Point2>>>);

    impl ColliderDelegate for Recorder {
        fn set_position(&mut self, position: Point2) {
            self.0.borrow_mut().push(position);
        }
    }

    #[test]
    fn test_raw_transform_translation_overwritten() {
        let xform = Rc::new(RefCell::new(affine::scale(3.0)));
        let mut delegate = PositionDelegate::RawTransform(Rc::clone(&xform));
        delegate.push(Point2::new(7.0, -1.0));

        let m = *xform.borrow();
        assert_relative_eq!(affine::get_translation(&m), vec2(7.0, -1.0));
        assert_relative_eq!(m[(0, 0)], 3.0);
    }

    #[test]
    fn test_scene_node_keeps_linear_part() {
        let node = Rc::new(RefCell::new(Node { world: affine::scale(2.0) }));
        let shared: Rc<RefCell<dyn TransformNode>> = node.clone();
        let mut delegate = PositionDelegate::SceneNode(shared);
        delegate.push(Point2::new(1.0, 2.0));

        let world = node.borrow().world;
        assert_relative_eq!(affine::get_translation(&world), vec2(1.0, 2.0));
        assert_relative_eq!(world[(1, 1)], 2.0);
    }

    #[test]
    fn test_borrowed_transform_is_skipped() {
        let xform = Rc::new(RefCell::new(affine::scale(1.0)));
        let mut delegate = PositionDelegate::RawTransform(Rc::clone(&xform));
        {
            let _held = xform.borrow();
            delegate.push(Point2::new(4.0, 4.0));
        }
        assert_relative_eq!(affine::get_translation(&xform.borrow()), vec2(0.0, 0.0));

        delegate.push(Point2::new(4.0, 4.0));
        assert_relative_eq!(affine::get_translation(&xform.borrow()), vec2(4.0, 4.0));

        let node = Rc::new(RefCell::new(Node { world: affine::scale(1.0) }));
        let shared: Rc<RefCell<dyn TransformNode>> = node.clone();
        let mut delegate = PositionDelegate::SceneNode(shared);
        {
            let _held = node.borrow_mut();
            delegate.push(Point2::new(2.0, 3.0));
        }
        assert_relative_eq!(affine::get_translation(&node.borrow().world), vec2(0.0, 0.0));
    }

    #[test]
    fn test_generic_receives_positions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut delegate = PositionDelegate::Generic(Box::new(Recorder(Rc::clone(&log))));
        assert!(delegate.is_attached());
        delegate.push(Point2::new(0.5, 0.25));
        assert_eq!(log.borrow().as_slice(), &[Point2::new(0.5, 0.25)]);
        assert!(!PositionDelegate::None.is_attached());
    }
}
