//! Cross-pointer pinch coordination.
//!
//! Two pinch paths exist. Two touch contacts form a primary/secondary pair
//! whose rounded distance drives the pinch delta. A single pointer held with
//! the modifier key drives the delta from its vertical movement (or wheel).
//! The three slots always name distinct, live sessions.

use crate::geometry::Point;
use crate::input::PointerId;
use crate::session::MotionSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Part a session plays in the pinch relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinchRole {
    /// Not pinching
    #[default]
    None,
    /// First contact of the pair
    Primary,
    /// Second contact of the pair
    Secondary,
    /// Single modifier-held pointer
    ModifierPinch,
}

/// Outcome of offering a starting pointer to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchRegistration {
    /// Took the modifier-pinch slot
    ModifierPinch,
    /// Became primary; no pinch yet
    Primary,
    /// Became secondary; the pair is complete and the pinch starts
    Secondary,
    /// Both pair slots are taken
    Unavailable,
}

impl PinchRegistration {
    /// Role the registering session now has.
    #[must_use]
    pub const fn role(self) -> PinchRole {
        match self {
            Self::ModifierPinch => PinchRole::ModifierPinch,
            Self::Primary => PinchRole::Primary,
            Self::Secondary => PinchRole::Secondary,
            Self::Unavailable => PinchRole::None,
        }
    }
}

/// Outcome of removing an ending pointer from the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinchRelease {
    /// An active pinch ended with this pointer
    pub ended: bool,
    /// Secondary promoted to primary
    pub promoted: Option<PointerId>,
}

/// The pinch relation shared by every bound element.
#[derive(Debug, Default)]
pub struct PinchCoordinator {
    primary: Option<PointerId>,
    secondary: Option<PointerId>,
    modifier: Option<PointerId>,
    last_distance: Option<f32>,
}

impl PinchCoordinator {
    /// Create an empty relation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a newly started pointer a pinch slot.
    ///
    /// A modifier-held pointer always takes the modifier slot; a previous
    /// holder stays tracked in `sessions` but stops pinching.
    pub fn register(
        &mut self,
        pointer: PointerId,
        modifier: bool,
        sessions: &mut HashMap<PointerId, MotionSession>,
    ) -> PinchRegistration {
        let registration = if modifier {
            if let Some(evicted) = self.modifier.replace(pointer) {
                if let Some(session) = sessions.get_mut(&evicted) {
                    session.pinch_role = PinchRole::None;
                    session.pinch_delta = 0.0;
                }
                debug!(%evicted, "modifier pinch handed over");
            }
            PinchRegistration::ModifierPinch
        } else if self.primary.is_none() {
            self.primary = Some(pointer);
            PinchRegistration::Primary
        } else if self.secondary.is_none() {
            self.secondary = Some(pointer);
            PinchRegistration::Secondary
        } else {
            PinchRegistration::Unavailable
        };
        debug!(%pointer, ?registration, "pinch registration");
        registration
    }

    /// The other contact of an active pair, if `pointer` belongs to one.
    #[must_use]
    pub fn partner(&self, pointer: PointerId) -> Option<PointerId> {
        match (self.primary, self.secondary) {
            (Some(a), Some(b)) if a == pointer => Some(b),
            (Some(a), Some(b)) if b == pointer => Some(a),
            _ => None,
        }
    }

    /// Whether `pointer` holds the modifier-pinch slot.
    #[must_use]
    pub fn is_modifier_pinch(&self, pointer: PointerId) -> bool {
        self.modifier == Some(pointer)
    }

    /// Whether both pair slots are filled.
    #[must_use]
    pub const fn pair_active(&self) -> bool {
        self.primary.is_some() && self.secondary.is_some()
    }

    /// Measure the pair distance and return the scaled change since the last
    /// measurement (0 on the first one).
    pub fn measure(&mut self, a: Point, b: Point, multiplier: f32) -> f32 {
        let distance = a.rounded_distance(&b);
        let delta = self
            .last_distance
            .map_or(0.0, |last| (distance - last) * multiplier);
        self.last_distance = Some(distance);
        delta
    }

    /// Remove an ending pointer, promoting the secondary when the primary
    /// leaves. The surviving session's role is updated in `sessions`.
    pub fn release(
        &mut self,
        pointer: PointerId,
        sessions: &mut HashMap<PointerId, MotionSession>,
    ) -> PinchRelease {
        let mut release = PinchRelease::default();

        if self.modifier == Some(pointer) {
            self.modifier = None;
            release.ended = true;
        } else if self.primary == Some(pointer) {
            self.primary = self.secondary.take();
            self.last_distance = None;
            if let Some(promoted) = self.primary {
                if let Some(session) = sessions.get_mut(&promoted) {
                    session.pinch_role = PinchRole::Primary;
                    session.pinch_delta = 0.0;
                }
                release.promoted = Some(promoted);
                release.ended = true;
            }
        } else if self.secondary == Some(pointer) {
            self.secondary = None;
            self.last_distance = None;
            if let Some(session) = self.primary.and_then(|p| sessions.get_mut(&p)) {
                session.pinch_delta = 0.0;
            }
            release.ended = true;
        }

        if release.ended {
            debug!(%pointer, promoted = ?release.promoted, "pinch released");
        }
        release
    }

    /// Current primary contact.
    #[must_use]
    pub const fn primary(&self) -> Option<PointerId> {
        self.primary
    }

    /// Current secondary contact.
    #[must_use]
    pub const fn secondary(&self) -> Option<PointerId> {
        self.secondary
    }

    /// Current modifier-pinch pointer.
    #[must_use]
    pub const fn modifier_pointer(&self) -> Option<PointerId> {
        self.modifier
    }

    /// Last measured pair distance.
    #[must_use]
    pub const fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Forget every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, Target};
    use crate::input::MotionInput;
    use crate::session::Candidates;

    const A: PointerId = PointerId::Touch(1);
    const B: PointerId = PointerId::Touch(2);
    const C: PointerId = PointerId::Touch(3);
    const M: PointerId = PointerId::Mouse(0);

    #[test]
    fn test_register_fills_slots_in_order() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        assert_eq!(pinch.register(A, false, &mut sessions), PinchRegistration::Primary);
        assert!(!pinch.pair_active());
        assert_eq!(pinch.register(B, false, &mut sessions), PinchRegistration::Secondary);
        assert!(pinch.pair_active());
        assert_eq!(pinch.register(C, false, &mut sessions), PinchRegistration::Unavailable);
        assert_eq!(pinch.register(M, true, &mut sessions), PinchRegistration::ModifierPinch);
    }

    #[test]
    fn test_modifier_slot_moves_to_newest_pointer() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        let mut first = MotionSession::new(
            ElementId::new(1),
            &MotionInput::new(M, Target::generic(ElementId::new(1)), Point::ORIGIN, 0),
            Candidates::default(),
        );
        first.pinch_role = PinchRole::ModifierPinch;
        first.pinch_delta = 7.0;
        sessions.insert(M, first);

        pinch.register(M, true, &mut sessions);
        let second = PointerId::Mouse(2);
        assert_eq!(pinch.register(second, true, &mut sessions), PinchRegistration::ModifierPinch);
        assert_eq!(pinch.modifier_pointer(), Some(second));
        assert_eq!(sessions[&M].pinch_role, PinchRole::None);
        assert_eq!(sessions[&M].pinch_delta, 0.0);
        assert!(!pinch.release(M, &mut sessions).ended);
        assert!(pinch.release(second, &mut sessions).ended);
    }

    #[test]
    fn test_partner_only_when_pair_active() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        pinch.register(A, false, &mut sessions);
        assert_eq!(pinch.partner(A), None);
        pinch.register(B, false, &mut sessions);
        assert_eq!(pinch.partner(A), Some(B));
        assert_eq!(pinch.partner(B), Some(A));
        assert_eq!(pinch.partner(C), None);
    }

    #[test]
    fn test_measure_first_is_zero_then_scaled() {
        let mut pinch = PinchCoordinator::new();
        let delta = pinch.measure(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 4.0);
        assert_eq!(delta, 0.0);
        let delta = pinch.measure(Point::new(0.0, 0.0), Point::new(110.4, 0.0), 4.0);
        assert_eq!(delta, 40.0);
        assert_eq!(pinch.last_distance(), Some(110.0));
    }

    #[test]
    fn test_release_primary_promotes_secondary() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        pinch.register(A, false, &mut sessions);
        pinch.register(B, false, &mut sessions);
        pinch.measure(Point::ORIGIN, Point::new(10.0, 0.0), 1.0);

        let release = pinch.release(A, &mut sessions);
        assert!(release.ended);
        assert_eq!(release.promoted, Some(B));
        assert_eq!(pinch.primary(), Some(B));
        assert_eq!(pinch.secondary(), None);
        assert_eq!(pinch.last_distance(), None);

        let release = pinch.release(B, &mut sessions);
        assert!(!release.ended);
        assert_eq!(pinch.primary(), None);
    }

    #[test]
    fn test_release_secondary_ends_pinch() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        pinch.register(A, false, &mut sessions);
        pinch.register(B, false, &mut sessions);
        let release = pinch.release(B, &mut sessions);
        assert!(release.ended);
        assert_eq!(release.promoted, None);
        assert_eq!(pinch.primary(), Some(A));
    }

    #[test]
    fn test_release_modifier_and_unknown() {
        let mut pinch = PinchCoordinator::new();
        let mut sessions = HashMap::new();
        pinch.register(M, true, &mut sessions);
        assert!(pinch.is_modifier_pinch(M));
        assert!(pinch.release(M, &mut sessions).ended);
        assert!(!pinch.is_modifier_pinch(M));
        assert_eq!(pinch.release(C, &mut sessions), PinchRelease::default());
    }
}
