//! Per-element gesture subscriptions.
//!
//! Each bound element maps gesture types to the set of namespaces currently
//! requesting them. A type is present only while at least one namespace
//! requests it, so independent consumers can unsubscribe without disturbing
//! one another.

use crate::config::GestureConfig;
use crate::element::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// A subscribable gesture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureType {
    /// Short press and release
    Tap,
    /// Long press without movement
    Hold,
    /// Slow leftward swipe
    SwipeLeft,
    /// Slow rightward swipe
    SwipeRight,
    /// Slow upward swipe
    SwipeUp,
    /// Slow downward swipe
    SwipeDown,
    /// Fast leftward swipe
    FlingLeft,
    /// Fast rightward swipe
    FlingRight,
    /// Fast upward swipe
    FlingUp,
    /// Fast downward swipe
    FlingDown,
    /// Pinch began
    PinchStart,
    /// Pinch distance changed
    PinchMove,
    /// Pinch ended
    PinchEnd,
    /// Any pinch phase
    Pinch,
    /// Reserved, never emitted
    RotateStart,
    /// Reserved, never emitted
    RotateMove,
    /// Reserved, never emitted
    RotateEnd,
    /// Reserved, never emitted
    Rotate,
}

impl GestureType {
    /// Every subscribable gesture type.
    pub const ALL: [Self; 18] = [
        Self::Tap,
        Self::Hold,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::FlingLeft,
        Self::FlingRight,
        Self::FlingUp,
        Self::FlingDown,
        Self::PinchStart,
        Self::PinchMove,
        Self::PinchEnd,
        Self::Pinch,
        Self::RotateStart,
        Self::RotateMove,
        Self::RotateEnd,
        Self::Rotate,
    ];

    /// Types that make a session eligible for swipe/fling classification.
    pub const SWIPES: [Self; 8] = [
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
        Self::FlingLeft,
        Self::FlingRight,
        Self::FlingUp,
        Self::FlingDown,
    ];

    /// Event name as delivered to consumers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Hold => "hold",
            Self::SwipeLeft => "swipeLeft",
            Self::SwipeRight => "swipeRight",
            Self::SwipeUp => "swipeUp",
            Self::SwipeDown => "swipeDown",
            Self::FlingLeft => "flingLeft",
            Self::FlingRight => "flingRight",
            Self::FlingUp => "flingUp",
            Self::FlingDown => "flingDown",
            Self::PinchStart => "pinchStart",
            Self::PinchMove => "pinchMove",
            Self::PinchEnd => "pinchEnd",
            Self::Pinch => "pinch",
            Self::RotateStart => "rotateStart",
            Self::RotateMove => "rotateMove",
            Self::RotateEnd => "rotateEnd",
            Self::Rotate => "rotate",
        }
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown gesture name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gesture type: {0}")]
pub struct UnknownGestureType(pub String);

impl FromStr for GestureType {
    type Err = UnknownGestureType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownGestureType(s.to_string()))
    }
}

/// Subscription tag identifying one consumer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Name used when a consumer supplies no namespace.
    pub const DEFAULT_NAME: &'static str = "default";

    /// Create a namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The namespace used when none is given.
    #[must_use]
    pub fn default_namespace() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }

    /// Split a dot-delimited namespace list.
    ///
    /// Empty segments are skipped; an empty list yields the default namespace.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        let mut namespaces: Vec<Self> = list
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(Self::new)
            .collect();
        if namespaces.is_empty() {
            namespaces.push(Self::default_namespace());
        }
        namespaces
    }

    /// Namespace name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gesture types requested on one element, with their namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscription {
    types: BTreeMap<GestureType, BTreeSet<Namespace>>,
}

static EMPTY_SUBSCRIPTION: Subscription = Subscription::new();

impl Subscription {
    /// Create an empty subscription.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Whether any namespace requests `gesture`.
    #[must_use]
    pub fn requests(&self, gesture: GestureType) -> bool {
        self.types.contains_key(&gesture)
    }

    /// Whether any of `gestures` is requested.
    #[must_use]
    pub fn requests_any(&self, gestures: &[GestureType]) -> bool {
        gestures.iter().any(|g| self.requests(*g))
    }

    /// Add `namespace` to `gesture`. Returns `false` if it was already present.
    pub fn insert(&mut self, gesture: GestureType, namespace: Namespace) -> bool {
        self.types.entry(gesture).or_default().insert(namespace)
    }

    /// Remove `namespace` from `gesture`, dropping the type once unrequested.
    pub fn remove(&mut self, gesture: GestureType, namespace: &Namespace) {
        if let Some(namespaces) = self.types.get_mut(&gesture) {
            namespaces.remove(namespace);
            if namespaces.is_empty() {
                self.types.remove(&gesture);
            }
        }
    }

    /// Drop `gesture` regardless of namespaces.
    pub fn remove_type(&mut self, gesture: GestureType) {
        self.types.remove(&gesture);
    }

    /// Namespaces requesting `gesture`.
    pub fn namespaces(&self, gesture: GestureType) -> impl Iterator<Item = &Namespace> {
        self.types.get(&gesture).into_iter().flatten()
    }

    /// Whether nothing is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Configuration and subscriptions for one bound element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    /// Thresholds, fixed at bind time
    pub config: GestureConfig,
    /// Live subscription set
    pub subscription: Subscription,
}

/// Registry of bound elements.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    bindings: HashMap<ElementId, Binding>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `element` with `config`.
    ///
    /// Returns `false` and keeps the existing configuration if the element
    /// is already bound.
    pub fn bind(&mut self, element: ElementId, config: GestureConfig) -> bool {
        if self.bindings.contains_key(&element) {
            return false;
        }
        debug!(%element, "binding element");
        self.bindings.insert(
            element,
            Binding {
                config,
                subscription: Subscription::new(),
            },
        );
        true
    }

    /// Request `gesture` on `element` for each namespace in the dotted list.
    ///
    /// Binds the element with the default configuration if needed.
    pub fn subscribe(&mut self, element: ElementId, gesture: GestureType, namespaces: &str) {
        let binding = self.bindings.entry(element).or_default();
        for namespace in Namespace::parse_list(namespaces) {
            binding.subscription.insert(gesture, namespace);
        }
    }

    /// Withdraw `gesture` on `element`.
    ///
    /// With `None`, the whole gesture type is removed; otherwise only the
    /// listed namespaces. Unknown elements and types are ignored.
    pub fn unsubscribe(&mut self, element: ElementId, gesture: GestureType, namespaces: Option<&str>) {
        let Some(binding) = self.bindings.get_mut(&element) else {
            return;
        };
        match namespaces {
            None => binding.subscription.remove_type(gesture),
            Some(list) => {
                for namespace in Namespace::parse_list(list) {
                    binding.subscription.remove(gesture, &namespace);
                }
            }
        }
    }

    /// Whether `element` requests no gesture at all.
    #[must_use]
    pub fn is_empty(&self, element: ElementId) -> bool {
        self.bindings
            .get(&element)
            .map_or(true, |b| b.subscription.is_empty())
    }

    /// Drop the binding of `element` if nothing is subscribed on it.
    ///
    /// Returns `true` if the binding was removed.
    pub fn release(&mut self, element: ElementId) -> bool {
        if !self.bindings.contains_key(&element) || !self.is_empty(element) {
            return false;
        }
        debug!(%element, "releasing element");
        self.bindings.remove(&element);
        true
    }

    /// Binding of `element`, if bound.
    #[must_use]
    pub fn binding(&self, element: ElementId) -> Option<&Binding> {
        self.bindings.get(&element)
    }

    /// Subscription of `element`; empty if unbound.
    #[must_use]
    pub fn subscription(&self, element: ElementId) -> &Subscription {
        self.bindings
            .get(&element)
            .map_or(&EMPTY_SUBSCRIPTION, |b| &b.subscription)
    }

    /// Configuration of `element`; defaults if unbound.
    #[must_use]
    pub fn config(&self, element: ElementId) -> GestureConfig {
        self.bindings
            .get(&element)
            .map(|b| b.config)
            .unwrap_or_default()
    }
}
