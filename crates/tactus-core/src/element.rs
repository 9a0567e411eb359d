//! Element handles and hit-target roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a UI element that gestures can be bound to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Create a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Semantic role of the element an input landed on.
///
/// Used by [`crate::IgnoreSelector`] to let embedded controls opt out of
/// gesture tracking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum TargetRole {
    /// Generic element
    #[default]
    Generic,
    /// Layout container
    Container,
    /// Button
    Button,
    /// Single-line text input
    TextInput,
    /// Multi-line text area
    TextArea,
    /// Dropdown select
    Select,
    /// Checkbox or radio
    Checkbox,
    /// Range slider
    Slider,
    /// Link
    Link,
    /// Image
    Image,
}

impl TargetRole {
    /// Every role, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Generic,
        Self::Container,
        Self::Button,
        Self::TextInput,
        Self::TextArea,
        Self::Select,
        Self::Checkbox,
        Self::Slider,
        Self::Link,
        Self::Image,
    ];

    /// Whether this role is a form control.
    #[must_use]
    pub const fn is_form_control(self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::TextInput
                | Self::TextArea
                | Self::Select
                | Self::Checkbox
                | Self::Slider
        )
    }

    pub(crate) const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// The element an input actually hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Target {
    /// Element hit by the pointer
    pub element: ElementId,
    /// Role of that element
    pub role: TargetRole,
}

impl Target {
    /// Create a new target.
    #[must_use]
    pub const fn new(element: ElementId, role: TargetRole) -> Self {
        Self { element, role }
    }

    /// A generic target on `element`.
    #[must_use]
    pub const fn generic(element: ElementId) -> Self {
        Self::new(element, TargetRole::Generic)
    }
}
