//! How newly bound doors get their initial PIN.

use doorward_core::rng::DeterministicRng;

use super::values::Pin;

/// PIN assigned to a door when it is first bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultPinPolicy {
    /// Every new door gets the same code.
    Fixed(Pin),
    /// Every new door draws its own code from `0000..=9999`.
    Random,
}

impl DefaultPinPolicy {
    /// Issues the initial PIN for a newly bound door.
    pub fn issue(&self, rng: &mut dyn DeterministicRng) -> Pin {
        match self {
            Self::Fixed(pin) => pin.clone(),
            Self::Random => Pin::from_number(rng.next_u32_range(0, 9_999)),
        }
    }
}

impl Default for DefaultPinPolicy {
    fn default() -> Self {
        Self::Fixed(Pin::from_number(1234))
    }
}
