//! CAN arbitration identifier.

use core::fmt;

use crate::types::FRAME_ID_CAN_IS_EXTENDED;
use crate::{Error, Result};

/// Mask applied to standard identifiers.
pub const FRAME_ID_MASK: u32 = 0x0000_03FF;

/// Mask applied to extended identifiers.
pub const EXTENDED_FRAME_ID_MASK: u32 = 0x1FFF_FFFF;

/// CAN frame arbitration identifier.
///
/// The raw encoding used by the driver stores the identifier in the low bits
/// and marks extended identifiers with [`FRAME_ID_CAN_IS_EXTENDED`].
///
/// Construction does not validate the value; [`CanIdentifier::to_raw`] does.
///
/// ```
/// use nixnet_rs::CanIdentifier;
///
/// assert_eq!(CanIdentifier::from_raw(0x2000_0001), CanIdentifier::extended(0x1));
/// assert_eq!(CanIdentifier::from_raw(0x1), CanIdentifier::standard(0x1));
/// assert_eq!(CanIdentifier::extended(0x1).to_raw()?, 0x2000_0001);
/// assert!(CanIdentifier::standard(0x500).to_raw().is_err());
/// # Ok::<(), nixnet_rs::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanIdentifier {
    /// Identifier value without the extended flag.
    pub identifier: u32,
    /// True for 29-bit identifiers.
    pub extended: bool,
}

impl CanIdentifier {
    /// Create an identifier.
    #[inline]
    pub const fn new(identifier: u32, extended: bool) -> Self {
        Self {
            identifier,
            extended,
        }
    }

    /// Create a standard identifier.
    #[inline]
    pub const fn standard(identifier: u32) -> Self {
        Self::new(identifier, false)
    }

    /// Create an extended identifier.
    #[inline]
    pub const fn extended(identifier: u32) -> Self {
        Self::new(identifier, true)
    }

    /// Parse a raw driver identifier. Never fails; excess bits are masked off.
    pub const fn from_raw(raw: u32) -> Self {
        let extended = raw & FRAME_ID_CAN_IS_EXTENDED != 0;
        let identifier = if extended {
            raw & EXTENDED_FRAME_ID_MASK
        } else {
            raw & FRAME_ID_MASK
        };
        Self::new(identifier, extended)
    }

    /// Encode into the raw driver identifier.
    ///
    /// # Errors
    /// Returns [`Error::UndefinedFrameIdentifier`] if the value does not fit
    /// the standard or extended mask.
    pub fn to_raw(&self) -> Result<u32> {
        let mask = if self.extended {
            EXTENDED_FRAME_ID_MASK
        } else {
            FRAME_ID_MASK
        };
        if self.identifier & mask != self.identifier {
            return Err(Error::UndefinedFrameIdentifier {
                identifier: self.identifier,
                extended: self.extended,
            });
        }
        if self.extended {
            Ok(self.identifier | FRAME_ID_CAN_IS_EXTENDED)
        } else {
            Ok(self.identifier)
        }
    }
}

impl From<u32> for CanIdentifier {
    /// A bare number is a standard identifier.
    fn from(identifier: u32) -> Self {
        Self::standard(identifier)
    }
}

impl TryFrom<CanIdentifier> for u32 {
    type Error = Error;

    fn try_from(id: CanIdentifier) -> Result<Self> {
        id.to_raw()
    }
}

impl fmt::Display for CanIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extended {
            write!(f, "{:#x} (extended)", self.identifier)
        } else {
            write!(f, "{:#x}", self.identifier)
        }
    }
}

// ============================================================================
// embedded_can integration (requires `can` feature)
// ============================================================================

#[cfg(feature = "can")]
impl From<embedded_can::Id> for CanIdentifier {
    fn from(id: embedded_can::Id) -> Self {
        match id {
            embedded_can::Id::Standard(id) => Self::standard(u32::from(id.as_raw())),
            embedded_can::Id::Extended(id) => Self::extended(id.as_raw()),
        }
    }
}

#[cfg(feature = "can")]
impl From<embedded_can::StandardId> for CanIdentifier {
    fn from(id: embedded_can::StandardId) -> Self {
        Self::standard(u32::from(id.as_raw()))
    }
}

#[cfg(feature = "can")]
impl From<embedded_can::ExtendedId> for CanIdentifier {
    fn from(id: embedded_can::ExtendedId) -> Self {
        Self::extended(id.as_raw())
    }
}

#[cfg(feature = "can")]
impl TryFrom<CanIdentifier> for embedded_can::Id {
    type Error = Error;

    fn try_from(id: CanIdentifier) -> Result<Self> {
        let undefined = Error::UndefinedFrameIdentifier {
            identifier: id.identifier,
            extended: id.extended,
        };
        // Same width rules as the raw encoding.
        id.to_raw()?;
        if id.extended {
            embedded_can::ExtendedId::new(id.identifier)
                .map(embedded_can::Id::Extended)
                .ok_or(undefined)
        } else {
            u16::try_from(id.identifier)
                .ok()
                .and_then(embedded_can::StandardId::new)
                .map(embedded_can::Id::Standard)
                .ok_or(undefined)
        }
    }
}
