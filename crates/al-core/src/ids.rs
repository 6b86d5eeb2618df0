use core::fmt;
use core::num::NonZeroU32;

/// Declare a 0-based index newtype stored as `index + 1` in a `NonZeroU32`,
/// so `Option<$name>` costs no extra space.
macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Position in the owning vector. Indices beyond `u32` saturate.
            pub fn from_usize(index: usize) -> Self {
                let index = u32::try_from(index).unwrap_or(u32::MAX - 1);
                Self(NonZeroU32::MIN.saturating_add(index))
            }

            pub fn as_usize(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "({})"), self.as_usize())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_usize())
            }
        }
    };
}

index_id!(
    /// Index of a panel in a `PanelMesh`, in storage order.
    PanelId,
    "Panel"
);

index_id!(
    /// Index of a wing in an `Airplane`.
    WingId,
    "Wing"
);
