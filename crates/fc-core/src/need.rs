//! The two things a cat can ask for.

/// What an agent is requesting (and what an item supplies).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeedKind {
    Food,
    Water,
}

impl NeedKind {
    /// The other kind — used by the opening burst to alternate assignments
    /// so early multi-agent rounds are never homogeneous.
    #[inline]
    pub fn opposite(self) -> NeedKind {
        match self {
            NeedKind::Food => NeedKind::Water,
            NeedKind::Water => NeedKind::Food,
        }
    }

    /// Human-readable label, useful for logs and demo output.
    pub fn as_str(self) -> &'static str {
        match self {
            NeedKind::Food => "food",
            NeedKind::Water => "water",
        }
    }
}

impl std::fmt::Display for NeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
