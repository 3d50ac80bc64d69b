//! Internal generation tokens.

use uuid::Uuid;

/// Identifier of one incarnation of a directory entry.
///
/// Every successful `create` in a directory mints a fresh generation for the
/// name, so a name that is deleted and created again never maps back to an
/// earlier generation. Uses UUIDv7 (time-ordered); tokens are never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationId(Uuid);

impl GenerationId {
    /// Mint a new, never-before-seen generation.
    pub fn mint() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for GenerationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn minted_generations_are_distinct() {
        let minted: HashSet<GenerationId> = (0..1_000).map(|_| GenerationId::mint()).collect();
        assert_eq!(minted.len(), 1_000);
    }
}
