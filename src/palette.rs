// SPDX-License-Identifier: PMPL-1.0-or-later
//! Theme palettes: named color tokens resolved by the auditor

use crate::color::{ColorToken, Rgb};
use crate::error::{ContrastError, Result};
use std::collections::btree_map::{BTreeMap, Entry};

/// Immutable mapping from token name to color, built once per theme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    tokens: BTreeMap<String, ColorToken>,
}

impl Palette {
    /// Build a palette from tokens. Names must be unique.
    pub fn from_tokens(tokens: impl IntoIterator<Item = ColorToken>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for token in tokens {
            match map.entry(token.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(ContrastError::DuplicateToken { name: token.name });
                }
                Entry::Vacant(slot) => {
                    slot.insert(token);
                }
            }
        }
        Ok(Self { tokens: map })
    }

    /// Build a palette from `(name, "#rrggbb")` pairs, failing on the first
    /// malformed color or repeated name
    pub fn from_hex_pairs<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Result<Self>
    where
        N: Into<String>,
        V: AsRef<str>,
    {
        let tokens = pairs
            .into_iter()
            .map(|(name, value)| ColorToken::parse(name, value.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_tokens(tokens)
    }

    /// Look up a token by name
    pub fn get(&self, name: &str) -> Option<&ColorToken> {
        self.tokens.get(name)
    }

    /// Resolve a token name to its color
    pub fn resolve(&self, name: &str) -> Result<Rgb> {
        self.get(name)
            .map(|token| token.color)
            .ok_or_else(|| ContrastError::unknown_token(name))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in name order
    pub fn iter(&self) -> impl Iterator<Item = &ColorToken> {
        self.tokens.values()
    }
}
