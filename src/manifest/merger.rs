//! Manifest layering.
//!
//! Later manifests override earlier ones:
//!
//! - `meta` is taken from the overlay as a whole
//! - `defaults` are merged field by field; set values in the overlay win
//! - overlay tools come first, in order, followed by base tools whose id
//!   the overlay does not define

use std::collections::HashSet;

use super::schema::{Defaults, Manifest};

impl Manifest {
    /// Combine with `other`, letting `other` take precedence.
    pub fn merge(self, other: Manifest) -> Manifest {
        let overridden: HashSet<&str> = other.tools.iter().map(|t| t.id.as_str()).collect();

        let mut tools = other.tools.clone();
        tools.extend(
            self.tools
                .into_iter()
                .filter(|t| !overridden.contains(t.id.as_str())),
        );

        Manifest {
            meta: other.meta,
            defaults: merge_defaults(self.defaults, other.defaults),
            tools,
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    let mut result = base;

    if overlay.timeout_sec > 0 {
        result.timeout_sec = overlay.timeout_sec;
    }

    if !overlay.regex_key.is_empty() {
        result.regex_key = overlay.regex_key;
    }

    result
}

/// Merge manifests in order (later overrides earlier).
///
/// Returns `None` for an empty slice.
pub fn merge_manifests(manifests: Vec<Manifest>) -> Option<Manifest> {
    manifests.into_iter().reduce(Manifest::merge)
}
