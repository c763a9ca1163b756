//! Discovery entry points for host frameworks.

use crate::atom::BrainAtom;
use crate::error::AtomError;
use crate::registry::ModelRegistry;

/// Build the atom for one builtin slug.
///
/// Unknown slugs fail with [`AtomError::ConfigurationError`].
pub fn gen_brain_atom(slug: &str) -> Result<BrainAtom, AtomError> {
    BrainAtom::from_slug(slug)
}

/// Every builtin xAI atom, one per registry slug, in slug order.
///
/// No credentials are read here; each atom resolves `XAI_API_KEY` on ask.
pub fn brain_atoms_by_xai() -> Vec<BrainAtom> {
    ModelRegistry::builtin()
        .entries()
        .cloned()
        .map(BrainAtom::from_config)
        .collect()
}
