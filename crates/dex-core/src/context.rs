use dex_model::series::PTCGO_NO_SET;
use dex_model::{Expansion, ExpansionRegistry, ExpansionSeries, ReleaseMap};

use crate::translate::Translator;

/// Everything classification reads besides the item itself.
///
/// Built once before a run; the release map is never rebuilt mid-run.
#[derive(Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub registry: &'a ExpansionRegistry,
    pub releases: &'a ReleaseMap,
    pub translator: &'a dyn Translator,
}

impl<'a> ClassifyContext<'a> {
    pub fn new(
        registry: &'a ExpansionRegistry,
        releases: &'a ReleaseMap,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            registry,
            releases,
            translator,
        }
    }

    /// Expansion an item belongs to, from its release key.
    ///
    /// Releases that are not an expansion map to the gameplay `NoSet`.
    pub fn expansion_for(&self, release: Option<&str>) -> Expansion<'a> {
        match release.and_then(|key| self.releases.code_for(key)) {
            Some(code) => self.registry.by_code(code),
            None => self
                .registry
                .resolve(ExpansionSeries::Ptcgo.code(), PTCGO_NO_SET),
        }
    }

    pub fn translate(&self, key: &str) -> Option<String> {
        self.translator.translate(key)
    }
}
