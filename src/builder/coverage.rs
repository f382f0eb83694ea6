use smallvec::SmallVec;

use crate::traits::Tagged;

/// Tags a builder chain has declared handlers for.
///
/// Recorded when a clause is added, whether or not it fires: coverage is a
/// property of the chain, not of the result it happens to run against.
#[derive(Debug, Clone, Default)]
pub(crate) struct Coverage {
    tags: SmallVec<[&'static str; 4]>,
    all_errors: bool,
}

impl Coverage {
    #[inline]
    pub(crate) fn cover_all(&mut self) {
        self.all_errors = true;
    }

    pub(crate) fn cover(&mut self, tags: &[&'static str]) {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(*tag);
            }
        }
    }

    pub(crate) fn remaining<E: Tagged>(&self) -> SmallVec<[&'static str; 4]> {
        if self.all_errors {
            return SmallVec::new();
        }
        E::TAGS.iter().copied().filter(|tag| !self.tags.contains(tag)).collect()
    }
}
