//! Convergence tally for one poll tick.

use std::fmt;

use crate::domain::filter::DynoFilter;
use crate::domain::release::{Dyno, Release};

/// How many counted dynos are up on the latest release, out of how many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub on_latest: usize,
    pub total: usize,
}

impl Tally {
    /// Count `dynos` that pass `filter`, and those among them up on `latest`.
    #[must_use]
    pub fn count(dynos: &[Dyno], filter: &DynoFilter, latest: &Release) -> Self {
        filter.apply(dynos).fold(Self::default(), |mut tally, dyno| {
            tally.total += 1;
            if dyno.is_on(latest) {
                tally.on_latest += 1;
            }
            tally
        })
    }

    /// Every counted dyno is on the latest release. An empty set is converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.on_latest == self.total
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.on_latest, self.total)
    }
}
