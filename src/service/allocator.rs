// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hostname Allocator
//!
//! Generates convention-based candidates and retries against the
//! uniqueness checker until a free one is found.
//!
//! # Algorithm
//!
//! ```text
//! for attempt in 1..=5:
//!     candidate = domain_prefix + environment_prefix + draw(000..=999)
//!     if checker.check(candidate) is empty: return candidate
//!     reseed the number source
//! report "Unable to find available hostname in 5 tries"
//! ```
//!
//! Randomness comes from an injected [`NumberSource`] so tests can script
//! the exact candidates drawn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::uniqueness::UniquenessChecker;
use crate::domain::{NamingConvention, ValidationError, NUMBER_SPACE};
use crate::errors::RegistryError;

/// Attempts made before giving up
pub const MAX_ATTEMPTS: usize = 5;

/// Source of the numeric hostname suffix
pub trait NumberSource: Send {
    /// Next number in `0..1000`
    fn next_number(&mut self) -> u16;

    /// Called after a rejected candidate, before the next draw
    fn reseed(&mut self) {}
}

/// Uniform draws from a standard RNG
pub struct RandomNumbers {
    rng: StdRng,
    deterministic: bool,
}

impl RandomNumbers {
    /// Entropy-seeded source; reseeds from entropy after each rejection
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            deterministic: false,
        }
    }

    /// Fixed-seed source; reseeds from its own stream, so runs repeat exactly
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            deterministic: true,
        }
    }
}

impl Default for RandomNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberSource for RandomNumbers {
    fn next_number(&mut self) -> u16 {
        self.rng.gen_range(0..NUMBER_SPACE)
    }

    fn reseed(&mut self) {
        self.rng = if self.deterministic {
            StdRng::seed_from_u64(self.rng.gen())
        } else {
            StdRng::from_entropy()
        };
    }
}

/// Scripted numbers, replayed in order and then cycled
#[derive(Debug, Clone)]
pub struct SequenceNumbers {
    numbers: VecDeque<u16>,
}

impl SequenceNumbers {
    pub fn new(numbers: impl IntoIterator<Item = u16>) -> Self {
        Self {
            numbers: numbers.into_iter().collect(),
        }
    }
}

impl NumberSource for SequenceNumbers {
    fn next_number(&mut self) -> u16 {
        match self.numbers.pop_front() {
            Some(number) => {
                self.numbers.push_back(number);
                number % NUMBER_SPACE
            }
            None => 0,
        }
    }
}

/// Outcome of an allocation: a free hostname, or the problems encountered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub hostname: Option<String>,
    pub errors: Vec<ValidationError>,
    pub attempts: usize,
}

impl Allocation {
    pub fn is_allocated(&self) -> bool {
        self.hostname.is_some()
    }
}

pub struct HostnameAllocator<N: NumberSource = RandomNumbers> {
    checker: Arc<UniquenessChecker>,
    convention: NamingConvention,
    numbers: N,
    max_attempts: usize,
}

impl HostnameAllocator<RandomNumbers> {
    pub fn new(checker: Arc<UniquenessChecker>) -> Self {
        Self::with_numbers(checker, RandomNumbers::new())
    }
}

impl<N: NumberSource> HostnameAllocator<N> {
    pub fn with_numbers(checker: Arc<UniquenessChecker>, numbers: N) -> Self {
        Self {
            checker,
            convention: NamingConvention::default(),
            numbers,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn convention(mut self, convention: NamingConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Find a hostname free in every registry
    ///
    /// Exhaustion and unusable inputs are reported in [`Allocation::errors`];
    /// only a registry failure returns `Err`.
    pub async fn allocate(
        &mut self,
        environment: &str,
        base_domain: &str,
    ) -> Result<Allocation, RegistryError> {
        let mut errors = Vec::new();
        if NamingConvention::prefix_char(base_domain).is_none() {
            errors.push(ValidationError::MissingPrefixSource {
                field: "base domain",
                value: base_domain.to_string(),
            });
        }
        if NamingConvention::prefix_char(environment).is_none() {
            errors.push(ValidationError::MissingPrefixSource {
                field: "environment",
                value: environment.to_string(),
            });
        }
        if !errors.is_empty() {
            return Ok(Allocation {
                hostname: None,
                errors,
                attempts: 0,
            });
        }

        for attempt in 1..=self.max_attempts {
            let number = self.numbers.next_number();
            let Some(candidate) = self.convention.candidate(base_domain, environment, number)
            else {
                break;
            };
            debug!("Allocation attempt {}: trying {}", attempt, candidate);

            if self.checker.check(&candidate).await?.is_empty() {
                info!("Allocated hostname {} after {} attempts", candidate, attempt);
                return Ok(Allocation {
                    hostname: Some(candidate),
                    errors,
                    attempts: attempt,
                });
            }

            self.numbers.reseed();
        }

        warn!(
            "Unable to allocate a hostname for {} in {} tries",
            environment, self.max_attempts
        );
        errors.push(ValidationError::AllocationExhausted {
            attempts: self.max_attempts,
        });
        Ok(Allocation {
            hostname: None,
            errors,
            attempts: self.max_attempts,
        })
    }
}
