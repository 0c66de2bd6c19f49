use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const ID_BITS: u32 = 40;
const ID_MASK: u64 = (1 << ID_BITS) - 1;
const DOCUMENT_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const DOCUMENT_ID_LEN: usize = 32;

/// Hands out short hex identifiers that are unique for the lifetime of the
/// allocator (or until [`IdAllocator::reset`]).
///
/// Ids are 40 random bits rendered as 10 lowercase hex characters. A seeded
/// allocator produces the same sequence every time, which makes whole
/// documents reproducible.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    pub fn allocate(&mut self) -> String {
        loop {
            let candidate = format!("{:010x}", self.rng.next_u64() & ID_MASK);
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Forgets every issued id. Only the ledger is cleared; the random
    /// stream keeps advancing.
    pub fn reset(&mut self) {
        self.issued.clear();
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// Longer alphanumeric token used for document and watermark ids. Not
    /// recorded in the ledger.
    pub fn document_id(&mut self) -> String {
        (0..DOCUMENT_ID_LEN)
            .map(|_| {
                let idx = self.rng.gen_range(0..DOCUMENT_ID_CHARSET.len());
                DOCUMENT_ID_CHARSET[idx] as char
            })
            .collect()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
