//! Strategy-mixing policies: the per-block decision procedure that picks
//! which of two configured kernels a block runs under, without the driver
//! knowing the decision logic. Policies are parsed and validated before the
//! benchmark starts; a per-block decision never fails.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::ConfigError;

/// A parsed, validated policy specification. Text forms accepted by
/// [`MixPolicy::parse`]:
///
/// * `constant` — always the first kernel of the pair
/// * `random` — seeded generator, one step per block, low bit selects
/// * `periodic:P` — pure function of the linear block index, switching
///   every P blocks
/// * `burst:A,B` — A consecutive blocks on the first kernel, then B on the
///   second, repeating
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixPolicy {
    Constant,
    Random,
    Periodic { period: usize },
    Burst { hot: usize, cold: usize },
}

impl MixPolicy {
    pub fn parse(s: &str) -> Result<MixPolicy, ConfigError> {
        let (name, arg) = match s.split_once(':') {
            Some((n, a)) => (n, Some(a)),
            None => (s, None),
        };
        match (name, arg) {
            ("constant", None) => Ok(MixPolicy::Constant),
            ("random", None) => Ok(MixPolicy::Random),
            ("periodic", Some(a)) => {
                let period = a.parse::<usize>().ok().filter(|&p| p > 0).ok_or_else(|| {
                    ConfigError::BadPolicyParam {
                        policy: "periodic".to_string(),
                        reason: format!("period '{a}' must be a positive integer"),
                    }
                })?;
                Ok(MixPolicy::Periodic { period })
            }
            ("burst", Some(a)) => {
                let lens = a
                    .split_once(',')
                    .and_then(|(x, y)| Some((x.parse::<usize>().ok()?, y.parse::<usize>().ok()?)))
                    .filter(|&(x, y)| x > 0 && y > 0);
                let (hot, cold) = lens.ok_or_else(|| ConfigError::BadPolicyParam {
                    policy: "burst".to_string(),
                    reason: format!("'{a}' must be two positive burst lengths 'A,B'"),
                })?;
                Ok(MixPolicy::Burst { hot, cold })
            }
            ("periodic", None) | ("burst", None) => Err(ConfigError::BadPolicyParam {
                policy: name.to_string(),
                reason: "missing parameter".to_string(),
            }),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Runtime mixing state. Built once per run from a [`MixPolicy`] and a run
/// seed; [`Mixer::select`] is called exactly once per block decision and
/// returns an index into the caller's kernel pair.
pub enum Mixer {
    Constant,
    Random(StdRng),
    Periodic {
        period: usize,
    },
    Burst {
        hot: usize,
        cold: usize,
        remaining: usize,
        in_hot: bool,
    },
}

impl Mixer {
    pub fn new(policy: MixPolicy, seed: u64) -> Mixer {
        match policy {
            MixPolicy::Constant => Mixer::Constant,
            MixPolicy::Random => Mixer::Random(StdRng::seed_from_u64(seed)),
            MixPolicy::Periodic { period } => Mixer::Periodic { period },
            MixPolicy::Burst { hot, cold } => Mixer::Burst {
                hot,
                cold,
                remaining: hot,
                in_hot: true,
            },
        }
    }

    /// Picks a kernel index (0 or 1) for the block with the given linear
    /// index. Burst and random policies ignore the index and step their own
    /// state; the periodic policy is a pure function of it.
    pub fn select(&mut self, block_index: usize) -> usize {
        match self {
            Mixer::Constant => 0,
            Mixer::Random(rng) => (rng.next_u32() & 1) as usize,
            Mixer::Periodic { period } => (block_index / *period) % 2,
            Mixer::Burst {
                hot,
                cold,
                remaining,
                in_hot,
            } => {
                let pick = usize::from(!*in_hot);
                *remaining -= 1;
                if *remaining == 0 {
                    *in_hot = !*in_hot;
                    *remaining = if *in_hot { *hot } else { *cold };
                }
                pick
            }
        }
    }
}
