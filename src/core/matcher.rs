/// Length of an Anchor instruction discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Prefix matcher over instruction data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscriminatorSet {
    discriminators: Vec<[u8; DISCRIMINATOR_LEN]>,
}

impl DiscriminatorSet {
    pub fn new(discriminators: impl IntoIterator<Item = [u8; DISCRIMINATOR_LEN]>) -> Self {
        Self {
            discriminators: discriminators.into_iter().collect(),
        }
    }

    /// True when `data` is at least 8 bytes long and its first 8 bytes equal
    /// one of the configured discriminators.
    #[inline]
    pub fn matches(&self, data: &[u8]) -> bool {
        match data.get(..DISCRIMINATOR_LEN) {
            Some(prefix) => self.discriminators.iter().any(|d| d.as_slice() == prefix),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];
    const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];

    #[test]
    fn exact_prefix_matches() {
        let set = DiscriminatorSet::new([CREATE]);
        assert!(set.matches(&CREATE));

        let mut data = CREATE.to_vec();
        data.extend_from_slice(b"payload");
        assert!(set.matches(&data));
    }

    #[test]
    fn short_or_empty_data_never_matches() {
        let set = DiscriminatorSet::new([CREATE, BUY]);
        assert!(!set.matches(&[]));
        assert!(!set.matches(&CREATE[..7]));
    }

    #[test]
    fn any_configured_discriminator_matches() {
        let set = DiscriminatorSet::new([CREATE, BUY]);
        assert!(set.matches(&BUY));
        assert!(!set.matches(&[0u8; 8]));
    }

    #[test]
    fn comparison_is_byte_for_byte() {
        let mut reversed = CREATE;
        reversed.reverse();
        assert!(!DiscriminatorSet::new([CREATE]).matches(&reversed));
    }

    #[test]
    fn matches_iff_prefix_is_in_set() {
        let set = DiscriminatorSet::new([CREATE, BUY]);
        let mut seed = 0x5EED_u64;
        for len in 0..24usize {
            for _ in 0..200 {
                let mut data: Vec<u8> = (0..len)
                    .map(|_| {
                        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                        (seed >> 33) as u8
                    })
                    .collect();
                if len >= 8 && seed % 3 == 0 {
                    data[..8].copy_from_slice(&CREATE);
                }
                let expected = len >= 8 && (data[..8] == CREATE || data[..8] == BUY);
                assert_eq!(set.matches(&data), expected, "{data:?}");
            }
        }
    }
}
