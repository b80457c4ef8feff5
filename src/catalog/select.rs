use rand::seq::IndexedRandom as _;

use crate::{DeviceKind, UserAgent};

/// Pick a [`UserAgent`] uniformly at random from `pool`,
/// optionally only considering those of the given [`DeviceKind`].
///
/// Returns `None` if no candidate remains, which is an expected outcome
/// when filtering on a device that is not part of the pool.
///
/// The thread-local generator is used, so concurrent callers
/// never contend on a shared generator.
pub fn pick_random<'a, I>(pool: I, device: Option<DeviceKind>) -> Option<&'a UserAgent>
where
    I: IntoIterator<Item = &'a UserAgent>,
{
    let candidates: Vec<&UserAgent> = match device {
        None => pool.into_iter().collect(),
        Some(device) => pool
            .into_iter()
            .filter(|ua| ua.device() == device)
            .collect(),
    };
    candidates.choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashMap;

    fn pool() -> Vec<UserAgent> {
        vec![
            UserAgent::new("ua-windows-1", DeviceKind::Windows),
            UserAgent::new("ua-windows-2", DeviceKind::Windows),
            UserAgent::new("ua-linux-1", DeviceKind::Linux),
            UserAgent::new("ua-android-1", DeviceKind::Android),
        ]
    }

    #[test]
    fn test_pick_random_empty_pool() {
        let empty: Vec<UserAgent> = Vec::new();
        assert!(pick_random(&empty, None).is_none());
        assert!(pick_random(&empty, Some(DeviceKind::Windows)).is_none());
    }

    #[test]
    fn test_pick_random_filtered_absent_device() {
        let pool = pool();
        for _ in 0..100 {
            assert!(pick_random(&pool, Some(DeviceKind::MacOs)).is_none());
        }
    }

    #[test]
    fn test_pick_random_filter_is_honoured() {
        let pool = pool();
        for _ in 0..1000 {
            let ua = pick_random(&pool, Some(DeviceKind::Windows)).unwrap();
            assert_eq!(ua.device(), DeviceKind::Windows);
        }
    }

    #[test]
    fn test_pick_random_single_candidate() {
        let pool = pool();
        for _ in 0..100 {
            let ua = pick_random(&pool, Some(DeviceKind::Linux)).unwrap();
            assert_eq!(ua.header_str(), "ua-linux-1");
        }
    }

    #[test]
    fn test_pick_random_reaches_every_candidate() {
        let pool = pool();
        let mut seen: HashMap<&str, usize> = HashMap::default();
        for _ in 0..4000 {
            let ua = pick_random(&pool, None).unwrap();
            *seen.entry(ua.header_str()).or_default() += 1;
        }
        assert_eq!(seen.len(), pool.len());
        // uniform: expected 1000 each, allow a generous margin
        for (ua, count) in seen {
            assert!((700..=1300).contains(&count), "{ua} picked {count} times");
        }
    }
}
