use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tripsearch_engine::{
    DesCrypt, HashPrimitive, Lcg, PASSWORD_ALPHABET, PASSWORD_LENGTH, Password, SALT_LENGTH,
    TENTH_CHAR_CANDIDATES, TRIPCODE_LENGTH, Tripcode, seed_streams,
};

fn is_salt_char(b: u8) -> bool {
    b == b'.' || b == b'/' || b.is_ascii_alphanumeric()
}

#[test]
fn test_random_streams_produce_valid_candidates() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..64 {
        let mut stream = Lcg::new(rng.gen_range(0..=u32::MAX));
        for _ in 0..16 {
            let password = Password::generate(&mut stream);
            assert_eq!(password.as_bytes().len(), PASSWORD_LENGTH);
            assert!(password.as_bytes().iter().all(|b| PASSWORD_ALPHABET.contains(b)));

            let salt = password.salt();
            assert_eq!(salt.as_bytes().len(), SALT_LENGTH);
            assert!(salt.as_bytes().iter().all(|&b| is_salt_char(b)));

            let raw = DesCrypt.hash(&password, &salt).unwrap();
            assert_eq!(&raw.0[..2], &salt.as_bytes()[..2]);

            let tripcode = Tripcode::extract(&raw);
            assert_eq!(tripcode.as_bytes().len(), TRIPCODE_LENGTH);
            assert!(tripcode.as_bytes().iter().all(|&b| is_salt_char(b)));
            assert!(TENTH_CHAR_CANDIDATES.contains(&tripcode.as_bytes()[TRIPCODE_LENGTH - 1]));
        }
    }
}

#[test]
fn test_random_root_seeds_are_reproducible() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..32 {
        let root = rng.gen_range(0..=u32::MAX);
        let seeds = seed_streams(root, 4);
        assert_eq!(seeds, seed_streams(root, 4));
        assert!(seeds.iter().all(|&s| s <= 0x7FFF));
    }
}

#[test]
fn test_random_roots_give_distinct_seeds() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let root = rng.gen_range(0..=u32::MAX);
        let seeds = seed_streams(root, 64);
        let unique: HashSet<u32> = seeds.iter().copied().collect();
        assert_eq!(seeds.len(), unique.len(), "root {}", root);
    }
}
