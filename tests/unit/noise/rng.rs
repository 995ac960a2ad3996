use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn range_stays_in_half_open_interval() {
    let mut rng = Rng64::new(9);
    for _ in 0..2_000 {
        let v = rng.range_u32(24, 64);
        assert!((24..64).contains(&v));
    }
    assert_eq!(rng.range_u32(5, 5), 5);
}

#[test]
fn f64_draws_are_unit_interval() {
    let mut rng = Rng64::new(42);
    for _ in 0..1_000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn derived_seeds_differ_per_index() {
    let a = derive_seed(7, 2);
    let b = derive_seed(7, 3);
    assert_ne!(a, b);
    assert_eq!(a, derive_seed(7, 2));
}
