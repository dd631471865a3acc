use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    a.write_bytes(b"poster");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"pos");
    b.write_bytes(b"ter");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn hash_unit_stays_in_range_and_is_deterministic() {
    for x in 0..64 {
        let v = hash_unit(7, x, x * 3);
        assert!((0.0..1.0).contains(&v));
        assert_eq!(v, hash_unit(7, x, x * 3));
    }
    assert_ne!(hash_u32(1, 0, 0), hash_u32(2, 0, 0));
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}
