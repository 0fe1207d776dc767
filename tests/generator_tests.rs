use rand::rngs::StdRng;
use rand::SeedableRng;
use tensor_parity::generator::{rand_int, rand_normal, rand_uniform, reference_left_shift};
use tensor_parity::{
    full_left_shift, gen_rand_bitwise_left_shift, gen_shapes, truncated_left_shift, Error, Result,
    Shape, Tensor,
};

#[test]
fn fixed_seed_reproduces_the_same_tensor() -> Result<()> {
    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);
    let a = gen_rand_bitwise_left_shift((4, 8), 5, -100, 100, &mut rng_a)?;
    let b = gen_rand_bitwise_left_shift((4, 8), 5, -100, 100, &mut rng_b)?;
    assert_eq!(a, b);

    let mut rng_c = StdRng::seed_from_u64(43);
    let c = gen_rand_bitwise_left_shift((4, 8), 5, -100, 100, &mut rng_c)?;
    assert_ne!(a, c);
    Ok(())
}

#[test]
fn safe_values_shift_identically_under_both_semantics() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0);
    for shift_bits in 0..=31u32 {
        let t = gen_rand_bitwise_left_shift(
            256usize,
            shift_bits,
            -2147483647,
            2147483648,
            &mut rng,
        )?;
        for v in t.to_vec1::<i32>()? {
            assert_eq!(
                full_left_shift(v, shift_bits),
                truncated_left_shift(v, shift_bits),
                "v: {v:#010x}, shift_bits: {shift_bits}"
            );
        }
    }
    Ok(())
}

#[test]
fn unsafe_values_can_disagree() {
    // 0x40000000 has bit 30 set but a clear sign bit, the exact pattern the
    // safe generator removes for a 1-bit shift.
    let v = 0x4000_0000i32;
    assert_ne!(full_left_shift(v, 1), truncated_left_shift(v, 1));
}

#[test]
fn shift_bits_outside_the_supported_range_error() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = gen_rand_bitwise_left_shift(4usize, 32, -100, 100, &mut rng).unwrap_err();
    assert!(matches!(err, Error::ShiftOutOfRange { shift_bits: 32 }));
}

#[test]
fn invalid_draw_ranges_error() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        gen_rand_bitwise_left_shift(4usize, 5, 100, -100, &mut rng).unwrap_err(),
        Error::InvalidRange { .. }
    ));
    assert!(matches!(
        rand_int(4usize, i64::MIN, 0, &mut rng).unwrap_err(),
        Error::InvalidRange { .. }
    ));
    assert!(matches!(
        rand_uniform(4usize, 1.0, 1.0, &mut rng).unwrap_err(),
        Error::InvalidRange { .. }
    ));
}

#[test]
fn rand_int_respects_its_bounds() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let t = rand_int((16, 16), -50, 50, &mut rng)?;
    for v in t.to_vec1::<i32>()? {
        assert!((-50..50).contains(&(v as i64)));
    }
    Ok(())
}

#[test]
fn rand_uniform_respects_its_bounds() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let t = rand_uniform((16, 16), -1.0, 1.0, &mut rng)?;
    for v in t.to_vec1::<f32>()? {
        assert!((-1.0..1.0).contains(&v));
    }
    Ok(())
}

#[test]
fn rand_normal_rejects_negative_std() {
    let mut rng = StdRng::seed_from_u64(7);
    assert!(matches!(
        rand_normal(4usize, 0.0, -1.0, &mut rng).unwrap_err(),
        Error::InvalidNormalParams { .. }
    ));
}

#[test]
fn reference_shift_applies_full_width_semantics() -> Result<()> {
    let input = Tensor::from_slice(&[1i32, -1, 3, 0x4000_0000], 4usize)?;
    let shifted = reference_left_shift(&input, 2)?;
    assert_eq!(shifted.to_vec1::<i32>()?, [4, -4, 12, 0]);
    Ok(())
}

#[test]
fn gen_shapes_expands_the_cartesian_product() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0);
    let shapes = gen_shapes(&[1, 32], &[2, 96], &[1, 32], None, &mut rng)?;
    let expected: Vec<Shape> = [
        [1, 32],
        [1, 64],
        [1, 96],
        [2, 32],
        [2, 64],
        [2, 96],
    ]
    .iter()
    .map(Shape::from)
    .collect();
    assert_eq!(shapes, expected);
    Ok(())
}

#[test]
fn gen_shapes_samples_without_replacement() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(1);
    let all = gen_shapes(&[1, 32], &[4, 128], &[1, 32], None, &mut rng)?;
    let sampled = gen_shapes(&[1, 32], &[4, 128], &[1, 32], Some(5), &mut rng)?;
    assert_eq!(sampled.len(), 5);
    for shape in &sampled {
        assert!(all.contains(shape));
    }
    for (i, shape) in sampled.iter().enumerate() {
        assert!(!sampled[i + 1..].contains(shape));
    }

    // Asking for more samples than exist returns the full set.
    let over = gen_shapes(&[1, 32], &[2, 64], &[1, 32], Some(100), &mut rng)?;
    assert_eq!(over.len(), 4);
    Ok(())
}

#[test]
fn gen_shapes_rejects_inconsistent_bounds() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        gen_shapes(&[1, 1], &[2], &[1, 1], None, &mut rng).unwrap_err(),
        Error::SweepRankMismatch { .. }
    ));
    assert!(matches!(
        gen_shapes(&[1], &[4], &[0], None, &mut rng).unwrap_err(),
        Error::InvalidSweepBounds { .. }
    ));
    assert!(matches!(
        gen_shapes(&[4], &[1], &[1], None, &mut rng).unwrap_err(),
        Error::InvalidSweepBounds { .. }
    ));
}
