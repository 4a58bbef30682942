use num_bigint::{BigInt, Sign};
use rand::RngCore;

/// Draws a uniform integer from the inclusive range `[lower, upper]`.
///
/// Implemented by rejection sampling over the shifted span: candidates are
/// drawn with the excess bits of the top byte masked off, so each round
/// accepts with probability > 1/2.
///
/// Panics if `upper < lower`.
pub fn random_between<R: RngCore + ?Sized>(rng: &mut R, lower: &BigInt, upper: &BigInt) -> BigInt {
    assert!(
        lower <= upper,
        "empty sampling range [{}, {}]",
        lower,
        upper
    );

    let span = upper - lower;
    let bits = span.bits();
    if bits == 0 {
        return lower.clone();
    }

    let num_bytes = ((bits + 7) / 8) as usize;
    let msb_mask: u8 = {
        let r = bits % 8;
        if r == 0 {
            0xff
        } else {
            (1u8 << r) - 1
        }
    };

    let mut buf = vec![0u8; num_bytes];
    loop {
        rng.fill_bytes(&mut buf);
        buf[num_bytes - 1] &= msb_mask;

        let candidate = BigInt::from_bytes_le(Sign::Plus, &buf);
        if candidate <= span {
            return lower + candidate;
        }
    }
}

/// Draws a uniform integer of exactly `bit_length` bits, i.e. with the top
/// bit set.
pub fn random_with_bit_length<R: RngCore + ?Sized>(rng: &mut R, bit_length: usize) -> BigInt {
    assert!(bit_length > 0, "cannot sample a zero-length integer");

    let num_bytes = (bit_length + 7) / 8;
    let top = (bit_length - 1) % 8;

    let mut buf = vec![0u8; num_bytes];
    rng.fill_bytes(&mut buf);

    // Mask everything above the top bit, then force the top bit.
    buf[num_bytes - 1] &= ((1u16 << (top + 1)) - 1) as u8;
    buf[num_bytes - 1] |= 1u8 << top;

    BigInt::from_bytes_le(Sign::Plus, &buf)
}
