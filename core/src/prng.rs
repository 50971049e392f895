/// Mulberry32. Returns a draw in [0, 1) and the state to pass next time.
/// Every stochastic choice in a run goes through here, so a seed pins the
/// whole obstacle timeline.
pub fn prng_next(state: u32) -> (f64, u32) {
    let mut t = state.wrapping_add(0x6d2b79f5);
    let next_state = t;
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    let value = (t ^ (t >> 14)) as f64 / 4294967296.0;
    (value, next_state)
}

/// Uniform integer in `min..=max`.
pub fn prng_int_range(state: u32, min: i32, max: i32) -> (i32, u32) {
    let (value, next_state) = prng_next(state);
    let range = (max - min + 1) as f64;
    (min + (value * range).floor() as i32, next_state)
}

/// Returns a value in [-1, 1). Used for weight initialisation and mutation.
pub fn prng_signed(state: u32) -> (f64, u32) {
    let (value, next_state) = prng_next(state);
    (value * 2.0 - 1.0, next_state)
}
