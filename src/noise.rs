//! # Seeded Gradient Noise
//!
//! Deterministic 2D simplex-style noise. The permutation table is derived
//! once from an integer seed with a Park-Miller sequence driving a
//! Fisher-Yates shuffle, so the field depends only on `seed`, `x` and `y`.

/// Skew factor into simplex space, (sqrt(3) - 1) / 2
const F2: f64 = 0.366_025_403_784_438_6;

/// Unskew factor back to input space, (3 - sqrt(3)) / 6
const G2: f64 = 0.211_324_865_405_187_13;

const LCG_MULTIPLIER: i64 = 16807;
const LCG_MODULUS: i64 = 2_147_483_647;

/// Immutable seeded noise field
///
/// Rebuild with [`SeededNoise::new`] whenever the seed changes; instances are
/// never modified after construction.
#[derive(Clone)]
pub struct SeededNoise {
    seed: i64,
    perm: Box<[u8; 512]>,
}

impl SeededNoise {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            perm: Box::new(build_permutation(seed)),
        }
    }

    /// Seed this field was built from
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Sample the field at `(x, y)`; the result lies roughly in [-1, 1]
    pub fn query(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let p = &self.perm;
        let h0 = p[ii + p[jj] as usize];
        let h1 = p[ii + i1 + p[jj + j1] as usize];
        let h2 = p[ii + 1 + p[jj + 1] as usize];

        70.0 * (corner(h0, x0, y0) + corner(h1, x1, y1) + corner(h2, x2, y2))
    }
}

impl std::fmt::Debug for SeededNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededNoise").field("seed", &self.seed).finish()
    }
}

/// Identity table shuffled by the seed, then doubled for wrap-free lookups
fn build_permutation(seed: i64) -> [u8; 512] {
    let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);

    let mut n = seed % LCG_MODULUS;
    for i in (1..256usize).rev() {
        n = (n * LCG_MULTIPLIER) % LCG_MODULUS;
        let j = n.rem_euclid(i as i64 + 1) as usize;
        p.swap(i, j);
    }

    std::array::from_fn(|i| p[i & 255])
}

/// Radial falloff times gradient contribution of one simplex corner
#[inline]
fn corner(hash: u8, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let t = t * t;
    t * t * grad(hash, x, y)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    u + v
}
