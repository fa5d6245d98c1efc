// 2nd order Butterworth low-pass filter design
// Coefficients are derived from the analog prototype s^2 + sqrt(2)s + 1 using the
// bilinear transform with frequency prewarping.

use num_traits::{Float, FloatConst};

// Largest usable cutoff as a fraction of the sample rate. tan(wc / 2) diverges at Nyquist.
const NYQUIST_GUARD: f64 = 0.49;

/// Normalized recurrence coefficients of a 2nd order low-pass section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients<ItemT> {
    /// Input scaling factor. Every new sample is divided by this before entering the recurrence.
    pub gain: ItemT,
    /// Multiplies the middle (previous) output.
    pub feedback1: ItemT,
    /// Multiplies the oldest output.
    pub feedback2: ItemT,
}

/// Derives low-pass coefficients for `passband` (Hz) at `sample_rate` (Hz).
///
/// Inputs are not validated: a non-positive passband or sample rate yields non-finite
/// coefficients. See [`crate::filtering::strict`] for a checked variant.
pub fn derive<ItemT>(passband: ItemT, sample_rate: ItemT) -> Coefficients<ItemT>
where
    ItemT: Float + FloatConst,
{
    let one = ItemT::one();
    let two = one + one;

    let fc = (sample_rate * constant(NYQUIST_GUARD)).min(passband);

    // normalized digital frequency
    let wc = two * ItemT::PI() * fc / sample_rate;

    // prewarped analog frequency and its reciprocal
    let w_analog = (wc / two).tan();
    let s_inv = one / w_analog;

    let t = s_inv.powi(2);
    let u = ItemT::SQRT_2() * s_inv;

    let gain = t + u + one;
    Coefficients {
        gain,
        feedback1: -(-two * t + two) / gain,
        feedback2: -(t - u + one) / gain,
    }
}

// f32 and f64 always represent an f64 literal; anything else degrades to NaN.
fn constant<ItemT: Float>(value: f64) -> ItemT {
    ItemT::from(value).unwrap_or_else(ItemT::nan)
}

/// Design parameters of a 2nd order Butterworth low-pass filter and the coefficients
/// derived from them. Coefficients are recomputed whenever a parameter changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDesign<ItemT> {
    passband: ItemT,
    sample_rate: ItemT,
    coefficients: Coefficients<ItemT>,
}

impl<ItemT> FilterDesign<ItemT>
where
    ItemT: Float + FloatConst,
{
    // passband: cutoff frequency in Hz, should be below sample_rate / 2
    // sample_rate: rate at which samples are fed to the filter in Hz
    pub fn new(passband: ItemT, sample_rate: ItemT) -> FilterDesign<ItemT> {
        FilterDesign {
            passband,
            sample_rate,
            coefficients: derive(passband, sample_rate),
        }
    }

    pub fn set_passband(&mut self, passband: ItemT) -> &mut Self {
        self.passband = passband;
        self.recalculate();
        self
    }

    pub fn set_sample_rate(&mut self, sample_rate: ItemT) -> &mut Self {
        self.sample_rate = sample_rate;
        self.recalculate();
        self
    }

    pub fn passband(&self) -> ItemT {
        self.passband
    }

    pub fn sample_rate(&self) -> ItemT {
        self.sample_rate
    }

    pub fn gain(&self) -> ItemT {
        self.coefficients.gain
    }

    pub fn feedback1(&self) -> ItemT {
        self.coefficients.feedback1
    }

    pub fn feedback2(&self) -> ItemT {
        self.coefficients.feedback2
    }

    pub fn coefficients(&self) -> Coefficients<ItemT> {
        self.coefficients
    }

    fn recalculate(&mut self) {
        self.coefficients = derive(self.passband, self.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn derives_reference_coefficients() {
        let design = FilterDesign::new(2.0_f64, 116.0);
        assert_relative_eq!(design.gain(), 367.26162515286325, max_relative = 1e-12);
        assert_relative_eq!(design.feedback1(), 1.8470646948139138, max_relative = 1e-12);
        assert_relative_eq!(design.feedback2(), -0.8579561131545451, max_relative = 1e-12);
    }

    #[test]
    fn single_precision_matches_double() {
        let single = FilterDesign::new(2.0_f32, 116.0);
        let double = FilterDesign::new(2.0_f64, 116.0);
        assert_relative_eq!(single.gain() as f64, double.gain(), max_relative = 1e-4);
        assert_relative_eq!(single.feedback1() as f64, double.feedback1(), max_relative = 1e-4);
        assert_relative_eq!(single.feedback2() as f64, double.feedback2(), max_relative = 1e-4);
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = derive(3.5_f64, 100.0);
        let second = derive(3.5_f64, 100.0);
        assert_eq!(first.gain.to_bits(), second.gain.to_bits());
        assert_eq!(first.feedback1.to_bits(), second.feedback1.to_bits());
        assert_eq!(first.feedback2.to_bits(), second.feedback2.to_bits());
    }

    #[test]
    fn passband_is_clamped_below_nyquist() {
        let sample_rate = 100.0_f64;
        let clamped = derive(0.49 * sample_rate, sample_rate);
        for passband in [50.0, 80.0, 1000.0] {
            assert_eq!(derive(passband, sample_rate), clamped);
        }
        assert!(clamped.gain.is_finite());
        assert!(clamped.feedback1.is_finite());
        assert!(clamped.feedback2.is_finite());
    }

    #[test]
    fn setters_rederive_coefficients() {
        let mut design = FilterDesign::new(2.0_f64, 116.0);
        let original = design.gain();

        design.set_passband(5.0).set_sample_rate(20.0);
        assert_eq!(design.passband(), 5.0);
        assert_eq!(design.sample_rate(), 20.0);
        assert_eq!(design.coefficients(), derive(5.0, 20.0));

        design.set_passband(2.0).set_sample_rate(116.0);
        assert_eq!(design.gain(), original);
        assert_eq!(design, FilterDesign::new(2.0, 116.0));
    }

    #[test]
    fn degenerate_inputs_are_not_rejected() {
        assert!(derive(0.0_f64, 100.0).gain.is_infinite());
        assert!(derive(2.0_f64, 0.0).gain.is_nan());
        assert!(derive(0.0_f32, 100.0).gain.is_infinite());
    }
}
