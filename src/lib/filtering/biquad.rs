// Run-time configurable 2nd order Butterworth low-pass filter
//
// Typical use: build a FilterDesign from the cutoff and the rate at which samples are fed
// to the filter, seed the filter with a plausible first value (often 0 or the first
// measurement), then call update() once per new sample and read value().

pub use crate::filtering::butterworth::FilterDesign;
use num_traits::{Float, FloatConst};

// Both zeros sit at z = -1, giving the [1, 2, 1] numerator.
const TAPS: usize = 3;

/// Streaming 2nd order low-pass filter.
///
/// `x` holds the last three inputs already divided by the design gain, `y` the last three
/// outputs. Slot 2 is the newest in both; `y[2]` is the current filtered value.
#[derive(Debug, Clone, Copy)]
pub struct StreamingBiquad<ItemT> {
    design: FilterDesign<ItemT>,
    x: [ItemT; TAPS],
    y: [ItemT; TAPS],
}

impl<ItemT> StreamingBiquad<ItemT>
where
    ItemT: Float + FloatConst,
{
    /// Creates a filter that has already settled at `initial`, so the first outputs do not
    /// ramp up from zero.
    pub fn new(design: FilterDesign<ItemT>, initial: ItemT) -> StreamingBiquad<ItemT> {
        let mut filter = StreamingBiquad {
            design,
            x: [ItemT::zero(); TAPS],
            y: [ItemT::zero(); TAPS],
        };
        filter.reset(initial);
        filter
    }

    /// Re-seeds both histories to steady state at `reference` using the current design.
    pub fn reset(&mut self, reference: ItemT) -> &mut Self {
        self.x = [reference / self.design.gain(); TAPS];
        self.y = [reference; TAPS];
        self
    }

    /// Feeds one raw sample and returns the new filtered value.
    ///
    /// Non-finite samples are not sanitized and will poison the history.
    pub fn update(&mut self, sample: ItemT) -> ItemT {
        // oldest slot wraps to the end and is overwritten below
        self.x.rotate_left(1);
        self.y.rotate_left(1);

        self.x[2] = sample / self.design.gain();

        let two = ItemT::one() + ItemT::one();
        self.y[2] = two * self.x[1]
            + self.x[0]
            + self.x[2]
            + self.design.feedback2() * self.y[0]
            + self.design.feedback1() * self.y[1];
        self.y[2]
    }

    pub fn value(&self) -> ItemT {
        self.y[2]
    }

    pub fn design(&self) -> &FilterDesign<ItemT> {
        &self.design
    }

    /// Swaps in a new design (passband and/or sample rate) while trying to keep the output
    /// continuous.
    ///
    /// The cached inputs are stored divided by the old gain, so they are multiplied by
    /// `old_gain / new_gain`. This is an approximation, not an exact state transform: it may
    /// not be numerically stable, especially with `f32` or when the gain changes a lot.
    pub fn reconfigure(&mut self, design: FilterDesign<ItemT>) -> &mut Self {
        let old_gain = self.design.gain();
        let new_gain = design.gain();
        self.design = design;
        self.rescale_history(old_gain, new_gain);
        self
    }

    // Skipped when the old gain is zero or not finite, history is left as-is.
    fn rescale_history(&mut self, old_gain: ItemT, new_gain: ItemT) {
        if old_gain != ItemT::zero() && old_gain.is_finite() {
            let ratio = old_gain / new_gain;
            for x in self.x.iter_mut() {
                *x = *x * ratio;
            }
        }
    }
}
