// Opt-in checked construction for filter designs.
// The plain constructors stay permissive and let bad inputs surface as NaN/Inf.

use crate::filtering::biquad::StreamingBiquad;
use crate::filtering::butterworth::{derive, Coefficients, FilterDesign};
use num_traits::{Float, FloatConst};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignError {
    NonFiniteInput,
    NonPositivePassband,
    NonPositiveSampleRate,
    DegenerateCoefficients,
}

pub fn validate<ItemT: Float>(passband: ItemT, sample_rate: ItemT) -> Result<(), DesignError> {
    if !passband.is_finite() || !sample_rate.is_finite() {
        return Err(DesignError::NonFiniteInput);
    }
    if passband <= ItemT::zero() {
        return Err(DesignError::NonPositivePassband);
    }
    if sample_rate <= ItemT::zero() {
        return Err(DesignError::NonPositiveSampleRate);
    }
    Ok(())
}

fn check_coefficients<ItemT: Float>(coefficients: &Coefficients<ItemT>) -> Result<(), DesignError> {
    let finite = coefficients.gain.is_finite()
        && coefficients.feedback1.is_finite()
        && coefficients.feedback2.is_finite();
    if finite && coefficients.gain != ItemT::zero() {
        Ok(())
    } else {
        Err(DesignError::DegenerateCoefficients)
    }
}

fn checked_derive<ItemT>(passband: ItemT, sample_rate: ItemT) -> Result<(), DesignError>
where
    ItemT: Float + FloatConst,
{
    validate(passband, sample_rate)?;
    check_coefficients(&derive(passband, sample_rate))
}

impl<ItemT> FilterDesign<ItemT>
where
    ItemT: Float + FloatConst,
{
    pub fn try_new(passband: ItemT, sample_rate: ItemT) -> Result<FilterDesign<ItemT>, DesignError> {
        checked_derive(passband, sample_rate)?;
        Ok(FilterDesign::new(passband, sample_rate))
    }

    // On error the design is left unchanged.
    pub fn try_set_passband(&mut self, passband: ItemT) -> Result<&mut Self, DesignError> {
        checked_derive(passband, self.sample_rate())?;
        Ok(self.set_passband(passband))
    }

    pub fn try_set_sample_rate(&mut self, sample_rate: ItemT) -> Result<&mut Self, DesignError> {
        checked_derive(self.passband(), sample_rate)?;
        Ok(self.set_sample_rate(sample_rate))
    }
}

impl<ItemT> StreamingBiquad<ItemT>
where
    ItemT: Float + FloatConst,
{
    /// Like [`StreamingBiquad::reconfigure`], but refuses a design with degenerate
    /// coefficients instead of letting it poison the filter state.
    pub fn try_reconfigure(&mut self, design: FilterDesign<ItemT>) -> Result<&mut Self, DesignError> {
        check_coefficients(&design.coefficients())?;
        Ok(self.reconfigure(design))
    }
}
