use approx::assert_relative_eq;
use num_traits::{Float, FloatConst};
use tiltcompass::filtering::biquad::{FilterDesign, StreamingBiquad};
use tiltcompass::filtering::strict::DesignError;

fn settle<ItemT: Float + FloatConst>(filter: &mut StreamingBiquad<ItemT>, sample: ItemT, count: usize) -> ItemT {
    for _ in 0..count {
        filter.update(sample);
    }
    filter.value()
}

fn steps_towards_input<ItemT: Float + FloatConst>() {
    let one = ItemT::one();
    let design = FilterDesign::new(one + one, ItemT::from(116.0).unwrap());
    let mut filter = StreamingBiquad::new(design, ItemT::zero());
    assert!(filter.value() == ItemT::zero());

    let mut previous = ItemT::zero();
    for _ in 0..20 {
        let next = filter.update(one);
        assert!(next > previous);
        assert!(next < one);
        previous = next;
    }
}

#[test]
fn step_response_rises_monotonically() {
    steps_towards_input::<f32>();
    steps_towards_input::<f64>();
}

#[test]
fn reference_fixture() {
    let design = FilterDesign::new(2.0_f64, 116.0);
    assert_relative_eq!(design.gain(), 367.26162515286325, max_relative = 1e-12);

    let mut filter = StreamingBiquad::new(design, 0.0);
    let outputs = [filter.update(1.0), filter.update(1.0), filter.update(1.0)];
    assert_relative_eq!(outputs[0], 0.0027228545851578573, max_relative = 1e-10);
    assert_relative_eq!(outputs[1], 0.013197852328830837, max_relative = 1e-10);
    assert_relative_eq!(outputs[2], 0.03293261568801539, max_relative = 1e-10);
}

#[test]
fn hot_reconfigure_mid_stream() {
    let mut filter = StreamingBiquad::new(FilterDesign::new(2.0_f64, 116.0), 0.0);
    assert_relative_eq!(settle(&mut filter, 5.0, 2000), 5.0, max_relative = 1e-9);

    // a faster sensor clock and a wider passband, no jump in the settled output
    let mut design = *filter.design();
    design.set_sample_rate(200.0).set_passband(10.0);
    filter.reconfigure(design);
    assert_relative_eq!(filter.update(5.0), 5.0, max_relative = 1e-9);

    // the new passband tracks a step faster than the old one
    let mut slow = StreamingBiquad::new(FilterDesign::new(2.0_f64, 200.0), 5.0);
    let fast = settle(&mut filter, 0.0, 20);
    let slow = settle(&mut slow, 0.0, 20);
    assert!(fast < slow);
}

#[test]
fn strict_mode_is_opt_in() {
    assert_eq!(FilterDesign::try_new(2.0_f32, 0.0), Err(DesignError::NonPositiveSampleRate));

    // the permissive path accepts the same parameters and poisons the history
    let broken = FilterDesign::new(2.0_f32, 0.0);
    let mut checked = StreamingBiquad::new(FilterDesign::new(2.0_f32, 116.0), 1.0);
    let mut unchecked = checked;

    assert_eq!(checked.try_reconfigure(broken).err(), Some(DesignError::DegenerateCoefficients));
    assert_relative_eq!(checked.update(1.0), 1.0, max_relative = 1e-4);

    unchecked.reconfigure(broken);
    assert!(unchecked.update(1.0).is_nan());
}
