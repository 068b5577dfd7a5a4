//! End-to-end synthesis behavior: spectral energy before and after.

mod common;

use bandext::{extend, ExtendParams};
use common::{band_energy, gen_sine, gen_two_tone};

const SR: u32 = 96_000;

fn params() -> ExtendParams {
    ExtendParams::new()
        .with_sample_rate(SR)
        .with_channels(1)
        .with_cutoff_freq(8_000.0)
        .with_target_max_freq(20_000.0)
        .with_transition_width(1_500.0)
}

// A tone sitting inside the reference window just below the 8 kHz cutoff,
// so the synthetic band inherits real loudness from the spectral tail.
fn tail_tone(n: usize) -> Vec<f32> {
    gen_sine(7_968.75, SR, n, 0.5)
}

// ── Synthetic band creation ──────────────────────────────────────────────────

#[test]
fn synthesis_adds_energy_above_cutoff() {
    let input = tail_tone(96_000);
    let before = band_energy(&input, SR, 12_000.0, 18_000.0);

    let output = extend(&input, &params()).unwrap();
    let after = band_energy(&output, SR, 12_000.0, 18_000.0);

    assert!(
        after > before * 100.0,
        "high band should gain energy: before {:.3e}, after {:.3e}",
        before,
        after
    );
    assert!(after > 1e-3, "synthetic band unexpectedly quiet: {:.3e}", after);
}

#[test]
fn synthetic_band_decays_toward_target() {
    let input = tail_tone(96_000);
    let output = extend(&input, &params()).unwrap();

    let near_cutoff = band_energy(&output, SR, 9_000.0, 11_000.0);
    let near_target = band_energy(&output, SR, 16_000.0, 18_000.0);
    assert!(
        near_cutoff > near_target,
        "decay envelope should taper the band: near cutoff {:.3e}, near target {:.3e}",
        near_cutoff,
        near_target
    );
}

#[test]
fn content_below_cutoff_survives() {
    let input = tail_tone(96_000);
    let low_before = band_energy(&input, SR, 7_000.0, 8_000.0);

    let output = extend(&input, &params()).unwrap();
    let low_after = band_energy(&output, SR, 7_000.0, 8_000.0);

    // The tone itself is untouched (bins below the cutoff are never written)
    let ratio = low_after / low_before;
    assert!(
        (0.9..=1.1).contains(&ratio),
        "low band energy changed by {:.3}x",
        ratio
    );
}

#[test]
fn gain_scales_the_synthetic_band() {
    let input = tail_tone(96_000);

    let quiet = extend(&input, &params().with_gain(0.5)).unwrap();
    let loud = extend(&input, &params().with_gain(2.0)).unwrap();

    let quiet_e = band_energy(&quiet, SR, 12_000.0, 18_000.0);
    let loud_e = band_energy(&loud, SR, 12_000.0, 18_000.0);
    // 4x the gain means 16x the energy
    assert!(
        loud_e > quiet_e * 8.0,
        "gain 2.0 band energy {:.3e} should dwarf gain 0.5 energy {:.3e}",
        loud_e,
        quiet_e
    );
}

// ── Overwrite semantics ──────────────────────────────────────────────────────

#[test]
fn gain_zero_erases_content_beyond_transition() {
    // Real content at 15 kHz sits beyond cutoff + transition (9.5 kHz) and
    // is replaced by the silent synthetic surface.
    let input = gen_two_tone(4_000.0, 0.5, 15_000.0, 0.3, SR, 96_000);
    let before = band_energy(&input, SR, 12_000.0, 18_000.0);

    let output = extend(&input, &params().with_gain(0.0)).unwrap();
    let after = band_energy(&output, SR, 12_000.0, 18_000.0);

    assert!(
        after < before * 1e-3,
        "gain 0 should silence the band: before {:.3e}, after {:.3e}",
        before,
        after
    );

    // The 4 kHz tone below the cutoff is unaffected
    let low = band_energy(&output, SR, 3_500.0, 4_500.0);
    let low_before = band_energy(&input, SR, 3_500.0, 4_500.0);
    assert!(low > low_before * 0.9);
}

#[test]
fn content_above_target_max_is_untouched() {
    // A loud tone above target_max_freq lies outside the synthesis band;
    // the quiet tail tone keeps the synthetic band small next to it.
    let input = gen_two_tone(7_968.75, 0.1, 22_000.0, 0.5, SR, 96_000);
    let before = band_energy(&input, SR, 21_000.0, 23_000.0);

    let output = extend(&input, &params()).unwrap();
    let after = band_energy(&output, SR, 21_000.0, 23_000.0);

    let ratio = after / before;
    assert!(
        (0.8..=1.25).contains(&ratio),
        "energy above the target band changed by {:.3}x",
        ratio
    );
}
