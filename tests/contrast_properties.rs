// SPDX-License-Identifier: PMPL-1.0-or-later

use contrastbot::auditor::{audit, ContrastAssertion, Grade, Tier, AA_LARGE, AA_NORMAL};
use contrastbot::color::{contrast_ratio, parse_color, Rgb};
use contrastbot::palette::Palette;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn rgb() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn contrast_ratio_is_symmetric(a in rgb(), b in rgb()) {
        prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_ratio_of_identical_colors_is_one(a in rgb()) {
        prop_assert_eq!(contrast_ratio(a, a), 1.0);
    }

    #[test]
    fn contrast_ratio_within_range(a in rgb(), b in rgb()) {
        let ratio = contrast_ratio(a, b);
        prop_assert!(ratio >= 1.0);
        prop_assert!(ratio <= 21.0 + 1e-9);
    }

    #[test]
    fn hex_formatting_parses_back(a in rgb()) {
        prop_assert_eq!(parse_color(&a.to_hex()).unwrap(), a);
        prop_assert_eq!(parse_color(a.to_hex().trim_start_matches('#')).unwrap(), a);
    }

    #[test]
    fn large_text_never_stricter(a in rgb(), b in rgb()) {
        let ratio = contrast_ratio(a, b);
        let normal = Tier::classify(ratio, false);
        let large = Tier::classify(ratio, true);
        prop_assert!(large >= normal);
        if ratio >= AA_NORMAL {
            prop_assert!(normal.passes() && large.passes());
        } else if ratio >= AA_LARGE {
            prop_assert!(large.passes() && !normal.passes());
        }
    }

    #[test]
    fn audit_counts_add_up(colors in proptest::collection::vec((rgb(), rgb(), any::<bool>()), 1..24)) {
        let mut pairs = Vec::new();
        let mut assertions = Vec::new();
        for (idx, (fg, bg, large)) in colors.iter().enumerate() {
            pairs.push((format!("fg{idx}"), fg.to_hex()));
            pairs.push((format!("bg{idx}"), bg.to_hex()));
            assertions.push(
                ContrastAssertion::new(&format!("fg{idx}"), &format!("bg{idx}"), &format!("pair {idx}"))
                    .large_text(*large),
            );
        }
        let palette = Palette::from_hex_pairs(pairs).unwrap();
        let report = audit(&palette, &assertions).unwrap();

        prop_assert_eq!(report.pass_count() + report.fail_count(), report.total());
        prop_assert_eq!(report.aa_count() + report.aaa_count(), report.pass_count());
        prop_assert_eq!(report.grade(), Grade::from_pass_rate(report.pass_rate()));

        let max = report.results().iter().map(|r| r.ratio()).fold(f64::MIN, f64::max);
        let min = report.results().iter().map(|r| r.ratio()).fold(f64::MAX, f64::min);
        prop_assert_eq!(report.best().ratio(), max);
        prop_assert_eq!(report.worst().ratio(), min);

        let first_best = report.results().iter().position(|r| r.ratio() == max).unwrap();
        prop_assert_eq!(report.best().description(), format!("pair {first_best}"));
    }

    #[test]
    fn grade_monotone_in_pass_rate(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Grade::from_pass_rate(lo) <= Grade::from_pass_rate(hi));
    }
}

#[test]
fn known_reference_ratios() {
    let white = parse_color("#ffffff").unwrap();
    let black = parse_color("#000000").unwrap();
    let gray = parse_color("#767676").unwrap();

    assert!((contrast_ratio(white, black) - 21.0).abs() < 1e-9);
    assert!((contrast_ratio(gray, white) - 4.54).abs() < 0.01);
}

#[test]
fn malformed_colors_rejected() {
    for bad in ["#12G456", "12345", ""] {
        assert!(parse_color(bad).is_err(), "{bad:?} should be rejected");
    }
}
