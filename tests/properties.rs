//! Property tests for rate conversion, step accounting and argument parsing.

mod common;

use common::Bench;
use proptest::prelude::*;
use stepper_bench::command::{parse_decimal, NumberParser, ParseStep};
use stepper_bench::{Hertz, StepsPerSec};

proptest! {
    #[test]
    fn period_is_frequency_over_rate(rate in 1u16..=u16::MAX) {
        let period = Hertz(57_600).period_for(StepsPerSec(rate));
        let expected = 57_600 / u32::from(rate);
        if expected == 0 {
            prop_assert!(period.is_none());
        } else {
            prop_assert_eq!(period.map(|p| u32::from(p.0)), Some(expected));
        }
    }

    #[test]
    fn every_pulse_moves_one_step(
        moves in prop::collection::vec((any::<bool>(), 0u16..40), 1..6)
    ) {
        let mut bench = Bench::new();
        bench.type_input(b"s500\r");

        let mut expected: i32 = 0;
        for (forward, steps) in moves {
            bench.type_input(if forward { b"df" } else { b"dr" });
            bench.type_input(format!("n{}\r", steps).as_bytes());
            bench.type_input(b"g");
            bench.run_until_idle(1_000);
            expected += if forward { i32::from(steps) } else { -i32::from(steps) };
        }

        prop_assert_eq!(bench.status().position, expected);
        prop_assert!(!bench.status().running);
    }

    #[test]
    fn steps_done_never_exceeds_request(steps in 1u16..200, ticks in 0usize..250) {
        let mut bench = Bench::new();
        bench.type_input(format!("s1000\rn{}\rg", steps).as_bytes());

        for _ in 0..ticks {
            bench.tick();
            let status = bench.status();
            prop_assert!(status.steps_done <= steps);
            prop_assert!(status.running || status.steps_requested == 0);
        }
    }

    #[test]
    fn stop_is_idempotent(ticks in 0usize..20, stops in 1usize..4) {
        let mut bench = Bench::new();
        bench.type_input(b"s100\rn20\rg");
        for _ in 0..ticks {
            bench.tick();
        }

        let position = bench.status().position;
        for _ in 0..stops {
            bench.motion.stop().unwrap();
        }

        let status = bench.status();
        prop_assert!(!status.running);
        prop_assert!(!status.energized);
        prop_assert_eq!(status.steps_requested, 0);
        prop_assert_eq!(status.position, position);
    }

    #[test]
    fn short_numbers_parse_exactly(value in 0u32..100_000) {
        let mut parser = NumberParser::new();
        for b in value.to_string().bytes() {
            prop_assert_eq!(parser.push(b), ParseStep::Pending);
        }
        prop_assert_eq!(parser.push(b'\r'), ParseStep::Done(value as i32));
    }

    #[test]
    fn parse_decimal_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        let _ = parse_decimal(&bytes);
    }
}
