//! Fuzz testing for the numeric converters.
//!
//! The exact strategies must agree bit for bit with the standard converter,
//! and no strategy may panic on arbitrary bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;

use typedcsv::NumericStrategy;

fuzz_target!(|data: &[u8]| {
    let reference_int = NumericStrategy::Standard.int_parser()(data);
    let reference_double = NumericStrategy::Standard.double_parser()(data);

    for strategy in NumericStrategy::ALL {
        let int = strategy.int_parser()(data);
        let double = strategy.double_parser()(data);

        if strategy.is_exact() {
            assert_eq!(int, reference_int, "{:?}", strategy);
            assert_eq!(
                double.map(|v| if v.is_nan() { u64::MAX } else { v.to_bits() }),
                reference_double.map(|v| if v.is_nan() { u64::MAX } else { v.to_bits() }),
                "{:?}",
                strategy
            );
        }
    }
});
