//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    build_test_config, build_test_config_with_pair_rate, DUMMY_MAKER_ADDR, DUMMY_MAKER_TOKEN,
    DUMMY_TAKER_ADDR, DUMMY_TAKER_TOKEN,
};
