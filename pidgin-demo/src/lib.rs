//! Thin collaborators around the pidgin normalizer: record I/O, rule
//! files and logging for the `pidgin-norm` binary.

pub mod logging;
pub mod records;
pub mod rules_file;

/// Raw input used when no input file is given.
pub const SAMPLE_INPUTS: [&str; 4] = [
    "Abeggg help me  check d  time!",
    "U dey go  market 2day???",
    "Wetin    be   dis one  shaa..",
    "Na so e be o.",
];
