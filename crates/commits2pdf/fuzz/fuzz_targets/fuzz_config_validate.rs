#![no_main]

//! Fuzz target for command-line validation
//!
//! Arbitrary values for the free-text flags must either validate or be
//! rejected with a `ConfigError`, never panic.

use clap::Parser;
use commits2pdf::config::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str, &str, &str)| {
    let (authors, date, query, name) = input;
    for flag in ["-a", "-s", "-i", "-n"] {
        let value = match flag {
            "-a" => authors,
            "-s" => date,
            "-i" => query,
            _ => name,
        };
        let argv = ["commits2pdf", "octocat", "--no-open", flag, value];
        if let Ok(config) = Config::try_parse_from(argv) {
            let _ = config.validate();
        }
    }
});
