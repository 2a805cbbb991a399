//! Self-test suite integration tests

use std::fs;

use coroutines::autotest;
use coroutines::util::config::LogConfig;
use coroutines::util::logger::{self, LogLevel};

#[test]
fn test_scenario_groups_pass() {
    autotest::routine_scenarios().unwrap();
    autotest::generator_scenarios().unwrap();
    autotest::edge_scenarios().unwrap();
}

#[test]
fn test_run_all_logs_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autotest.log");

    logger::init_with_config(&LogConfig {
        level: LogLevel::Info,
        stdout: false,
        file: Some(path.clone()),
    })
    .unwrap();

    autotest::run_all().unwrap();

    let log = fs::read_to_string(&path).unwrap();
    assert!(log.contains("Routine: All tests passed."));
    assert!(log.contains("All coroutine tests passed."));
}
