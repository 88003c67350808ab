//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Batch intake
// ============================================================================

/// Hard upper bound on records per batch. Caps worst-case latency and memory.
pub const MAX_BATCH_RECORDS: usize = 1_800;

/// Smallest accepted batch.
pub const MIN_BATCH_RECORDS: usize = 1;

// ============================================================================
// Configuration discovery
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const CONFIG_ENV_VAR: &str = "CONDITION_MONITOR_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "monitor_config.toml";

// ============================================================================
// Output
// ============================================================================

/// Key injected into the consensus map for the batch verdict.
/// No model may use it as its name.
pub const OVERALL_HEALTH_KEY: &str = "overall_health";

/// Default `RUST_LOG` filter for the CLI. Stdout carries JSON only, so
/// logging stays quiet unless asked for.
pub const DEFAULT_LOG_FILTER: &str = "warn";
