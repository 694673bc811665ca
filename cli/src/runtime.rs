//! Runtime-layer flags.
//!
//! These are stripped from the shared argument list before the application
//! sees it, except `-level`, which is kept so the application can read the
//! same logging levels.

use std::path::PathBuf;

use cmdline_core::{CommandLineError, CommandLineParser, nul_terminated_str};
use serde::Serialize;
use tracing::debug;

/// Capacity of the node name buffer, terminator included.
pub const NODE_NAME_CAPACITY: usize = 32;

/// Highest CPU id `-ll:pin` accepts.
pub const MAX_CPU_ID: usize = 4095;

const DEFAULT_NODE_NAME: &str = "node0";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeConfig {
    /// `-ll:cpu`: application processor count.
    pub cpus: usize,
    /// `-ll:util`: utility processor count.
    pub util_threads: usize,
    /// `-ll:csize`: system memory in MB.
    pub csize_mb: u64,
    /// `-ll:name`: node name, at most `NODE_NAME_CAPACITY - 1` bytes.
    pub node_name: String,
    /// `-ll:force_kthreads`
    pub force_kthreads: bool,
    /// `-ll:pin`: sorted, deduplicated CPU ids.
    pub pinned_cpus: Vec<usize>,
    /// `-logfile`
    pub logfile: Option<PathBuf>,
    /// `-level`, one entry per occurrence.
    pub levels: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cpus: 1,
            util_threads: 1,
            csize_mb: 512,
            node_name: DEFAULT_NODE_NAME.to_string(),
            force_kthreads: false,
            pinned_cpus: Vec::new(),
            logfile: None,
            levels: Vec::new(),
        }
    }
}

/// CPU list accepted by `-ll:pin`, e.g. `0-3,6`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuSet {
    cpus: Vec<usize>,
}

impl CpuSet {
    /// Replaces the set with the parsed list. Leaves it unchanged and
    /// returns `false` on malformed input or ids above [`MAX_CPU_ID`].
    pub fn parse_list(&mut self, value: &str) -> bool {
        let mut cpus = Vec::new();
        for part in value.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((lo, hi)) => lo.parse::<usize>().ok().zip(hi.parse::<usize>().ok()),
                None => part.parse::<usize>().ok().map(|cpu| (cpu, cpu)),
            };
            match range {
                Some((lo, hi)) if lo <= hi && hi <= MAX_CPU_ID => cpus.extend(lo..=hi),
                _ => {
                    debug!(value, part, "malformed cpu list entry");
                    return false;
                }
            }
        }
        cpus.sort_unstable();
        cpus.dedup();
        self.cpus = cpus;
        true
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.cpus
    }
}

/// Applies runtime flags from `args`, removing the ones it consumes.
pub fn parse_runtime_args(args: &mut Vec<String>) -> Result<RuntimeConfig, CommandLineError> {
    let mut config = RuntimeConfig::default();
    let mut node_name = [0u8; NODE_NAME_CAPACITY];
    node_name[..DEFAULT_NODE_NAME.len()].copy_from_slice(DEFAULT_NODE_NAME.as_bytes());
    let mut pinned = CpuSet::default();
    let mut logfile = PathBuf::new();

    let mut parser = CommandLineParser::new();
    parser
        .add_option_int("-ll:cpu", &mut config.cpus, false)
        .add_option_int("-ll:util", &mut config.util_threads, false)
        .add_option_int("-ll:csize", &mut config.csize_mb, false)
        .add_option_string_buffer("-ll:name", &mut node_name, false)
        .add_option_bool("-ll:force_kthreads", &mut config.force_kthreads, false)
        .add_option_method("-ll:pin", &mut pinned, CpuSet::parse_list, false)
        .add_option_string("-logfile", &mut logfile, false)
        .add_option_stringlist("-level", &mut config.levels, true);
    parser.try_parse_command_line(args)?;
    drop(parser);

    config.node_name = nul_terminated_str(&node_name)
        .map(str::to_string)
        .unwrap_or_default();
    config.pinned_cpus = pinned.into_vec();
    if !logfile.as_os_str().is_empty() {
        config.logfile = Some(logfile);
    }
    debug!(remaining = args.len(), "runtime arguments applied");
    Ok(config)
}
