//! Application-layer flags for the grid partition run.
//!
//! Sizes are given as powers of two: `-n 3` means 8 cells per side. A
//! per-axis flag (`-nx`, `-by`, ...) wins over the two-axis one regardless
//! of order.

use cmdline_core::{CommandLineError, CommandLineParser};
use serde::Serialize;
use thiserror::Error;

/// Angles the partition projection supports, measured ccw from +x.
pub const SUPPORTED_ANGLES: [u32; 3] = [180, 225, 270];

/// Errors from resolving the application-layer flags.
#[derive(Debug, Error)]
pub enum GridError {
    /// A flag's value was missing or rejected.
    #[error(transparent)]
    Arguments(#[from] CommandLineError),

    /// The subregion counts do not tile the grid.
    #[error("subregions per side must evenly divide side length: ({sides_x}, {sides_y}) by ({blocks_x}, {blocks_y})")]
    UnevenSubregions {
        sides_x: u32,
        sides_y: u32,
        blocks_x: u32,
        blocks_y: u32,
    },
}

/// How partition disjointness is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionKind {
    /// Partitions are assumed disjoint.
    Disjoint,
    /// Disjointness is computed (`-c`).
    Compute,
}

/// Resolved grid partition settings.
///
/// Side lengths and subregion counts are cell counts, already expanded from
/// the log2 values given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridConfig {
    pub side_length_x: u32,
    pub side_length_y: u32,
    pub num_subregions_x: u32,
    pub num_subregions_y: u32,
    pub num_iterations: u32,
    pub angle: u32,
    pub partition_kind: PartitionKind,
    pub levels: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side_length_x: 4,
            side_length_y: 4,
            num_subregions_x: 4,
            num_subregions_y: 4,
            num_iterations: 1,
            angle: 225,
            partition_kind: PartitionKind::Disjoint,
            levels: Vec::new(),
        }
    }
}

/// A length given on the command line as its base-2 logarithm.
#[derive(Debug, Clone, Copy, Default)]
struct Pow2(Option<u32>);

impl Pow2 {
    fn set_log2(&mut self, value: &str) -> bool {
        match value.parse::<u32>().ok().and_then(|k| 1u32.checked_shl(k)) {
            Some(len) => {
                self.0 = Some(len);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Angle(u32);

impl Angle {
    fn set(&mut self, value: &str) -> bool {
        match value.parse::<u32>() {
            Ok(deg) if SUPPORTED_ANGLES.contains(&deg) => {
                self.0 = deg;
                true
            }
            _ => false,
        }
    }
}

/// Applies grid flags from `args`, removing the ones it consumes, and checks
/// that the subregions tile the grid.
pub fn parse_grid_args(args: &mut Vec<String>) -> Result<GridConfig, GridError> {
    let mut config = GridConfig::default();
    let (mut n, mut nx, mut ny) = (Pow2::default(), Pow2::default(), Pow2::default());
    let (mut b, mut bx, mut by) = (Pow2::default(), Pow2::default(), Pow2::default());
    let mut angle = Angle(config.angle);
    let mut compute = false;

    let mut parser = CommandLineParser::new();
    parser
        .add_option_method("-n", &mut n, Pow2::set_log2, false)
        .add_option_method("-nx", &mut nx, Pow2::set_log2, false)
        .add_option_method("-ny", &mut ny, Pow2::set_log2, false)
        .add_option_method("-b", &mut b, Pow2::set_log2, false)
        .add_option_method("-bx", &mut bx, Pow2::set_log2, false)
        .add_option_method("-by", &mut by, Pow2::set_log2, false)
        .add_option_int("-i", &mut config.num_iterations, false)
        .add_option_bool("-c", &mut compute, false)
        .add_option_method("-a", &mut angle, Angle::set, false)
        .add_option_stringlist("-level", &mut config.levels, false);
    parser.try_parse_command_line(args)?;
    drop(parser);

    let pick = |axis: Pow2, both: Pow2, default: u32| axis.0.or(both.0).unwrap_or(default);
    config.side_length_x = pick(nx, n, config.side_length_x);
    config.side_length_y = pick(ny, n, config.side_length_y);
    config.num_subregions_x = pick(bx, b, config.num_subregions_x);
    config.num_subregions_y = pick(by, b, config.num_subregions_y);
    config.angle = angle.0;
    if compute {
        config.partition_kind = PartitionKind::Compute;
    }

    if config.side_length_x % config.num_subregions_x != 0
        || config.side_length_y % config.num_subregions_y != 0
    {
        return Err(GridError::UnevenSubregions {
            sides_x: config.side_length_x,
            sides_y: config.side_length_y,
            blocks_x: config.num_subregions_x,
            blocks_y: config.num_subregions_y,
        });
    }
    Ok(config)
}
