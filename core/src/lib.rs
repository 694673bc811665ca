//! Typed command-line options bound directly to caller variables.
//!
//! A [`CommandLineParser`] holds an ordered list of options, each pairing an
//! exact flag name with a `&mut` borrow of the variable it fills:
//!
//! - integers ([`add_option_int`](CommandLineParser::add_option_int))
//! - strings, owned or in a fixed-size buffer
//!   ([`add_option_string`](CommandLineParser::add_option_string),
//!   [`add_option_string_buffer`](CommandLineParser::add_option_string_buffer))
//! - accumulating string lists
//!   ([`add_option_stringlist`](CommandLineParser::add_option_stringlist))
//! - value-less flags ([`add_option_bool`](CommandLineParser::add_option_bool))
//! - callbacks on a target object
//!   ([`add_option_method`](CommandLineParser::add_option_method))
//!
//! Parsing a `Vec<String>` removes every matched token unless its option was
//! registered with `keep`, so the shortened list can be handed to another
//! parser afterwards. Tokens that match no option are left alone. Parsing a
//! borrowed argument array ([`CommandLineParser::parse_argv`]) applies the
//! same matching but never removes anything.
//!
//! # Example
//!
//! ```
//! use cmdline_core::CommandLineParser;
//!
//! let mut cpus = 1usize;
//! let mut levels: Vec<String> = Vec::new();
//! let mut args: Vec<String> = ["-ll:cpu", "4", "-level", "gc=2", "-n", "3"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let mut runtime = CommandLineParser::new();
//! runtime
//!     .add_option_int("-ll:cpu", &mut cpus, false)
//!     .add_option_stringlist("-level", &mut levels, true);
//! assert!(runtime.parse_command_line(&mut args));
//! drop(runtime);
//!
//! assert_eq!(cpus, 4);
//! assert_eq!(levels, ["gc=2"]);
//! // `-ll:cpu 4` is gone, the kept `-level` pair and unknown tokens remain.
//! assert_eq!(args, ["-level", "gc=2", "-n", "3"]);
//! ```

mod error;
mod options;
mod parser;
mod stream;

pub use error::{CommandLineError, Result};
pub use options::{
    BooleanCommandLineOption, CommandLineOption, IntegerCommandLineOption,
    MethodCommandLineOption, StringCommandLineOption, StringListCommandLineOption,
    nul_terminated_str,
};
pub use parser::CommandLineParser;
pub use stream::{ArgumentStream, Argv};
