//! The option registry and scan loop.

use std::num::ParseIntError;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::Result;
use crate::options::{
    BooleanCommandLineOption, CommandLineOption, IntegerCommandLineOption,
    MethodCommandLineOption, StringCommandLineOption, StringListCommandLineOption,
};
use crate::stream::{ArgumentStream, Argv};

/// Ordered registry of options bound to caller variables.
///
/// Options are tried in registration order, so when two share a name the
/// first one registered wins. The parser mutably borrows every target until
/// it is dropped.
///
/// # Examples
///
/// ```
/// use cmdline_core::CommandLineParser;
///
/// let mut iterations = 1u32;
/// let mut verbose = false;
/// let mut args: Vec<String> = ["-i", "8", "input.dat", "-v"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
///
/// let mut parser = CommandLineParser::new();
/// parser
///     .add_option_int("-i", &mut iterations, false)
///     .add_option_bool("-v", &mut verbose, false);
/// assert!(parser.parse_command_line(&mut args));
/// drop(parser);
///
/// assert_eq!(iterations, 8);
/// assert!(verbose);
/// assert_eq!(args, vec!["input.dat".to_string()]);
/// ```
#[derive(Default)]
pub struct CommandLineParser<'a> {
    options: Vec<Box<dyn CommandLineOption + 'a>>,
}

impl<'a> CommandLineParser<'a> {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Number of registered options.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Registers a caller-implemented option.
    pub fn add_option(&mut self, option: Box<dyn CommandLineOption + 'a>) -> &mut Self {
        self.options.push(option);
        self
    }

    /// Registers an integer option; the value must be a complete base-10
    /// number that fits `T`.
    pub fn add_option_int<T>(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut T,
        keep: bool,
    ) -> &mut Self
    where
        T: FromStr<Err = ParseIntError> + 'a,
    {
        self.add_option(Box::new(IntegerCommandLineOption::new(optname, keep, target)))
    }

    /// Registers a string option copying the value verbatim into `target`.
    pub fn add_option_string<T>(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut T,
        keep: bool,
    ) -> &mut Self
    where
        T: From<String> + 'a,
    {
        self.add_option(Box::new(StringCommandLineOption::new(optname, keep, target)))
    }

    /// Registers a string option writing into a fixed-size buffer.
    ///
    /// The value is stored NUL-terminated; values that need more than
    /// `target.len()` bytes including the terminator fail the parse.
    pub fn add_option_string_buffer(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut [u8],
        keep: bool,
    ) -> &mut Self {
        self.add_option(Box::new(StringCommandLineOption::with_buffer(
            optname, keep, target,
        )))
    }

    /// Registers an option that appends one value to `target` per occurrence.
    pub fn add_option_stringlist<T>(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut T,
        keep: bool,
    ) -> &mut Self
    where
        T: Extend<String> + 'a,
    {
        self.add_option(Box::new(StringListCommandLineOption::new(
            optname, keep, target,
        )))
    }

    /// Registers a value-less flag that sets `target` to `true`.
    pub fn add_option_bool(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut bool,
        keep: bool,
    ) -> &mut Self {
        self.add_option(Box::new(BooleanCommandLineOption::new(optname, keep, target)))
    }

    /// Registers an option whose value is handed to `method` along with
    /// `target`. A `false` return fails the parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_core::CommandLineParser;
    ///
    /// #[derive(Default)]
    /// struct Angle(u32);
    ///
    /// impl Angle {
    ///     fn set(&mut self, value: &str) -> bool {
    ///         match value.parse::<u32>() {
    ///             Ok(deg @ (180 | 225 | 270)) => {
    ///                 self.0 = deg;
    ///                 true
    ///             }
    ///             _ => false,
    ///         }
    ///     }
    /// }
    ///
    /// let mut angle = Angle::default();
    /// let mut parser = CommandLineParser::new();
    /// parser.add_option_method("-a", &mut angle, Angle::set, false);
    /// assert!(!parser.parse_argv(&["-a", "90"]));
    /// assert!(parser.parse_argv(&["-a", "270"]));
    /// drop(parser);
    /// assert_eq!(angle.0, 270);
    /// ```
    pub fn add_option_method<T, M>(
        &mut self,
        optname: impl Into<String>,
        target: &'a mut T,
        method: M,
        keep: bool,
    ) -> &mut Self
    where
        T: 'a,
        M: FnMut(&mut T, &str) -> bool + 'a,
    {
        self.add_option(Box::new(MethodCommandLineOption::new(
            optname, keep, target, method,
        )))
    }

    /// Parses a mutable argument list, removing matched tokens of options
    /// that are not kept. Returns `false` on the first failure.
    ///
    /// Changes made before a failure are not undone.
    pub fn parse_command_line(&mut self, args: &mut Vec<String>) -> bool {
        report(self.try_parse_command_line(args))
    }

    /// Parses an argument array without removing anything.
    ///
    /// Pass the arguments without the program name, as for
    /// [`parse_command_line`](Self::parse_command_line).
    pub fn parse_argv<S: AsRef<str>>(&mut self, argv: &[S]) -> bool {
        report(self.try_parse_argv(argv))
    }

    /// Like [`parse_command_line`](Self::parse_command_line), returning the
    /// failure detail.
    pub fn try_parse_command_line(&mut self, args: &mut Vec<String>) -> Result<()> {
        self.scan(args)
    }

    /// Like [`parse_argv`](Self::parse_argv), returning the failure detail.
    pub fn try_parse_argv<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<()> {
        self.scan(&mut Argv::new(argv))
    }

    fn scan(&mut self, args: &mut dyn ArgumentStream) -> Result<()> {
        let mut pos = 0;
        let mut passed_through = 0usize;
        while let Some(arg) = args.get(pos) {
            let Some(option) = self.options.iter_mut().find(|option| option.matches(arg)) else {
                passed_through += 1;
                pos += 1;
                continue;
            };
            debug!(option = arg, position = pos, "matched command-line option");
            pos = args.advance(pos, option.keep_arg());
            option.parse_argument(args, &mut pos)?;
        }
        debug!(passed_through, "command-line scan complete");
        Ok(())
    }
}

fn report(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(option = err.option(), "command-line parsing failed: {err}");
            false
        }
    }
}
