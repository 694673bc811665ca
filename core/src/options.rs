//! Option descriptors.
//!
//! Each descriptor pairs a flag name and a keep policy with a borrowed
//! target and knows how to turn the tokens after its flag into a value for
//! that target. The driver only sees them through [`CommandLineOption`].

use std::num::ParseIntError;
use std::str::{FromStr, Utf8Error};

use crate::error::{CommandLineError, Result};
use crate::stream::ArgumentStream;

/// A registered command-line option.
///
/// The driver calls [`matches`](CommandLineOption::matches) on the current
/// token, steps past the flag itself (erasing it unless
/// [`keep_arg`](CommandLineOption::keep_arg) is true), then calls
/// [`parse_argument`](CommandLineOption::parse_argument) with `pos` pointing
/// at the token after the flag. `parse_argument` reads whatever value tokens
/// it needs and steps past them with the same keep policy, including a value
/// it then rejects.
///
/// # Examples
///
/// A counting flag that is not one of the built-in kinds:
///
/// ```
/// use cmdline_core::{ArgumentStream, CommandLineOption, CommandLineParser};
///
/// struct Count<'a> {
///     hits: &'a mut u32,
/// }
///
/// impl CommandLineOption for Count<'_> {
///     fn matches(&self, arg: &str) -> bool {
///         arg == "-v"
///     }
///
///     fn keep_arg(&self) -> bool {
///         false
///     }
///
///     fn parse_argument(
///         &mut self,
///         _args: &mut dyn ArgumentStream,
///         _pos: &mut usize,
///     ) -> cmdline_core::Result<()> {
///         *self.hits += 1;
///         Ok(())
///     }
/// }
///
/// let mut hits = 0;
/// let mut args: Vec<String> = vec!["-v".into(), "-v".into()];
/// let mut parser = CommandLineParser::new();
/// parser.add_option(Box::new(Count { hits: &mut hits }));
/// assert!(parser.parse_command_line(&mut args));
/// drop(parser);
/// assert_eq!(hits, 2);
/// assert!(args.is_empty());
/// ```
pub trait CommandLineOption {
    /// Returns `true` if `arg` is this option's flag.
    fn matches(&self, arg: &str) -> bool;

    /// Whether matched tokens stay in the stream.
    fn keep_arg(&self) -> bool;

    /// Consumes the option's value tokens starting at `*pos`.
    fn parse_argument(&mut self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<()>;
}

/// Name and keep policy shared by every built-in option.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionName {
    optname: String,
    keep: bool,
}

impl OptionName {
    fn new(optname: String, keep: bool) -> Self {
        debug_assert!(!optname.is_empty(), "option name cannot be empty");
        Self { optname, keep }
    }

    fn matches(&self, arg: &str) -> bool {
        self.optname == arg
    }

    /// Takes the value token at `*pos` and steps past it, failing if the
    /// flag was last.
    ///
    /// The token is consumed before the caller converts it, so a rejected
    /// value is gone from the stream just like an accepted one.
    fn take_value(&self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<String> {
        let value = args
            .get(*pos)
            .ok_or_else(|| CommandLineError::MissingValue {
                option: self.optname.clone(),
            })?
            .to_string();
        *pos = args.advance(*pos, self.keep);
        Ok(value)
    }
}

/// Binds an integral target; the value is parsed as base-10.
pub struct IntegerCommandLineOption<'a, T> {
    name: OptionName,
    target: &'a mut T,
}

impl<'a, T> IntegerCommandLineOption<'a, T>
where
    T: FromStr<Err = ParseIntError>,
{
    pub fn new(optname: impl Into<String>, keep: bool, target: &'a mut T) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target,
        }
    }
}

impl<T> CommandLineOption for IntegerCommandLineOption<'_, T>
where
    T: FromStr<Err = ParseIntError>,
{
    fn matches(&self, arg: &str) -> bool {
        self.name.matches(arg)
    }

    fn keep_arg(&self) -> bool {
        self.name.keep
    }

    fn parse_argument(&mut self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<()> {
        let value = self.name.take_value(args, pos)?;
        let parsed = value
            .parse::<T>()
            .map_err(|err| CommandLineError::InvalidConversion {
                option: self.name.optname.clone(),
                reason: err.to_string(),
                value,
            })?;
        *self.target = parsed;
        Ok(())
    }
}

enum StringTarget<'a, T> {
    Value(&'a mut T),
    Buffer(&'a mut [u8]),
}

/// Binds a string target: either any `T: From<String>` or a fixed-capacity
/// NUL-terminated byte buffer.
///
/// Buffer values that do not fit together with their terminator are
/// rejected rather than truncated.
pub struct StringCommandLineOption<'a, T = String> {
    name: OptionName,
    target: StringTarget<'a, T>,
}

impl<'a, T: From<String>> StringCommandLineOption<'a, T> {
    pub fn new(optname: impl Into<String>, keep: bool, target: &'a mut T) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target: StringTarget::Value(target),
        }
    }
}

impl<'a> StringCommandLineOption<'a, String> {
    /// Binds a byte buffer whose length is the capacity, terminator included.
    pub fn with_buffer(optname: impl Into<String>, keep: bool, target: &'a mut [u8]) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target: StringTarget::Buffer(target),
        }
    }
}

impl<T: From<String>> CommandLineOption for StringCommandLineOption<'_, T> {
    fn matches(&self, arg: &str) -> bool {
        self.name.matches(arg)
    }

    fn keep_arg(&self) -> bool {
        self.name.keep
    }

    fn parse_argument(&mut self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<()> {
        let value = self.name.take_value(args, pos)?;
        match &mut self.target {
            StringTarget::Value(target) => **target = T::from(value),
            StringTarget::Buffer(buffer) => {
                let bytes = value.as_bytes();
                if bytes.len() >= buffer.len() {
                    return Err(CommandLineError::CapacityExceeded {
                        option: self.name.optname.clone(),
                        len: bytes.len() + 1,
                        capacity: buffer.len(),
                    });
                }
                buffer[..bytes.len()].copy_from_slice(bytes);
                buffer[bytes.len()..].fill(0);
            }
        }
        Ok(())
    }
}

/// Reads a NUL-terminated buffer filled by a buffer-bound string option.
///
/// Without a terminator the whole buffer is taken.
///
/// # Examples
///
/// ```
/// use cmdline_core::nul_terminated_str;
///
/// assert_eq!(nul_terminated_str(b"node0\0\0\0").unwrap(), "node0");
/// assert_eq!(nul_terminated_str(b"\0abc").unwrap(), "");
/// ```
pub fn nul_terminated_str(buffer: &[u8]) -> std::result::Result<&str, Utf8Error> {
    let end = buffer
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(buffer.len());
    std::str::from_utf8(&buffer[..end])
}

/// Appends one value per occurrence to an accumulating target.
pub struct StringListCommandLineOption<'a, T> {
    name: OptionName,
    target: &'a mut T,
}

impl<'a, T: Extend<String>> StringListCommandLineOption<'a, T> {
    pub fn new(optname: impl Into<String>, keep: bool, target: &'a mut T) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target,
        }
    }
}

impl<T: Extend<String>> CommandLineOption for StringListCommandLineOption<'_, T> {
    fn matches(&self, arg: &str) -> bool {
        self.name.matches(arg)
    }

    fn keep_arg(&self) -> bool {
        self.name.keep
    }

    fn parse_argument(&mut self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<()> {
        let value = self.name.take_value(args, pos)?;
        self.target.extend(std::iter::once(value));
        Ok(())
    }
}

/// A flag with no value; a match sets the target to `true`.
pub struct BooleanCommandLineOption<'a> {
    name: OptionName,
    target: &'a mut bool,
}

impl<'a> BooleanCommandLineOption<'a> {
    pub fn new(optname: impl Into<String>, keep: bool, target: &'a mut bool) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target,
        }
    }
}

impl CommandLineOption for BooleanCommandLineOption<'_> {
    fn matches(&self, arg: &str) -> bool {
        self.name.matches(arg)
    }

    fn keep_arg(&self) -> bool {
        self.name.keep
    }

    fn parse_argument(&mut self, _args: &mut dyn ArgumentStream, _pos: &mut usize) -> Result<()> {
        *self.target = true;
        Ok(())
    }
}

/// Hands the raw value to a callback on the target.
///
/// The callback decides what the value means; returning `false` fails the
/// parse. Nothing is assigned to the target by the option itself.
pub struct MethodCommandLineOption<'a, T, M> {
    name: OptionName,
    target: &'a mut T,
    method: M,
}

impl<'a, T, M> MethodCommandLineOption<'a, T, M>
where
    M: FnMut(&mut T, &str) -> bool,
{
    pub fn new(optname: impl Into<String>, keep: bool, target: &'a mut T, method: M) -> Self {
        Self {
            name: OptionName::new(optname.into(), keep),
            target,
            method,
        }
    }
}

impl<T, M> CommandLineOption for MethodCommandLineOption<'_, T, M>
where
    M: FnMut(&mut T, &str) -> bool,
{
    fn matches(&self, arg: &str) -> bool {
        self.name.matches(arg)
    }

    fn keep_arg(&self) -> bool {
        self.name.keep
    }

    fn parse_argument(&mut self, args: &mut dyn ArgumentStream, pos: &mut usize) -> Result<()> {
        let value = self.name.take_value(args, pos)?;
        if !(self.method)(&mut *self.target, &value) {
            return Err(CommandLineError::CallbackRejected {
                option: self.name.optname.clone(),
                value,
            });
        }
        Ok(())
    }
}
