//! Token streams scanned by the parser.
//!
//! The scan loop only needs two things from its input: the token at a
//! position, and a way to step past a token. A resizable `Vec<String>` steps
//! past a token by erasing it (unless it is kept); a borrowed argument array
//! cannot shrink, so [`Argv`] only moves its cursor.

/// Positional access to a sequence of argument tokens.
///
/// Implemented for `Vec<String>` and for [`Argv`]. Custom
/// [`CommandLineOption`](crate::CommandLineOption) implementations receive a
/// `&mut dyn ArgumentStream` and use it to read their value tokens.
pub trait ArgumentStream {
    /// Returns the token at `pos`, or `None` past the end.
    fn get(&self, pos: usize) -> Option<&str>;

    /// Steps past the token at `pos` and returns the next scan position.
    ///
    /// When `keep` is false and the stream supports removal, the token is
    /// erased and the returned position equals `pos`.
    fn advance(&mut self, pos: usize, keep: bool) -> usize;
}

impl ArgumentStream for Vec<String> {
    fn get(&self, pos: usize) -> Option<&str> {
        self.as_slice().get(pos).map(String::as_str)
    }

    fn advance(&mut self, pos: usize, keep: bool) -> usize {
        if keep || pos >= self.len() {
            pos + 1
        } else {
            self.remove(pos);
            pos
        }
    }
}

/// Read-only view over a classic argument array.
///
/// Tokens are never removed, so `keep` has no effect on this form.
///
/// # Examples
///
/// ```
/// use cmdline_core::{ArgumentStream, Argv};
///
/// let raw = ["-n", "4"];
/// let mut argv = Argv::new(&raw);
/// assert_eq!(argv.get(0), Some("-n"));
/// assert_eq!(argv.advance(0, false), 1);
/// assert_eq!(argv.get(0), Some("-n"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Argv<'s, S> {
    args: &'s [S],
}

impl<'s, S: AsRef<str>> Argv<'s, S> {
    /// Wraps `args`, which should not include the program name.
    pub fn new(args: &'s [S]) -> Self {
        Self { args }
    }

    /// Number of tokens in the underlying array.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl<S: AsRef<str>> ArgumentStream for Argv<'_, S> {
    fn get(&self, pos: usize) -> Option<&str> {
        self.args.get(pos).map(AsRef::as_ref)
    }

    fn advance(&mut self, pos: usize, _keep: bool) -> usize {
        pos + 1
    }
}
