//! crates/logging/src/template.rs
//! Runtime expansion of printf-style message templates.
//!
//! Messages built in Rust code go through `format_args!`, which the compiler
//! checks. Templates that only exist at run time (a command-line operand, a
//! string read from configuration) are expanded here instead, with a defined
//! rendering for every malformed input.

use std::fmt::{self, Write as _};

/// Expands `%`-escapes in `template` using `args` in order.
///
/// - `%s`, `%d`, `%i` and `%u` consume the next argument, rendered through
///   its [`Display`](fmt::Display) implementation.
/// - `%%` produces a single `%`.
/// - A conversion with no argument left is emitted verbatim.
/// - Unknown escapes and a trailing `%` are passed through verbatim.
/// - Arguments beyond the last conversion are ignored.
///
/// # Examples
///
/// ```
/// use logging::expand_template;
///
/// assert_eq!(expand_template("x=%d", &[5]), "x=5");
/// assert_eq!(expand_template("%s=%d", &["x"]), "x=%d");
/// assert_eq!(expand_template("100%% done", &[] as &[&str]), "100% done");
/// ```
pub fn expand_template<A>(template: &str, args: &[A]) -> String
where
    A: fmt::Display,
{
    let mut result = String::with_capacity(template.len() * 2);
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some(conversion @ ('s' | 'd' | 'i' | 'u')) => match args.next() {
                Some(arg) => {
                    let _ = write!(result, "{arg}");
                }
                None => {
                    result.push('%');
                    result.push(conversion);
                }
            },
            Some('%') => result.push('%'),
            Some(other) => {
                result.push('%');
                result.push(other);
            }
            None => result.push('%'),
        }
    }

    result
}
