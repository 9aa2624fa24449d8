//! crates/logging/src/source.rs
//! Call-site capture for the `<function>[<line>]` record field.

use std::fmt;

/// Location in calling code that issued a log record.
///
/// Rendered as `function[line]`. The [`call_site!`](crate::call_site) macro
/// fills both fields at compile time; code that only knows a label (for
/// example a command-line tool or a bridged event) can build one with
/// [`CallSite::new`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CallSite {
    function: &'static str,
    line: u32,
}

impl CallSite {
    /// Creates a call site from an explicit label and line number.
    #[must_use]
    pub const fn new(function: &'static str, line: u32) -> Self {
        Self { function, line }
    }

    /// Builds a call site from the type path of a marker item declared inside
    /// the calling function.
    ///
    /// `item_path` looks like `crate::module::function::__marker`, possibly
    /// with `{{closure}}` frames between the function and the marker. The
    /// marker and any closure frames are dropped and only the bare function
    /// name is kept.
    #[doc(hidden)]
    #[must_use]
    pub fn from_item_path(item_path: &'static str, line: u32) -> Self {
        let mut path = item_path
            .rsplit_once("::")
            .map_or(item_path, |(parent, _marker)| parent);
        while let Some(parent) = path.strip_suffix("::{{closure}}") {
            path = parent;
        }
        let function = path.rsplit("::").next().unwrap_or(path);
        Self { function, line }
    }

    /// Function name (or label) of the call site.
    #[must_use]
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// Line number of the call site.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.function, self.line)
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Captures the enclosing function name and line as a [`CallSite`].
///
/// # Examples
///
/// ```
/// fn load_settings() -> logging::CallSite {
///     logging::call_site!()
/// }
///
/// assert_eq!(load_settings().function(), "load_settings");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __call_site() {}
        $crate::CallSite::from_item_path(
            $crate::__private::type_name_of(__call_site),
            ::core::line!(),
        )
    }};
}
