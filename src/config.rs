//! Tunables shared by the pipeline stages. The binary fills this in from
//! its command line flags; library users get [`Config::default`].

/// Upper bound on arguments in a call and parameters in a declaration.
pub const DEFAULT_MAX_ARGUMENTS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Largest argument/parameter list the parser accepts silently.
    pub max_arguments: usize,

    /// When `true`, going over `max_arguments` is a syntax error that stops
    /// the program from running. When `false` it is only logged as a warning.
    pub strict_limits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_arguments: DEFAULT_MAX_ARGUMENTS,
            strict_limits: true,
        }
    }
}

impl Config {
    pub fn with_max_arguments(mut self, max_arguments: usize) -> Self {
        self.max_arguments = max_arguments;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.strict_limits = false;
        self
    }
}
