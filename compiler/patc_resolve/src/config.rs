/// Knobs for a resolution pass.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ResolveConfig {
    /// Report checks that always succeed (useless `is`, useless type
    /// checks, all-wildcard deconstructions).
    pub report_useless_checks: bool,
    /// Report pattern variables that shadow a visible name.
    pub report_shadowing: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        ResolveConfig {
            report_useless_checks: true,
            report_shadowing: true,
        }
    }
}

impl ResolveConfig {
    /// Errors only.
    pub fn quiet() -> Self {
        ResolveConfig {
            report_useless_checks: false,
            report_shadowing: false,
        }
    }
}
