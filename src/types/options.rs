/// Construction options for `ParameterBag::new`.
///
/// Unset fields fall back to inference from the initial data (mode) or the
/// default `"."` (separator).
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Overrides the multi-level mode inferred from the initial data.
    pub multi_level: Option<bool>,
    /// Overrides the path separator. An empty string is silently ignored
    /// and the default is kept.
    pub separator: Option<String>,
}
