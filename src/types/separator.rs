use nutype::nutype;

/// Path separator used to address nested values in multi-level mode.
///
/// Must be non-empty. Defaults to `"."`.
#[nutype(
    validate(not_empty),
    default = ".",
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Display,
        Default
    )
)]
pub struct Separator(String);
