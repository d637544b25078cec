/// Classification for retry policy.
///
/// Callers use it to decide whether a failed fetch is worth repeating later
/// in the day or whether the cached/fallback rate should simply be kept.
///
/// | Class | Retry later? | Keep serving cached rate? |
/// |-------|--------------|---------------------------|
/// | `Never` | No | Yes |
/// | `WithBackoff` | Yes | Yes |
/// | `NextProvider` | Yes, with another provider | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - unknown currency, malformed request or payload.
    Never,

    /// Transient failure such as rate limiting (429) or a timeout.
    WithBackoff,

    /// This provider can't answer but another one might.
    NextProvider,
}
