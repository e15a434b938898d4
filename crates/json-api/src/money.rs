//! Money formatting for JSON responses.

use rust_decimal::Decimal;

/// Render an amount as a fixed two-decimal string, e.g. `"19.99"`.
///
/// Responses carry money as strings rather than JSON floats so clients
/// never see binary-float rounding artefacts.
pub(crate) fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
