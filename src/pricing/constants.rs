/// Sales tax applied to the subtotal (8.875%).
pub const TAX_RATE: f64 = 0.08875;

/// Flat delivery fee charged on any non-empty cart, regardless of distance.
pub const FLAT_DELIVERY_FEE: f64 = 29.0;

/// Tip percentages offered at checkout.
pub const TIP_PRESETS: [f64; 4] = [0.0, 10.0, 15.0, 20.0];

/// Tip percentage selected when checkout opens.
pub const DEFAULT_TIP_PERCENT: f64 = 15.0;

/// Largest quantity a single cart line may hold; larger requests are capped.
pub const MAX_LINE_QUANTITY: u32 = 999;

// ─────────────────────────────────────────────────────────────────────────────
// Order placement
// ─────────────────────────────────────────────────────────────────────────────

/// Minutes from placement to the estimated delivery time.
pub const ESTIMATED_DELIVERY_MINUTES: i64 = 40;

/// Prefix of generated order identifiers (`ORD-123456`).
pub const ORDER_ID_PREFIX: &str = "ORD";

/// Currency symbol used when rendering prices.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format a price for display, rounded to whole rupees. Rounding happens only here.
pub fn format_price(amount: f64) -> String {
    format!("{}{:.0}", CURRENCY_SYMBOL, amount)
}
