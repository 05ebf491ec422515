use schema::{PriceRecord, Trend};

pub const NO_DATA_MESSAGE: &str =
    "No prices available for this location. Try selecting a different state or district.";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Render price cards as text. Every missing field gets its placeholder so
/// a sparse record still produces a complete card.
pub fn render_prices(prices: &[PriceRecord]) -> String {
    if prices.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut out = String::new();
    for price in prices {
        let crop = price.crop.as_deref().unwrap_or("N/A");
        let amount = format_price(price.price.unwrap_or(0.0));
        let unit = price.unit.as_deref().unwrap_or("N/A");
        let market = price.market.as_deref().unwrap_or("N/A");
        let trend = price.trend.as_deref().unwrap_or("→");
        let change = price.change.as_deref().unwrap_or("0%");
        let color = trend_color(trend);

        out.push_str(&format!(
            "{crop}\n  Price:  ₹{amount}\n  Unit:   {unit}\n  Market: {market}\n  Trend:  {color}{trend} {change}{RESET}\n\n"
        ));
    }
    out.trim_end().to_string()
}

fn trend_color(trend: &str) -> &'static str {
    match Trend::from_symbol(trend) {
        Trend::Up => GREEN,
        Trend::Down => RED,
        Trend::Flat => GREY,
    }
}

/// Thousands-grouped amount, two decimals when the value is not whole.
pub(crate) fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction:02}")
    }
}
