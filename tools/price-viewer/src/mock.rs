use schema::PriceRecord;

/// Fallback pair used when the selected state is not in the dataset.
pub const DEFAULT_STATE: &str = "tamil-nadu";
pub const DEFAULT_DISTRICT: &str = "Chennai";

pub(crate) struct MockPrice {
    crop: &'static str,
    price: f64,
    unit: &'static str,
    market: &'static str,
    trend: &'static str,
    change: &'static str,
}

const fn row(
    crop: &'static str,
    price: f64,
    unit: &'static str,
    market: &'static str,
    trend: &'static str,
    change: &'static str,
) -> MockPrice {
    MockPrice {
        crop,
        price,
        unit,
        market,
        trend,
        change,
    }
}

/// Embedded fallback dataset, indexed by state then district. Read-only;
/// the live API is the source of truth when reachable.
static MOCK_DATA: &[(&str, &[(&str, &[MockPrice])])] = &[
    (
        "tamil-nadu",
        &[
            (
                "Chennai",
                &[
                    row("Rice", 2500.0, "50kg", "Koyambedu Market", "↑", "+5%"),
                    row("Coconut", 1800.0, "100pcs", "Koyambedu Market", "↓", "-2%"),
                    row("Sugarcane", 3200.0, "100kg", "Chennai Market", "↑", "+3%"),
                    row("Onion", 2000.0, "50kg", "Koyambedu Market", "↑", "+4%"),
                ],
            ),
            (
                "Coimbatore",
                &[
                    row("Rice", 2400.0, "50kg", "Coimbatore APMC", "↑", "+3%"),
                    row("Cotton", 5800.0, "100kg", "Coimbatore Market", "↑", "+6%"),
                    row("Potato", 1800.0, "50kg", "Coimbatore Market", "→", "0%"),
                    row("Tomato", 1200.0, "50kg", "Coimbatore Market", "↓", "-1%"),
                ],
            ),
            (
                "Madurai",
                &[
                    row("Rice", 2300.0, "50kg", "Madurai Market", "→", "0%"),
                    row("Turmeric", 6500.0, "50kg", "Madurai Market", "↑", "+2%"),
                    row("Corn", 1900.0, "50kg", "Madurai Market", "↑", "+1%"),
                ],
            ),
            (
                "Tiruppur",
                &[
                    row("Rice", 2450.0, "50kg", "Tiruppur Market", "↑", "+4%"),
                    row("Groundnut", 5200.0, "50kg", "Tiruppur Market", "↑", "+3%"),
                ],
            ),
            (
                "Erode",
                &[
                    row("Rice", 2380.0, "50kg", "Erode Market", "↓", "-2%"),
                    row("Pepper", 8200.0, "50kg", "Erode Market", "↑", "+5%"),
                ],
            ),
            (
                "Salem",
                &[
                    row("Rice", 2420.0, "50kg", "Salem Market", "↑", "+2%"),
                    row("Sugarcane", 3100.0, "100kg", "Salem Market", "→", "0%"),
                ],
            ),
        ],
    ),
    (
        "karnataka",
        &[
            (
                "Bangalore",
                &[
                    row("Rice", 2600.0, "50kg", "Bangalore Market", "↑", "+4%"),
                    row("Coffee", 8500.0, "50kg", "Bangalore Market", "↑", "+4%"),
                    row("Cardamom", 12000.0, "50kg", "Bangalore Market", "↑", "+2%"),
                    row("Maize", 2000.0, "50kg", "Bangalore Market", "↓", "-1%"),
                ],
            ),
            (
                "Mysore",
                &[
                    row("Rice", 2550.0, "50kg", "Mysore Market", "↑", "+2%"),
                    row("Silk", 15000.0, "50kg", "Mysore Market", "↑", "+3%"),
                    row("Sugarcane", 3150.0, "100kg", "Mysore Market", "↑", "+2%"),
                ],
            ),
            (
                "Belgaum",
                &[
                    row("Jowar", 2200.0, "50kg", "Belgaum Market", "→", "0%"),
                    row("Corn", 1950.0, "50kg", "Belgaum Market", "↑", "+1%"),
                ],
            ),
            (
                "Hubli",
                &[
                    row("Groundnut", 5300.0, "50kg", "Hubli Market", "↑", "+2%"),
                    row("Cotton", 5900.0, "100kg", "Hubli Market", "↑", "+4%"),
                ],
            ),
            (
                "Mangalore",
                &[
                    row("Coconut", 1900.0, "100pcs", "Mangalore Market", "↑", "+3%"),
                    row("Rice", 2700.0, "50kg", "Mangalore Market", "↑", "+5%"),
                ],
            ),
        ],
    ),
    (
        "maharashtra",
        &[
            (
                "Mumbai",
                &[
                    row("Rice", 2700.0, "50kg", "Mumbai APMC", "↑", "+6%"),
                    row("Onion", 2200.0, "50kg", "Mumbai Market", "↑", "+5%"),
                    row("Sugarcane", 3400.0, "100kg", "Mumbai Market", "↑", "+4%"),
                ],
            ),
            (
                "Pune",
                &[
                    row("Rice", 2650.0, "50kg", "Pune Market", "↑", "+3%"),
                    row("Jowar", 2300.0, "50kg", "Pune Market", "↑", "+2%"),
                    row("Corn", 2050.0, "50kg", "Pune Market", "→", "0%"),
                ],
            ),
            (
                "Nagpur",
                &[
                    row("Orange", 3500.0, "50kg", "Nagpur Market", "↑", "+4%"),
                    row("Cotton", 6000.0, "100kg", "Nagpur Market", "↑", "+3%"),
                ],
            ),
            (
                "Aurangabad",
                &[
                    row("Sugarcane", 3300.0, "100kg", "Aurangabad Market", "↑", "+3%"),
                    row("Cotton", 5950.0, "100kg", "Aurangabad Market", "↑", "+2%"),
                ],
            ),
            (
                "Nashik",
                &[
                    row("Grape", 4500.0, "50kg", "Nashik Market", "↑", "+4%"),
                    row("Sugarcane", 3250.0, "100kg", "Nashik Market", "↑", "+2%"),
                ],
            ),
        ],
    ),
    (
        "punjab",
        &[
            (
                "Amritsar",
                &[
                    row("Rice", 2200.0, "50kg", "Amritsar Mandi", "↓", "-1%"),
                    row("Wheat", 2400.0, "50kg", "Amritsar Mandi", "↑", "+2%"),
                    row("Cotton", 5700.0, "100kg", "Amritsar Market", "↑", "+3%"),
                ],
            ),
            (
                "Ludhiana",
                &[
                    row("Wheat", 2100.0, "50kg", "Ludhiana Mandi", "→", "0%"),
                    row("Rice", 2250.0, "50kg", "Ludhiana Market", "↑", "+1%"),
                    row("Corn", 1850.0, "50kg", "Ludhiana Market", "↓", "-2%"),
                ],
            ),
            (
                "Jalandhar",
                &[
                    row("Rice", 2300.0, "50kg", "Jalandhar Market", "↑", "+2%"),
                    row("Potato", 1700.0, "50kg", "Jalandhar Market", "↓", "-3%"),
                ],
            ),
            (
                "Patiala",
                &[
                    row("Wheat", 2150.0, "50kg", "Patiala Market", "↑", "+1%"),
                    row("Rice", 2280.0, "50kg", "Patiala Market", "→", "0%"),
                ],
            ),
            (
                "Bathinda",
                &[
                    row("Cotton", 5650.0, "100kg", "Bathinda Market", "↑", "+4%"),
                    row("Wheat", 2050.0, "50kg", "Bathinda Market", "→", "0%"),
                ],
            ),
        ],
    ),
    (
        "rajasthan",
        &[
            (
                "Jaipur",
                &[
                    row("Rice", 2350.0, "50kg", "Jaipur Market", "→", "+1%"),
                    row("Mustard", 4200.0, "50kg", "Jaipur Market", "↑", "+3%"),
                    row("Corn", 1900.0, "50kg", "Jaipur Market", "↑", "+2%"),
                ],
            ),
            (
                "Jodhpur",
                &[
                    row("Groundnut", 5200.0, "50kg", "Jodhpur Market", "↑", "+5%"),
                    row("Cumin", 9500.0, "50kg", "Jodhpur Market", "↑", "+4%"),
                ],
            ),
            (
                "Ajmer",
                &[
                    row("Mustard", 4300.0, "50kg", "Ajmer Market", "↑", "+4%"),
                    row("Rice", 2400.0, "50kg", "Ajmer Market", "↑", "+3%"),
                ],
            ),
            (
                "Bikaner",
                &[
                    row("Cumin", 9300.0, "50kg", "Bikaner Market", "↓", "-1%"),
                    row("Mustard", 4150.0, "50kg", "Bikaner Market", "→", "0%"),
                ],
            ),
            (
                "Kota",
                &[
                    row("Cotton", 5800.0, "100kg", "Kota Market", "↑", "+3%"),
                    row("Soybean", 3800.0, "50kg", "Kota Market", "↑", "+2%"),
                ],
            ),
        ],
    ),
];

fn state_entries(state: &str) -> Option<&'static [(&'static str, &'static [MockPrice])]> {
    MOCK_DATA
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, districts)| *districts)
}

fn district_entries(
    districts: &'static [(&'static str, &'static [MockPrice])],
    district: &str,
) -> Option<&'static [MockPrice]> {
    districts
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, rows)| *rows)
}

fn to_record(mock: &MockPrice) -> PriceRecord {
    PriceRecord {
        crop: Some(mock.crop.to_string()),
        price: Some(mock.price),
        unit: Some(mock.unit.to_string()),
        market: Some(mock.market.to_string()),
        trend: Some(mock.trend.to_string()),
        change: Some(mock.change.to_string()),
    }
}

/// Resolve the fallback records for a selection. District entries win when
/// present; otherwise all districts of the state are flattened; an unknown
/// state falls back to the fixed default pair so rendering always has
/// something to show.
pub fn mock_prices(state: &str, district: &str) -> Vec<PriceRecord> {
    if let Some(districts) = state_entries(state) {
        if !district.is_empty()
            && let Some(rows) = district_entries(districts, district)
            && !rows.is_empty()
        {
            return rows.iter().map(to_record).collect();
        }
        return districts
            .iter()
            .flat_map(|(_, rows)| rows.iter())
            .map(to_record)
            .collect();
    }

    let default_rows = state_entries(DEFAULT_STATE)
        .and_then(|districts| district_entries(districts, DEFAULT_DISTRICT))
        .unwrap_or(&[]);
    default_rows.iter().map(to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chennai_selection_yields_its_four_cards_in_order() {
        let prices = mock_prices("tamil-nadu", "Chennai");
        let crops: Vec<_> = prices
            .iter()
            .map(|price| price.crop.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(crops, vec!["Rice", "Coconut", "Sugarcane", "Onion"]);
    }

    #[test]
    fn missing_district_flattens_the_whole_state() {
        let prices = mock_prices("punjab", "");
        // 3 + 3 + 2 + 2 + 2 rows across the five districts.
        assert_eq!(prices.len(), 12);
        assert_eq!(prices[0].market.as_deref(), Some("Amritsar Mandi"));
    }

    #[test]
    fn unknown_district_falls_back_to_state_wide_rows() {
        let prices = mock_prices("karnataka", "Udupi");
        assert_eq!(prices.len(), 13);
    }

    #[test]
    fn unknown_state_falls_back_to_the_default_pair() {
        let prices = mock_prices("kerala", "Kochi");
        assert_eq!(prices.len(), 4);
        assert_eq!(prices[0].crop.as_deref(), Some("Rice"));
        assert_eq!(prices[0].market.as_deref(), Some("Koyambedu Market"));
    }

    #[test]
    fn records_carry_every_field() {
        let prices = mock_prices("rajasthan", "Kota");
        assert!(prices.iter().all(|price| {
            price.crop.is_some()
                && price.price.is_some()
                && price.unit.is_some()
                && price.market.is_some()
                && price.trend.is_some()
                && price.change.is_some()
        }));
    }
}
