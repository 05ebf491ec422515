/// States the viewer knows about, in the order the selection control lists
/// them.
pub const STATES: &[&str] = &[
    "tamil-nadu",
    "karnataka",
    "maharashtra",
    "punjab",
    "rajasthan",
];

/// District list backing the dependent second control. Unknown states have
/// no districts, which leaves the control empty.
pub fn districts_for(state: &str) -> &'static [&'static str] {
    match state {
        "tamil-nadu" => &["Chennai", "Coimbatore", "Madurai", "Tiruppur", "Erode", "Salem"],
        "karnataka" => &["Bangalore", "Mysore", "Belgaum", "Hubli", "Mangalore"],
        "maharashtra" => &["Mumbai", "Pune", "Nagpur", "Aurangabad", "Nashik"],
        "punjab" => &["Amritsar", "Ludhiana", "Jalandhar", "Patiala", "Bathinda"],
        "rajasthan" => &["Jaipur", "Jodhpur", "Ajmer", "Bikaner", "Kota"],
        _ => &[],
    }
}
