/// Locations loaded into an empty store at startup: one point per German state.
///
/// Tuples are `(name, latitude, longitude)`; coordinates are written exactly as
/// they should be sent to the weather provider.
pub const DEFAULT_LOCATIONS: &[(&str, &str, &str)] = &[
    ("Baden-Württemberg", "48.6616", "9.3501"),
    ("Bavaria", "48.7904", "11.4979"),
    ("Berlin", "52.5200", "13.4050"),
    ("Brandenburg", "52.4125", "12.5316"),
    ("Bremen", "53.0793", "8.8017"),
    ("Hamburg", "53.5511", "9.9937"),
    ("Hesse", "50.6521", "9.1624"),
    ("Lower Saxony", "52.6367", "9.8451"),
    ("Mecklenburg-Vorpommern", "53.6127", "12.4296"),
    ("North Rhine-Westphalia", "51.4332", "7.6616"),
    ("Rhineland-Palatinate", "49.9454", "7.4514"),
    ("Saarland", "49.3964", "7.0236"),
    ("Saxony", "51.1045", "13.2017"),
    ("Saxony-Anhalt", "51.9506", "11.6928"),
    ("Schleswig-Holstein", "54.2194", "9.6961"),
    ("Thuringia", "51.0101", "11.1637"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::derive_location_id;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_unique() {
        let ids: HashSet<String> = DEFAULT_LOCATIONS
            .iter()
            .map(|(_, lat, lon)| derive_location_id(lat, lon))
            .collect();
        assert_eq!(ids.len(), DEFAULT_LOCATIONS.len());
    }
}
