/// A city the sources know how to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    /// Name passed to sources that search by free text
    pub name: &'static str,
    /// Agoda's numeric city id
    pub agoda_code: &'static str,
}

const CITIES: &[(&str, City)] = &[
    ("dhaka", City { name: "Dhaka", agoda_code: "1390" }),
    ("chittagong", City { name: "Chittagong", agoda_code: "512855" }),
    ("khulna", City { name: "Khulna", agoda_code: "513017" }),
    ("rajshahi", City { name: "Rajshahi", agoda_code: "671813" }),
    ("sylhet", City { name: "Sylhet", agoda_code: "513022" }),
    ("barisal", City { name: "Barisal", agoda_code: "700812" }),
    ("cox's bazar", City { name: "Cox's Bazar", agoda_code: "671817" }),
];

/// Case-insensitive lookup of a supported city
pub fn lookup(city: &str) -> Option<&'static City> {
    let wanted = city.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(key, _)| *key == wanted)
        .map(|(_, city)| city)
}
