use std::fmt;

/// Broad body style a free-text body description falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCategory {
    Suv,
    Sedan,
    Truck,
    Coupe,
    Wagon,
    Van,
    Hatchback,
    Convertible,
    Other,
}

impl BodyCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyCategory::Suv => "SUV",
            BodyCategory::Sedan => "Sedan",
            BodyCategory::Truck => "Truck",
            BodyCategory::Coupe => "Coupe",
            BodyCategory::Wagon => "Wagon",
            BodyCategory::Van => "Van",
            BodyCategory::Hatchback => "Hatchback",
            BodyCategory::Convertible => "Convertible",
            BodyCategory::Other => "Other",
        }
    }
}

impl fmt::Display for BodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, evaluated top to bottom. The first rule with a keyword
/// contained in the lowercased body text wins.
///
/// | Keywords               | Category    |
/// |------------------------|-------------|
/// | suv, crossover         | SUV         |
/// | sedan                  | Sedan       |
/// | truck, pickup          | Truck       |
/// | coupe                  | Coupe       |
/// | wagon                  | Wagon       |
/// | van, minivan           | Van         |
/// | hatchback              | Hatchback   |
/// | convertible            | Convertible |
static RULES: &[(&[&str], BodyCategory)] = &[
    (&["suv", "crossover"], BodyCategory::Suv),
    (&["sedan"], BodyCategory::Sedan),
    (&["truck", "pickup"], BodyCategory::Truck),
    (&["coupe"], BodyCategory::Coupe),
    (&["wagon"], BodyCategory::Wagon),
    (&["van", "minivan"], BodyCategory::Van),
    (&["hatchback"], BodyCategory::Hatchback),
    (&["convertible"], BodyCategory::Convertible),
];

/// Classifies a body description into a [`BodyCategory`], defaulting to `Other`.
pub fn classify_body(body: &str) -> BodyCategory {
    let body = body.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| body.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(BodyCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify_body("Crew Cab Pickup"), BodyCategory::Truck);
        assert_eq!(classify_body("Convertible Coupe"), BodyCategory::Coupe);
        assert_eq!(classify_body("G Sedan"), BodyCategory::Sedan);
        assert_eq!(classify_body("suv"), BodyCategory::Suv);
        assert_eq!(classify_body("Crossover"), BodyCategory::Suv);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify_body("HATCHBACK"), BodyCategory::Hatchback);
        assert_eq!(classify_body("Minivan"), BodyCategory::Van);
        assert_eq!(classify_body("E-Series Van"), BodyCategory::Van);
        assert_eq!(classify_body("CTS Wagon"), BodyCategory::Wagon);
    }

    #[test]
    fn test_classify_unmatched_is_other() {
        assert_eq!(classify_body("Cab Chassis"), BodyCategory::Other);
        assert_eq!(classify_body(""), BodyCategory::Other);
        assert_eq!(classify_body("Unknown"), BodyCategory::Other);
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(BodyCategory::Suv.to_string(), "SUV");
        assert_eq!(BodyCategory::Convertible.to_string(), "Convertible");
    }
}
