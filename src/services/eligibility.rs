//! Geographic eligibility gate.
//!
//! A candidate is in scope when any one of three signals points to
//! Europe, checked in fixed priority order with short-circuit:
//! declared current location, university region, employer location.

use std::sync::Arc;

use crate::domain::models::{
    CandidateRecord, EligibilityDecision, NetworkProfile, WorldInstitution, WorldTable,
};

/// European country names recognized in location strings.
const EUROPEAN_COUNTRIES: &[&str] = &[
    "Albania", "Andorra", "Armenia", "Austria", "Azerbaijan", "Belarus",
    "Belgium", "Bosnia and Herzegovina", "Bulgaria", "Croatia", "Cyprus",
    "Czech Republic", "Czechia", "Denmark", "Estonia", "Finland", "France",
    "Georgia", "Germany", "Greece", "Hungary", "Iceland", "Ireland", "Italy",
    "Kazakhstan", "Kosovo", "Latvia", "Liechtenstein", "Lithuania", "Luxembourg",
    "Malta", "Moldova", "Monaco", "Montenegro", "Netherlands", "North Macedonia",
    "Norway", "Poland", "Portugal", "Romania", "Russia", "San Marino", "Serbia",
    "Slovakia", "Slovak Republic", "Slovenia", "Spain", "Sweden", "Switzerland",
    "Turkey", "Ukraine", "United Kingdom", "UK", "Vatican City",
];

/// Common European cities mapped to their country, expanding what a bare
/// city name in a location string can match.
const CITY_TO_COUNTRY: &[(&str, &str)] = &[
    ("paris", "France"), ("lyon", "France"), ("marseille", "France"),
    ("toulouse", "France"), ("bordeaux", "France"), ("lille", "France"),
    ("nice", "France"), ("nantes", "France"), ("strasbourg", "France"),
    ("rennes", "France"), ("grenoble", "France"), ("montpellier", "France"),
    ("london", "United Kingdom"), ("manchester", "United Kingdom"),
    ("birmingham", "United Kingdom"), ("edinburgh", "United Kingdom"),
    ("glasgow", "United Kingdom"), ("bristol", "United Kingdom"),
    ("cambridge", "United Kingdom"), ("oxford", "United Kingdom"),
    ("leeds", "United Kingdom"),
    ("berlin", "Germany"), ("munich", "Germany"), ("hamburg", "Germany"),
    ("frankfurt", "Germany"), ("cologne", "Germany"), ("düsseldorf", "Germany"),
    ("dusseldorf", "Germany"), ("stuttgart", "Germany"), ("dresden", "Germany"),
    ("leipzig", "Germany"),
    ("amsterdam", "Netherlands"), ("rotterdam", "Netherlands"), ("hague", "Netherlands"),
    ("madrid", "Spain"), ("barcelona", "Spain"), ("valencia", "Spain"),
    ("seville", "Spain"), ("bilbao", "Spain"), ("zaragoza", "Spain"),
    ("rome", "Italy"), ("milan", "Italy"), ("naples", "Italy"), ("turin", "Italy"),
    ("florence", "Italy"), ("bologna", "Italy"), ("venice", "Italy"),
    ("zurich", "Switzerland"), ("geneva", "Switzerland"), ("bern", "Switzerland"),
    ("lausanne", "Switzerland"), ("basel", "Switzerland"),
    ("stockholm", "Sweden"), ("gothenburg", "Sweden"), ("malmo", "Sweden"),
    ("oslo", "Norway"), ("bergen", "Norway"),
    ("copenhagen", "Denmark"), ("aarhus", "Denmark"),
    ("helsinki", "Finland"), ("tampere", "Finland"),
    ("brussels", "Belgium"), ("antwerp", "Belgium"), ("ghent", "Belgium"),
    ("vienna", "Austria"), ("graz", "Austria"), ("salzburg", "Austria"),
    ("warsaw", "Poland"), ("krakow", "Poland"), ("wroclaw", "Poland"),
    ("prague", "Czech Republic"), ("brno", "Czech Republic"),
    ("budapest", "Hungary"),
    ("bucharest", "Romania"), ("cluj", "Romania"),
    ("athens", "Greece"), ("thessaloniki", "Greece"),
    ("lisbon", "Portugal"), ("porto", "Portugal"),
    ("dublin", "Ireland"), ("cork", "Ireland"),
    ("kiev", "Ukraine"), ("kyiv", "Ukraine"),
    ("moscow", "Russia"), ("saint petersburg", "Russia"),
    ("istanbul", "Turkey"), ("ankara", "Turkey"),
    ("reykjavik", "Iceland"),
    ("luxembourg", "Luxembourg"),
    ("valletta", "Malta"),
    ("nicosia", "Cyprus"),
    ("tallinn", "Estonia"), ("riga", "Latvia"), ("vilnius", "Lithuania"),
    ("bratislava", "Slovakia"), ("ljubljana", "Slovenia"), ("zagreb", "Croatia"),
    ("belgrade", "Serbia"), ("sarajevo", "Bosnia and Herzegovina"),
    ("sofia", "Bulgaria"), ("skopje", "North Macedonia"), ("tirana", "Albania"),
    ("chisinau", "Moldova"), ("minsk", "Belarus"), ("tbilisi", "Georgia"),
    ("yerevan", "Armenia"), ("baku", "Azerbaijan"),
];

/// Exact (case-insensitive) membership in the European country list.
/// Used by the ranking-table region tooling; the location check above
/// is looser on purpose.
pub fn is_european_country(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    EUROPEAN_COUNTRIES.iter().any(|country| country.to_lowercase() == name)
}

/// The eligibility gate. Owns a reference to the world ranking table for
/// the university-region signal.
pub struct EligibilityFilter {
    world: Arc<WorldTable>,
}

impl EligibilityFilter {
    pub fn new(world: Arc<WorldTable>) -> Self {
        Self { world }
    }

    /// True if the location string names a European place.
    ///
    /// The string is split on commas/semicolons and each token is
    /// checked against the country list, the city table, and finally a
    /// country-name substring scan. The substring scan can over-match
    /// (a country name embedded in an unrelated phrase still passes);
    /// that soft-match behavior is intentional and pinned by tests.
    pub fn check_location(&self, location: &str) -> bool {
        if location.trim().is_empty() {
            return false;
        }
        location
            .replace(';', ",")
            .split(',')
            .map(|part| part.trim().to_lowercase())
            .any(|part| {
                if part.is_empty() {
                    return false;
                }
                if EUROPEAN_COUNTRIES.iter().any(|country| country.to_lowercase() == part) {
                    return true;
                }
                if CITY_TO_COUNTRY.iter().any(|(city, _)| *city == part) {
                    return true;
                }
                EUROPEAN_COUNTRIES
                    .iter()
                    .any(|country| part.contains(&country.to_lowercase()))
            })
    }

    /// True if the school fuzzy-matches a world-table entry whose
    /// recorded region is Europe.
    pub fn check_university(&self, school: &str) -> bool {
        self.world
            .confident_match(school)
            .is_some_and(WorldInstitution::in_europe)
    }

    /// First employer location that passes the location check, if any.
    pub fn check_employer<'a>(&self, profile: &'a NetworkProfile) -> Option<&'a str> {
        profile
            .experience_entries()
            .filter_map(|entry| entry.location.as_deref())
            .find(|location| self.check_location(location))
    }

    /// Evaluate all three signals (OR logic, first match wins).
    pub fn is_eligible(
        &self,
        candidate: &CandidateRecord,
        profile: &NetworkProfile,
    ) -> EligibilityDecision {
        // 1. Declared current location, falling back to the profile's.
        let mut location = candidate.current_location.trim();
        if location.is_empty() {
            location = profile.location.as_deref().unwrap_or("").trim();
        }
        if !location.is_empty() && self.check_location(location) {
            return EligibilityDecision::passed("current_location", location);
        }

        // 2. University region.
        let school = candidate.school.trim();
        if !school.is_empty() && self.check_university(school) {
            return EligibilityDecision::passed("university", school);
        }

        // 3. Employer location.
        if let Some(employer_location) = self.check_employer(profile) {
            return EligibilityDecision::passed("employer_location", employer_location);
        }

        EligibilityDecision::rejected()
    }
}
