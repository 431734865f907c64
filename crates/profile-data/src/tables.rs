//! Fixed lookup tables used by the record generator and the email validator.
//!
//! The lists are ordered and never mutated; generation draws uniformly from
//! them.

/// Common Israeli first names: Hebrew, Arabic, and Russian-Israeli.
pub const FIRST_NAMES: &[&str] = &[
    // Hebrew
    "Moshe", "David", "Yosef", "Avraham", "Yaakov", "Yitzhak", "Noam", "Omer", "Eitan", "Amit",
    "Yonatan", "Ariel", "Avi", "Tal", "Amir", "Gal", "Idan", "Itay", "Nir", "Roi", "Lior",
    "Sara", "Rachel", "Leah", "Rivka", "Miriam", "Tamar", "Noa", "Yael", "Shira", "Maya",
    "Michal", "Ayelet", "Talia", "Avigail", "Hila", "Gili", "Roni", "Adi", "Lihi", "Shani",
    // Arabic
    "Mohammed", "Ahmad", "Ali", "Omar", "Ibrahim", "Yusuf", "Mahmoud", "Hassan", "Hussein",
    "Fatima", "Aisha", "Mariam", "Layla", "Zainab", "Nour", "Amira", "Rania", "Huda", "Samira",
    // Russian-Israeli
    "Alex", "Mikhail", "Boris", "Vladimir", "Dmitri", "Sergei", "Natalia", "Olga", "Irina",
    "Tatiana",
];

/// Common Israeli last names.
pub const LAST_NAMES: &[&str] = &[
    // Hebrew
    "Cohen", "Levi", "Mizrahi", "Peretz", "Biton", "Dahan", "Avraham", "Friedman", "Azoulay",
    "Amar", "Malka", "Gabay", "Ohayon", "Katz", "Shapiro", "Goldstein", "Rosenberg", "Weiss",
    "Hoffman", "Levy", "Ben-David", "Ben-Ami", "Israeli", "Golan", "Sharon", "Shalom", "Levin",
    "Berkowitz",
    // Arabic
    "Mansour", "Haddad", "Khoury", "Daoud", "Saleh", "Abbas", "Zidane", "Bishara", "Jabarin",
    "Zoabi",
    // Russian-Israeli
    "Ivanov", "Petrov", "Sokolov", "Smirnov", "Kuznetsov", "Popov", "Lebedev", "Novikov",
];

/// Israeli cities.
pub const CITIES: &[&str] = &[
    "Jerusalem",
    "Tel Aviv",
    "Haifa",
    "Rishon LeZion",
    "Petah Tikva",
    "Ashdod",
    "Netanya",
    "Beer Sheva",
    "Holon",
    "Bnei Brak",
    "Ramat Gan",
    "Rehovot",
    "Herzliya",
    "Kfar Saba",
    "Ra'anana",
    "Nazareth",
    "Eilat",
    "Tiberias",
    "Acre",
    "Nahariya",
    "Lod",
    "Ramla",
    "Ashkelon",
    "Bat Yam",
    "Beit Shemesh",
];

/// Email domains drawn for generated addresses.
pub const EMAIL_DOMAINS: &[&str] = &["gmail.com", "walla.co.il", "hotmail.com"];

/// Global providers accepted by the email validator in addition to
/// [`EMAIL_DOMAINS`].
pub const GLOBAL_EMAIL_DOMAINS: &[&str] =
    &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Domain suffixes accepted without further checks.
pub const ISRAELI_DOMAIN_SUFFIXES: &[&str] = &[".co.il", ".net.il", ".org.il"];

/// Top-level domains accepted for domains outside the allow-lists.
pub const ACCEPTED_TLDS: &[&str] = &["com", "net", "org", "edu", "gov", "mil", "io", "co", "me"];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FIRST_NAMES)]
    #[case(LAST_NAMES)]
    #[case(CITIES)]
    #[case(EMAIL_DOMAINS)]
    fn tables_are_non_empty(#[case] table: &[&str]) {
        assert!(!table.is_empty());
    }

    #[test]
    fn last_names_are_unique() {
        let unique: HashSet<_> = LAST_NAMES.iter().collect();
        assert_eq!(unique.len(), LAST_NAMES.len());
    }

    #[test]
    fn cities_are_unique() {
        let unique: HashSet<_> = CITIES.iter().collect();
        assert_eq!(unique.len(), CITIES.len());
    }
}
