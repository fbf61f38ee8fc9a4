// 🗺️ Region Entity - static (code, name) enumeration
//
// Every sale belongs to exactly one region. The standard set is fixed, but
// the database tool reads the same pairs back from the Region table, so the
// collection can also be built from a list.

// ============================================================================
// REGION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Single-letter key used in file names and CSV rows
    pub code: String,

    /// Display name shown in reports
    pub name: String,
}

impl Region {
    pub fn new(code: &str, name: &str) -> Self {
        Region {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

// ============================================================================
// REGIONS
// ============================================================================

/// Ordered region lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Regions {
    regions: Vec<Region>,
}

impl Regions {
    /// The four regions every sales file may refer to
    pub fn standard() -> Self {
        Regions {
            regions: vec![
                Region::new("w", "West"),
                Region::new("m", "Mountain"),
                Region::new("c", "Central"),
                Region::new("e", "East"),
            ],
        }
    }

    pub fn from_list(regions: Vec<Region>) -> Self {
        Regions { regions }
    }

    /// Find a region by its code
    pub fn get(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Add a region unless its code is already taken
    pub fn add(&mut self, region: Region) {
        if !self.contains(&region.code) {
            self.regions.push(region);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// `['w', 'm', 'c', 'e']`
    pub fn codes_as_list(&self) -> String {
        format!("[{}]", self.quoted_codes())
    }

    /// `('w', 'm', 'c', 'e')`
    pub fn codes_as_tuple(&self) -> String {
        format!("({})", self.quoted_codes())
    }

    fn quoted_codes(&self) -> String {
        self.regions
            .iter()
            .map(|r| format!("'{}'", r.code))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Regions {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Regions {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_regions() {
        let regions = Regions::standard();

        assert_eq!(regions.len(), 4);
        assert_eq!(regions.codes(), vec!["w", "m", "c", "e"]);
        assert_eq!(regions.get("m").map(|r| r.name.as_str()), Some("Mountain"));
        assert!(regions.get("x").is_none());
        assert!(regions.get("W").is_none(), "codes are case-sensitive");
    }

    #[test]
    fn test_code_rendering() {
        let regions = Regions::standard();

        assert_eq!(regions.codes_as_list(), "['w', 'm', 'c', 'e']");
        assert_eq!(regions.codes_as_tuple(), "('w', 'm', 'c', 'e')");
    }

    #[test]
    fn test_add_region_ignores_duplicate_code() {
        let mut regions = Regions::standard();
        regions.add(Region::new("n", "North"));
        regions.add(Region::new("w", "Somewhere Else"));

        assert_eq!(regions.len(), 5);
        assert_eq!(regions.get("w").map(|r| r.name.as_str()), Some("West"));
        assert_eq!(regions.codes_as_list(), "['w', 'm', 'c', 'e', 'n']");
    }
}
