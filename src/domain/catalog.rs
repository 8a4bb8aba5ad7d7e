/// A product that can be ordered. Offerings are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareOffering {
    pub sku: &'static str,
    pub name: &'static str,
    pub vendor: &'static str,
}

const STANDARD_OFFERINGS: &[SoftwareOffering] = &[
    SoftwareOffering {
        sku: "MS-O365-E3",
        name: "Microsoft Office 365",
        vendor: "Microsoft",
    },
    SoftwareOffering {
        sku: "MS-TEAMS",
        name: "Microsoft Teams",
        vendor: "Microsoft",
    },
    SoftwareOffering {
        sku: "ZOOM-PRO",
        name: "Zoom",
        vendor: "Zoom Video Communications",
    },
    SoftwareOffering {
        sku: "ADOBE-CC",
        name: "Adobe Creative Cloud",
        vendor: "Adobe",
    },
    SoftwareOffering {
        sku: "SLACK-PRO",
        name: "Slack",
        vendor: "Salesforce",
    },
    SoftwareOffering {
        sku: "DROPBOX-BIZ",
        name: "Dropbox Business",
        vendor: "Dropbox",
    },
    SoftwareOffering {
        sku: "ATL-JIRA",
        name: "Jira Software",
        vendor: "Atlassian",
    },
];

/// Read-only list of offerings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy)]
pub struct SoftwareCatalog {
    offerings: &'static [SoftwareOffering],
}

impl SoftwareCatalog {
    pub const fn new(offerings: &'static [SoftwareOffering]) -> Self {
        Self { offerings }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_OFFERINGS)
    }

    pub fn offerings(&self) -> &'static [SoftwareOffering] {
        self.offerings
    }
}

impl Default for SoftwareCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn standard_catalog_lists_office_365() {
        let office = SoftwareCatalog::standard()
            .offerings()
            .iter()
            .find(|o| o.name == "Microsoft Office 365")
            .expect("listed");
        assert_eq!(office.vendor, "Microsoft");
    }

    #[test]
    fn standard_catalog_is_stable() {
        let first = SoftwareCatalog::standard().offerings();
        let second = SoftwareCatalog::default().offerings();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn skus_and_names_are_unique() {
        let offerings = SoftwareCatalog::standard().offerings();
        let skus: HashSet<_> = offerings.iter().map(|o| o.sku).collect();
        let names: HashSet<_> = offerings.iter().map(|o| o.name).collect();
        assert_eq!(skus.len(), offerings.len());
        assert_eq!(names.len(), offerings.len());
    }
}
