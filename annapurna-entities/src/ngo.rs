use crate::{address::*, id::*};

/// A registered NGO that collects food donations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ngo {
    pub id: Id,
    pub org_name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
}

impl Ngo {
    const UNNAMED: &'static str = "NGO";

    /// The name to show, falls back to a generic label
    /// for organizations that registered without a name.
    pub fn display_name(&self) -> &str {
        let name = self.org_name.trim();
        if name.is_empty() {
            Self::UNNAMED
        } else {
            name
        }
    }

    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;

    #[test]
    fn display_name_of_unnamed_ngo() {
        let ngo = Ngo::build().org_name("  ").finish();
        assert_eq!("NGO", ngo.display_name());
        let ngo = Ngo::build().org_name(" Roti Bank ").finish();
        assert_eq!("Roti Bank", ngo.display_name());
    }

    #[test]
    fn ngo_without_address() {
        assert!(!Ngo::build().finish().has_address());
        assert!(!Ngo::build().address(" ").finish().has_address());
        assert!(Ngo::build().address("Ranjhi").finish().has_address());
    }
}
