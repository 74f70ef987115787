use serde::{Deserialize, Serialize};

/// A fixed member of the household roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roommate {
    pub id: u32,
    pub name: String,
    pub initials: String,
    /// Avatar color token, e.g. `#356496`
    pub color: String,
}

impl Roommate {
    pub fn new(id: u32, name: &str, initials: &str, color: &str) -> Self {
        Roommate {
            id,
            name: name.to_string(),
            initials: initials.to_string(),
            color: color.to_string(),
        }
    }

    /// First word of the name, used in chat previews ("Aaish: ...")
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// The static roster, immutable after load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    members: Vec<Roommate>,
}

impl Roster {
    pub fn new(members: Vec<Roommate>) -> Self {
        Roster { members }
    }

    pub fn members(&self) -> &[Roommate] {
        &self.members
    }

    pub fn by_id(&self, id: u32) -> Option<&Roommate> {
        self.members.iter().find(|r| r.id == id)
    }

    /// Expenses reference roommates by display name.
    pub fn by_name(&self, name: &str) -> Option<&Roommate> {
        self.members.iter().find(|r| r.name == name)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.by_id(id).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|r| r.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            Roommate::new(1, "Janvi Chauhan", "JC", "#356496"),
            Roommate::new(4, "Aaish Ahmed", "AA", "#e49449"),
        ])
    }

    #[test]
    fn lookup_by_id_and_name() {
        let r = roster();
        assert_eq!(r.by_id(4).unwrap().name, "Aaish Ahmed");
        assert_eq!(r.by_name("Janvi Chauhan").unwrap().id, 1);
        assert!(r.by_id(9).is_none());
        assert!(r.by_name("janvi chauhan").is_none());
    }

    #[test]
    fn first_name_is_first_word() {
        let r = roster();
        assert_eq!(r.by_id(4).unwrap().first_name(), "Aaish");
        assert_eq!(Roommate::new(7, "Cher", "C", "#000").first_name(), "Cher");
    }
}
