use serde::{Deserialize, Serialize};

/// A payee the wallet can send money to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub display_name: String,
    /// Unique `$tag`.
    pub handle: String,
    pub avatar_initial: char,
    pub avatar_color: String,
}

impl Contact {
    pub fn new(display_name: &str, handle: &str, avatar_color: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            handle: handle.to_string(),
            avatar_initial: display_name.chars().next().unwrap_or('?'),
            avatar_color: avatar_color.to_string(),
        }
    }

    /// `Name $tag`, the text a picked dropdown entry leaves in the search box.
    pub fn label(&self) -> String {
        format!("{} {}", self.display_name, self.handle)
    }
}

const ROSTER: &[(&str, &str, &str)] = &[
    ("Kellen Bates", "$Voidosu", "#8e44ad"),
    ("Kate Howard", "$LKhowz", "#b2732b"),
    ("Julia Wilson", "$wilson8823", "#c0398f"),
    ("Joshua Aguilar", "$aguilarjoshua18", "#27ae60"),
    ("Haylee Walls", "$HayleeWalls", "#5dade2"),
    ("Cierra Shepard", "$brutallyhonestcc", "#e74c3c"),
    ("Camron Watkins", "$kambam3118", "#27ae60"),
    ("Morgan Lee", "$morganlee", "#f39c12"),
    ("Ava Patel", "$avapatel", "#16a085"),
    ("Ethan Kim", "$ethankim", "#2980b9"),
    ("Sophia Turner", "$sophiaturner", "#d35400"),
    ("Liam Smith", "$liamsmith", "#34495e"),
    ("Olivia Brown", "$oliviabrown", "#8e44ad"),
    ("Noah Johnson", "$noahjohnson", "#2ecc71"),
    ("Emma Davis", "$emmadavis", "#e67e22"),
    ("Mason Clark", "$masonclark", "#1abc9c"),
    ("Isabella Lewis", "$isabellalewis", "#9b59b6"),
];

/// The fixed set of payees, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Case-insensitive substring match on name or handle, original order kept.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                c.display_name.to_lowercase().contains(&needle)
                    || c.handle.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn find(&self, handle: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.handle == handle)
    }
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new(
            ROSTER
                .iter()
                .map(|(name, handle, color)| Contact::new(name, handle, color))
                .collect(),
        )
    }
}
