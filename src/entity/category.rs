use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::CliError;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Category {
    Food,
    Transport,
    Rent,
    Bills,
    Entertainment,
    Shopping,
    Healthcare,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Rent,
        Category::Bills,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Rent => "Rent",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CliError::UnknownCategory {
                name: s.to_string(),
            })
    }
}
