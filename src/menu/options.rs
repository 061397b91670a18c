//! Menu entries and input parsing

use crate::error::LifeError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Load,
    RandomStable,
    Random,
    Print,
    Draw,
    Exit,
}

impl MenuOption {
    /// Entries in the order they are listed
    pub const ALL: [MenuOption; 6] = [
        MenuOption::Load,
        MenuOption::RandomStable,
        MenuOption::Random,
        MenuOption::Print,
        MenuOption::Draw,
        MenuOption::Exit,
    ];

    /// Key the user types to pick this entry
    pub fn key(self) -> &'static str {
        match self {
            MenuOption::Load => "1",
            MenuOption::RandomStable => "2",
            MenuOption::Random => "3",
            MenuOption::Print => "8",
            MenuOption::Draw => "9",
            MenuOption::Exit => "0",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuOption::Load => "Load world from file",
            MenuOption::RandomStable => "Generate random world that is stable",
            MenuOption::Random => "Generate random world",
            MenuOption::Print => "Print to console the current selected world",
            MenuOption::Draw => "Draw current selected world",
            MenuOption::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]\t{}", self.key(), self.description())
    }
}

impl FromStr for MenuOption {
    type Err = LifeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let choice = input.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|option| option.key() == choice)
            .ok_or(LifeError::InvalidInput(choice))
    }
}
