use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub squad_number: Option<u8>,
}

impl Player {
    pub fn new(name: String, squad_number: Option<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            squad_number,
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.squad_number {
            Some(number) => write!(f, "#{number} {}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
