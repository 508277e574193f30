//! Bookable rooms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a room is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Lecture room.
    Classroom,
    /// Computer or science laboratory.
    Lab,
    /// Meeting room.
    Conference,
}

impl RoomType {
    /// Returns the stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classroom => "classroom",
            Self::Lab => "lab",
            Self::Conference => "conference",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classroom" => Ok(Self::Classroom),
            "lab" | "laboratory" => Ok(Self::Lab),
            "conference" => Ok(Self::Conference),
            other => Err(ValidationError::new(
                "room_type",
                format!("unknown room type '{other}' (expected classroom, lab or conference)"),
            )),
        }
    }
}

/// A stored room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Row id.
    pub id: i64,
    /// Room number as shown on the door.
    pub room_number: String,
    /// Building name.
    pub building: String,
    /// Seats.
    pub capacity: u32,
    /// Room type.
    pub room_type: RoomType,
    /// Free-text equipment list.
    pub equipment: Option<String>,
    /// Administrative flag, independent of bookings.
    pub is_available: bool,
}

impl Room {
    /// Returns `building room_number`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.building, self.room_number)
    }
}

/// Input for creating a room.
#[derive(Debug, Clone)]
pub struct NewRoom {
    /// Room number.
    pub room_number: String,
    /// Building name.
    pub building: String,
    /// Seats.
    pub capacity: u32,
    /// Room type.
    pub room_type: RoomType,
    /// Free-text equipment list.
    pub equipment: Option<String>,
}

impl NewRoom {
    /// Trims and checks the fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty number or building, or a zero
    /// capacity.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let room_number = self.room_number.trim().to_string();
        if room_number.is_empty() {
            return Err(ValidationError::new(
                "room_number",
                "room number must not be empty",
            ));
        }
        let building = self.building.trim().to_string();
        if building.is_empty() {
            return Err(ValidationError::new("building", "building must not be empty"));
        }
        if self.capacity == 0 {
            return Err(ValidationError::new("capacity", "capacity must be positive"));
        }
        Ok(Self {
            room_number,
            building,
            capacity: self.capacity,
            room_type: self.room_type,
            equipment: self
                .equipment
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        })
    }
}
