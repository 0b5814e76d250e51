use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DetectionClass {
    WaterHyacinth,
    Trash,
}

impl DetectionClass {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionClass::WaterHyacinth => "Water Hyacinth",
            DetectionClass::Trash => "Trash",
        }
    }

    /// RGB colour of the box and label drawn for this class.
    pub fn color(&self) -> [u8; 3] {
        match self {
            DetectionClass::WaterHyacinth => [0, 255, 0],
            DetectionClass::Trash => [255, 0, 0],
        }
    }
}

impl FromStr for DetectionClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WaterHyacinth" => Ok(DetectionClass::WaterHyacinth),
            "Trash" => Ok(DetectionClass::Trash),
            _ => Err(()),
        }
    }
}

impl Display for DetectionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            DetectionClass::WaterHyacinth => "WaterHyacinth",
            DetectionClass::Trash => "Trash",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_have_distinct_colors() {
        assert_ne!(DetectionClass::WaterHyacinth.color(), DetectionClass::Trash.color());
        assert_eq!(DetectionClass::Trash.color(), [255, 0, 0]);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for class in [DetectionClass::WaterHyacinth, DetectionClass::Trash] {
            assert_eq!(class.to_string().parse::<DetectionClass>(), Ok(class));
        }
        assert!("Rubbish".parse::<DetectionClass>().is_err());
    }
}
