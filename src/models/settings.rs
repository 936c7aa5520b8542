use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoundOption {
    #[serde(rename = "Standardno")]
    Standardno,
    #[default]
    #[serde(rename = "Ezan")]
    Ezan,
}

impl SoundOption {
    pub fn all() -> Vec<SoundOption> {
        vec![SoundOption::Standardno, SoundOption::Ezan]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundOption::Standardno => "Standardno",
            SoundOption::Ezan => "Ezan",
        }
    }
}

impl std::fmt::Display for SoundOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SoundOption {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standardno" | "default" => Ok(SoundOption::Standardno),
            "ezan" | "custom" => Ok(SoundOption::Ezan),
            _ => Err(anyhow::anyhow!("Unknown sound option: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Sarajevo,
    Mostar,
    Tuzla,
    Zenica,
    Bihac,
    BanjaLuka,
}

impl Location {
    pub fn all() -> Vec<Location> {
        vec![
            Location::Sarajevo,
            Location::Mostar,
            Location::Tuzla,
            Location::Zenica,
            Location::Bihac,
            Location::BanjaLuka,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Sarajevo => "Sarajevo",
            Location::Mostar => "Mostar",
            Location::Tuzla => "Tuzla",
            Location::Zenica => "Zenica",
            Location::Bihac => "Bihać",
            Location::BanjaLuka => "Banja Luka",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Location {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .replace('ć', "c")
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "sarajevo" => Ok(Location::Sarajevo),
            "mostar" => Ok(Location::Mostar),
            "tuzla" => Ok(Location::Tuzla),
            "zenica" => Ok(Location::Zenica),
            "bihac" => Ok(Location::Bihac),
            "banjaluka" => Ok(Location::BanjaLuka),
            _ => Err(anyhow::anyhow!("Unknown location: {}", s)),
        }
    }
}

/// User-selected scalars persisted alongside the notification flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedSettings {
    pub sound: SoundOption,
    pub location: Location,
}
